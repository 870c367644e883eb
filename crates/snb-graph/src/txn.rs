//! Scoped transactions over a shared graph.
//!
//! [`Database`] guards the graph with a reader-writer lock. Reads take a
//! [`ReadTxn`] and may run concurrently; writes take a [`WriteTxn`], which
//! is exclusive. Both release the lock when dropped, so every early return
//! in a query releases it too.
//!
//! A write transaction records every node and edge it creates. Dropping it
//! without calling [`WriteTxn::commit`] (an error propagated with `?`, a
//! panic) removes them again, so a failed mutation leaves no trace.
//!
//! Committing saves the whole graph. A run of many writes can hold those
//! saves back with [`Database::batch`] and save once at the end.

use crate::edge::Edge;
use crate::error::{GraphError, Result};
use crate::graph::{NodeId, SocialGraph};
use crate::store::GraphStore;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use petgraph::stable_graph::EdgeIndex;
use snb_core::{Node, NodeLabel};
use std::ops::Deref;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// A graph plus its optional persistent store.
pub struct Database {
    graph: RwLock<SocialGraph>,
    store: Option<GraphStore>,
    deferred: AtomicBool,
}

impl Database {
    /// Wraps a graph that lives only in memory.
    pub fn in_memory(graph: SocialGraph) -> Self {
        Self {
            graph: RwLock::new(graph),
            store: None,
            deferred: AtomicBool::new(false),
        }
    }

    /// Opens the store at `path`, loading the graph saved there or starting
    /// empty. Committed writes are saved back.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = GraphStore::open(path.as_ref())?;
        let graph = match store.load_graph()? {
            Some(graph) => graph,
            None => {
                info!(path = %path.as_ref().display(), "starting empty graph");
                SocialGraph::new()
            }
        };
        Ok(Self {
            graph: RwLock::new(graph),
            store: Some(store),
            deferred: AtomicBool::new(false),
        })
    }

    /// Opens the store at `path` and replaces its contents with `graph`.
    pub fn create<P: AsRef<Path>>(path: P, graph: SocialGraph) -> Result<Self> {
        let store = GraphStore::open(path)?;
        store.save_graph(&graph)?;
        Ok(Self {
            graph: RwLock::new(graph),
            store: Some(store),
            deferred: AtomicBool::new(false),
        })
    }

    /// Begins a read transaction.
    pub fn read(&self) -> ReadTxn<'_> {
        ReadTxn {
            guard: self.graph.read(),
        }
    }

    /// Begins a write transaction. Blocks until all readers are done.
    pub fn write(&self) -> WriteTxn<'_> {
        WriteTxn {
            guard: self.graph.write(),
            store: self
                .store
                .as_ref()
                .filter(|_| !self.deferred.load(Ordering::Acquire)),
            created_nodes: Vec::new(),
            created_edges: Vec::new(),
            committed: false,
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// Holds back the per-commit save until the returned batch finishes or
    /// is dropped. Commits inside the batch only change the graph in memory.
    pub fn batch(&self) -> SaveBatch<'_> {
        self.deferred.store(true, Ordering::Release);
        SaveBatch {
            db: self,
            finished: false,
        }
    }

    /// Saves the graph to the store, if there is one.
    pub fn save(&self) -> Result<()> {
        if let Some(store) = &self.store {
            store.save_graph(&self.graph.read())?;
        }
        Ok(())
    }
}

/// Deferred saving for a run of write transactions.
pub struct SaveBatch<'a> {
    db: &'a Database,
    finished: bool,
}

impl SaveBatch<'_> {
    /// Saves everything committed during the batch.
    pub fn finish(mut self) -> Result<()> {
        self.finished = true;
        self.db.deferred.store(false, Ordering::Release);
        self.db.save()
    }
}

impl Drop for SaveBatch<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.db.deferred.store(false, Ordering::Release);
        if let Err(err) = self.db.save() {
            warn!(error = %err, "failed to save batched writes");
        }
    }
}

/// Shared access to the graph for the lifetime of the guard.
pub struct ReadTxn<'a> {
    guard: RwLockReadGuard<'a, SocialGraph>,
}

impl Deref for ReadTxn<'_> {
    type Target = SocialGraph;

    fn deref(&self) -> &SocialGraph {
        &self.guard
    }
}

/// Exclusive access to the graph with all-or-nothing writes.
pub struct WriteTxn<'a> {
    guard: RwLockWriteGuard<'a, SocialGraph>,
    store: Option<&'a GraphStore>,
    created_nodes: Vec<NodeId>,
    created_edges: Vec<EdgeIndex>,
    committed: bool,
}

impl WriteTxn<'_> {
    /// Creates a node that is removed again unless the transaction commits.
    pub fn create_node(&mut self, node: Node) -> NodeId {
        let index = self.guard.add_node(node);
        self.created_nodes.push(index);
        index
    }

    /// Creates an edge that is removed again unless the transaction commits.
    pub fn create_edge(&mut self, from: NodeId, to: NodeId, edge: Edge) -> EdgeIndex {
        let index = self.guard.add_edge(from, to, edge);
        self.created_edges.push(index);
        index
    }

    /// Resolves a referenced node, failing if it does not exist.
    pub fn require(&self, label: NodeLabel, id: i64) -> Result<NodeId> {
        self.guard
            .find_by_id(label, id)
            .ok_or(GraphError::MissingNode { label, id })
    }

    /// Makes the writes permanent, saving the graph if the database has a
    /// store. If saving fails the writes are rolled back.
    ///
    /// The save rewrites the whole graph, so outside a [`Database::batch`]
    /// every commit costs time proportional to the graph size.
    pub fn commit(mut self) -> Result<()> {
        if let Some(store) = self.store {
            store.save_graph(&self.guard)?;
        }
        debug!(
            nodes = self.created_nodes.len(),
            edges = self.created_edges.len(),
            "committed"
        );
        self.committed = true;
        Ok(())
    }

    fn rollback(&mut self) {
        for edge in self.created_edges.drain(..).rev() {
            self.guard.remove_edge(edge);
        }
        for node in self.created_nodes.drain(..).rev() {
            self.guard.remove_node(node);
        }
    }
}

impl Deref for WriteTxn<'_> {
    type Target = SocialGraph;

    fn deref(&self) -> &SocialGraph {
        &self.guard
    }
}

impl Drop for WriteTxn<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if !self.created_nodes.is_empty() || !self.created_edges.is_empty() {
            warn!(
                nodes = self.created_nodes.len(),
                edges = self.created_edges.len(),
                "rolling back uncommitted writes"
            );
            self.rollback();
        }
    }
}
