//! Core graph data structure.
//!
//! The SocialGraph wraps petgraph and adds indexes for fast lookups.
//! Everything else in the crate works against it.

use crate::edge::{Direction, Edge, EdgeKind};
use crate::error::{GraphError, Result};
use crate::index::LabelIndex;
use crate::traversal::Traversal;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use snb_core::{Node, NodeLabel, Property};
use std::collections::{BTreeMap, HashSet};

/// Unique identifier for a node in the graph.
pub type NodeId = NodeIndex;

/// The social network property graph.
///
/// Nodes are entities, edges are typed relationships. The graph is a
/// stable graph so that node and edge handles survive the removals done
/// when a write transaction rolls back.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SocialGraph {
    /// The underlying petgraph graph.
    pub(crate) graph: StableDiGraph<Node, Edge>,

    /// Entity lookups. Not persisted; rebuilt after loading.
    #[serde(skip)]
    index: LabelIndex,
}

impl SocialGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and registers it in the indexes.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let label = node.label();
        let id = node.id();
        let name = node.name().map(str::to_string);

        let index = self.graph.add_node(node);
        self.index.insert(label, id, name.as_deref(), index);

        index
    }

    /// Adds an edge between two nodes.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, edge: Edge) -> EdgeIndex {
        self.graph.add_edge(from, to, edge)
    }

    /// Removes a node together with its edges.
    pub(crate) fn remove_node(&mut self, index: NodeId) -> Option<Node> {
        let node = self.graph.remove_node(index)?;
        self.index
            .remove(node.label(), node.id(), node.name(), index);
        Some(node)
    }

    pub(crate) fn remove_edge(&mut self, index: EdgeIndex) -> Option<Edge> {
        self.graph.remove_edge(index)
    }

    /// Rebuilds the lookup indexes from the stored nodes.
    pub(crate) fn reindex(&mut self) {
        self.index.clear();
        for index in self.graph.node_indices() {
            let node = &self.graph[index];
            self.index.insert(node.label(), node.id(), node.name(), index);
        }
    }

    /// Gets a node by its graph index.
    pub fn node(&self, index: NodeId) -> Option<&Node> {
        self.graph.node_weight(index)
    }

    /// Returns the entity id of a node, or -1 for a stale handle.
    pub fn entity_id(&self, index: NodeId) -> i64 {
        self.node(index).map_or(-1, Node::id)
    }

    /// Finds a node by label and entity id.
    pub fn find_by_id(&self, label: NodeLabel, id: i64) -> Option<NodeId> {
        self.index.resolve(label, id)
    }

    /// Finds a tag, tag class, place or organisation by name.
    pub fn find_by_name(&self, label: NodeLabel, name: &str) -> Option<NodeId> {
        self.index.resolve_name(label, name)
    }

    /// Finds any node of a label whose property equals `value`.
    ///
    /// `id` and `name` go through the indexes; other keys scan the label.
    pub fn find_by_property(&self, label: NodeLabel, key: &str, value: &Property) -> Option<NodeId> {
        match (key, value) {
            ("id", Property::Int(id)) => self.find_by_id(label, *id),
            ("name", Property::Text(name)) => self.find_by_name(label, name),
            _ => self.nodes_with_label(label).find(|&index| {
                self.node(index)
                    .and_then(|node| node.property(key))
                    .as_ref()
                    == Some(value)
            }),
        }
    }

    /// Finds a message by id, looking at comments first.
    pub fn find_message(&self, id: i64) -> Option<NodeId> {
        self.find_by_id(NodeLabel::Comment, id)
            .or_else(|| self.find_by_id(NodeLabel::Post, id))
    }

    /// Iterates over all nodes carrying a label.
    pub fn nodes_with_label(&self, label: NodeLabel) -> impl Iterator<Item = NodeId> + '_ {
        self.index.nodes_with(label).iter().copied()
    }

    /// Iterates over the nodes reached from `node` through edges of `kind`,
    /// together with the edge followed.
    pub fn neighbors(
        &self,
        node: NodeId,
        kind: EdgeKind,
        direction: Direction,
    ) -> impl Iterator<Item = (NodeId, &Edge)> + '_ {
        let graph = &self.graph;
        direction.petgraph().iter().flat_map(move |&dir| {
            graph
                .edges_directed(node, dir)
                .filter(move |edge| graph[edge.id()].kind == kind)
                .map(move |edge| {
                    let other = if edge.source() == node {
                        edge.target()
                    } else {
                        edge.source()
                    };
                    (other, &graph[edge.id()])
                })
        })
    }

    /// Returns the endpoint of the first matching edge.
    ///
    /// Only meaningful where the schema allows at most one such edge.
    pub fn neighbor(&self, node: NodeId, kind: EdgeKind, direction: Direction) -> Option<NodeId> {
        self.neighbors(node, kind, direction)
            .next()
            .map(|(other, _)| other)
    }

    /// Checks whether `candidate` is reachable from `node` in one hop.
    pub fn has_neighbor(
        &self,
        node: NodeId,
        candidate: NodeId,
        kind: EdgeKind,
        direction: Direction,
    ) -> bool {
        self.neighbors(node, kind, direction)
            .any(|(other, _)| other == candidate)
    }

    /// Follows a chain of `kind` edges until none remain and returns the
    /// last node reached.
    ///
    /// Fails with [`GraphError::Cycle`] if the chain revisits a node.
    pub fn ancestor_chain(&self, node: NodeId, kind: EdgeKind, direction: Direction) -> Result<NodeId> {
        let mut visited = HashSet::new();
        visited.insert(node);

        let mut current = node;
        while let Some(next) = self.neighbor(current, kind, direction) {
            if !visited.insert(next) {
                return Err(GraphError::Cycle {
                    kind,
                    id: self.entity_id(next),
                });
            }
            current = next;
        }

        Ok(current)
    }

    /// Depth-first search for `ancestor` along `kind` edges. A node is its
    /// own descendant.
    pub fn is_descendant_of(
        &self,
        node: NodeId,
        ancestor: NodeId,
        kind: EdgeKind,
        direction: Direction,
    ) -> bool {
        Traversal::new(kind, direction)
            .depth_first()
            .walk(self, node)
            .any(|step| step.node == ancestor)
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }
}

/// Graph statistics for the stats command.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes_by_label: BTreeMap<NodeLabel, usize>,
    pub edges_by_kind: BTreeMap<EdgeKind, usize>,
}

impl SocialGraph {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        let mut nodes_by_label = BTreeMap::new();
        for node in self.graph.node_weights() {
            *nodes_by_label.entry(node.label()).or_insert(0) += 1;
        }
        let mut edges_by_kind = BTreeMap::new();
        for edge in self.graph.edge_weights() {
            *edges_by_kind.entry(edge.kind).or_insert(0) += 1;
        }

        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            nodes_by_label,
            edges_by_kind,
        }
    }
}
