//! Graph builder for loading snapshots.
//!
//! Building happens in two passes:
//! 1. Add every node, registering it under its `(label, id)` key
//! 2. Resolve edge endpoints against those keys and add the edges
//!
//! This lets a snapshot list its edges before the nodes they refer to.

use crate::edge::{Edge, EdgeKind};
use crate::error::{GraphError, Result};
use crate::graph::{NodeId, SocialGraph};
use serde::{Deserialize, Serialize};
use snb_core::{Node, NodeLabel};
use std::io::Read;
use tracing::info;

/// Addresses a node by label and entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    pub label: NodeLabel,
    pub id: i64,
}

impl NodeRef {
    pub fn new(label: NodeLabel, id: i64) -> Self {
        Self { label, id }
    }
}

/// An edge whose endpoints are given by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub kind: EdgeKind,
    pub from: NodeRef,
    pub to: NodeRef,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl SnapshotEdge {
    pub fn new(kind: EdgeKind, from: NodeRef, to: NodeRef) -> Self {
        Self {
            kind,
            from,
            to,
            timestamp: None,
            year: None,
        }
    }

    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn in_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}

/// The JSON import format: a list of nodes and a list of keyed edges.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<SnapshotEdge>,
}

impl GraphSnapshot {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Builds a SocialGraph from keyed nodes and edges.
pub struct GraphBuilder {
    graph: SocialGraph,
    pending_edges: Vec<SnapshotEdge>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            graph: SocialGraph::new(),
            pending_edges: Vec::new(),
        }
    }

    /// Adds a node. Keys must be unique within a snapshot.
    pub fn add_node(&mut self, node: Node) -> Result<NodeId> {
        let (label, id) = (node.label(), node.id());
        if self.graph.find_by_id(label, id).is_some() {
            return Err(GraphError::DuplicateNode { label, id });
        }
        Ok(self.graph.add_node(node))
    }

    /// Queues an edge; endpoints are resolved in [`GraphBuilder::build`].
    pub fn add_edge(&mut self, edge: SnapshotEdge) {
        self.pending_edges.push(edge);
    }

    /// Adds every node and edge of a snapshot.
    pub fn add_snapshot(&mut self, snapshot: GraphSnapshot) -> Result<()> {
        for node in snapshot.nodes {
            self.add_node(node)?;
        }
        self.pending_edges.extend(snapshot.edges);
        Ok(())
    }

    /// Resolves all edges and returns the finished graph.
    pub fn build(mut self) -> Result<SocialGraph> {
        for pending in std::mem::take(&mut self.pending_edges) {
            let from = self.resolve(pending.from)?;
            let to = self.resolve(pending.to)?;
            self.graph.add_edge(
                from,
                to,
                Edge {
                    kind: pending.kind,
                    timestamp: pending.timestamp,
                    year: pending.year,
                },
            );
        }

        info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "built graph"
        );
        Ok(self.graph)
    }

    fn resolve(&self, key: NodeRef) -> Result<NodeId> {
        self.graph
            .find_by_id(key.label, key.id)
            .ok_or(GraphError::MissingNode {
                label: key.label,
                id: key.id,
            })
    }
}

impl SocialGraph {
    /// Builds a graph from a JSON snapshot.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self> {
        let mut builder = GraphBuilder::new();
        builder.add_snapshot(snapshot)?;
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Direction;

    const SNAPSHOT: &str = r#"{
        "nodes": [
            {"Person": {"id": 1, "firstName": "Ada", "lastName": "Lovelace"}},
            {"City": {"id": 10, "name": "London"}}
        ],
        "edges": [
            {"kind": "IS_LOCATED_IN",
             "from": {"label": "Person", "id": 1},
             "to": {"label": "City", "id": 10}}
        ]
    }"#;

    #[test]
    fn test_load_snapshot() {
        let snapshot = GraphSnapshot::from_reader(SNAPSHOT.as_bytes()).unwrap();
        let graph = SocialGraph::from_snapshot(snapshot).unwrap();

        let ada = graph.find_by_id(NodeLabel::Person, 1).unwrap();
        let london = graph.find_by_name(NodeLabel::City, "London").unwrap();
        assert!(graph.has_neighbor(ada, london, EdgeKind::IsLocatedIn, Direction::Outgoing));
    }

    #[test]
    fn test_edges_before_nodes() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(
            SnapshotEdge::new(
                EdgeKind::Knows,
                NodeRef::new(NodeLabel::Person, 1),
                NodeRef::new(NodeLabel::Person, 2),
            )
            .at(99),
        );
        builder
            .add_node(Node::Person(snb_core::Person::new(1, "a", "a")))
            .unwrap();
        builder
            .add_node(Node::Person(snb_core::Person::new(2, "b", "b")))
            .unwrap();

        let graph = builder.build().unwrap();
        let a = graph.find_by_id(NodeLabel::Person, 1).unwrap();
        let (_, edge) = graph
            .neighbors(a, EdgeKind::Knows, Direction::Both)
            .next()
            .unwrap();
        assert_eq!(edge.timestamp, Some(99));
    }

    #[test]
    fn test_missing_endpoint() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(SnapshotEdge::new(
            EdgeKind::Knows,
            NodeRef::new(NodeLabel::Person, 1),
            NodeRef::new(NodeLabel::Person, 2),
        ));
        assert!(matches!(
            builder.build(),
            Err(GraphError::MissingNode { id: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_node() {
        let mut builder = GraphBuilder::new();
        let tag = Node::Tag(snb_core::Tag::new(1, "t"));
        builder.add_node(tag.clone()).unwrap();
        assert!(matches!(
            builder.add_node(tag),
            Err(GraphError::DuplicateNode { .. })
        ));
    }
}
