use crate::graph::NodeId;
use snb_core::NodeLabel;
use std::collections::HashMap;

/// Lookup tables from entity keys to graph nodes.
///
/// Ids are only unique per label, so every key is paired with its label.
/// Duplicates are tolerated: a key maps to every node registered under
/// it, oldest first.
#[derive(Debug, Default, Clone)]
pub struct LabelIndex {
    /// Map of (label, id) to nodes
    by_id: HashMap<(NodeLabel, i64), Vec<NodeId>>,

    /// Map of (label, name) to nodes, for labels with a `name` property
    by_name: HashMap<(NodeLabel, String), Vec<NodeId>>,

    /// All nodes of each label, in insertion order
    by_label: HashMap<NodeLabel, Vec<NodeId>>,
}

impl LabelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node under its keys.
    pub fn insert(&mut self, label: NodeLabel, id: i64, name: Option<&str>, node: NodeId) {
        self.by_id.entry((label, id)).or_default().push(node);
        if let Some(name) = name {
            self.by_name
                .entry((label, name.to_string()))
                .or_default()
                .push(node);
        }
        self.by_label.entry(label).or_default().push(node);
    }

    /// Forgets a node previously registered with the same keys.
    pub fn remove(&mut self, label: NodeLabel, id: i64, name: Option<&str>, node: NodeId) {
        if let Some(nodes) = self.by_id.get_mut(&(label, id)) {
            nodes.retain(|&n| n != node);
            if nodes.is_empty() {
                self.by_id.remove(&(label, id));
            }
        }
        if let Some(name) = name {
            let key = (label, name.to_string());
            if let Some(nodes) = self.by_name.get_mut(&key) {
                nodes.retain(|&n| n != node);
                if nodes.is_empty() {
                    self.by_name.remove(&key);
                }
            }
        }
        if let Some(nodes) = self.by_label.get_mut(&label) {
            nodes.retain(|&n| n != node);
        }
    }

    pub fn resolve(&self, label: NodeLabel, id: i64) -> Option<NodeId> {
        self.by_id.get(&(label, id))?.first().copied()
    }

    pub fn resolve_name(&self, label: NodeLabel, name: &str) -> Option<NodeId> {
        self.by_name.get(&(label, name.to_string()))?.first().copied()
    }

    pub fn nodes_with(&self, label: NodeLabel) -> &[NodeId] {
        self.by_label.get(&label).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.by_id.clear();
        self.by_name.clear();
        self.by_label.clear();
    }
}
