//! Shortest paths between people.
//!
//! Unweighted searches are plain breadth-first walks. The weighted variant
//! enumerates every shortest `KNOWS` path and scores each hop by how much
//! the two people reply to one another.

use crate::edge::{Direction, EdgeKind};
use crate::graph::{NodeId, SocialGraph};
use crate::traversal::Traversal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A shortest path with its interaction weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedPath {
    pub nodes: Vec<NodeId>,
    pub weight: f64,
}

impl SocialGraph {
    /// Hop count of the shortest path from `from` to `to`, `None` when
    /// unreachable.
    pub fn shortest_path_length(
        &self,
        from: NodeId,
        to: NodeId,
        kind: EdgeKind,
        direction: Direction,
    ) -> Option<usize> {
        Traversal::new(kind, direction)
            .walk(self, from)
            .find(|step| step.node == to)
            .map(|step| step.depth)
    }

    /// Every shortest path from `from` to `to`, as node sequences.
    pub fn all_shortest_paths(
        &self,
        from: NodeId,
        to: NodeId,
        kind: EdgeKind,
        direction: Direction,
    ) -> Vec<Vec<NodeId>> {
        if from == to {
            return vec![vec![from]];
        }

        // Layered BFS keeping every predecessor on a shortest route.
        let mut depth: HashMap<NodeId, usize> = HashMap::new();
        let mut preds: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        depth.insert(from, 0);

        let mut layer = vec![from];
        let mut level = 0;
        while !layer.is_empty() && !depth.contains_key(&to) {
            let mut next_layer = Vec::new();
            for &node in &layer {
                for (other, _) in self.neighbors(node, kind, direction) {
                    match depth.get(&other) {
                        None => {
                            depth.insert(other, level + 1);
                            preds.entry(other).or_default().push(node);
                            next_layer.push(other);
                        }
                        Some(&d) if d == level + 1 => {
                            let entry = preds.entry(other).or_default();
                            if !entry.contains(&node) {
                                entry.push(node);
                            }
                        }
                        Some(_) => {}
                    }
                }
            }
            layer = next_layer;
            level += 1;
        }

        if !depth.contains_key(&to) {
            return Vec::new();
        }

        let mut paths = Vec::new();
        let mut stack = vec![vec![to]];
        while let Some(partial) = stack.pop() {
            let head = partial[partial.len() - 1];
            if head == from {
                let mut path = partial;
                path.reverse();
                paths.push(path);
                continue;
            }
            for &pred in preds.get(&head).map(Vec::as_slice).unwrap_or(&[]) {
                let mut extended = partial.clone();
                extended.push(pred);
                stack.push(extended);
            }
        }

        paths
    }

    /// Reply engagement between two people, in both directions.
    ///
    /// Each comment by one of them replying to a message by the other adds
    /// 1.0 when the replied-to message is a post and 0.5 when it is a
    /// comment.
    pub fn interaction_weight(&self, a: NodeId, b: NodeId) -> f64 {
        self.reply_weight(a, b) + self.reply_weight(b, a)
    }

    fn reply_weight(&self, replier: NodeId, author: NodeId) -> f64 {
        let mut weight = 0.0;
        for message in self.messages_of(replier) {
            if self.node(message).map_or(true, |m| m.is_post()) {
                continue;
            }
            let Some(parent) = self.parent_of(message) else {
                continue;
            };
            if self.creator_of(parent) != Some(author) {
                continue;
            }
            weight += if self.node(parent).map_or(false, |p| p.is_post()) {
                1.0
            } else {
                0.5
            };
        }
        weight
    }

    /// All shortest `KNOWS` paths between two people, heaviest first.
    ///
    /// Paths of equal weight are ordered by the entity ids along them,
    /// compared element by element.
    pub fn weighted_shortest_paths(&self, from: NodeId, to: NodeId) -> Vec<WeightedPath> {
        let paths = self.all_shortest_paths(from, to, EdgeKind::Knows, Direction::Both);

        let mut pair_weights: HashMap<(NodeId, NodeId), f64> = HashMap::new();
        let mut weighted: Vec<(Vec<i64>, WeightedPath)> = paths
            .into_iter()
            .map(|nodes| {
                let weight: f64 = nodes
                    .windows(2)
                    .map(|pair| {
                        let key = if pair[0] < pair[1] {
                            (pair[0], pair[1])
                        } else {
                            (pair[1], pair[0])
                        };
                        *pair_weights
                            .entry(key)
                            .or_insert_with(|| self.interaction_weight(key.0, key.1))
                    })
                    .sum();
                let ids = nodes.iter().map(|&n| self.entity_id(n)).collect();
                (ids, WeightedPath { nodes, weight })
            })
            .collect();

        weighted.sort_by(|(ids_a, a), (ids_b, b)| {
            b.weight
                .total_cmp(&a.weight)
                .then_with(|| ids_a.cmp(ids_b))
        });

        debug!(
            paths = weighted.len(),
            pairs = pair_weights.len(),
            "weighted shortest paths"
        );

        weighted.into_iter().map(|(_, path)| path).collect()
    }
}
