//! Bounded-depth walks over typed edges.
//!
//! A [`Traversal`] describes the walk (edge kind, direction, order, depth
//! window and an optional node filter); [`Traversal::walk`] runs it lazily
//! from a start node.
//!
//! Breadth-first walks visit every node exactly once, at its minimum hop
//! distance from the start. The depth window and the filter only decide
//! which visited nodes are *returned*: expansion continues through
//! rejected nodes, and only `max_depth` stops it. Asking for
//! `at_depth(2)` over `KNOWS` therefore yields friends-of-friends and
//! never the start or a direct friend.

use crate::edge::{Direction, EdgeKind};
use crate::graph::{NodeId, SocialGraph};
use snb_core::Node;
use std::collections::{HashMap, HashSet, VecDeque};

/// Visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Level by level; depths are shortest hop counts.
    BreadthFirst,
    /// Along one branch first. A node is returned once, with the depth of
    /// the branch it was first reached on, but it is expanded again whenever
    /// a shorter branch reaches it, so a `max_depth` cap never hides a node
    /// that lies within it.
    DepthFirst,
}

type NodeFilter<'a> = Box<dyn Fn(&Node) -> bool + 'a>;

/// A description of a walk.
pub struct Traversal<'a> {
    kind: EdgeKind,
    direction: Direction,
    order: Order,
    min_depth: usize,
    max_depth: Option<usize>,
    exclude_start: bool,
    filter: Option<NodeFilter<'a>>,
}

impl<'a> Traversal<'a> {
    /// Breadth-first over `kind` edges, unbounded, start included.
    pub fn new(kind: EdgeKind, direction: Direction) -> Self {
        Self {
            kind,
            direction,
            order: Order::BreadthFirst,
            min_depth: 0,
            max_depth: None,
            exclude_start: false,
            filter: None,
        }
    }

    pub fn depth_first(mut self) -> Self {
        self.order = Order::DepthFirst;
        self
    }

    pub fn breadth_first(mut self) -> Self {
        self.order = Order::BreadthFirst;
        self
    }

    /// Stop expanding beyond `depth` hops.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Only return nodes at least `depth` hops away.
    pub fn min_depth(mut self, depth: usize) -> Self {
        self.min_depth = depth;
        self
    }

    /// Only return nodes exactly `depth` hops away.
    pub fn at_depth(self, depth: usize) -> Self {
        self.min_depth(depth).max_depth(depth)
    }

    pub fn exclude_start(mut self) -> Self {
        self.exclude_start = true;
        self
    }

    /// Only return nodes accepted by `filter`. Rejected nodes are still
    /// expanded.
    pub fn filter(mut self, filter: impl Fn(&Node) -> bool + 'a) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Starts the walk.
    pub fn walk(self, graph: &'a SocialGraph, start: NodeId) -> Walk<'a> {
        let mut visited = HashSet::new();
        visited.insert(start);

        let mut frontier = VecDeque::new();
        frontier.push_back((start, 0, None));

        let mut depths = HashMap::new();
        depths.insert(start, 0);

        Walk {
            graph,
            traversal: self,
            start,
            frontier,
            visited,
            depths,
            parents: HashMap::new(),
        }
    }

    fn accepts(&self, node: Option<&Node>, depth: usize, is_start: bool) -> bool {
        if is_start && self.exclude_start {
            return false;
        }
        if depth < self.min_depth {
            return false;
        }
        match (&self.filter, node) {
            (Some(filter), Some(node)) => filter(node),
            (Some(_), None) => false,
            (None, _) => true,
        }
    }
}

/// One node reached by a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub node: NodeId,
    pub depth: usize,
    /// The node this one was reached from; `None` for the start.
    pub parent: Option<NodeId>,
}

/// A running walk. Yields [`Step`]s lazily.
pub struct Walk<'a> {
    graph: &'a SocialGraph,
    traversal: Traversal<'a>,
    start: NodeId,
    frontier: VecDeque<(NodeId, usize, Option<NodeId>)>,
    visited: HashSet<NodeId>,
    /// Shallowest depth each node has been expanded at (depth-first only).
    depths: HashMap<NodeId, usize>,
    parents: HashMap<NodeId, NodeId>,
}

impl Walk<'_> {
    /// Rebuilds the path from the start to a node already yielded (or
    /// expanded) by this walk.
    pub fn path_to(&self, node: NodeId) -> Option<Vec<NodeId>> {
        let mut path = vec![node];
        let mut current = node;
        while current != self.start {
            current = *self.parents.get(&current)?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }

    fn is_shorter(&self, node: NodeId, depth: usize) -> bool {
        self.depths.get(&node).map_or(true, |&best| depth < best)
    }

    fn expand(&mut self, node: NodeId, depth: usize) {
        let within = self
            .traversal
            .max_depth
            .map_or(true, |max| depth < max);
        if !within {
            return;
        }

        let next: Vec<NodeId> = self
            .graph
            .neighbors(node, self.traversal.kind, self.traversal.direction)
            .map(|(other, _)| other)
            .collect();

        match self.traversal.order {
            Order::BreadthFirst => {
                for other in next {
                    if self.visited.insert(other) {
                        self.frontier.push_back((other, depth + 1, Some(node)));
                    }
                }
            }
            Order::DepthFirst => {
                // Reversed so the first neighbor is popped first.
                for other in next.into_iter().rev() {
                    if self.is_shorter(other, depth + 1) {
                        self.frontier.push_back((other, depth + 1, Some(node)));
                    }
                }
            }
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            let (node, depth, parent, fresh) = match self.traversal.order {
                Order::BreadthFirst => {
                    let (node, depth, parent) = self.frontier.pop_front()?;
                    (node, depth, parent, true)
                }
                Order::DepthFirst => {
                    let (node, depth, parent) = self.frontier.pop_back()?;
                    if parent.is_some() {
                        // Stale entry: a shorter branch got here first.
                        if !self.is_shorter(node, depth) {
                            continue;
                        }
                        self.depths.insert(node, depth);
                    }
                    let fresh = parent.is_none() || self.visited.insert(node);
                    (node, depth, parent, fresh)
                }
            };

            if let Some(parent) = parent {
                self.parents.insert(node, parent);
            }

            self.expand(node, depth);

            let is_start = parent.is_none();
            if fresh
                && self
                    .traversal
                    .accepts(self.graph.node(node), depth, is_start)
            {
                return Some(Step {
                    node,
                    depth,
                    parent,
                });
            }
        }
    }
}
