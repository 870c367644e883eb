//! SNB Graph - the social network property graph
//!
//! This crate owns the graph the queries run against and the primitives
//! they are built from.
//!
//! # Architecture
//!
//! The graph uses petgraph's `StableDiGraph` internally with an index for:
//! - `(label, id)` lookups
//! - `(label, name)` lookups for tags, places and organisations
//! - per-label node lists
//!
//! On top of it sit the traversal engine, the path finder, the bounded
//! top-K selector and a scoped transaction layer that persists the whole
//! graph to sled.
//!
//! # Example
//!
//! ```
//! use snb_core::{Node, NodeLabel, Person};
//! use snb_graph::{Direction, Edge, EdgeKind, SocialGraph, Traversal};
//!
//! let mut graph = SocialGraph::new();
//! let ada = graph.add_node(Node::Person(Person::new(1, "Ada", "Lovelace")));
//! let bob = graph.add_node(Node::Person(Person::new(2, "Bob", "Babbage")));
//! graph.add_edge(ada, bob, Edge::dated(EdgeKind::Knows, 0));
//!
//! let friends: Vec<_> = Traversal::new(EdgeKind::Knows, Direction::Both)
//!     .max_depth(1)
//!     .exclude_start()
//!     .walk(&graph, ada)
//!     .map(|step| step.node)
//!     .collect();
//! assert_eq!(friends, vec![bob]);
//! assert_eq!(graph.find_by_id(NodeLabel::Person, 2), Some(bob));
//! ```

mod builder;
mod edge;
mod error;
mod graph;
mod index;
mod path;
mod schema;
mod store;
mod top_k;
mod traversal;
mod txn;

pub use builder::{GraphBuilder, GraphSnapshot, NodeRef, SnapshotEdge};
pub use edge::{Direction, Edge, EdgeKind, ParseEdgeKindError};
pub use error::{GraphError, Result};
pub use graph::{GraphStats, NodeId, SocialGraph};
pub use path::WeightedPath;
pub use schema::Affiliation;
pub use store::GraphStore;
pub use top_k::TopK;
pub use traversal::{Order, Step, Traversal, Walk};
pub use txn::{Database, ReadTxn, SaveBatch, WriteTxn};
