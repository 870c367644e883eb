//! SNB Core - the social network data model
//!
//! Every node in the graph is one of a closed set of entity kinds
//! (people, messages, forums, tags and places). This crate defines those
//! kinds as plain structs wrapped in the [`Node`] sum type, plus the
//! date helpers the queries need to work with epoch-millisecond
//! timestamps.
//!
//! # Example
//!
//! ```
//! use snb_core::{Node, NodeLabel, Person};
//!
//! let node = Node::Person(Person::new(1, "Ada", "Lovelace"));
//! assert_eq!(node.label(), NodeLabel::Person);
//! assert_eq!(node.id(), 1);
//! ```

mod label;
mod node;
pub mod time;

pub use label::{NodeLabel, ParseLabelError};
pub use node::{Comment, Forum, Node, Organisation, Person, Place, Post, Property, Tag, TagClass};
