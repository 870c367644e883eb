//! SNB Queries - the operation catalogue
//!
//! Fourteen complex reads, seven short reads and eight updates over a
//! [`snb_graph::Database`]. Every read takes its own read transaction,
//! resolves an anchor entity, and returns an empty result (or `None`) when
//! the anchor does not exist. Every update runs in one write transaction
//! and leaves the graph untouched if it fails.
//!
//! [`operation`] maps serialized operation payloads onto these functions.

pub mod complex;
pub mod operation;
pub mod short;
pub mod update;

pub use operation::{execute, Operation, OperationResult};
