use crate::edge::EdgeKind;
use snb_core::NodeLabel;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Database error: {0}")]
    Sled(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{label} {id} does not exist")]
    MissingNode { label: NodeLabel, id: i64 },
    #[error("{label} {id} already exists")]
    DuplicateNode { label: NodeLabel, id: i64 },
    #[error("{kind} chain loops back to node {id}")]
    Cycle { kind: EdgeKind, id: i64 },
}

pub type Result<T> = std::result::Result<T, GraphError>;
