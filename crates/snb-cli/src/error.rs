//! Errors raised while reading CLI inputs.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}: No such file", .0.display())]
    MissingFile(PathBuf),

    #[error("unknown {kind} query: {number}")]
    UnknownQuery { kind: &'static str, number: u8 },

    #[error("{path}:{line}: {reason}")]
    MalformedLine {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
