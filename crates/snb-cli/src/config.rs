//! CLI configuration: log level and default result limits.
//!
//! Looked up in order: `--config PATH`, `./snb.json`,
//! `<config dir>/snb/config.json`, then built-in defaults.

use crate::error::CliError;
use serde::{Deserialize, Serialize};
use snb_queries::complex::DEFAULT_LIMITS;
use snb_queries::short::DEFAULT_MESSAGE_LIMIT;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const LOCAL_CONFIG: &str = "snb.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Filter used when `--verbose` is not given, e.g. `info` or `snb_graph=debug`.
    pub log_level: String,
    pub limits: Limits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Limits {
    /// Complex queries 1 to 12, in order.
    pub complex: [usize; 12],
    pub short_messages: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            limits: Limits::default(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            complex: DEFAULT_LIMITS,
            short_messages: DEFAULT_MESSAGE_LIMIT,
        }
    }
}

impl Limits {
    /// Default limit of a complex query; `None` for the unlimited path queries.
    pub fn complex(&self, query: u8) -> Option<usize> {
        let index = usize::from(query).checked_sub(1)?;
        self.complex.get(index).copied()
    }
}

impl Config {
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CliError::MissingFile(path.to_path_buf()));
            }
            return Self::read(path);
        }

        for candidate in Self::search_paths() {
            if candidate.exists() {
                return Self::read(&candidate);
            }
        }
        Ok(Self::default())
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("snb").join("config.json"));
        }
        paths
    }

    fn read(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path)?;
        let config = serde_json::from_str(&text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
