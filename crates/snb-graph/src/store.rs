use crate::error::Result;
use crate::graph::SocialGraph;
use sled::Db;
use std::path::Path;
use tracing::info;

const GRAPH_KEY: &str = "social_graph";

/// Persists the whole graph as one bincode value in sled.
pub struct GraphStore {
    db: Db,
}

impl GraphStore {
    /// Opens or creates a graph store at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Saves the entire graph to the store and flushes it to disk.
    pub fn save_graph(&self, graph: &SocialGraph) -> Result<()> {
        let bytes = bincode::serialize(graph)?;
        self.db.insert(GRAPH_KEY, bytes)?;
        self.db.flush()?;
        Ok(())
    }

    /// Loads the graph from the store, rebuilding its indexes.
    pub fn load_graph(&self) -> Result<Option<SocialGraph>> {
        let Some(bytes) = self.db.get(GRAPH_KEY)? else {
            return Ok(None);
        };
        let mut graph: SocialGraph = bincode::deserialize(&bytes)?;
        graph.reindex();
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "loaded graph"
        );
        Ok(Some(graph))
    }

    /// Clears the stored graph.
    pub fn clear(&self) -> Result<()> {
        self.db.remove(GRAPH_KEY)?;
        self.db.flush()?;
        Ok(())
    }
}
