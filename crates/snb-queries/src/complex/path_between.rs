use serde::{Deserialize, Serialize};
use snb_core::NodeLabel;
use snb_graph::{Database, Direction, EdgeKind, Result};
use tracing::debug;

/// Length of the shortest `KNOWS` path between two people.
///
/// `Some(-1)` when they are not connected, `None` when either person does
/// not exist.
pub fn shortest_path(db: &Database, person1_id: i64, person2_id: i64) -> Result<Option<i64>> {
    let graph = db.read();
    let (Some(from), Some(to)) = (
        graph.find_by_id(NodeLabel::Person, person1_id),
        graph.find_by_id(NodeLabel::Person, person2_id),
    ) else {
        return Ok(None);
    };

    let length = graph
        .shortest_path_length(from, to, EdgeKind::Knows, Direction::Both)
        .map_or(-1, |hops| hops as i64);

    debug!(person1_id, person2_id, length, "shortest path");
    Ok(Some(length))
}

/// A shortest path as person ids, with its interaction weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedPersonPath {
    pub person_ids: Vec<i64>,
    pub weight: f64,
}

/// Every shortest `KNOWS` path between two people, heaviest first.
///
/// Equal weights are ordered by the person ids along the path.
pub fn weighted_paths(
    db: &Database,
    person1_id: i64,
    person2_id: i64,
) -> Result<Vec<WeightedPersonPath>> {
    let graph = db.read();
    let (Some(from), Some(to)) = (
        graph.find_by_id(NodeLabel::Person, person1_id),
        graph.find_by_id(NodeLabel::Person, person2_id),
    ) else {
        return Ok(Vec::new());
    };

    let rows: Vec<WeightedPersonPath> = graph
        .weighted_shortest_paths(from, to)
        .into_iter()
        .map(|path| WeightedPersonPath {
            person_ids: path.nodes.iter().map(|&n| graph.entity_id(n)).collect(),
            weight: path.weight,
        })
        .collect();

    debug!(person1_id, person2_id, results = rows.len(), "weighted paths");
    Ok(rows)
}
