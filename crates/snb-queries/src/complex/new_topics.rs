use serde::{Deserialize, Serialize};
use snb_core::time::DAY_MILLIS;
use snb_core::NodeLabel;
use snb_graph::{Database, NodeId, Result, TopK};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A tag and the number of posts carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub tag_name: String,
    pub post_count: u32,
}

/// Tags on friends' posts created within `[start_date, start_date +
/// duration_days)` that never appeared on their earlier posts.
pub fn new_topics(
    db: &Database,
    person_id: i64,
    start_date: i64,
    duration_days: i64,
    limit: usize,
) -> Result<Vec<TagCount>> {
    let graph = db.read();
    let Some(start) = graph.find_by_id(NodeLabel::Person, person_id) else {
        return Ok(Vec::new());
    };
    let end_date = start_date.saturating_add(duration_days.saturating_mul(DAY_MILLIS));

    let mut counts: HashMap<NodeId, u32> = HashMap::new();
    let mut seen_before: HashSet<NodeId> = HashSet::new();
    for friend in graph.friends_of(start) {
        for message in graph.messages_of(friend) {
            let Some(node) = graph.node(message).filter(|m| m.is_post()) else {
                continue;
            };
            let date = node.creation_date().unwrap_or_default();
            if date >= end_date {
                continue;
            }
            for tag in graph.tags_of(message) {
                if date < start_date {
                    seen_before.insert(tag);
                } else {
                    *counts.entry(tag).or_insert(0) += 1;
                }
            }
        }
    }

    let mut top = TopK::new(limit);
    for (tag, count) in counts {
        if seen_before.contains(&tag) {
            continue;
        }
        let name = graph.name_of(tag).unwrap_or_default().to_string();
        top.push((count, Reverse(name)), ());
    }

    let rows: Vec<TagCount> = top
        .into_sorted()
        .into_iter()
        .map(|((post_count, Reverse(tag_name)), ())| TagCount {
            tag_name,
            post_count,
        })
        .collect();

    debug!(person_id, start_date, results = rows.len(), "new topics");
    Ok(rows)
}
