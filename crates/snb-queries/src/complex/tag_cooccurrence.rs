use super::circle;
use super::new_topics::TagCount;
use snb_core::NodeLabel;
use snb_graph::{Database, Direction, EdgeKind, NodeId, Result, TopK};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::debug;

/// Tags that appear next to `tag_name` on posts by friends and
/// friends-of-friends, counted per post.
pub fn tag_cooccurrence(
    db: &Database,
    person_id: i64,
    tag_name: &str,
    limit: usize,
) -> Result<Vec<TagCount>> {
    let graph = db.read();
    let Some(start) = graph.find_by_id(NodeLabel::Person, person_id) else {
        return Ok(Vec::new());
    };
    let Some(tag) = graph.find_by_name(NodeLabel::Tag, tag_name) else {
        return Ok(Vec::new());
    };

    let mut counts: HashMap<NodeId, u32> = HashMap::new();
    for friend in circle(&graph, start, 2) {
        for message in graph.messages_of(friend) {
            if !graph.node(message).map_or(false, |m| m.is_post()) {
                continue;
            }
            if !graph.has_neighbor(message, tag, EdgeKind::HasTag, Direction::Outgoing) {
                continue;
            }
            for other in graph.tags_of(message) {
                if other != tag {
                    *counts.entry(other).or_insert(0) += 1;
                }
            }
        }
    }

    let mut top = TopK::new(limit);
    for (other, count) in counts {
        let name = graph.name_of(other).unwrap_or_default().to_string();
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

    debug!(person_id, tag_name, results = rows.len(), "tag co-occurrence");
    Ok(rows)
}
