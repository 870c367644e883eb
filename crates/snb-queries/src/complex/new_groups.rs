use super::circle;
use serde::{Deserialize, Serialize};
use snb_core::NodeLabel;
use snb_graph::{Database, Direction, EdgeKind, NodeId, Result, TopK};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
    pub forum_id: i64,
    pub forum_title: String,
    pub post_count: u32,
}

/// Forums that friends and friends-of-friends joined after `min_date`,
/// ranked by how many posts those new members wrote in them.
///
/// A forum with new members but no posts from them is still listed.
pub fn new_groups(
    db: &Database,
    person_id: i64,
    min_date: i64,
    limit: usize,
) -> Result<Vec<NewGroup>> {
    let graph = db.read();
    let Some(start) = graph.find_by_id(NodeLabel::Person, person_id) else {
        return Ok(Vec::new());
    };

    let people = circle(&graph, start, 2);
    let mut counts: HashMap<NodeId, u32> = HashMap::new();
    let mut memberships: HashSet<(NodeId, NodeId)> = HashSet::new();
    for &member in &people {
        for (forum, edge) in graph.neighbors(member, EdgeKind::HasMember, Direction::Incoming) {
            if edge.timestamp.map_or(false, |joined| joined > min_date) {
                counts.entry(forum).or_insert(0);
                memberships.insert((forum, member));
            }
        }
    }

    for &member in &people {
        for message in graph.messages_of(member) {
            if !graph.node(message).map_or(false, |m| m.is_post()) {
                continue;
            }
            let Some(forum) = graph.forum_of_post(message) else {
                continue;
            };
            if memberships.contains(&(forum, member)) {
                *counts.entry(forum).or_insert(0) += 1;
            }
        }
    }

    let mut top = TopK::new(limit);
    for (forum, count) in counts {
        top.push((count, Reverse(graph.entity_id(forum))), forum);
    }

    let rows: Vec<NewGroup> = top
        .into_sorted()
        .into_iter()
        .map(|((post_count, Reverse(forum_id)), forum)| NewGroup {
            forum_id,
            forum_title: graph
                .node(forum)
                .and_then(|f| f.as_forum())
                .map(|f| f.title.clone())
                .unwrap_or_default(),
            post_count,
        })
        .collect();

    debug!(person_id, min_date, results = rows.len(), "new groups");
    Ok(rows)
}
