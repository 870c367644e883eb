use super::person_summary;
use serde::{Deserialize, Serialize};
use snb_core::NodeLabel;
use snb_graph::{Database, NodeId, Result, SocialGraph, TopK};
use std::cmp::Reverse;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentMessage {
    pub person_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub message_id: i64,
    pub content: String,
    pub creation_date: i64,
}

/// Messages by direct friends created on or before `max_date`, newest first.
pub fn recent_friend_messages(
    db: &Database,
    person_id: i64,
    max_date: i64,
    limit: usize,
) -> Result<Vec<RecentMessage>> {
    let graph = db.read();
    let Some(start) = graph.find_by_id(NodeLabel::Person, person_id) else {
        return Ok(Vec::new());
    };

    let friends = graph.friends_of(start);
    let rows = newest_messages(&graph, &friends, |date| date <= max_date, limit);

    debug!(person_id, max_date, results = rows.len(), "recent friend messages");
    Ok(rows)
}

/// Newest messages written by `authors` whose date passes `accept`,
/// ties broken by ascending message id.
pub(crate) fn newest_messages(
    graph: &SocialGraph,
    authors: &[NodeId],
    accept: impl Fn(i64) -> bool,
    limit: usize,
) -> Vec<RecentMessage> {
    let mut top = TopK::new(limit);
    for &author in authors {
        for message in graph.messages_of(author) {
            let Some(node) = graph.node(message) else {
                continue;
            };
            let Some(date) = node.creation_date() else {
                continue;
            };
            if accept(date) {
                top.push((date, Reverse(node.id())), (author, message));
            }
        }
    }

    top.into_sorted()
        .into_iter()
        .map(|((date, Reverse(message_id)), (author, message))| {
            let (person_id, first_name, last_name) = person_summary(graph, author);
            RecentMessage {
                person_id,
                first_name,
                last_name,
                message_id,
                content: graph
                    .node(message)
                    .and_then(|m| m.content())
                    .unwrap_or_default()
                    .to_string(),
                creation_date: date,
            }
        })
        .collect()
}
