use super::person_summary;
use serde::{Deserialize, Serialize};
use snb_core::NodeLabel;
use snb_graph::{Database, Direction, EdgeKind, Result, TopK};
use std::cmp::Reverse;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentReply {
    pub person_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub creation_date: i64,
    pub comment_id: i64,
    pub content: String,
}

/// Newest comments replying directly to any of `person_id`'s messages.
pub fn recent_replies(db: &Database, person_id: i64, limit: usize) -> Result<Vec<RecentReply>> {
    let graph = db.read();
    let Some(author) = graph.find_by_id(NodeLabel::Person, person_id) else {
        return Ok(Vec::new());
    };

    let mut top = TopK::new(limit);
    for message in graph.messages_of(author) {
        for (reply, _) in graph.neighbors(message, EdgeKind::ReplyOf, Direction::Incoming) {
            let Some(node) = graph.node(reply) else {
                continue;
            };
            let date = node.creation_date().unwrap_or_default();
            top.push((date, Reverse(node.id())), reply);
        }
    }

    let rows: Vec<RecentReply> = top
        .into_sorted()
        .into_iter()
        .map(|((creation_date, Reverse(comment_id)), reply)| {
            let (person_id, first_name, last_name) = match graph.creator_of(reply) {
                Some(replier) => person_summary(&graph, replier),
                None => (-1, String::new(), String::new()),
            };
            RecentReply {
                person_id,
                first_name,
                last_name,
                creation_date,
                comment_id,
                content: graph
                    .node(reply)
                    .and_then(|c| c.content())
                    .unwrap_or_default()
                    .to_string(),
            }
        })
        .collect();

    debug!(person_id, results = rows.len(), "recent replies");
    Ok(rows)
}
