use super::person_summary;
use serde::{Deserialize, Serialize};
use snb_core::time::MINUTE_MILLIS;
use snb_core::NodeLabel;
use snb_graph::{Database, Direction, EdgeKind, NodeId, Result, TopK};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentLiker {
    pub person_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub like_date: i64,
    pub message_id: i64,
    pub content: String,
    /// Minutes between the message and the like.
    pub latency_minutes: i64,
    /// The liker is not a friend of the author.
    pub is_new: bool,
}

/// Latest like given by each person to any of `person_id`'s messages.
struct LatestLike {
    date: i64,
    message_id: i64,
    message: NodeId,
}

/// People who liked `person_id`'s messages, by their most recent like.
///
/// When a liker's latest likes tie on date, the message with the lower id
/// is reported.
pub fn recent_likers(db: &Database, person_id: i64, limit: usize) -> Result<Vec<RecentLiker>> {
    let graph = db.read();
    let Some(author) = graph.find_by_id(NodeLabel::Person, person_id) else {
        return Ok(Vec::new());
    };

    let mut latest: HashMap<NodeId, LatestLike> = HashMap::new();
    for message in graph.messages_of(author) {
        let message_id = graph.entity_id(message);
        for (liker, edge) in graph.neighbors(message, EdgeKind::Likes, Direction::Incoming) {
            let date = edge.timestamp.unwrap_or_default();
            let candidate = LatestLike {
                date,
                message_id,
                message,
            };
            match latest.get(&liker) {
                Some(best) if (best.date, Reverse(best.message_id)) >= (date, Reverse(message_id)) => {}
                _ => {
                    latest.insert(liker, candidate);
                }
            }
        }
    }

    let mut top = TopK::new(limit);
    for (liker, like) in latest {
        top.push((like.date, Reverse(graph.entity_id(liker))), (liker, like));
    }

    let rows: Vec<RecentLiker> = top
        .into_values()
        .into_iter()
        .map(|(liker, like)| {
            let (liker_id, first_name, last_name) = person_summary(&graph, liker);
            let message = graph.node(like.message);
            let message_date = message.and_then(|m| m.creation_date()).unwrap_or_default();
            RecentLiker {
                person_id: liker_id,
                first_name,
                last_name,
                like_date: like.date,
                message_id: like.message_id,
                content: message
                    .and_then(|m| m.content())
                    .unwrap_or_default()
                    .to_string(),
                latency_minutes: (like.date - message_date) / MINUTE_MILLIS,
                is_new: !graph.knows(author, liker),
            }
        })
        .collect();

    debug!(person_id, results = rows.len(), "recent likers");
    Ok(rows)
}
