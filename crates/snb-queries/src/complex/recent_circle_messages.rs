use super::circle;
use super::recent_friend_messages::{newest_messages, RecentMessage};
use snb_core::NodeLabel;
use snb_graph::{Database, Result};
use tracing::debug;

/// Messages by friends and friends-of-friends created strictly before
/// `max_date`, newest first.
pub fn recent_circle_messages(
    db: &Database,
    person_id: i64,
    max_date: i64,
    limit: usize,
) -> Result<Vec<RecentMessage>> {
    let graph = db.read();
    let Some(start) = graph.find_by_id(NodeLabel::Person, person_id) else {
        return Ok(Vec::new());
    };

    let people = circle(&graph, start, 2);
    let rows = newest_messages(&graph, &people, |date| date < max_date, limit);

    debug!(person_id, max_date, results = rows.len(), "recent circle messages");
    Ok(rows)
}
