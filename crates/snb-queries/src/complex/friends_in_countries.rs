use super::{circle, person_summary};
use serde::{Deserialize, Serialize};
use snb_core::time::DAY_MILLIS;
use snb_core::NodeLabel;
use snb_graph::{Database, Result, TopK};
use std::cmp::Reverse;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendInCountries {
    pub person_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub x_count: u32,
    pub y_count: u32,
    pub count: u32,
}

/// Friends and friends-of-friends living outside countries X and Y who
/// posted from both of them within `[start_date, start_date + duration_days)`.
///
/// Ranked by the total number of such messages, then id.
pub fn friends_in_countries(
    db: &Database,
    person_id: i64,
    country_x: &str,
    country_y: &str,
    start_date: i64,
    duration_days: i64,
    limit: usize,
) -> Result<Vec<FriendInCountries>> {
    let graph = db.read();
    let Some(start) = graph.find_by_id(NodeLabel::Person, person_id) else {
        return Ok(Vec::new());
    };
    let (Some(x), Some(y)) = (
        graph.find_by_name(NodeLabel::Country, country_x),
        graph.find_by_name(NodeLabel::Country, country_y),
    ) else {
        return Ok(Vec::new());
    };
    let end_date = start_date.saturating_add(duration_days.saturating_mul(DAY_MILLIS));

    let mut top = TopK::new(limit);
    for friend in circle(&graph, start, 2) {
        if let Some(home) = graph.country_of_person(friend) {
            if home == x || home == y {
                continue;
            }
        }

        let (mut x_count, mut y_count) = (0u32, 0u32);
        for message in graph.messages_of(friend) {
            let in_window = graph
                .node(message)
                .and_then(|m| m.creation_date())
                .map_or(false, |date| date >= start_date && date < end_date);
            if !in_window {
                continue;
            }
            match graph.location_of(message) {
                Some(place) if place == x => x_count += 1,
                Some(place) if place == y => y_count += 1,
                _ => {}
            }
        }

        if x_count > 0 && y_count > 0 {
            let id = graph.entity_id(friend);
            top.push((x_count + y_count, Reverse(id)), (friend, x_count, y_count));
        }
    }

    let rows: Vec<FriendInCountries> = top
        .into_values()
        .into_iter()
        .map(|(friend, x_count, y_count)| {
            let (person_id, first_name, last_name) = person_summary(&graph, friend);
            FriendInCountries {
                person_id,
                first_name,
                last_name,
                x_count,
                y_count,
                count: x_count + y_count,
            }
        })
        .collect();

    debug!(person_id, country_x, country_y, results = rows.len(), "friends in countries");
    Ok(rows)
}
