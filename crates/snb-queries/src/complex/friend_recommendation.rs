use serde::{Deserialize, Serialize};
use snb_core::time::month_day;
use snb_core::NodeLabel;
use snb_graph::{Database, Direction, EdgeKind, NodeId, Result, TopK, Traversal};
use std::cmp::Reverse;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub person_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub score: i64,
    pub gender: String,
    pub city_name: String,
}

/// Birthday on or after the 21st of `month` and before the 22nd of the
/// following month (December wraps to January).
fn in_birthday_window(birthday_month: u32, birthday_day: u32, month: u32) -> bool {
    let next = month % 12 + 1;
    (birthday_month == month && birthday_day >= 21) || (birthday_month == next && birthday_day < 22)
}

/// Friends-of-friends with a birthday around `month`, scored by how many
/// of their posts touch the person's interests minus how many don't.
pub fn friend_recommendation(
    db: &Database,
    person_id: i64,
    month: u32,
    limit: usize,
) -> Result<Vec<Recommendation>> {
    let graph = db.read();
    let Some(start) = graph.find_by_id(NodeLabel::Person, person_id) else {
        return Ok(Vec::new());
    };

    let interests: HashSet<NodeId> = graph
        .neighbors(start, EdgeKind::HasInterest, Direction::Outgoing)
        .map(|(tag, _)| tag)
        .collect();

    let candidates = Traversal::new(EdgeKind::Knows, Direction::Both)
        .at_depth(2)
        .exclude_start()
        .filter(|node| {
            node.as_person()
                .and_then(|p| month_day(p.birthday))
                .map_or(false, |(m, d)| in_birthday_window(m, d, month))
        })
        .walk(&graph, start);

    let mut top = TopK::new(limit);
    for step in candidates {
        let mut score = 0i64;
        for message in graph.messages_of(step.node) {
            if !graph.node(message).map_or(false, |m| m.is_post()) {
                continue;
            }
            if graph.tags_of(message).any(|tag| interests.contains(&tag)) {
                score += 1;
            } else {
                score -= 1;
            }
        }
        top.push((score, Reverse(graph.entity_id(step.node))), step.node);
    }

    let rows: Vec<Recommendation> = top
        .into_sorted()
        .into_iter()
        .filter_map(|((score, _), candidate)| {
            let person = graph.person(candidate)?;
            Some(Recommendation {
                person_id: person.id,
                first_name: person.first_name.clone(),
                last_name: person.last_name.clone(),
                score,
                gender: person.gender.clone(),
                city_name: graph
                    .location_of(candidate)
                    .and_then(|city| graph.name_of(city))
                    .unwrap_or_default()
                    .to_string(),
            })
        })
        .collect();

    debug!(person_id, month, results = rows.len(), "friend recommendation");
    Ok(rows)
}
