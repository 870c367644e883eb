use super::{circle, person_summary};
use serde::{Deserialize, Serialize};
use snb_core::NodeLabel;
use snb_graph::{Database, Direction, EdgeKind, Result, TopK};
use std::cmp::Reverse;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReferral {
    pub person_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub organisation_name: String,
    pub work_from: i32,
}

/// Friends and friends-of-friends who started working before `before_year`
/// at a company in `country_name`.
///
/// Earliest start first, then person id, then company name descending.
pub fn job_referral(
    db: &Database,
    person_id: i64,
    country_name: &str,
    before_year: i32,
    limit: usize,
) -> Result<Vec<JobReferral>> {
    let graph = db.read();
    let Some(start) = graph.find_by_id(NodeLabel::Person, person_id) else {
        return Ok(Vec::new());
    };
    let Some(country) = graph.find_by_name(NodeLabel::Country, country_name) else {
        return Ok(Vec::new());
    };

    let mut top = TopK::new(limit);
    for friend in circle(&graph, start, 2) {
        let friend_id = graph.entity_id(friend);
        for (company, edge) in graph.neighbors(friend, EdgeKind::WorksAt, Direction::Outgoing) {
            let Some(year) = edge.year.filter(|&year| year < before_year) else {
                continue;
            };
            if graph.location_of(company) != Some(country) {
                continue;
            }
            let name = graph.name_of(company).unwrap_or_default().to_string();
            top.push(Reverse((year, friend_id, Reverse(name))), friend);
        }
    }

    let rows: Vec<JobReferral> = top
        .into_sorted()
        .into_iter()
        .map(|(Reverse((work_from, _, Reverse(organisation_name))), friend)| {
            let (person_id, first_name, last_name) = person_summary(&graph, friend);
            JobReferral {
                person_id,
                first_name,
                last_name,
                organisation_name,
                work_from,
            }
        })
        .collect();

    debug!(person_id, country_name, before_year, results = rows.len(), "job referral");
    Ok(rows)
}
