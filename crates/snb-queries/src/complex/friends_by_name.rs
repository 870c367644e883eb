use serde::{Deserialize, Serialize};
use snb_core::NodeLabel;
use snb_graph::{Affiliation, Database, Direction, EdgeKind, Result, TopK, Traversal};
use std::cmp::Reverse;
use tracing::debug;

/// A person within three hops who has the requested first name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendByName {
    pub person_id: i64,
    pub last_name: String,
    pub distance: usize,
    pub birthday: i64,
    pub creation_date: i64,
    pub gender: String,
    pub browser_used: String,
    pub location_ip: String,
    pub emails: Vec<String>,
    pub languages: Vec<String>,
    pub city_name: String,
    pub universities: Vec<Affiliation>,
    pub companies: Vec<Affiliation>,
}

/// People up to three `KNOWS` hops from `person_id` named `first_name`,
/// closest first, then by last name (ignoring case) and id.
pub fn friends_by_name(
    db: &Database,
    person_id: i64,
    first_name: &str,
    limit: usize,
) -> Result<Vec<FriendByName>> {
    let graph = db.read();
    let Some(start) = graph.find_by_id(NodeLabel::Person, person_id) else {
        return Ok(Vec::new());
    };

    let mut top = TopK::new(limit);
    let walk = Traversal::new(EdgeKind::Knows, Direction::Both)
        .max_depth(3)
        .exclude_start()
        .filter(|node| node.as_person().map_or(false, |p| p.first_name == first_name))
        .walk(&graph, start);
    for step in walk {
        let Some(person) = graph.person(step.node) else {
            continue;
        };
        let key = Reverse((step.depth, person.last_name.to_lowercase(), person.id));
        top.push(key, step);
    }

    let rows: Vec<FriendByName> = top
        .into_values()
        .into_iter()
        .filter_map(|step| {
            let person = graph.person(step.node)?;
            let city_name = graph
                .location_of(step.node)
                .and_then(|city| graph.name_of(city))
                .unwrap_or_default()
                .to_string();
            Some(FriendByName {
                person_id: person.id,
                last_name: person.last_name.clone(),
                distance: step.depth,
                birthday: person.birthday,
                creation_date: person.creation_date,
                gender: person.gender.clone(),
                browser_used: person.browser_used.clone(),
                location_ip: person.location_ip.clone(),
                emails: person.emails.clone(),
                languages: person.languages.clone(),
                city_name,
                universities: graph.schools_of(step.node),
                companies: graph.companies_of(step.node),
            })
        })
        .collect();

    debug!(person_id, first_name, results = rows.len(), "friends by name");
    Ok(rows)
}
