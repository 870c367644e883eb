use super::person_summary;
use serde::{Deserialize, Serialize};
use snb_core::NodeLabel;
use snb_graph::{Database, Direction, EdgeKind, NodeId, Result, SocialGraph, TopK};
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expert {
    pub person_id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Matching tag names, sorted.
    pub tag_names: Vec<String>,
    pub reply_count: u32,
}

/// Memoised "is this tag of the class or one of its subclasses" test.
struct TagClassMatcher<'g> {
    graph: &'g SocialGraph,
    class: NodeId,
    cache: HashMap<NodeId, bool>,
}

impl<'g> TagClassMatcher<'g> {
    fn new(graph: &'g SocialGraph, class: NodeId) -> Self {
        Self {
            graph,
            class,
            cache: HashMap::new(),
        }
    }

    fn matches(&mut self, tag: NodeId) -> bool {
        let (graph, class) = (self.graph, self.class);
        *self.cache.entry(tag).or_insert_with(|| {
            graph
                .neighbors(tag, EdgeKind::HasType, Direction::Outgoing)
                .any(|(tag_class, _)| {
                    graph.is_descendant_of(
                        tag_class,
                        class,
                        EdgeKind::IsSubclassOf,
                        Direction::Outgoing,
                    )
                })
        })
    }
}

/// Direct friends who replied to posts tagged within `tag_class_name`
/// (the class itself or any subclass).
///
/// Counts one per qualifying comment; ranked by that count, then id.
pub fn expert_search(
    db: &Database,
    person_id: i64,
    tag_class_name: &str,
    limit: usize,
) -> Result<Vec<Expert>> {
    let graph = db.read();
    let Some(start) = graph.find_by_id(NodeLabel::Person, person_id) else {
        return Ok(Vec::new());
    };
    let Some(class) = graph.find_by_name(NodeLabel::TagClass, tag_class_name) else {
        return Ok(Vec::new());
    };

    let mut matcher = TagClassMatcher::new(&graph, class);
    let mut top = TopK::new(limit);
    for friend in graph.friends_of(start) {
        let mut reply_count = 0u32;
        let mut tag_names = BTreeSet::new();
        for message in graph.messages_of(friend) {
            if graph.node(message).map_or(true, |m| m.is_post()) {
                continue;
            }
            let Some(parent) = graph.parent_of(message) else {
                continue;
            };
            if !graph.node(parent).map_or(false, |p| p.is_post()) {
                continue;
            }

            let mut matched = false;
            for tag in graph.tags_of(parent) {
                if matcher.matches(tag) {
                    matched = true;
                    tag_names.insert(graph.name_of(tag).unwrap_or_default().to_string());
                }
            }
            if matched {
                reply_count += 1;
            }
        }

        if reply_count > 0 {
            top.push(
                (reply_count, Reverse(graph.entity_id(friend))),
                (friend, tag_names),
            );
        }
    }

    let rows: Vec<Expert> = top
        .into_sorted()
        .into_iter()
        .map(|((reply_count, _), (friend, tag_names))| {
            let (person_id, first_name, last_name) = person_summary(&graph, friend);
            Expert {
                person_id,
                first_name,
                last_name,
                tag_names: tag_names.into_iter().collect(),
                reply_count,
            }
        })
        .collect();

    debug!(person_id, tag_class_name, results = rows.len(), "expert search");
    Ok(rows)
}
