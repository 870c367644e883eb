//! Complex read queries.
//!
//! Each query streams candidates through a [`snb_graph::TopK`] keyed on its
//! ranking, then reads the remaining fields only for the entries kept.

mod expert_search;
mod friend_recommendation;
mod friends_by_name;
mod friends_in_countries;
mod job_referral;
mod new_groups;
mod new_topics;
mod path_between;
mod recent_circle_messages;
mod recent_friend_messages;
mod recent_likers;
mod recent_replies;
mod tag_cooccurrence;

pub use expert_search::{expert_search, Expert};
pub use friend_recommendation::{friend_recommendation, Recommendation};
pub use friends_by_name::{friends_by_name, FriendByName};
pub use friends_in_countries::{friends_in_countries, FriendInCountries};
pub use job_referral::{job_referral, JobReferral};
pub use new_groups::{new_groups, NewGroup};
pub use new_topics::{new_topics, TagCount};
pub use path_between::{shortest_path, weighted_paths, WeightedPersonPath};
pub use recent_circle_messages::recent_circle_messages;
pub use recent_friend_messages::{recent_friend_messages, RecentMessage};
pub use recent_likers::{recent_likers, RecentLiker};
pub use recent_replies::{recent_replies, RecentReply};
pub use tag_cooccurrence::tag_cooccurrence;

use snb_graph::{Direction, EdgeKind, NodeId, SocialGraph, Traversal};

/// Default result limits, by query number.
pub const DEFAULT_LIMITS: [usize; 12] = [20, 20, 20, 10, 20, 10, 20, 20, 20, 10, 10, 20];

/// Friends and friends-of-friends of a person (start excluded), each once.
pub(crate) fn circle(graph: &SocialGraph, person: NodeId, depth: usize) -> Vec<NodeId> {
    Traversal::new(EdgeKind::Knows, Direction::Both)
        .max_depth(depth)
        .exclude_start()
        .walk(graph, person)
        .map(|step| step.node)
        .collect()
}

/// Id and names of a person node; empty names for a stale handle.
pub(crate) fn person_summary(graph: &SocialGraph, person: NodeId) -> (i64, String, String) {
    match graph.person(person) {
        Some(p) => (p.id, p.first_name.clone(), p.last_name.clone()),
        None => (graph.entity_id(person), String::new(), String::new()),
    }
}
