//! Short read queries: single-entity lookups around a person or message.

use crate::complex::person_summary;
use serde::{Deserialize, Serialize};
use snb_core::NodeLabel;
use snb_graph::{Database, Direction, EdgeKind, Result, TopK};
use std::cmp::Reverse;
use tracing::debug;

/// Default limit for [`person_recent_messages`].
pub const DEFAULT_MESSAGE_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonProfile {
    pub first_name: String,
    pub last_name: String,
    pub birthday: i64,
    pub location_ip: String,
    pub browser_used: String,
    pub city_id: i64,
    pub gender: String,
    pub creation_date: i64,
}

pub fn person_profile(db: &Database, person_id: i64) -> Result<Option<PersonProfile>> {
    let graph = db.read();
    let Some(node) = graph.find_by_id(NodeLabel::Person, person_id) else {
        return Ok(None);
    };
    let Some(person) = graph.person(node) else {
        return Ok(None);
    };

    Ok(Some(PersonProfile {
        first_name: person.first_name.clone(),
        last_name: person.last_name.clone(),
        birthday: person.birthday,
        location_ip: person.location_ip.clone(),
        browser_used: person.browser_used.clone(),
        city_id: graph
            .location_of(node)
            .map_or(-1, |city| graph.entity_id(city)),
        gender: person.gender.clone(),
        creation_date: person.creation_date,
    }))
}

/// A person's message with the post its thread starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonMessage {
    pub message_id: i64,
    pub content: String,
    pub creation_date: i64,
    pub original_post_id: i64,
    pub original_poster_id: i64,
    pub original_poster_first_name: String,
    pub original_poster_last_name: String,
}

/// A person's latest messages, newest first; ties go to the higher id.
pub fn person_recent_messages(
    db: &Database,
    person_id: i64,
    limit: usize,
) -> Result<Vec<PersonMessage>> {
    let graph = db.read();
    let Some(person) = graph.find_by_id(NodeLabel::Person, person_id) else {
        return Ok(Vec::new());
    };

    let mut top = TopK::new(limit);
    for message in graph.messages_of(person) {
        let Some(node) = graph.node(message) else {
            continue;
        };
        top.push((node.creation_date().unwrap_or_default(), node.id()), message);
    }

    let mut rows = Vec::with_capacity(top.len());
    for ((creation_date, message_id), message) in top.into_sorted() {
        let post = graph.progenitor_of(message)?;
        let poster = graph.creator_of(post).unwrap_or(person);
        let (original_poster_id, first_name, last_name) = person_summary(&graph, poster);
        rows.push(PersonMessage {
            message_id,
            content: graph
                .node(message)
                .and_then(|m| m.content())
                .unwrap_or_default()
                .to_string(),
            creation_date,
            original_post_id: graph.entity_id(post),
            original_poster_id,
            original_poster_first_name: first_name,
            original_poster_last_name: last_name,
        });
    }

    debug!(person_id, results = rows.len(), "person recent messages");
    Ok(rows)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub person_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub friendship_date: i64,
}

/// All friends of a person, most recent friendship first.
pub fn person_friends(db: &Database, person_id: i64) -> Result<Vec<Friend>> {
    let graph = db.read();
    let Some(person) = graph.find_by_id(NodeLabel::Person, person_id) else {
        return Ok(Vec::new());
    };

    let mut top = TopK::unbounded();
    for (friend, edge) in graph.neighbors(person, EdgeKind::Knows, Direction::Both) {
        let date = edge.timestamp.unwrap_or_default();
        top.push((date, Reverse(graph.entity_id(friend))), friend);
    }

    let rows = top
        .into_sorted()
        .into_iter()
        .map(|((friendship_date, _), friend)| {
            let (person_id, first_name, last_name) = person_summary(&graph, friend);
            Friend {
                person_id,
                first_name,
                last_name,
                friendship_date,
            }
        })
        .collect();
    Ok(rows)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageContent {
    pub content: String,
    pub creation_date: i64,
}

pub fn message_content(db: &Database, message_id: i64) -> Result<Option<MessageContent>> {
    let graph = db.read();
    let Some(node) = graph.find_message(message_id).and_then(|m| graph.node(m)) else {
        return Ok(None);
    };

    Ok(Some(MessageContent {
        content: node.content().unwrap_or_default().to_string(),
        creation_date: node.creation_date().unwrap_or_default(),
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCreator {
    pub person_id: i64,
    pub first_name: String,
    pub last_name: String,
}

pub fn message_creator(db: &Database, message_id: i64) -> Result<Option<MessageCreator>> {
    let graph = db.read();
    let Some(creator) = graph
        .find_message(message_id)
        .and_then(|message| graph.creator_of(message))
    else {
        return Ok(None);
    };

    let (person_id, first_name, last_name) = person_summary(&graph, creator);
    Ok(Some(MessageCreator {
        person_id,
        first_name,
        last_name,
    }))
}

/// The forum a message's thread lives in, with its moderator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageForum {
    pub forum_id: i64,
    pub forum_title: String,
    pub moderator_id: i64,
    pub moderator_first_name: String,
    pub moderator_last_name: String,
}

pub fn message_forum(db: &Database, message_id: i64) -> Result<Option<MessageForum>> {
    let graph = db.read();
    let Some(message) = graph.find_message(message_id) else {
        return Ok(None);
    };
    let post = graph.progenitor_of(message)?;
    let Some(forum) = graph.forum_of_post(post) else {
        return Ok(None);
    };
    let Some(title) = graph
        .node(forum)
        .and_then(|f| f.as_forum())
        .map(|f| f.title.clone())
    else {
        return Ok(None);
    };

    let (moderator_id, first_name, last_name) =
        match graph.neighbor(forum, EdgeKind::HasModerator, Direction::Outgoing) {
            Some(moderator) => person_summary(&graph, moderator),
            None => (-1, String::new(), String::new()),
        };

    Ok(Some(MessageForum {
        forum_id: graph.entity_id(forum),
        forum_title: title,
        moderator_id,
        moderator_first_name: first_name,
        moderator_last_name: last_name,
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReply {
    pub comment_id: i64,
    pub content: String,
    pub creation_date: i64,
    pub author_id: i64,
    pub author_first_name: String,
    pub author_last_name: String,
    /// The reply's author is a friend of the message's author.
    pub knows: bool,
}

/// Direct replies to a message, newest first, then by author id.
pub fn message_replies(db: &Database, message_id: i64) -> Result<Vec<MessageReply>> {
    let graph = db.read();
    let Some(message) = graph.find_message(message_id) else {
        return Ok(Vec::new());
    };
    let author = graph.creator_of(message);

    let mut top = TopK::unbounded();
    for (reply, _) in graph.neighbors(message, EdgeKind::ReplyOf, Direction::Incoming) {
        let Some(node) = graph.node(reply) else {
            continue;
        };
        let replier = graph.creator_of(reply);
        let replier_id = replier.map_or(-1, |r| graph.entity_id(r));
        let key = (
            node.creation_date().unwrap_or_default(),
            Reverse(replier_id),
            Reverse(node.id()),
        );
        top.push(key, (reply, replier));
    }

    let rows = top
        .into_sorted()
        .into_iter()
        .map(|((creation_date, _, Reverse(comment_id)), (reply, replier))| {
            let (author_id, first_name, last_name) = match replier {
                Some(replier) => person_summary(&graph, replier),
                None => (-1, String::new(), String::new()),
            };
            let knows = match (author, replier) {
                (Some(author), Some(replier)) => graph.knows(author, replier),
                _ => false,
            };
            MessageReply {
                comment_id,
                content: graph
                    .node(reply)
                    .and_then(|c| c.content())
                    .unwrap_or_default()
                    .to_string(),
                creation_date,
                author_id,
                author_first_name: first_name,
                author_last_name: last_name,
                knows,
            }
        })
        .collect();
    Ok(rows)
}
