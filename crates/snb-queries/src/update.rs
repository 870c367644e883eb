//! Write operations.
//!
//! Each operation runs in a single write transaction. Every referenced node
//! is resolved with [`WriteTxn::require`] before anything is created, and a
//! missing one aborts the operation; the uncommitted transaction then rolls
//! back whatever it had already added.

use serde::{Deserialize, Serialize};
use snb_core::{Comment, Forum, Node, NodeLabel, Person, Post};
use snb_graph::{Database, Edge, EdgeKind, NodeId, Result, WriteTxn};
use tracing::debug;

/// A study or work relationship of a new person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationYear {
    pub organisation_id: i64,
    pub year: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPerson {
    pub person_id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub birthday: i64,
    #[serde(default)]
    pub creation_date: i64,
    #[serde(default)]
    pub location_ip: String,
    #[serde(default)]
    pub browser_used: String,
    pub city_id: i64,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
    #[serde(default)]
    pub study_at: Vec<OrganisationYear>,
    #[serde(default)]
    pub work_at: Vec<OrganisationYear>,
}

/// A like on a post or a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLike {
    pub person_id: i64,
    pub message_id: i64,
    pub creation_date: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddForum {
    pub forum_id: i64,
    pub title: String,
    pub creation_date: i64,
    pub moderator_id: i64,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMembership {
    pub forum_id: i64,
    pub person_id: i64,
    pub join_date: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPost {
    pub post_id: i64,
    #[serde(default)]
    pub image_file: String,
    pub creation_date: i64,
    #[serde(default)]
    pub location_ip: String,
    #[serde(default)]
    pub browser_used: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub length: i32,
    pub author_id: i64,
    pub forum_id: i64,
    pub country_id: i64,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

/// A new comment. Exactly one of the reply targets is set; the other is -1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddComment {
    pub comment_id: i64,
    pub creation_date: i64,
    #[serde(default)]
    pub location_ip: String,
    #[serde(default)]
    pub browser_used: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub length: i32,
    pub author_id: i64,
    pub country_id: i64,
    #[serde(default = "no_target")]
    pub reply_to_post_id: i64,
    #[serde(default = "no_target")]
    pub reply_to_comment_id: i64,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

fn no_target() -> i64 {
    -1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFriendship {
    pub person1_id: i64,
    pub person2_id: i64,
    pub creation_date: i64,
}

fn require_all(txn: &WriteTxn<'_>, label: NodeLabel, ids: &[i64]) -> Result<Vec<NodeId>> {
    ids.iter().map(|&id| txn.require(label, id)).collect()
}

fn require_affiliations(
    txn: &WriteTxn<'_>,
    affiliations: &[OrganisationYear],
) -> Result<Vec<(NodeId, i32)>> {
    affiliations
        .iter()
        .map(|a| Ok((txn.require(NodeLabel::Organisation, a.organisation_id)?, a.year)))
        .collect()
}

/// U1: a person located in a city, with interests, schools and employers.
pub fn add_person(db: &Database, params: &AddPerson) -> Result<()> {
    let mut txn = db.write();
    let city = txn.require(NodeLabel::City, params.city_id)?;
    let tags = require_all(&txn, NodeLabel::Tag, &params.tag_ids)?;
    let schools = require_affiliations(&txn, &params.study_at)?;
    let companies = require_affiliations(&txn, &params.work_at)?;

    let person = txn.create_node(Node::Person(Person {
        id: params.person_id,
        first_name: params.first_name.clone(),
        last_name: params.last_name.clone(),
        gender: params.gender.clone(),
        birthday: params.birthday,
        creation_date: params.creation_date,
        location_ip: params.location_ip.clone(),
        browser_used: params.browser_used.clone(),
        emails: params.emails.clone(),
        languages: params.languages.clone(),
    }));

    txn.create_edge(person, city, Edge::new(EdgeKind::IsLocatedIn));
    for tag in tags {
        txn.create_edge(person, tag, Edge::new(EdgeKind::HasInterest));
    }
    for (school, year) in schools {
        txn.create_edge(person, school, Edge::with_year(EdgeKind::StudyAt, year));
    }
    for (company, year) in companies {
        txn.create_edge(person, company, Edge::with_year(EdgeKind::WorksAt, year));
    }

    txn.commit()?;
    debug!(person_id = params.person_id, "added person");
    Ok(())
}

fn add_like(db: &Database, params: &AddLike, label: NodeLabel) -> Result<()> {
    let mut txn = db.write();
    let person = txn.require(NodeLabel::Person, params.person_id)?;
    let message = txn.require(label, params.message_id)?;
    txn.create_edge(
        person,
        message,
        Edge::dated(EdgeKind::Likes, params.creation_date),
    );
    txn.commit()?;
    debug!(person_id = params.person_id, message_id = params.message_id, %label, "added like");
    Ok(())
}

/// U2
pub fn add_post_like(db: &Database, params: &AddLike) -> Result<()> {
    add_like(db, params, NodeLabel::Post)
}

/// U3
pub fn add_comment_like(db: &Database, params: &AddLike) -> Result<()> {
    add_like(db, params, NodeLabel::Comment)
}

/// U4: a forum with its moderator and tags.
pub fn add_forum(db: &Database, params: &AddForum) -> Result<()> {
    let mut txn = db.write();
    let moderator = txn.require(NodeLabel::Person, params.moderator_id)?;
    let tags = require_all(&txn, NodeLabel::Tag, &params.tag_ids)?;

    let forum = txn.create_node(Node::Forum(Forum::new(
        params.forum_id,
        params.title.clone(),
        params.creation_date,
    )));
    txn.create_edge(forum, moderator, Edge::new(EdgeKind::HasModerator));
    for tag in tags {
        txn.create_edge(forum, tag, Edge::new(EdgeKind::HasTag));
    }

    txn.commit()?;
    debug!(forum_id = params.forum_id, "added forum");
    Ok(())
}

/// U5
pub fn add_forum_membership(db: &Database, params: &AddMembership) -> Result<()> {
    let mut txn = db.write();
    let forum = txn.require(NodeLabel::Forum, params.forum_id)?;
    let person = txn.require(NodeLabel::Person, params.person_id)?;
    txn.create_edge(
        forum,
        person,
        Edge::dated(EdgeKind::HasMember, params.join_date),
    );
    txn.commit()?;
    debug!(forum_id = params.forum_id, person_id = params.person_id, "added membership");
    Ok(())
}

/// U6: a post in a forum, by an author, located in a country.
pub fn add_post(db: &Database, params: &AddPost) -> Result<()> {
    let mut txn = db.write();
    let author = txn.require(NodeLabel::Person, params.author_id)?;
    let forum = txn.require(NodeLabel::Forum, params.forum_id)?;
    let country = txn.require(NodeLabel::Country, params.country_id)?;
    let tags = require_all(&txn, NodeLabel::Tag, &params.tag_ids)?;

    let post = txn.create_node(Node::Post(Post {
        id: params.post_id,
        image_file: params.image_file.clone(),
        creation_date: params.creation_date,
        location_ip: params.location_ip.clone(),
        browser_used: params.browser_used.clone(),
        language: params.language.clone(),
        content: params.content.clone(),
        length: params.length,
    }));
    txn.create_edge(post, author, Edge::new(EdgeKind::HasCreator));
    txn.create_edge(forum, post, Edge::new(EdgeKind::ContainerOf));
    txn.create_edge(post, country, Edge::new(EdgeKind::IsLocatedIn));
    for tag in tags {
        txn.create_edge(post, tag, Edge::new(EdgeKind::HasTag));
    }

    txn.commit()?;
    debug!(post_id = params.post_id, "added post");
    Ok(())
}

/// U7: a comment replying to a post or to another comment.
pub fn add_comment(db: &Database, params: &AddComment) -> Result<()> {
    let mut txn = db.write();
    let author = txn.require(NodeLabel::Person, params.author_id)?;
    let country = txn.require(NodeLabel::Country, params.country_id)?;
    let parent = if params.reply_to_comment_id != -1 {
        txn.require(NodeLabel::Comment, params.reply_to_comment_id)?
    } else {
        txn.require(NodeLabel::Post, params.reply_to_post_id)?
    };
    let tags = require_all(&txn, NodeLabel::Tag, &params.tag_ids)?;

    let comment = txn.create_node(Node::Comment(Comment {
        id: params.comment_id,
        creation_date: params.creation_date,
        location_ip: params.location_ip.clone(),
        browser_used: params.browser_used.clone(),
        content: params.content.clone(),
        length: params.length,
    }));
    txn.create_edge(comment, author, Edge::new(EdgeKind::HasCreator));
    txn.create_edge(comment, country, Edge::new(EdgeKind::IsLocatedIn));
    txn.create_edge(comment, parent, Edge::new(EdgeKind::ReplyOf));
    for tag in tags {
        txn.create_edge(comment, tag, Edge::new(EdgeKind::HasTag));
    }

    txn.commit()?;
    debug!(comment_id = params.comment_id, "added comment");
    Ok(())
}

/// U8: a dated `KNOWS` edge, stored once.
pub fn add_friendship(db: &Database, params: &AddFriendship) -> Result<()> {
    let mut txn = db.write();
    let person1 = txn.require(NodeLabel::Person, params.person1_id)?;
    let person2 = txn.require(NodeLabel::Person, params.person2_id)?;
    txn.create_edge(
        person1,
        person2,
        Edge::dated(EdgeKind::Knows, params.creation_date),
    );
    txn.commit()?;
    debug!(
        person1_id = params.person1_id,
        person2_id = params.person2_id,
        "added friendship"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snb_core::Place;
    use snb_graph::SocialGraph;

    fn database() -> Database {
        let mut graph = SocialGraph::new();
        graph.add_node(Node::Country(Place::new(1, "Germany")));
        graph.add_node(Node::City(Place::new(10, "Berlin")));
        graph.add_node(Node::Person(Person::new(1, "Alice", "Smith")));
        Database::in_memory(graph)
    }

    #[test]
    fn test_add_friendship_links_both_ways() {
        let db = database();
        add_person(
            &db,
            &AddPerson {
                person_id: 2,
                first_name: "Bob".to_string(),
                last_name: "Jones".to_string(),
                city_id: 10,
                ..AddPerson::default()
            },
        )
        .unwrap();
        add_friendship(
            &db,
            &AddFriendship {
                person1_id: 1,
                person2_id: 2,
                creation_date: 5,
            },
        )
        .unwrap();

        let graph = db.read();
        let alice = graph.find_by_id(NodeLabel::Person, 1).unwrap();
        let bob = graph.find_by_id(NodeLabel::Person, 2).unwrap();
        assert!(graph.knows(alice, bob));
        assert!(graph.knows(bob, alice));
    }

    #[test]
    fn test_missing_tag_rolls_back_person() {
        let db = database();
        let before = db.read().node_count();
        let result = add_person(
            &db,
            &AddPerson {
                person_id: 3,
                first_name: "Carol".to_string(),
                last_name: "Brown".to_string(),
                city_id: 10,
                tag_ids: vec![999],
                ..AddPerson::default()
            },
        );

        assert!(result.is_err());
        assert_eq!(db.read().node_count(), before);
        assert!(db.read().find_by_id(NodeLabel::Person, 3).is_none());
    }

    #[test]
    fn test_comment_without_target_fails() {
        let db = database();
        let params: AddComment = serde_json::from_str(
            r#"{"commentId": 7, "creationDate": 1, "authorId": 1, "countryId": 1}"#,
        )
        .unwrap();
        assert_eq!(params.reply_to_post_id, -1);
        assert!(add_comment(&db, &params).is_err());
    }
}
