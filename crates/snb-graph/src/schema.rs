//! Social network schema helpers.
//!
//! Thin accessors for the relationships every query leans on: who wrote a
//! message, where a person lives, which forum holds a post. They return
//! `None` when the schema invariant they rely on is broken instead of
//! panicking.

use crate::edge::{Direction, EdgeKind};
use crate::error::Result;
use crate::graph::{NodeId, SocialGraph};
use serde::{Deserialize, Serialize};
use snb_core::{Node, Person};
use std::collections::HashSet;

/// A study or work relationship, resolved to names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Affiliation {
    pub organisation: String,
    /// Class year for universities, work-from year for companies.
    pub year: i32,
    /// City of a university, country of a company.
    pub place: String,
}

impl SocialGraph {
    pub fn person(&self, node: NodeId) -> Option<&Person> {
        self.node(node).and_then(Node::as_person)
    }

    /// Author of a message.
    pub fn creator_of(&self, message: NodeId) -> Option<NodeId> {
        self.neighbor(message, EdgeKind::HasCreator, Direction::Outgoing)
    }

    /// Messages written by a person.
    pub fn messages_of(&self, person: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors(person, EdgeKind::HasCreator, Direction::Incoming)
            .map(|(message, _)| message)
    }

    /// Place a person, message or organisation is located in.
    pub fn location_of(&self, node: NodeId) -> Option<NodeId> {
        self.neighbor(node, EdgeKind::IsLocatedIn, Direction::Outgoing)
    }

    /// Country a person lives in, through their city.
    pub fn country_of_person(&self, person: NodeId) -> Option<NodeId> {
        let city = self.location_of(person)?;
        self.neighbor(city, EdgeKind::IsPartOf, Direction::Outgoing)
    }

    /// Name of a place, tag or organisation node.
    pub fn name_of(&self, node: NodeId) -> Option<&str> {
        self.node(node).and_then(Node::name)
    }

    /// Message a comment directly replies to.
    pub fn parent_of(&self, comment: NodeId) -> Option<NodeId> {
        self.neighbor(comment, EdgeKind::ReplyOf, Direction::Outgoing)
    }

    /// Root post of a reply tree. A post is its own progenitor.
    pub fn progenitor_of(&self, message: NodeId) -> Result<NodeId> {
        self.ancestor_chain(message, EdgeKind::ReplyOf, Direction::Outgoing)
    }

    /// Forum that contains a post.
    pub fn forum_of_post(&self, post: NodeId) -> Option<NodeId> {
        self.neighbor(post, EdgeKind::ContainerOf, Direction::Incoming)
    }

    pub fn tags_of(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors(node, EdgeKind::HasTag, Direction::Outgoing)
            .map(|(tag, _)| tag)
    }

    /// Direct friends of a person, without duplicates or the person itself.
    pub fn friends_of(&self, person: NodeId) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        self.neighbors(person, EdgeKind::Knows, Direction::Both)
            .map(|(friend, _)| friend)
            .filter(|&friend| friend != person && seen.insert(friend))
            .collect()
    }

    pub fn knows(&self, a: NodeId, b: NodeId) -> bool {
        self.has_neighbor(a, b, EdgeKind::Knows, Direction::Both)
    }

    /// Universities a person studied at, with the city of each.
    pub fn schools_of(&self, person: NodeId) -> Vec<Affiliation> {
        self.affiliations(person, EdgeKind::StudyAt)
    }

    /// Companies a person works at, with the country of each.
    pub fn companies_of(&self, person: NodeId) -> Vec<Affiliation> {
        self.affiliations(person, EdgeKind::WorksAt)
    }

    fn affiliations(&self, person: NodeId, kind: EdgeKind) -> Vec<Affiliation> {
        let mut found: Vec<Affiliation> = self
            .neighbors(person, kind, Direction::Outgoing)
            .map(|(org, edge)| Affiliation {
                organisation: self.name_of(org).unwrap_or_default().to_string(),
                year: edge.year.unwrap_or_default(),
                place: self
                    .location_of(org)
                    .and_then(|place| self.name_of(place))
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect();
        found.sort_by(|a, b| {
            a.organisation
                .cmp(&b.organisation)
                .then_with(|| a.year.cmp(&b.year))
        });
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;
    use snb_core::{Comment, Forum, NodeLabel, Organisation, Place, Post};

    #[test]
    fn test_person_location_chain() {
        let mut graph = SocialGraph::new();
        let ada = graph.add_node(Node::Person(Person::new(1, "Ada", "Lovelace")));
        let london = graph.add_node(Node::City(Place::new(10, "London")));
        let uk = graph.add_node(Node::Country(Place::new(20, "United_Kingdom")));
        graph.add_edge(ada, london, Edge::new(EdgeKind::IsLocatedIn));
        graph.add_edge(london, uk, Edge::new(EdgeKind::IsPartOf));

        assert_eq!(graph.location_of(ada), Some(london));
        assert_eq!(graph.country_of_person(ada), Some(uk));
        assert_eq!(graph.name_of(uk), Some("United_Kingdom"));
        assert_eq!(graph.find_by_name(NodeLabel::Country, "United_Kingdom"), Some(uk));
    }

    #[test]
    fn test_message_helpers() {
        let mut graph = SocialGraph::new();
        let ada = graph.add_node(Node::Person(Person::new(1, "Ada", "Lovelace")));
        let forum = graph.add_node(Node::Forum(Forum::new(5, "Engines", 0)));
        let post = graph.add_node(Node::Post(Post::new(100, "notes", 1)));
        let reply = graph.add_node(Node::Comment(Comment::new(101, "re", 2)));
        let nested = graph.add_node(Node::Comment(Comment::new(102, "re re", 3)));
        graph.add_edge(forum, post, Edge::new(EdgeKind::ContainerOf));
        graph.add_edge(post, ada, Edge::new(EdgeKind::HasCreator));
        graph.add_edge(reply, ada, Edge::new(EdgeKind::HasCreator));
        graph.add_edge(reply, post, Edge::new(EdgeKind::ReplyOf));
        graph.add_edge(nested, reply, Edge::new(EdgeKind::ReplyOf));

        assert_eq!(graph.creator_of(post), Some(ada));
        assert_eq!(graph.messages_of(ada).count(), 2);
        assert_eq!(graph.parent_of(nested), Some(reply));
        assert_eq!(graph.progenitor_of(nested).unwrap(), post);
        assert_eq!(graph.forum_of_post(post), Some(forum));
        assert_eq!(graph.creator_of(nested), None);
    }

    #[test]
    fn test_friends_are_deduplicated() {
        let mut graph = SocialGraph::new();
        let a = graph.add_node(Node::Person(Person::new(1, "a", "a")));
        let b = graph.add_node(Node::Person(Person::new(2, "b", "b")));
        graph.add_edge(a, b, Edge::dated(EdgeKind::Knows, 0));
        graph.add_edge(b, a, Edge::dated(EdgeKind::Knows, 1));

        assert_eq!(graph.friends_of(a), vec![b]);
        assert!(graph.knows(a, b) && graph.knows(b, a));
    }

    #[test]
    fn test_affiliations() {
        let mut graph = SocialGraph::new();
        let ada = graph.add_node(Node::Person(Person::new(1, "Ada", "Lovelace")));
        let london = graph.add_node(Node::City(Place::new(10, "London")));
        let uk = graph.add_node(Node::Country(Place::new(20, "United_Kingdom")));
        let ucl = graph.add_node(Node::Organisation(Organisation::new(30, "UCL")));
        let acme = graph.add_node(Node::Organisation(Organisation::new(31, "Acme")));
        graph.add_edge(ucl, london, Edge::new(EdgeKind::IsLocatedIn));
        graph.add_edge(acme, uk, Edge::new(EdgeKind::IsLocatedIn));
        graph.add_edge(ada, ucl, Edge::with_year(EdgeKind::StudyAt, 1833));
        graph.add_edge(ada, acme, Edge::with_year(EdgeKind::WorksAt, 1840));

        assert_eq!(
            graph.schools_of(ada),
            vec![Affiliation {
                organisation: "UCL".to_string(),
                year: 1833,
                place: "London".to_string(),
            }]
        );
        assert_eq!(graph.companies_of(ada)[0].place, "United_Kingdom");
    }
}
