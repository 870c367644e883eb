//! Edge types for the social graph.
//!
//! Edge kinds follow the social network schema. A few of them carry a
//! property: a timestamp (friendship, membership and like dates) or a
//! year (study and work relationships).

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// The type of relationship between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    /// Person knows person. Stored once, read in both directions.
    Knows,

    /// Message to its author.
    HasCreator,

    /// Forum to a post it contains.
    ContainerOf,

    /// Comment to the message it replies to.
    ReplyOf,

    /// Message or forum to a tag.
    HasTag,

    /// Tag to its tag class.
    HasType,

    /// Tag class to its parent class.
    IsSubclassOf,

    /// Person to city, message or organisation to a place.
    IsLocatedIn,

    /// City to country.
    IsPartOf,

    /// Forum to a member, dated by the join date.
    HasMember,

    /// Forum to its moderator.
    HasModerator,

    /// Person to a message, dated.
    Likes,

    /// Person to university, with the class year.
    StudyAt,

    /// Person to company, with the year work started.
    WorksAt,

    /// Person to a tag.
    HasInterest,
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 15] = [
        EdgeKind::Knows,
        EdgeKind::HasCreator,
        EdgeKind::ContainerOf,
        EdgeKind::ReplyOf,
        EdgeKind::HasTag,
        EdgeKind::HasType,
        EdgeKind::IsSubclassOf,
        EdgeKind::IsLocatedIn,
        EdgeKind::IsPartOf,
        EdgeKind::HasMember,
        EdgeKind::HasModerator,
        EdgeKind::Likes,
        EdgeKind::StudyAt,
        EdgeKind::WorksAt,
        EdgeKind::HasInterest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Knows => "KNOWS",
            Self::HasCreator => "HAS_CREATOR",
            Self::ContainerOf => "CONTAINER_OF",
            Self::ReplyOf => "REPLY_OF",
            Self::HasTag => "HAS_TAG",
            Self::HasType => "HAS_TYPE",
            Self::IsSubclassOf => "IS_SUBCLASS_OF",
            Self::IsLocatedIn => "IS_LOCATED_IN",
            Self::IsPartOf => "IS_PART_OF",
            Self::HasMember => "HAS_MEMBER",
            Self::HasModerator => "HAS_MODERATOR",
            Self::Likes => "LIKES",
            Self::StudyAt => "STUDY_AT",
            Self::WorksAt => "WORKS_AT",
            Self::HasInterest => "HAS_INTEREST",
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown edge kind: {0}")]
pub struct ParseEdgeKindError(pub String);

impl FromStr for EdgeKind {
    type Err = ParseEdgeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EdgeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEdgeKindError(s.to_string()))
    }
}

/// An edge in the social graph with its optional property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// The kind of relationship.
    pub kind: EdgeKind,

    /// Creation or join date in epoch milliseconds.
    pub timestamp: Option<i64>,

    /// Class year or work-from year.
    pub year: Option<i32>,
}

impl Edge {
    /// Creates an edge without properties.
    pub fn new(kind: EdgeKind) -> Self {
        Self {
            kind,
            timestamp: None,
            year: None,
        }
    }

    /// Creates an edge carrying a date.
    pub fn dated(kind: EdgeKind, timestamp: i64) -> Self {
        Self {
            kind,
            timestamp: Some(timestamp),
            year: None,
        }
    }

    /// Creates an edge carrying a year.
    pub fn with_year(kind: EdgeKind, year: i32) -> Self {
        Self {
            kind,
            timestamp: None,
            year: Some(year),
        }
    }
}

/// Which edges of a node to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Outgoing,
    Incoming,
    /// Outgoing edges first, then incoming.
    Both,
}

impl Direction {
    pub(crate) fn petgraph(self) -> &'static [petgraph::Direction] {
        match self {
            Direction::Outgoing => &[petgraph::Direction::Outgoing],
            Direction::Incoming => &[petgraph::Direction::Incoming],
            Direction::Both => &[petgraph::Direction::Outgoing, petgraph::Direction::Incoming],
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Outgoing => Direction::Incoming,
            Direction::Incoming => Direction::Outgoing,
            Direction::Both => Direction::Both,
        }
    }
}
