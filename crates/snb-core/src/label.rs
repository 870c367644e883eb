//! Node labels.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// The kind of entity a node represents. Every node carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeLabel {
    Person,
    Post,
    Comment,
    Forum,
    Tag,
    TagClass,
    City,
    Country,
    Organisation,
}

impl NodeLabel {
    /// All labels, in declaration order.
    pub const ALL: [NodeLabel; 9] = [
        NodeLabel::Person,
        NodeLabel::Post,
        NodeLabel::Comment,
        NodeLabel::Forum,
        NodeLabel::Tag,
        NodeLabel::TagClass,
        NodeLabel::City,
        NodeLabel::Country,
        NodeLabel::Organisation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeLabel::Person => "Person",
            NodeLabel::Post => "Post",
            NodeLabel::Comment => "Comment",
            NodeLabel::Forum => "Forum",
            NodeLabel::Tag => "Tag",
            NodeLabel::TagClass => "TagClass",
            NodeLabel::City => "City",
            NodeLabel::Country => "Country",
            NodeLabel::Organisation => "Organisation",
        }
    }

    /// Posts and comments are both messages.
    pub fn is_message(&self) -> bool {
        matches!(self, NodeLabel::Post | NodeLabel::Comment)
    }
}

impl std::fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown node label: {0}")]
pub struct ParseLabelError(pub String);

impl FromStr for NodeLabel {
    type Err = ParseLabelError;

    /// Parses a label name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLabelError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!("person".parse::<NodeLabel>(), Ok(NodeLabel::Person));
        assert_eq!("TAGCLASS".parse::<NodeLabel>(), Ok(NodeLabel::TagClass));
        assert_eq!(
            "University".parse::<NodeLabel>(),
            Err(ParseLabelError("University".to_string()))
        );
    }

    #[test]
    fn test_display_matches_parse() {
        for label in NodeLabel::ALL {
            assert_eq!(label.to_string().parse::<NodeLabel>(), Ok(label));
        }
    }

    #[test]
    fn test_message_labels() {
        assert!(NodeLabel::Post.is_message());
        assert!(NodeLabel::Comment.is_message());
        assert!(!NodeLabel::Forum.is_message());
    }
}
