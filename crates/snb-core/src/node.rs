//! Entity types stored on graph nodes.
//!
//! Each label has its own struct with a fixed property set. [`Node`] is
//! the sum over them and is what the graph actually stores. Dates are
//! epoch milliseconds in UTC throughout.

use crate::label::NodeLabel;
use serde::{Deserialize, Serialize};

/// A member of the social network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: i64,
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
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

impl Person {
    pub fn new(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }
}

/// A top-level message, always contained in a forum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
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
}

impl Post {
    pub fn new(id: i64, content: impl Into<String>, creation_date: i64) -> Self {
        let content = content.into();
        Self {
            id,
            length: content.chars().count() as i32,
            content,
            creation_date,
            ..Self::default()
        }
    }
}

/// A reply to a post or to another comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub creation_date: i64,
    #[serde(default)]
    pub location_ip: String,
    #[serde(default)]
    pub browser_used: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub length: i32,
}

impl Comment {
    pub fn new(id: i64, content: impl Into<String>, creation_date: i64) -> Self {
        let content = content.into();
        Self {
            id,
            length: content.chars().count() as i32,
            content,
            creation_date,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forum {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub creation_date: i64,
}

impl Forum {
    pub fn new(id: i64, title: impl Into<String>, creation_date: i64) -> Self {
        Self {
            id,
            title: title.into(),
            creation_date,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

impl Tag {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagClass {
    pub id: i64,
    pub name: String,
}

impl TagClass {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A city or a country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub id: i64,
    pub name: String,
}

impl Place {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A university or a company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organisation {
    pub id: i64,
    pub name: String,
}

impl Organisation {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A dynamically typed view of one property, used by generic lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Property {
    Int(i64),
    Text(String),
    List(Vec<String>),
}

impl From<i64> for Property {
    fn from(value: i64) -> Self {
        Property::Int(value)
    }
}

impl From<&str> for Property {
    fn from(value: &str) -> Self {
        Property::Text(value.to_string())
    }
}

impl From<String> for Property {
    fn from(value: String) -> Self {
        Property::Text(value)
    }
}

/// A node in the social graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    Person(Person),
    Post(Post),
    Comment(Comment),
    Forum(Forum),
    Tag(Tag),
    TagClass(TagClass),
    City(Place),
    Country(Place),
    Organisation(Organisation),
}

impl Node {
    pub fn label(&self) -> NodeLabel {
        match self {
            Node::Person(_) => NodeLabel::Person,
            Node::Post(_) => NodeLabel::Post,
            Node::Comment(_) => NodeLabel::Comment,
            Node::Forum(_) => NodeLabel::Forum,
            Node::Tag(_) => NodeLabel::Tag,
            Node::TagClass(_) => NodeLabel::TagClass,
            Node::City(_) => NodeLabel::City,
            Node::Country(_) => NodeLabel::Country,
            Node::Organisation(_) => NodeLabel::Organisation,
        }
    }

    /// The entity id. Unique within a label.
    pub fn id(&self) -> i64 {
        match self {
            Node::Person(p) => p.id,
            Node::Post(p) => p.id,
            Node::Comment(c) => c.id,
            Node::Forum(f) => f.id,
            Node::Tag(t) => t.id,
            Node::TagClass(t) => t.id,
            Node::City(p) | Node::Country(p) => p.id,
            Node::Organisation(o) => o.id,
        }
    }

    /// The `name` property of tags, tag classes, places and organisations.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Tag(t) => Some(&t.name),
            Node::TagClass(t) => Some(&t.name),
            Node::City(p) | Node::Country(p) => Some(&p.name),
            Node::Organisation(o) => Some(&o.name),
            _ => None,
        }
    }

    pub fn is_post(&self) -> bool {
        matches!(self, Node::Post(_))
    }

    pub fn is_message(&self) -> bool {
        matches!(self, Node::Post(_) | Node::Comment(_))
    }

    pub fn as_person(&self) -> Option<&Person> {
        match self {
            Node::Person(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_forum(&self) -> Option<&Forum> {
        match self {
            Node::Forum(f) => Some(f),
            _ => None,
        }
    }

    pub fn creation_date(&self) -> Option<i64> {
        match self {
            Node::Person(p) => Some(p.creation_date),
            Node::Post(p) => Some(p.creation_date),
            Node::Comment(c) => Some(c.creation_date),
            Node::Forum(f) => Some(f.creation_date),
            _ => None,
        }
    }

    /// Displayed message text: the content, or the image file of a post
    /// whose content is empty.
    pub fn content(&self) -> Option<&str> {
        match self {
            Node::Post(p) if p.content.is_empty() => Some(&p.image_file),
            Node::Post(p) => Some(&p.content),
            Node::Comment(c) => Some(&c.content),
            _ => None,
        }
    }

    /// Reads a property by its schema name (`firstName`, `creationDate`, ...).
    pub fn property(&self, key: &str) -> Option<Property> {
        if key == "id" {
            return Some(Property::Int(self.id()));
        }
        if key == "name" {
            return self.name().map(Property::from);
        }
        let value = match (self, key) {
            (Node::Person(p), "firstName") => p.first_name.as_str().into(),
            (Node::Person(p), "lastName") => p.last_name.as_str().into(),
            (Node::Person(p), "gender") => p.gender.as_str().into(),
            (Node::Person(p), "birthday") => p.birthday.into(),
            (Node::Person(p), "locationIP") => p.location_ip.as_str().into(),
            (Node::Person(p), "browserUsed") => p.browser_used.as_str().into(),
            (Node::Person(p), "email") => Property::List(p.emails.clone()),
            (Node::Person(p), "speaks") => Property::List(p.languages.clone()),
            (Node::Post(p), "imageFile") => p.image_file.as_str().into(),
            (Node::Post(p), "locationIP") => p.location_ip.as_str().into(),
            (Node::Post(p), "browserUsed") => p.browser_used.as_str().into(),
            (Node::Post(p), "language") => p.language.as_str().into(),
            (Node::Post(p), "content") => p.content.as_str().into(),
            (Node::Post(p), "length") => i64::from(p.length).into(),
            (Node::Comment(c), "locationIP") => c.location_ip.as_str().into(),
            (Node::Comment(c), "browserUsed") => c.browser_used.as_str().into(),
            (Node::Comment(c), "content") => c.content.as_str().into(),
            (Node::Comment(c), "length") => i64::from(c.length).into(),
            (Node::Forum(f), "title") => f.title.as_str().into(),
            (_, "creationDate") => self.creation_date()?.into(),
            _ => return None,
        };
        Some(value)
    }
}
