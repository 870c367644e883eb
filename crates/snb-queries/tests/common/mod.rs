//! A small social network shared by the integration tests.
//!
//! Germany, France and Spain with one city each; a tag class tree
//! Thing > Artist > Musician and Thing > Place; seven people, where 1 knows
//! 2 and 4, 2 knows 3, 4 knows 5, 3 knows 6, and 7 knows nobody.

#![allow(dead_code)]

use snb_core::time::{date_millis, DAY_MILLIS};
use snb_core::{
    Comment, Forum, Node, NodeLabel, Organisation, Person, Place, Post, Tag, TagClass,
};
use snb_graph::{Database, EdgeKind, GraphBuilder, NodeRef, SnapshotEdge, SocialGraph};

pub fn day(n: i64) -> i64 {
    n * DAY_MILLIS
}

struct Fixture {
    builder: GraphBuilder,
}

impl Fixture {
    fn node(&mut self, node: Node) {
        self.builder.add_node(node).unwrap();
    }

    fn edge(&mut self, kind: EdgeKind, from: NodeRef, to: NodeRef) {
        self.builder.add_edge(SnapshotEdge::new(kind, from, to));
    }

    fn dated(&mut self, kind: EdgeKind, from: NodeRef, to: NodeRef, at: i64) {
        self.builder.add_edge(SnapshotEdge::new(kind, from, to).at(at));
    }

    fn yearly(&mut self, kind: EdgeKind, from: NodeRef, to: NodeRef, year: i32) {
        self.builder
            .add_edge(SnapshotEdge::new(kind, from, to).in_year(year));
    }

    fn person(&mut self, id: i64, first: &str, last: &str, city: i64, birthday: (i32, u32, u32)) {
        let (y, m, d) = birthday;
        let mut p = Person::new(id, first, last);
        p.birthday = date_millis(y, m, d).unwrap();
        p.gender = if id % 2 == 0 { "male" } else { "female" }.to_string();
        p.creation_date = day(0);
        self.node(Node::Person(p));
        self.edge(
            EdgeKind::IsLocatedIn,
            NodeRef::new(NodeLabel::Person, id),
            NodeRef::new(NodeLabel::City, city),
        );
    }

    fn post(&mut self, post: Post, author: i64, forum: i64, country: i64, tags: &[i64]) {
        let id = post.id;
        self.node(Node::Post(post));
        let post = NodeRef::new(NodeLabel::Post, id);
        self.edge(EdgeKind::HasCreator, post, NodeRef::new(NodeLabel::Person, author));
        self.edge(EdgeKind::ContainerOf, NodeRef::new(NodeLabel::Forum, forum), post);
        self.edge(EdgeKind::IsLocatedIn, post, NodeRef::new(NodeLabel::Country, country));
        for &tag in tags {
            self.edge(EdgeKind::HasTag, post, NodeRef::new(NodeLabel::Tag, tag));
        }
    }

    fn comment(&mut self, comment: Comment, author: i64, parent: NodeRef, country: i64) {
        let id = comment.id;
        self.node(Node::Comment(comment));
        let comment = NodeRef::new(NodeLabel::Comment, id);
        self.edge(EdgeKind::HasCreator, comment, NodeRef::new(NodeLabel::Person, author));
        self.edge(EdgeKind::ReplyOf, comment, parent);
        self.edge(EdgeKind::IsLocatedIn, comment, NodeRef::new(NodeLabel::Country, country));
    }
}

pub fn graph() -> SocialGraph {
    let mut f = Fixture {
        builder: GraphBuilder::new(),
    };
    let p = |id| NodeRef::new(NodeLabel::Person, id);
    let post = |id| NodeRef::new(NodeLabel::Post, id);
    let comment = |id| NodeRef::new(NodeLabel::Comment, id);
    let forum = |id| NodeRef::new(NodeLabel::Forum, id);
    let tag = |id| NodeRef::new(NodeLabel::Tag, id);
    let class = |id| NodeRef::new(NodeLabel::TagClass, id);
    let org = |id| NodeRef::new(NodeLabel::Organisation, id);

    for (id, name) in [(1, "Germany"), (2, "France"), (3, "Spain")] {
        f.node(Node::Country(Place::new(id, name)));
    }
    for (id, name, country) in [(10, "Berlin", 1), (11, "Paris", 2), (12, "Madrid", 3)] {
        f.node(Node::City(Place::new(id, name)));
        f.edge(
            EdgeKind::IsPartOf,
            NodeRef::new(NodeLabel::City, id),
            NodeRef::new(NodeLabel::Country, country),
        );
    }

    for (id, name) in [(100, "Thing"), (101, "Artist"), (102, "Musician"), (103, "Place")] {
        f.node(Node::TagClass(TagClass::new(id, name)));
    }
    f.edge(EdgeKind::IsSubclassOf, class(101), class(100));
    f.edge(EdgeKind::IsSubclassOf, class(102), class(101));
    f.edge(EdgeKind::IsSubclassOf, class(103), class(100));
    for (id, name, type_id) in [
        (200, "Rock", 102),
        (201, "Jazz", 102),
        (202, "Painting", 101),
        (203, "Beach", 103),
    ] {
        f.node(Node::Tag(Tag::new(id, name)));
        f.edge(EdgeKind::HasType, tag(id), class(type_id));
    }

    f.node(Node::Organisation(Organisation::new(300, "TU Berlin")));
    f.edge(EdgeKind::IsLocatedIn, org(300), NodeRef::new(NodeLabel::City, 10));
    f.node(Node::Organisation(Organisation::new(301, "Acme")));
    f.edge(EdgeKind::IsLocatedIn, org(301), NodeRef::new(NodeLabel::Country, 2));
    f.node(Node::Organisation(Organisation::new(302, "Globex")));
    f.edge(EdgeKind::IsLocatedIn, org(302), NodeRef::new(NodeLabel::Country, 1));

    f.person(1, "Alice", "Smith", 10, (1990, 3, 25));
    f.person(2, "Bob", "Jones", 11, (1985, 4, 10));
    f.person(3, "Carol", "Brown", 12, (1992, 4, 21));
    f.person(4, "Dave", "Jones", 10, (1988, 3, 30));
    f.person(5, "Bob", "Adams", 11, (1991, 5, 10));
    f.person(6, "Bob", "Young", 12, (1980, 1, 1));
    f.person(7, "Grace", "Hopper", 10, (1906, 12, 9));

    f.edge(EdgeKind::HasInterest, p(1), tag(200));
    f.yearly(EdgeKind::StudyAt, p(1), org(300), 2010);
    f.yearly(EdgeKind::WorksAt, p(2), org(301), 2015);
    f.yearly(EdgeKind::WorksAt, p(3), org(301), 2009);
    f.yearly(EdgeKind::WorksAt, p(4), org(302), 2012);

    f.dated(EdgeKind::Knows, p(1), p(2), day(1));
    f.dated(EdgeKind::Knows, p(1), p(4), day(3));
    f.dated(EdgeKind::Knows, p(2), p(3), day(2));
    f.dated(EdgeKind::Knows, p(4), p(5), day(4));
    f.dated(EdgeKind::Knows, p(3), p(6), day(5));

    f.node(Node::Forum(Forum::new(400, "Rock fans", day(0))));
    f.edge(EdgeKind::HasModerator, forum(400), p(1));
    f.edge(EdgeKind::HasTag, forum(400), tag(200));
    f.dated(EdgeKind::HasMember, forum(400), p(2), day(5));
    f.dated(EdgeKind::HasMember, forum(400), p(3), day(1));
    f.dated(EdgeKind::HasMember, forum(400), p(5), day(6));
    f.node(Node::Forum(Forum::new(401, "Art club", day(0))));
    f.edge(EdgeKind::HasModerator, forum(401), p(2));
    f.dated(EdgeKind::HasMember, forum(401), p(4), day(7));
    f.node(Node::Forum(Forum::new(402, "Quiet", day(0))));
    f.edge(EdgeKind::HasModerator, forum(402), p(6));
    f.dated(EdgeKind::HasMember, forum(402), p(4), day(8));

    f.post(Post::new(500, "rock and jazz", day(10)), 2, 400, 1, &[200, 201]);
    let mut photo = Post::new(501, "", day(20));
    photo.image_file = "photo501.jpg".to_string();
    f.post(photo, 2, 400, 2, &[200, 202]);
    f.post(Post::new(502, "jazz night", day(30)), 3, 400, 2, &[201]);
    f.post(Post::new(503, "rock on the beach", day(40)), 5, 400, 3, &[200, 203]);
    f.post(Post::new(504, "brushes", day(5)), 4, 401, 1, &[202]);
    f.post(Post::new(505, "my first riff", day(15)), 1, 400, 1, &[200]);

    f.comment(Comment::new(600, "nice", day(11)), 1, post(500), 1);
    f.comment(Comment::new(601, "thanks", day(12)), 2, comment(600), 1);
    f.comment(Comment::new(602, "great post", day(16)), 4, post(505), 1);
    f.comment(Comment::new(603, "lovely", day(21)), 3, post(501), 1);
    f.comment(Comment::new(604, "hi alice", day(17)), 5, post(505), 2);

    f.dated(EdgeKind::Likes, p(2), post(505), day(17));
    f.dated(EdgeKind::Likes, p(4), post(505), day(18));
    f.dated(EdgeKind::Likes, p(4), comment(600), day(18));
    f.dated(EdgeKind::Likes, p(3), comment(600), day(19));

    f.builder.build().unwrap()
}

pub fn database() -> Database {
    Database::in_memory(graph())
}
