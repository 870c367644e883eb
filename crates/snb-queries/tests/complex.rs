mod common;

use common::{database, day};
use snb_core::{Node, Person};
use snb_graph::{Database, Edge, EdgeKind, SocialGraph};
use snb_queries::complex::*;

fn ids<T>(rows: &[T], id: impl Fn(&T) -> i64) -> Vec<i64> {
    rows.iter().map(id).collect()
}

#[test]
fn test_friends_by_name_orders_by_distance() {
    let db = database();
    let rows = friends_by_name(&db, 1, "Bob", 20).unwrap();
    assert_eq!(ids(&rows, |r| r.person_id), vec![2, 5, 6]);
    assert_eq!(
        rows.iter().map(|r| r.distance).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(rows[0].city_name, "Paris");
    assert_eq!(rows[0].companies.len(), 1);
    assert_eq!(rows[0].companies[0].year, 2015);
    assert!(rows[0].universities.is_empty());

    let limited = friends_by_name(&db, 1, "Bob", 2).unwrap();
    assert_eq!(ids(&limited, |r| r.person_id), vec![2, 5]);
}

#[test]
fn test_friends_by_name_breaks_ties_by_last_name_then_id() {
    // Person 1 knows 10..=14 directly; 10 knows 20. Everyone but 1 is Eve.
    let mut graph = SocialGraph::new();
    let start = graph.add_node(Node::Person(Person::new(1, "Ann", "Start")));
    let eve = |graph: &mut SocialGraph, id: i64, last: &str| {
        graph.add_node(Node::Person(Person::new(id, "Eve", last)))
    };
    let smith = eve(&mut graph, 10, "smith");
    let direct = [
        smith,
        eve(&mut graph, 11, "adams"),
        eve(&mut graph, 13, "SMITH"),
        eve(&mut graph, 12, "Smith"),
        eve(&mut graph, 14, "Baker"),
    ];
    let far = eve(&mut graph, 20, "Aaron");
    for friend in direct {
        graph.add_edge(start, friend, Edge::dated(EdgeKind::Knows, 0));
    }
    graph.add_edge(smith, far, Edge::dated(EdgeKind::Knows, 0));
    let db = Database::in_memory(graph);

    let rows = friends_by_name(&db, 1, "Eve", 20).unwrap();
    // Case-insensitive: adams < Baker < smith = Smith = SMITH, the last
    // three by id. Distance comes before name, so Aaron is last.
    assert_eq!(ids(&rows, |r| r.person_id), vec![11, 14, 10, 12, 13, 20]);
    assert_eq!(
        rows.iter().map(|r| r.distance).collect::<Vec<_>>(),
        vec![1, 1, 1, 1, 1, 2]
    );

    let limited = friends_by_name(&db, 1, "Eve", 4).unwrap();
    assert_eq!(ids(&limited, |r| r.person_id), vec![11, 14, 10, 12]);
}

#[test]
fn test_friends_by_name_missing_person() {
    let db = database();
    assert!(friends_by_name(&db, 999, "Bob", 20).unwrap().is_empty());
    assert!(friends_by_name(&db, 1, "Alice", 20).unwrap().is_empty());
}

#[test]
fn test_recent_friend_messages() {
    let db = database();
    let rows = recent_friend_messages(&db, 1, day(20), 20).unwrap();
    assert_eq!(ids(&rows, |r| r.message_id), vec![501, 602, 601, 500, 504]);
    assert_eq!(rows[0].content, "photo501.jpg");
    assert_eq!(rows[1].person_id, 4);

    let limited = recent_friend_messages(&db, 1, day(20), 2).unwrap();
    assert_eq!(ids(&limited, |r| r.message_id), vec![501, 602]);
}

#[test]
fn test_friends_in_countries() {
    let db = database();
    let rows = friends_in_countries(&db, 1, "Germany", "France", 0, 100, 20).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].person_id, 3);
    assert_eq!((rows[0].x_count, rows[0].y_count, rows[0].count), (1, 1, 2));

    // 502 falls outside a 25-day window
    assert!(friends_in_countries(&db, 1, "Germany", "France", 0, 25, 20)
        .unwrap()
        .is_empty());
    assert!(friends_in_countries(&db, 1, "Atlantis", "France", 0, 100, 20)
        .unwrap()
        .is_empty());
}

#[test]
fn test_new_topics_skips_older_tags() {
    let db = database();
    let rows = new_topics(&db, 1, day(8), 5, 10).unwrap();
    let tags: Vec<_> = rows
        .iter()
        .map(|r| (r.tag_name.as_str(), r.post_count))
        .collect();
    assert_eq!(tags, vec![("Jazz", 1), ("Rock", 1)]);
}

#[test]
fn test_huge_durations_saturate() {
    let db = database();
    let wide = friends_in_countries(&db, 1, "Germany", "France", 0, 100_000, 20).unwrap();
    let huge = friends_in_countries(&db, 1, "Germany", "France", 0, i64::MAX, 20).unwrap();
    assert_eq!(huge, wide);

    let wide = new_topics(&db, 1, day(8), 100_000, 10).unwrap();
    let huge = new_topics(&db, 1, day(8), i64::MAX, 10).unwrap();
    assert_eq!(huge, wide);
}

#[test]
fn test_new_groups_keeps_empty_forums() {
    let db = database();
    let rows = new_groups(&db, 1, day(4), 20).unwrap();
    let groups: Vec<_> = rows.iter().map(|r| (r.forum_id, r.post_count)).collect();
    assert_eq!(groups, vec![(400, 3), (401, 1), (402, 0)]);
    assert_eq!(rows[0].forum_title, "Rock fans");
}

#[test]
fn test_tag_cooccurrence() {
    let db = database();
    let rows = tag_cooccurrence(&db, 1, "Rock", 10).unwrap();
    let tags: Vec<_> = rows
        .iter()
        .map(|r| (r.tag_name.as_str(), r.post_count))
        .collect();
    assert_eq!(tags, vec![("Beach", 1), ("Jazz", 1), ("Painting", 1)]);
    assert!(tag_cooccurrence(&db, 1, "Opera", 10).unwrap().is_empty());
}

#[test]
fn test_recent_likers() {
    let db = database();
    let rows = recent_likers(&db, 1, 20).unwrap();
    assert_eq!(ids(&rows, |r| r.person_id), vec![3, 4, 2]);

    assert_eq!(rows[0].message_id, 600);
    assert_eq!(rows[0].latency_minutes, 11520);
    assert!(rows[0].is_new);

    // Both of Dave's likes are on day 18; the lower message id wins
    assert_eq!(rows[1].message_id, 505);
    assert_eq!(rows[1].latency_minutes, 4320);
    assert!(!rows[1].is_new);

    assert_eq!(rows[2].like_date, day(17));
    assert_eq!(rows[2].latency_minutes, 2880);
}

#[test]
fn test_recent_replies() {
    let db = database();
    let rows = recent_replies(&db, 1, 20).unwrap();
    assert_eq!(ids(&rows, |r| r.comment_id), vec![604, 602, 601]);
    assert_eq!(rows[0].person_id, 5);
    assert_eq!(rows[0].content, "hi alice");
}

#[test]
fn test_recent_circle_messages() {
    let db = database();
    let rows = recent_circle_messages(&db, 1, day(20), 20).unwrap();
    assert_eq!(ids(&rows, |r| r.message_id), vec![604, 602, 601, 500, 504]);
}

#[test]
fn test_friend_recommendation() {
    let db = database();
    let rows = friend_recommendation(&db, 1, 4, 10).unwrap();
    let scores: Vec<_> = rows.iter().map(|r| (r.person_id, r.score)).collect();
    assert_eq!(scores, vec![(5, 1), (3, -1)]);
    assert_eq!(rows[0].city_name, "Paris");

    assert!(friend_recommendation(&db, 1, 8, 10).unwrap().is_empty());
}

#[test]
fn test_job_referral() {
    let db = database();
    let rows = job_referral(&db, 1, "France", 2016, 10).unwrap();
    let jobs: Vec<_> = rows.iter().map(|r| (r.person_id, r.work_from)).collect();
    assert_eq!(jobs, vec![(3, 2009), (2, 2015)]);
    assert_eq!(rows[0].organisation_name, "Acme");

    let earlier = job_referral(&db, 1, "France", 2015, 10).unwrap();
    assert_eq!(ids(&earlier, |r| r.person_id), vec![3]);
}

#[test]
fn test_expert_search_follows_subclasses() {
    let db = database();
    let rows = expert_search(&db, 1, "Artist", 20).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].person_id, 4);
    assert_eq!(rows[0].tag_names, vec!["Rock".to_string()]);
    assert_eq!(rows[0].reply_count, 1);

    assert!(expert_search(&db, 1, "Place", 20).unwrap().is_empty());
    assert!(expert_search(&db, 1, "Nothing", 20).unwrap().is_empty());
}

#[test]
fn test_shortest_path() {
    let db = database();
    assert_eq!(shortest_path(&db, 1, 6).unwrap(), Some(3));
    assert_eq!(shortest_path(&db, 1, 1).unwrap(), Some(0));
    assert_eq!(shortest_path(&db, 1, 7).unwrap(), Some(-1));
    assert_eq!(shortest_path(&db, 1, 999).unwrap(), None);
}

#[test]
fn test_weighted_paths() {
    let db = database();
    let paths = weighted_paths(&db, 1, 3).unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].person_ids, vec![1, 2, 3]);
    assert!((paths[0].weight - 2.5).abs() < 1e-9);

    assert!(weighted_paths(&db, 1, 7).unwrap().is_empty());
}

#[test]
fn test_zero_limit_returns_nothing() {
    let db = database();
    assert!(friends_by_name(&db, 1, "Bob", 0).unwrap().is_empty());
    assert!(recent_likers(&db, 1, 0).unwrap().is_empty());
}
