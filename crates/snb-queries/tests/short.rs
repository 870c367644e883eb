mod common;

use common::{database, day};
use snb_core::time::date_millis;
use snb_queries::short::*;

#[test]
fn test_person_profile() {
    let db = database();
    let profile = person_profile(&db, 3).unwrap().unwrap();
    assert_eq!(profile.first_name, "Carol");
    assert_eq!(profile.last_name, "Brown");
    assert_eq!(profile.city_id, 12);
    assert_eq!(Some(profile.birthday), date_millis(1992, 4, 21));

    assert!(person_profile(&db, 999).unwrap().is_none());
}

#[test]
fn test_person_recent_messages_point_at_thread_root() {
    let db = database();
    let rows = person_recent_messages(&db, 1, DEFAULT_MESSAGE_LIMIT).unwrap();
    let ids: Vec<_> = rows.iter().map(|r| r.message_id).collect();
    assert_eq!(ids, vec![505, 600]);

    assert_eq!(rows[0].original_post_id, 505);
    assert_eq!(rows[0].original_poster_id, 1);
    assert_eq!(rows[1].original_post_id, 500);
    assert_eq!(rows[1].original_poster_id, 2);
    assert_eq!(rows[1].original_poster_first_name, "Bob");

    assert_eq!(person_recent_messages(&db, 1, 1).unwrap().len(), 1);
}

#[test]
fn test_person_recent_messages_nested_reply() {
    let db = database();
    // 601 replies to 600, which replies to post 500
    let rows = person_recent_messages(&db, 2, 10).unwrap();
    let thanks = rows.iter().find(|r| r.message_id == 601).unwrap();
    assert_eq!(thanks.original_post_id, 500);
    assert_eq!(thanks.original_poster_id, 2);
}

#[test]
fn test_person_friends_newest_first() {
    let db = database();
    let rows = person_friends(&db, 1).unwrap();
    let friends: Vec<_> = rows.iter().map(|r| (r.person_id, r.friendship_date)).collect();
    assert_eq!(friends, vec![(4, day(3)), (2, day(1))]);
    assert!(person_friends(&db, 7).unwrap().is_empty());
}

#[test]
fn test_message_content_falls_back_to_image() {
    let db = database();
    let photo = message_content(&db, 501).unwrap().unwrap();
    assert_eq!(photo.content, "photo501.jpg");
    assert_eq!(photo.creation_date, day(20));

    let comment = message_content(&db, 600).unwrap().unwrap();
    assert_eq!(comment.content, "nice");

    assert!(message_content(&db, 999).unwrap().is_none());
}

#[test]
fn test_message_creator() {
    let db = database();
    let creator = message_creator(&db, 601).unwrap().unwrap();
    assert_eq!(creator.person_id, 2);
    assert_eq!(creator.last_name, "Jones");
    assert!(message_creator(&db, 999).unwrap().is_none());
}

#[test]
fn test_message_forum_of_comment() {
    let db = database();
    let forum = message_forum(&db, 601).unwrap().unwrap();
    assert_eq!(forum.forum_id, 400);
    assert_eq!(forum.forum_title, "Rock fans");
    assert_eq!(forum.moderator_id, 1);
    assert_eq!(forum.moderator_first_name, "Alice");

    let art = message_forum(&db, 504).unwrap().unwrap();
    assert_eq!(art.forum_id, 401);
    assert_eq!(art.moderator_id, 2);
}

#[test]
fn test_message_replies() {
    let db = database();
    let rows = message_replies(&db, 505).unwrap();
    let replies: Vec<_> = rows.iter().map(|r| (r.comment_id, r.knows)).collect();
    assert_eq!(replies, vec![(604, false), (602, true)]);
    assert_eq!(rows[0].author_id, 5);

    assert!(message_replies(&db, 502).unwrap().is_empty());
}
