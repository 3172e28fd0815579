mod common;

use crate::common::*;
use parley_chat_lib::{
    last_message_between, mark_thread_read, send_message, thread_between, unread_count,
    update_profile_photo,
};

#[test]
fn thread_is_symmetric_and_ordered_oldest_first() {
    let (_dir, store) = open_test_store();
    let alice = register(&store, "alice", "Alice A", "pw1");
    let bob = register(&store, "bob", "Bob B", "pw2");

    send_message(&store, alice, bob, "x").expect("Failed to send x");
    send_message(&store, bob, alice, "y").expect("Failed to send y");

    // Both sends land within the same second; insertion id breaks the tie.
    let thread = thread_between(&store, alice, bob).expect("Failed to load thread");
    let bodies: Vec<&str> = thread.iter().map(|m| m.body.as_str()).collect();
    assert_eq!(bodies, vec!["x", "y"]);

    let reversed = thread_between(&store, bob, alice).expect("Failed to load thread");
    let ids: Vec<i64> = thread.iter().map(|m| m.message_id).collect();
    let reversed_ids: Vec<i64> = reversed.iter().map(|m| m.message_id).collect();
    assert_eq!(ids, reversed_ids);
}

#[test]
fn thread_rows_carry_participant_names_and_photos_joined_at_query_time() {
    let (_dir, store) = open_test_store();
    let alice = register(&store, "alice", "Alice A", "pw1");
    let bob = register(&store, "bob", "Bob B", "pw2");

    send_message(&store, alice, bob, "hello").expect("Failed to send");

    let thread = thread_between(&store, alice, bob).expect("Failed to load thread");
    assert_eq!(thread[0].sender_name.as_deref(), Some("Alice A"));
    assert_eq!(thread[0].receiver_name.as_deref(), Some("Bob B"));
    assert_eq!(thread[0].sender_photo, None);

    // A join, not a denormalised copy: a later photo change is visible on
    // the historical message.
    update_profile_photo(&store, alice, "file:///photos/alice.jpg")
        .expect("Failed to set photo");
    let thread = thread_between(&store, alice, bob).expect("Failed to load thread");
    assert_eq!(
        thread[0].sender_photo.as_deref(),
        Some("file:///photos/alice.jpg")
    );
}

#[test]
fn unread_count_is_directional() {
    let (_dir, store) = open_test_store();
    let alice = register(&store, "alice", "Alice A", "pw1");
    let bob = register(&store, "bob", "Bob B", "pw2");

    send_message(&store, bob, alice, "one").expect("Failed to send");
    send_message(&store, bob, alice, "two").expect("Failed to send");
    send_message(&store, alice, bob, "reply").expect("Failed to send");

    // Messages Alice sent must not count toward what Alice has unread.
    assert_eq!(unread_count(&store, alice, bob).unwrap(), 2);
    assert_eq!(unread_count(&store, bob, alice).unwrap(), 1);
}

#[test]
fn mark_thread_read_resets_the_count_until_the_next_send() {
    let (_dir, store) = open_test_store();
    let alice = register(&store, "alice", "Alice A", "pw1");
    let bob = register(&store, "bob", "Bob B", "pw2");

    send_message(&store, bob, alice, "one").expect("Failed to send");
    send_message(&store, bob, alice, "two").expect("Failed to send");

    let changed = mark_thread_read(&store, alice, bob).expect("Failed to mark read");
    assert_eq!(changed, 2);
    assert_eq!(unread_count(&store, alice, bob).unwrap(), 0);

    send_message(&store, bob, alice, "z").expect("Failed to send");
    assert_eq!(unread_count(&store, alice, bob).unwrap(), 1);
}

#[test]
fn mark_thread_read_with_nothing_unread_is_a_no_op_not_an_error() {
    let (_dir, store) = open_test_store();
    let alice = register(&store, "alice", "Alice A", "pw1");
    let bob = register(&store, "bob", "Bob B", "pw2");

    let changed = mark_thread_read(&store, alice, bob).expect("No-op mark read failed");
    assert_eq!(changed, 0);
}

#[test]
fn last_message_is_none_for_a_never_contacted_pair() {
    let (_dir, store) = open_test_store();
    let alice = register(&store, "alice", "Alice A", "pw1");
    let bob = register(&store, "bob", "Bob B", "pw2");

    let last = last_message_between(&store, alice, bob).expect("Lookup should succeed");
    assert!(last.is_none());
}

#[test]
fn last_message_picks_the_newest_in_either_direction() {
    let (_dir, store) = open_test_store();
    let alice = register(&store, "alice", "Alice A", "pw1");
    let bob = register(&store, "bob", "Bob B", "pw2");

    send_message(&store, alice, bob, "first").expect("Failed to send");
    send_message(&store, bob, alice, "second").expect("Failed to send");

    let last = last_message_between(&store, alice, bob)
        .expect("Failed to load last message")
        .expect("Pair has messages");
    assert_eq!(last.body, "second");
    assert_eq!(last.sender_id, bob);
}
