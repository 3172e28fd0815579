mod common;

use crate::common::*;
use parley_chat_lib::{
    authenticate, mark_thread_read, register_user, send_message, thread_between, unread_count,
};

// Register two users, exchange a message, and walk the unread/read cycle the
// way the chat and home screens drive this layer.
#[test]
fn register_send_and_read_flow() {
    let (_dir, store) = open_test_store();

    let alice_id = register_user(&store, "alice", "Alice A", "pw1", None)
        .expect("Failed to register alice");
    let bob_id =
        register_user(&store, "bob", "Bob B", "pw2", None).expect("Failed to register bob");

    // Login path: look up the record, compare the password caller-side.
    let alice = authenticate(&store, "alice")
        .expect("Login lookup failed")
        .expect("Alice should exist");
    assert_eq!(alice.password, "pw1");
    assert_eq!(alice.user_id, alice_id);

    send_message(&store, alice_id, bob_id, "hi").expect("Failed to send");

    let thread = thread_between(&store, alice_id, bob_id).expect("Failed to load thread");
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].body, "hi");
    assert!(!thread[0].is_read);

    assert_eq!(unread_count(&store, bob_id, alice_id).unwrap(), 1);

    mark_thread_read(&store, bob_id, alice_id).expect("Failed to mark read");
    assert_eq!(unread_count(&store, bob_id, alice_id).unwrap(), 0);

    let thread = thread_between(&store, alice_id, bob_id).expect("Failed to load thread");
    assert!(thread[0].is_read);
}
