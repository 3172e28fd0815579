//! One free function per store operation. Each draws a pooled connection,
//! runs the operation inside a transaction, and commits. The host builds the
//! [`SqliteStore`] once at bootstrap and threads it through every call; no
//! operation reaches into process-wide state.

use crate::libs::storage::database::storage_sqlite::{SqliteStore, SqliteTransaction};
use crate::libs::storage::records::{MessageRecord, UserRecord};
use crate::libs::storage::storage_traits::{MessageStore, StoreError, Transactional, UserStore};

pub fn register_user(
    store: &SqliteStore,
    username: &str,
    full_name: &str,
    password: &str,
    profile_photo: Option<&str>,
) -> Result<i64, StoreError> {
    let mut connection = store.new_connection()?;
    let mut tx = SqliteTransaction::new(&mut connection)?;
    let user_id = tx.register_user(username, full_name, password, profile_photo)?;
    tx.commit()?;
    Ok(user_id)
}

/// Looks up the stored record for a login attempt. This layer performs no
/// credential verification; the caller compares the returned password and
/// must treat `Ok(None)` as "no such user", not as a store failure.
pub fn authenticate(
    store: &SqliteStore,
    username: &str,
) -> Result<Option<UserRecord>, StoreError> {
    let mut connection = store.new_connection()?;
    let mut tx = SqliteTransaction::new(&mut connection)?;
    let user = tx.load_user_by_username(username)?;
    tx.commit()?;
    Ok(user)
}

pub fn load_user_by_id(store: &SqliteStore, user_id: i64) -> Result<Option<UserRecord>, StoreError> {
    let mut connection = store.new_connection()?;
    let mut tx = SqliteTransaction::new(&mut connection)?;
    let user = tx.load_user_by_id(user_id)?;
    tx.commit()?;
    Ok(user)
}

pub fn list_users(
    store: &SqliteStore,
    excluded_user_id: Option<i64>,
) -> Result<Vec<UserRecord>, StoreError> {
    let mut connection = store.new_connection()?;
    let mut tx = SqliteTransaction::new(&mut connection)?;
    let users = tx.list_users_excluding(excluded_user_id)?;
    tx.commit()?;
    Ok(users)
}

pub fn update_profile_photo(
    store: &SqliteStore,
    user_id: i64,
    photo_uri: &str,
) -> Result<(), StoreError> {
    let mut connection = store.new_connection()?;
    let mut tx = SqliteTransaction::new(&mut connection)?;
    tx.update_profile_photo(user_id, photo_uri)?;
    tx.commit()?;
    Ok(())
}

pub fn send_message(
    store: &SqliteStore,
    sender_id: i64,
    receiver_id: i64,
    body: &str,
) -> Result<i64, StoreError> {
    let mut connection = store.new_connection()?;
    let mut tx = SqliteTransaction::new(&mut connection)?;
    let message_id = tx.insert_message(sender_id, receiver_id, body)?;
    tx.commit()?;
    Ok(message_id)
}

/// The full conversation between two users, both directions, oldest first.
/// Symmetric in its arguments: `thread_between(store, a, b)` equals
/// `thread_between(store, b, a)`.
pub fn thread_between(
    store: &SqliteStore,
    user_a: i64,
    user_b: i64,
) -> Result<Vec<MessageRecord>, StoreError> {
    let mut connection = store.new_connection()?;
    let mut tx = SqliteTransaction::new(&mut connection)?;
    let messages = tx.load_thread(user_a, user_b)?;
    tx.commit()?;
    Ok(messages)
}

pub fn last_message_between(
    store: &SqliteStore,
    user_a: i64,
    user_b: i64,
) -> Result<Option<MessageRecord>, StoreError> {
    let mut connection = store.new_connection()?;
    let mut tx = SqliteTransaction::new(&mut connection)?;
    let message = tx.load_last_message(user_a, user_b)?;
    tx.commit()?;
    Ok(message)
}

pub fn unread_count(
    store: &SqliteStore,
    recipient_id: i64,
    sender_id: i64,
) -> Result<i64, StoreError> {
    let mut connection = store.new_connection()?;
    let mut tx = SqliteTransaction::new(&mut connection)?;
    let count = tx.unread_count(recipient_id, sender_id)?;
    tx.commit()?;
    Ok(count)
}

pub fn mark_thread_read(
    store: &SqliteStore,
    recipient_id: i64,
    sender_id: i64,
) -> Result<usize, StoreError> {
    let mut connection = store.new_connection()?;
    let mut tx = SqliteTransaction::new(&mut connection)?;
    let changed = tx.mark_thread_read(recipient_id, sender_id)?;
    tx.commit()?;
    Ok(changed)
}
