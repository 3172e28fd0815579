//! Persistence and conversation-query layer for a local-first chat app.
//!
//! Everything lives in one on-device SQLite file: users register and log in
//! locally, and "sending" a message is an insert into the messages table. The
//! host application builds a [`SqliteStore`] once at bootstrap and passes it
//! into the free functions in [`libs::storage::api`].

pub mod libs;

pub use crate::libs::storage::api::{
    authenticate, last_message_between, list_users, load_user_by_id, mark_thread_read,
    register_user, send_message, thread_between, unread_count, update_profile_photo,
};
pub use crate::libs::storage::database::storage_sqlite::{SqliteStore, SqliteTransaction};
pub use crate::libs::storage::records::{MessageRecord, UserRecord};
pub use crate::libs::storage::storage_traits::{
    ChatStore, MessageStore, Storage, StoreError, Transactional, UserStore,
};
