use crate::libs::storage::records::{MessageRecord, UserRecord};
use thiserror::Error;

pub trait Storage {
    type Transaction<'s>: Transactional + ChatStore + 's
    where
        Self: 's;
}

pub trait Transactional {
    fn commit(self) -> Result<(), StoreError>;
    fn rollback(self) -> Result<(), StoreError>;
}

pub trait UserStore {
    /// Inserts a new user row and returns its id. A username collision is
    /// reported as [`StoreError::DuplicateKey`]; the existing row is untouched.
    fn register_user(
        &mut self,
        username: &str,
        full_name: &str,
        password: &str,
        profile_photo: Option<&str>,
    ) -> Result<i64, StoreError>;

    /// Pure lookup by login identifier. Comparing the stored password to the
    /// caller-supplied one is the caller's job; an unknown username is
    /// `Ok(None)`, not an error.
    fn load_user_by_username(&mut self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    fn load_user_by_id(&mut self, user_id: i64) -> Result<Option<UserRecord>, StoreError>;

    /// All users except the given id, ordered by display name ascending.
    fn list_users_excluding(
        &mut self,
        excluded_user_id: Option<i64>,
    ) -> Result<Vec<UserRecord>, StoreError>;

    /// The only permitted post-creation user mutation.
    fn update_profile_photo(&mut self, user_id: i64, photo_uri: &str) -> Result<(), StoreError>;
}

pub trait MessageStore {
    /// Always inserts a new row; there is no idempotency key, so a retry
    /// after an ambiguous failure can create a duplicate message.
    fn insert_message(
        &mut self,
        sender_id: i64,
        receiver_id: i64,
        body: &str,
    ) -> Result<i64, StoreError>;

    /// Every message between the pair in either direction, oldest first,
    /// insertion id as the tie-break for equal timestamps. Participant
    /// names/photos are joined in at query time.
    fn load_thread(&mut self, user_a: i64, user_b: i64) -> Result<Vec<MessageRecord>, StoreError>;

    fn load_last_message(
        &mut self,
        user_a: i64,
        user_b: i64,
    ) -> Result<Option<MessageRecord>, StoreError>;

    /// Directional: counts unread messages flowing sender -> recipient only.
    fn unread_count(&mut self, recipient_id: i64, sender_id: i64) -> Result<i64, StoreError>;

    /// Marks the directional rows read and returns how many changed; zero
    /// matches is a successful no-op.
    fn mark_thread_read(&mut self, recipient_id: i64, sender_id: i64)
        -> Result<usize, StoreError>;
}

pub trait ChatStore: UserStore + MessageStore {}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Initialisation Error: {0}")]
    Initialisation(String),
    #[error("Duplicate Key: {0}")]
    DuplicateKey(String),
    #[error("Sqlite Error: {0}")]
    Sqlite(String),
    #[error("ConnectionPool Error: {0}")]
    ConnectionPool(#[from] r2d2::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(ffi_err, msg)
                if ffi_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                StoreError::DuplicateKey(msg.clone().unwrap_or_else(|| err.to_string()))
            }
            _ => StoreError::Sqlite(err.to_string()),
        }
    }
}
