use crate::libs::storage::database::schema;
use crate::libs::storage::records::{MessageRecord, UserRecord};
use crate::libs::storage::storage_traits::{
    ChatStore, MessageStore, Storage, StoreError, Transactional, UserStore,
};
use chrono::Utc;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, Result, Row, Transaction};
use tracing::{debug, info};

pub struct SqliteTransaction<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> SqliteTransaction<'conn> {
    pub fn new(
        conn: &'conn mut PooledConnection<SqliteConnectionManager>,
    ) -> Result<Self, StoreError> {
        let tx = conn.transaction()?;
        Ok(Self { tx })
    }

    pub fn inner(&self) -> &Transaction<'conn> {
        &self.tx
    }
}

impl<'conn> Transactional for SqliteTransaction<'conn> {
    fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().map_err(StoreError::from)
    }

    fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().map_err(StoreError::from)
    }
}

/// Owner of the on-device database file. Built once at application bootstrap
/// and handed to every store call; opening runs schema creation and the
/// additive migrations up front, so operations never re-initialize lazily.
#[derive(Debug)]
pub struct SqliteStore {
    conn_pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    pub fn open(db_path: &str) -> Result<Self, StoreError> {
        // Foreign keys are per-connection state, so every pooled connection
        // gets the pragma, not just the one used for setup.
        let manager = SqliteConnectionManager::file(db_path)
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        let pool = Pool::new(manager)
            .map_err(|err| StoreError::Initialisation(err.to_string()))?;

        let store = Self { conn_pool: pool };
        let conn = store.new_connection()?;
        schema::initialize(&conn)?;
        schema::apply_migrations(&conn)?;

        info!(path = db_path, "database opened");
        Ok(store)
    }

    pub fn new_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>, StoreError> {
        Ok(self.conn_pool.get()?)
    }
}

impl Storage for SqliteStore {
    type Transaction<'s>
        = SqliteTransaction<'s>
    where
        Self: 's;
}

impl<'conn> ChatStore for SqliteTransaction<'conn> {}

const USER_COLUMNS: &str = "id, username, full_name, password, profile_photo, created_at";

fn user_from_row(row: &Row) -> Result<UserRecord, rusqlite::Error> {
    Ok(UserRecord {
        user_id: row.get(0)?,
        username: row.get(1)?,
        full_name: row.get(2)?,
        password: row.get(3)?,
        profile_photo: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn message_from_row(row: &Row) -> Result<MessageRecord, rusqlite::Error> {
    Ok(MessageRecord {
        message_id: row.get(0)?,
        sender_id: row.get(1)?,
        receiver_id: row.get(2)?,
        body: row.get(3)?,
        timestamp: row.get(4)?,
        is_read: row.get(5)?,
        sender_name: row.get(6)?,
        sender_photo: row.get(7)?,
        receiver_name: row.get(8)?,
        receiver_photo: row.get(9)?,
    })
}

impl<'conn> UserStore for SqliteTransaction<'conn> {
    fn register_user(
        &mut self,
        username: &str,
        full_name: &str,
        password: &str,
        profile_photo: Option<&str>,
    ) -> Result<i64, StoreError> {
        self.tx.execute(
            "INSERT INTO users (username, full_name, password, profile_photo)
             VALUES (?1, ?2, ?3, ?4)",
            params![username, full_name, password, profile_photo],
        )?;
        let user_id = self.tx.last_insert_rowid();
        debug!(user_id, username, "registered user");
        Ok(user_id)
    }

    fn load_user_by_username(&mut self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let user = self
            .tx
            .query_row(
                &format!("SELECT {} FROM users WHERE username = ?1", USER_COLUMNS),
                params![username],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    fn load_user_by_id(&mut self, user_id: i64) -> Result<Option<UserRecord>, StoreError> {
        let user = self
            .tx
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
                params![user_id],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    fn list_users_excluding(
        &mut self,
        excluded_user_id: Option<i64>,
    ) -> Result<Vec<UserRecord>, StoreError> {
        let mut stmt = self.tx.prepare(&format!(
            "SELECT {} FROM users
             WHERE ?1 IS NULL OR id <> ?1
             ORDER BY full_name ASC",
            USER_COLUMNS
        ))?;
        let users = stmt
            .query_map(params![excluded_user_id], user_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    fn update_profile_photo(&mut self, user_id: i64, photo_uri: &str) -> Result<(), StoreError> {
        self.tx.execute(
            "UPDATE users SET profile_photo = ?1 WHERE id = ?2",
            params![photo_uri, user_id],
        )?;
        Ok(())
    }
}

const THREAD_FILTER: &str = "(m.sender_id = ?1 AND m.receiver_id = ?2)
          OR (m.sender_id = ?2 AND m.receiver_id = ?1)";

impl<'conn> MessageStore for SqliteTransaction<'conn> {
    fn insert_message(
        &mut self,
        sender_id: i64,
        receiver_id: i64,
        body: &str,
    ) -> Result<i64, StoreError> {
        let timestamp = Utc::now().timestamp();
        self.tx.execute(
            "INSERT INTO messages (sender_id, receiver_id, message, timestamp)
             VALUES (?1, ?2, ?3, ?4)",
            params![sender_id, receiver_id, body, timestamp],
        )?;
        let message_id = self.tx.last_insert_rowid();
        debug!(message_id, sender_id, receiver_id, "inserted message");
        Ok(message_id)
    }

    fn load_thread(&mut self, user_a: i64, user_b: i64) -> Result<Vec<MessageRecord>, StoreError> {
        let mut stmt = self.tx.prepare(&format!(
            "SELECT m.id, m.sender_id, m.receiver_id, m.message, m.timestamp, m.is_read,
                    s.full_name, s.profile_photo, r.full_name, r.profile_photo
             FROM messages m
             JOIN users s ON s.id = m.sender_id
             JOIN users r ON r.id = m.receiver_id
             WHERE {}
             ORDER BY m.timestamp ASC, m.id ASC",
            THREAD_FILTER
        ))?;
        let messages = stmt
            .query_map(params![user_a, user_b], message_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(messages)
    }

    fn load_last_message(
        &mut self,
        user_a: i64,
        user_b: i64,
    ) -> Result<Option<MessageRecord>, StoreError> {
        let message = self
            .tx
            .query_row(
                &format!(
                    "SELECT m.id, m.sender_id, m.receiver_id, m.message, m.timestamp, m.is_read,
                            s.full_name, s.profile_photo, r.full_name, r.profile_photo
                     FROM messages m
                     JOIN users s ON s.id = m.sender_id
                     JOIN users r ON r.id = m.receiver_id
                     WHERE {}
                     ORDER BY m.timestamp DESC, m.id DESC
                     LIMIT 1",
                    THREAD_FILTER
                ),
                params![user_a, user_b],
                message_from_row,
            )
            .optional()?;
        Ok(message)
    }

    fn unread_count(&mut self, recipient_id: i64, sender_id: i64) -> Result<i64, StoreError> {
        let count = self.tx.query_row(
            "SELECT COUNT(*) FROM messages
             WHERE receiver_id = ?1 AND sender_id = ?2 AND is_read = 0",
            params![recipient_id, sender_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn mark_thread_read(
        &mut self,
        recipient_id: i64,
        sender_id: i64,
    ) -> Result<usize, StoreError> {
        let changed = self.tx.execute(
            "UPDATE messages SET is_read = 1
             WHERE receiver_id = ?1 AND sender_id = ?2 AND is_read = 0",
            params![recipient_id, sender_id],
        )?;
        Ok(changed)
    }
}
