use crate::libs::storage::storage_traits::StoreError;
use rusqlite::Connection;
use tracing::info;

/// Idempotently creates both tables and the conversation index. Safe to call
/// on every open; an existing schema and its data are left untouched.
pub fn initialize(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            full_name TEXT NOT NULL,
            password TEXT NOT NULL,
            created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );

        CREATE TABLE IF NOT EXISTS messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sender_id INTEGER NOT NULL,
            receiver_id INTEGER NOT NULL,
            message TEXT NOT NULL,
            timestamp INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
            is_read INTEGER NOT NULL DEFAULT 0,

            FOREIGN KEY (sender_id) REFERENCES users(id),
            FOREIGN KEY (receiver_id) REFERENCES users(id),

            CHECK (is_read IN (0, 1))
        );

        CREATE INDEX IF NOT EXISTS idx_messages_pair_timestamp
            ON messages(sender_id, receiver_id, timestamp);",
    )?;

    info!("chat schema ready");
    Ok(())
}

/// Forward-only additive migrations: check-then-act against the live schema,
/// never a blind re-apply, never a drop or rename. Running this on every app
/// start is expected.
pub fn apply_migrations(conn: &Connection) -> Result<(), StoreError> {
    // users.profile_photo postdates the first shipped schema.
    if !column_exists(conn, "users", "profile_photo")? {
        conn.execute("ALTER TABLE users ADD COLUMN profile_photo TEXT", [])?;
        info!("applied migration: users.profile_photo");
    }

    Ok(())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool, StoreError> {
    // Table names cannot be bound as parameters; both callers pass fixed
    // internal names.
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}
