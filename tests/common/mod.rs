#![allow(dead_code)] // each test binary uses its own subset of these helpers

use parley_chat_lib::{register_user, SqliteStore};
use tempfile::TempDir;

/// Fresh store on a throwaway database file. The TempDir must stay alive for
/// the duration of the test or the file goes away under the pool.
pub fn open_test_store() -> (TempDir, SqliteStore) {
    let dir = TempDir::new().expect("Failed to create test directory");
    let store = open_store_at(&dir);
    (dir, store)
}

pub fn open_store_at(dir: &TempDir) -> SqliteStore {
    let db_path = dir.path().join("chat.db");
    SqliteStore::open(db_path.to_str().expect("Non UTF-8 temp path"))
        .expect("Failed to open store")
}

pub fn register(store: &SqliteStore, username: &str, full_name: &str, password: &str) -> i64 {
    register_user(store, username, full_name, password, None).expect("Failed to register user")
}
