pub mod schema;
pub mod storage_sqlite;
