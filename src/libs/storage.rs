pub mod api;
pub mod database;
pub mod records;
pub mod storage_traits;
