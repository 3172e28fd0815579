use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: i64,
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub profile_photo: Option<String>,
    pub created_at: i64,
}

/// A single row of a conversation thread. The participant name/photo fields
/// are joined in at query time rather than denormalised at send time, so a
/// later profile change shows up retroactively on historical messages; they
/// are `None` on records that never went through the thread query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    pub message_id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub body: String,
    pub timestamp: i64,
    pub is_read: bool,
    pub sender_name: Option<String>,
    pub sender_photo: Option<String>,
    pub receiver_name: Option<String>,
    pub receiver_photo: Option<String>,
}
