//! Chat member database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// chat_members joined with users
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithUserModel {
    pub chat_id: i64,
    pub user_id: i64,
    pub role: String,
    pub joined_at: DateTime<Utc>,
    pub email: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub last_seen: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
