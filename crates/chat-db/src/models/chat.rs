//! Chat database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for chats table
#[derive(Debug, Clone, FromRow)]
pub struct ChatModel {
    pub id: i64,
    pub chat_type: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
