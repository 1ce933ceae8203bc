//! Message and delivery status database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub chat_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub message_type: String,
    pub created_at: DateTime<Utc>,
}

/// Database model for message_statuses table
#[derive(Debug, Clone, FromRow)]
pub struct MessageStatusModel {
    pub message_id: i64,
    pub user_id: i64,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}
