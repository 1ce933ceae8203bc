//! Message entity and per-recipient delivery status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Kind of message payload. For non-text kinds `content` carries a media reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    #[default]
    Text,
    Image,
    File,
}

impl MessageType {
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Image => "IMAGE",
            Self::File => "FILE",
        }
    }
}

impl From<&str> for MessageType {
    fn from(value: &str) -> Self {
        match value {
            "IMAGE" => Self::Image,
            "FILE" => Self::File,
            _ => Self::Text,
        }
    }
}

/// Message entity. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub chat_id: Snowflake,
    pub sender_id: Snowflake,
    pub content: String,
    pub message_type: MessageType,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new Message
    pub fn new(
        id: Snowflake,
        chat_id: Snowflake,
        sender_id: Snowflake,
        content: String,
        message_type: MessageType,
    ) -> Self {
        Self {
            id,
            chat_id,
            sender_id,
            content,
            message_type,
            created_at: Utc::now(),
        }
    }

    /// Check if message content is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Text messages must carry content; media messages may not.
    pub fn has_required_content(&self) -> bool {
        self.message_type != MessageType::Text || !self.is_empty()
    }
}

/// Delivery status, ordered `Sent < Delivered < Read`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Sent,
    Delivered,
    Read,
}

impl DeliveryStatus {
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "SENT",
            Self::Delivered => "DELIVERED",
            Self::Read => "READ",
        }
    }
}

impl From<&str> for DeliveryStatus {
    fn from(value: &str) -> Self {
        match value {
            "DELIVERED" => Self::Delivered,
            "READ" => Self::Read,
            _ => Self::Sent,
        }
    }
}

/// One record per (message, recipient), the sender included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageStatus {
    pub message_id: Snowflake,
    pub user_id: Snowflake,
    pub status: DeliveryStatus,
    pub updated_at: DateTime<Utc>,
}

impl MessageStatus {
    pub fn new(message_id: Snowflake, user_id: Snowflake, status: DeliveryStatus) -> Self {
        Self {
            message_id,
            user_id,
            status,
            updated_at: Utc::now(),
        }
    }

    /// Build the status rows created when `message` is sent to `member_ids`:
    /// SENT for the sender, DELIVERED for everyone else.
    pub fn fan_out(message: &Message, member_ids: &[Snowflake]) -> Vec<Self> {
        let mut statuses = Vec::with_capacity(member_ids.len().max(1));
        statuses.push(Self {
            message_id: message.id,
            user_id: message.sender_id,
            status: DeliveryStatus::Sent,
            updated_at: message.created_at,
        });
        statuses.extend(
            member_ids
                .iter()
                .filter(|&&id| id != message.sender_id)
                .map(|&user_id| Self {
                    message_id: message.id,
                    user_id,
                    status: DeliveryStatus::Delivered,
                    updated_at: message.created_at,
                }),
        );
        statuses
    }
}
