//! Member entity - represents a user's membership in a chat

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Role of a member inside a chat. Only meaningful for group chats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Admin,
    #[default]
    Member,
}

impl MemberRole {
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Member => "MEMBER",
        }
    }
}

impl From<&str> for MemberRole {
    fn from(value: &str) -> Self {
        match value {
            "ADMIN" => Self::Admin,
            _ => Self::Member,
        }
    }
}

/// Chat member entity (junction between User and Chat)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMember {
    pub chat_id: Snowflake,
    pub user_id: Snowflake,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl ChatMember {
    /// Create a new ChatMember
    pub fn new(chat_id: Snowflake, user_id: Snowflake, role: MemberRole) -> Self {
        Self {
            chat_id,
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }
}
