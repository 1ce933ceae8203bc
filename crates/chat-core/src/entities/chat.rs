//! Chat entity - a direct (two-party) or group conversation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Chat type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatType {
    /// Exactly two distinct members, unnamed
    #[default]
    Direct,
    /// One or more members, named, with roles
    Group,
}

impl ChatType {
    /// Storage representation
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "DIRECT",
            Self::Group => "GROUP",
        }
    }
}

impl From<&str> for ChatType {
    fn from(value: &str) -> Self {
        match value {
            "GROUP" => Self::Group,
            _ => Self::Direct,
        }
    }
}

/// Chat entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: Snowflake,
    pub chat_type: ChatType,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_by: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    /// Create a new direct chat
    #[must_use]
    pub fn new_direct(id: Snowflake, created_by: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            chat_type: ChatType::Direct,
            name: None,
            description: None,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new group chat
    #[must_use]
    pub fn new_group(
        id: Snowflake,
        created_by: Snowflake,
        name: String,
        description: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            chat_type: ChatType::Group,
            name: Some(name),
            description,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_direct(&self) -> bool {
        self.chat_type == ChatType::Direct
    }

    #[inline]
    pub fn is_group(&self) -> bool {
        self.chat_type == ChatType::Group
    }

    /// Bump the activity timestamp (done on every message send)
    pub fn touch(&mut self, at: DateTime<Utc>) {
        if at > self.updated_at {
            self.updated_at = at;
        }
    }
}
