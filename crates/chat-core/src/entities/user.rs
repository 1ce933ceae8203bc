//! User entity - represents a registered account

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity. The password hash is deliberately not part of it and only
/// travels through `UserRepository::get_password_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub last_seen: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, email: String, username: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            username,
            avatar_url: None,
            last_seen: now,
            created_at: now,
        }
    }

    /// Normalize an email address for storage and lookup
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Record activity
    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }
}
