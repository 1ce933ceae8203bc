//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Chat not found: {0}")]
    ChatNotFound(Snowflake),

    #[error("One or more users not found")]
    UsersNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Cannot create a direct chat with yourself")]
    SelfChatNotAllowed,

    #[error("Message content cannot be empty")]
    EmptyMessage,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not a member of this chat")]
    NotChatMember,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Already a member of this chat")]
    AlreadyMember,

    // =========================================================================
    // Infrastructure Errors
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) | Self::UsersNotFound => "UNKNOWN_USER",
            Self::ChatNotFound(_) => "UNKNOWN_CHAT",

            // Validation
            Self::SelfChatNotAllowed => "SELF_CHAT_NOT_ALLOWED",
            Self::EmptyMessage => "EMPTY_MESSAGE",

            // Authorization
            Self::NotChatMember => "NOT_CHAT_MEMBER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyMember => "ALREADY_MEMBER",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::ChatNotFound(_) | Self::UsersNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::SelfChatNotAllowed | Self::EmptyMessage)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotChatMember)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::AlreadyMember)
    }
}
