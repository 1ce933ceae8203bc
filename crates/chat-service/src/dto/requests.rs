//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Field names follow the camelCase JSON used by the web client.

use chat_core::{MessageType, Snowflake};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// User login request
///
/// The email is not format-checked: anything that matches no account is a
/// credential failure.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Chat Requests
// ============================================================================

/// Open (or reuse) a direct chat with another user
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDirectChatRequest {
    /// Missing is reported by the service, not by the JSON extractor
    #[serde(default)]
    pub other_user_id: Option<Snowflake>,
}

/// Create a group chat
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupChatRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Group name must be at most 100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub member_ids: Vec<Snowflake>,
}

// ============================================================================
// Message Requests
// ============================================================================

/// Send message request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[serde(default)]
    #[validate(length(max = 4000, message = "Message content must be at most 4000 characters"))]
    pub content: String,

    #[serde(rename = "type", default)]
    pub message_type: MessageType,
}
