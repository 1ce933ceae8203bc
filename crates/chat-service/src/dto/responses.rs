//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chat_core::{ChatType, DeliveryStatus, MemberRole, MessageType};
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// User Responses
// ============================================================================

/// Public projection of a user, as embedded in chats and messages
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub last_seen: DateTime<Utc>,
}

/// Sender of a chat's latest message
#[derive(Debug, Clone, Serialize)]
pub struct SenderResponse {
    pub id: String,
    pub username: String,
}

/// The authenticated user's own profile (includes email)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub last_seen: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Registration/login result: the account plus a bearer token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: ProfileResponse,
    pub token: String,
}

// ============================================================================
// Chat Responses
// ============================================================================

/// Membership row with the member's public projection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub user_id: String,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
    pub user: UserResponse,
}

/// Chat with its members
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub members: Vec<MemberResponse>,
}

/// Result of resolving a direct chat; `created` picks 201 over 200
#[derive(Debug, Clone)]
pub struct DirectChatResponse {
    pub chat: ChatResponse,
    pub created: bool,
}

/// Latest message shown in the chat list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMessageResponse {
    pub id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub created_at: DateTime<Utc>,
    pub sender: SenderResponse,
}

/// Chat list entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummaryResponse {
    #[serde(flatten)]
    pub chat: ChatResponse,
    pub last_message: Option<LastMessageResponse>,
    pub unread_count: i64,
}

// ============================================================================
// Message Responses
// ============================================================================

/// Delivery status of a message for one user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStatusResponse {
    pub user_id: String,
    pub status: DeliveryStatus,
    pub updated_at: DateTime<Utc>,
}

/// Message with its sender. `statuses` holds the viewer's own rows and is
/// omitted on send.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub created_at: DateTime<Utc>,
    pub sender: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<MessageStatusResponse>>,
}
