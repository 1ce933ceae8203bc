//! Test fixtures and data generators
//!
//! Request bodies mirror what the web client sends; response types only
//! declare the fields the tests read.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
///
/// Mixes in the start time so reruns against the same database don't collide.
pub fn unique_suffix() -> String {
    let run = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{run}{}", COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("test{suffix}@example.com"),
            username: format!("user{}", &suffix[suffix.len().saturating_sub(12)..]),
            password: "TestPass123!".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: ProfileResponse,
    pub token: String,
}

/// Own profile
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub created_at: String,
}

/// Public user view
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

/// Direct chat request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDirectChatRequest {
    pub other_user_id: String,
}

/// Group chat request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupChatRequest {
    pub name: String,
    pub description: Option<String>,
    pub member_ids: Vec<String>,
}

/// Chat member
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub user_id: String,
    pub role: String,
    pub user: UserResponse,
}

/// Chat with members
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub chat_type: String,
    pub name: Option<String>,
    pub created_by: String,
    pub members: Vec<MemberResponse>,
}

/// Last message preview in a chat listing
#[derive(Debug, Deserialize)]
pub struct LastMessageResponse {
    pub id: String,
    pub content: String,
    pub sender: UserResponse,
}

/// Chat listing entry
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummaryResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub chat_type: String,
    pub members: Vec<MemberResponse>,
    pub last_message: Option<LastMessageResponse>,
    pub unread_count: i64,
}

/// Send message request
#[derive(Debug, Serialize)]
pub struct SendMessageRequest {
    pub content: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
}

impl SendMessageRequest {
    pub fn text(content: &str) -> Self {
        Self {
            content: content.to_string(),
            message_type: None,
        }
    }
}

/// Per-recipient delivery state
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStatusResponse {
    pub user_id: String,
    pub status: String,
}

/// Message response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub message_type: String,
    pub sender: UserResponse,
    pub statuses: Option<Vec<MessageStatusResponse>>,
}

/// Error body inside the failure envelope
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Health response
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
