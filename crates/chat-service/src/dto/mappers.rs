//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chat_core::entities::{Chat, Message, MessageStatus, User};
use chat_core::MemberWithUser;

use super::responses::{
    ChatResponse, LastMessageResponse, MemberResponse, MessageResponse, MessageStatusResponse,
    ProfileResponse, SenderResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            avatar_url: user.avatar_url.clone(),
            last_seen: user.last_seen,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for SenderResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
        }
    }
}

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            avatar_url: user.avatar_url.clone(),
            last_seen: user.last_seen,
            created_at: user.created_at,
        }
    }
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Chat Mappers
// ============================================================================

impl From<MemberWithUser> for MemberResponse {
    fn from(mwu: MemberWithUser) -> Self {
        Self {
            user_id: mwu.member.user_id.to_string(),
            role: mwu.member.role,
            joined_at: mwu.member.joined_at,
            user: UserResponse::from(mwu.user),
        }
    }
}

/// Helper struct for creating ChatResponse
pub struct ChatWithMembers {
    pub chat: Chat,
    pub members: Vec<MemberWithUser>,
}

impl From<ChatWithMembers> for ChatResponse {
    fn from(details: ChatWithMembers) -> Self {
        let chat = details.chat;
        Self {
            id: chat.id.to_string(),
            chat_type: chat.chat_type,
            name: chat.name,
            description: chat.description,
            created_by: chat.created_by.to_string(),
            created_at: chat.created_at,
            updated_at: chat.updated_at,
            members: details
                .members
                .into_iter()
                .map(MemberResponse::from)
                .collect(),
        }
    }
}

// ============================================================================
// Message Mappers
// ============================================================================

impl From<MessageStatus> for MessageStatusResponse {
    fn from(status: MessageStatus) -> Self {
        Self {
            user_id: status.user_id.to_string(),
            status: status.status,
            updated_at: status.updated_at,
        }
    }
}

/// Helper struct for creating MessageResponse
pub struct MessageWithDetails {
    pub message: Message,
    pub sender: User,
    /// Viewer's status rows; `None` when not requested
    pub statuses: Option<Vec<MessageStatus>>,
}

impl From<MessageWithDetails> for MessageResponse {
    fn from(details: MessageWithDetails) -> Self {
        Self {
            id: details.message.id.to_string(),
            chat_id: details.message.chat_id.to_string(),
            sender_id: details.message.sender_id.to_string(),
            content: details.message.content,
            message_type: details.message.message_type,
            created_at: details.message.created_at,
            sender: UserResponse::from(details.sender),
            statuses: details.statuses.map(|rows| {
                rows.into_iter()
                    .map(MessageStatusResponse::from)
                    .collect()
            }),
        }
    }
}

/// Latest message of a chat with its sender
pub struct LastMessage {
    pub message: Message,
    pub sender: User,
}

impl From<LastMessage> for LastMessageResponse {
    fn from(last: LastMessage) -> Self {
        Self {
            id: last.message.id.to_string(),
            content: last.message.content,
            message_type: last.message.message_type,
            created_at: last.message.created_at,
            sender: SenderResponse::from(&last.sender),
        }
    }
}
