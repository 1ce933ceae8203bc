//! Message handlers
//!
//! Endpoints for message history and sending.

use axum::extract::State;
use chat_service::dto::{MessageResponse, SendMessageRequest};
use chat_service::MessageService;

use crate::extractors::{AuthUser, ChatIdPath, SnowflakePath, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// Get the full history of a chat, oldest first
///
/// GET /api/chats/{chat_id}/messages
pub async fn get_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<ChatIdPath>,
) -> ApiResult<ApiJson<Vec<MessageResponse>>> {
    let chat_id = path.chat_id()?;

    let service = MessageService::new(state.service_context());
    let messages = service.get_messages(auth.user_id, chat_id).await?;
    Ok(ApiJson(messages))
}

/// Send a message
///
/// POST /api/chats/{chat_id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<ChatIdPath>,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<ApiJson<MessageResponse>>> {
    let chat_id = path.chat_id()?;

    let service = MessageService::new(state.service_context());
    let message = service.send_message(auth.user_id, chat_id, request).await?;
    Ok(Created(ApiJson(message)))
}
