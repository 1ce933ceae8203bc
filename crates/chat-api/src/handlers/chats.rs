//! Chat handlers
//!
//! Endpoints for listing chats and opening direct or group chats.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chat_service::dto::{
    ChatResponse, ChatSummaryResponse, CreateDirectChatRequest, CreateGroupChatRequest,
};
use chat_service::ChatService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// List the caller's chats, most recently active first
///
/// GET /api/chats
pub async fn list_chats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiJson<Vec<ChatSummaryResponse>>> {
    let service = ChatService::new(state.service_context());
    let chats = service.list_chats(auth.user_id).await?;
    Ok(ApiJson(chats))
}

/// Open a direct chat: 201 when created, 200 when it already existed
///
/// POST /api/chats/direct
pub async fn create_direct_chat(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateDirectChatRequest>,
) -> ApiResult<Response> {
    let service = ChatService::new(state.service_context());
    let result = service
        .get_or_create_direct_chat(auth.user_id, request.other_user_id)
        .await?;

    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, ApiJson(result.chat)).into_response())
}

/// Create a group chat
///
/// POST /api/chats/group
pub async fn create_group_chat(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateGroupChatRequest>,
) -> ApiResult<Created<ApiJson<ChatResponse>>> {
    let service = ChatService::new(state.service_context());
    let chat = service.create_group_chat(auth.user_id, request).await?;
    Ok(Created(ApiJson(chat)))
}
