//! User handlers

use axum::extract::State;
use chat_service::dto::ProfileResponse;
use chat_service::UserService;

use crate::extractors::AuthUser;
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Get the authenticated user's profile
///
/// GET /api/user/me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiJson<ProfileResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.me(auth.user_id).await?;
    Ok(ApiJson(response))
}
