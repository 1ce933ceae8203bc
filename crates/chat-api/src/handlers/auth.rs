//! Authentication handlers
//!
//! Endpoints for user registration and login.

use axum::extract::State;
use chat_service::dto::{AuthResponse, LoginRequest, RegisterRequest};
use chat_service::AuthService;

use crate::extractors::ValidatedJson;
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<ApiJson<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(ApiJson(response)))
}

/// Login with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<ApiJson<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(ApiJson(response))
}
