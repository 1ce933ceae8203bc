//! Authentication extractor
//!
//! Extracts and validates the bearer token from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chat_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated identity carried by the token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Snowflake,
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state.jwt_service().verify(bearer.token()).map_err(|e| {
            tracing::warn!(error = %e, "Rejected bearer token");
            ApiError::App(e)
        })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid user ID in token");
            ApiError::App(e)
        })?;

        Ok(AuthUser {
            user_id,
            email: claims.email,
        })
    }
}
