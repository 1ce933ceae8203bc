//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use chat_core::Snowflake;
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// `Path` whose rejection is reported through the API error envelope
#[derive(Debug, Clone)]
pub struct SnowflakePath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for SnowflakePath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(SnowflakePath(inner))
    }
}

/// Path parameters with chat_id
#[derive(Debug, serde::Deserialize)]
pub struct ChatIdPath {
    pub chat_id: String,
}

impl ChatIdPath {
    /// Parse chat_id as Snowflake
    pub fn chat_id(&self) -> Result<Snowflake, ApiError> {
        self.chat_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid chat_id format"))
    }
}
