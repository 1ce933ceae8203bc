//! Error handling utilities for repositories

use chat_core::error::DomainError;
use sqlx::Error as SqlxError;
use tracing::error;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    error!(error = %e, "database error");
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

/// Check for a foreign key violation (referenced user/chat missing)
pub fn map_foreign_key_violation<F>(e: SqlxError, on_missing: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_missing();
        }
    }
    map_db_error(e)
}

/// Convert the raw ids of a slice of Snowflakes for array binds
pub fn raw_ids(ids: &[chat_core::Snowflake]) -> Vec<i64> {
    ids.iter().map(|id| id.into_inner()).collect()
}
