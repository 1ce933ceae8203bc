//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and path ids.

mod auth;
mod path;
mod validated;

pub use auth::AuthUser;
pub use path::{ChatIdPath, SnowflakePath};
pub use validated::ValidatedJson;
