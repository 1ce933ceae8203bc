//! Route definitions
//!
//! All API routes organized by domain and mounted under /api.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, chats, health, messages, users};
use crate::state::AppState;

/// Create the main API router
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes, served outside the envelope
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(chat_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new().route("/user/me", get(users::get_current_user))
}

/// Chat and message routes
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chats", get(chats::list_chats))
        .route("/chats/direct", post(chats::create_direct_chat))
        .route("/chats/group", post(chats::create_group_chat))
        .route(
            "/chats/:chat_id/messages",
            get(messages::get_messages).post(messages::send_message),
        )
}
