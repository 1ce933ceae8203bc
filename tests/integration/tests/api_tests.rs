//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_data, assert_error, assert_json, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

async fn register(server: &TestServer) -> AuthResponse {
    let request = RegisterRequest::unique();
    let response = server.post("/api/auth/register", &request).await.unwrap();
    assert_data(response, StatusCode::CREATED).await.unwrap()
}

async fn direct_chat(server: &TestServer, token: &str, other: &str) -> ChatResponse {
    let request = CreateDirectChatRequest {
        other_user_id: other.to_string(),
    };
    let response = server
        .post_auth("/api/chats/direct", token, &request)
        .await
        .unwrap();
    let status = response.status();
    assert!(
        status == StatusCode::CREATED || status == StatusCode::OK,
        "status {status}"
    );
    assert_data(response, status).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let health: HealthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let ready: HealthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ready.status, "ready");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_data(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.username, request.username);
    assert_eq!(auth.user.email, request.email);
    assert!(auth.user.avatar_url.is_none());
    assert!(!auth.token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server.post("/api/auth/register", &request).await.unwrap();

    let mut again = RegisterRequest::unique();
    again.email = request.email.to_uppercase();
    let response = server.post("/api/auth/register", &again).await.unwrap();
    let error = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_validation_errors() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let body = json!({ "email": "not-an-email", "username": "x", "password": "short" });

    let response = server.post("/api/auth/register", &body).await.unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "VALIDATION_ERROR");
    assert!(error.details.is_some());
}

#[tokio::test]
async fn test_login() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    server
        .post("/api/auth/register", &register_req)
        .await
        .unwrap();

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_data(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.username, register_req.username);
    assert!(!auth.token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let unknown = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "wrongpass".to_string(),
    };
    let response = server.post("/api/auth/login", &unknown).await.unwrap();
    let unknown_error = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let wrong_password = LoginRequest {
        email: auth.user.email,
        password: "wrongpass".to_string(),
    };
    let response = server.post("/api/auth/login", &wrong_password).await.unwrap();
    let wrong_error = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let malformed = LoginRequest {
        email: "not-an-email".to_string(),
        password: "wrongpass".to_string(),
    };
    let response = server.post("/api/auth/login", &malformed).await.unwrap();
    let malformed_error = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();

    assert_eq!(unknown_error.code, "INVALID_CREDENTIALS");
    assert_eq!(malformed_error.code, "INVALID_CREDENTIALS");
    assert_eq!(unknown_error.message, wrong_error.message);
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_get_current_user() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let response = server.get_auth("/api/user/me", &auth.token).await.unwrap();
    let me: ProfileResponse = assert_data(response, StatusCode::OK).await.unwrap();

    assert_eq!(me.id, auth.user.id);
    assert_eq!(me.email, auth.user.email);
}

#[tokio::test]
async fn test_unauthorized_access() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/user/me").await.unwrap();
    let error = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.code, "MISSING_AUTHORIZATION");

    let response = server.get_auth("/api/chats", "not-a-token").await.unwrap();
    let error = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.code, "INVALID_TOKEN");
}

// ============================================================================
// Chat Tests
// ============================================================================

#[tokio::test]
async fn test_direct_chat_created_then_reused() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = register(&server).await;
    let bob = register(&server).await;

    let request = CreateDirectChatRequest {
        other_user_id: bob.user.id.clone(),
    };
    let response = server
        .post_auth("/api/chats/direct", &alice.token, &request)
        .await
        .unwrap();
    let created: ChatResponse = assert_data(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created.chat_type, "DIRECT");
    assert_eq!(created.members.len(), 2);
    assert!(created.members.iter().all(|m| m.role == "MEMBER"));

    let reverse = CreateDirectChatRequest {
        other_user_id: alice.user.id.clone(),
    };
    let response = server
        .post_auth("/api/chats/direct", &bob.token, &reverse)
        .await
        .unwrap();
    let existing: ChatResponse = assert_data(response, StatusCode::OK).await.unwrap();

    assert_eq!(existing.id, created.id);
}

#[tokio::test]
async fn test_direct_chat_argument_errors() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = register(&server).await;

    let response = server
        .post_auth("/api/chats/direct", &alice.token, &json!({}))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();

    let own = CreateDirectChatRequest {
        other_user_id: alice.user.id.clone(),
    };
    let response = server
        .post_auth("/api/chats/direct", &alice.token, &own)
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "SELF_CHAT_NOT_ALLOWED");

    let ghost = CreateDirectChatRequest {
        other_user_id: "1".to_string(),
    };
    let response = server
        .post_auth("/api/chats/direct", &alice.token, &ghost)
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.code, "UNKNOWN_USER");
}

#[tokio::test]
async fn test_create_group_chat() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register(&server).await;
    let a = register(&server).await;
    let b = register(&server).await;

    let request = CreateGroupChatRequest {
        name: "  Weekend plans  ".to_string(),
        description: Some("   ".to_string()),
        member_ids: vec![a.user.id.clone(), b.user.id.clone(), a.user.id.clone()],
    };
    let response = server
        .post_auth("/api/chats/group", &owner.token, &request)
        .await
        .unwrap();
    let chat: ChatResponse = assert_data(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(chat.chat_type, "GROUP");
    assert_eq!(chat.name.as_deref(), Some("Weekend plans"));
    assert_eq!(chat.created_by, owner.user.id);
    assert_eq!(chat.members.len(), 3);

    let admin = chat
        .members
        .iter()
        .find(|m| m.user_id == owner.user.id)
        .unwrap();
    assert_eq!(admin.role, "ADMIN");
    assert_eq!(
        chat.members.iter().filter(|m| m.role == "MEMBER").count(),
        2
    );
}

#[tokio::test]
async fn test_create_group_chat_rejects_bad_input() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register(&server).await;
    let a = register(&server).await;

    let blank_name = CreateGroupChatRequest {
        name: "   ".to_string(),
        description: None,
        member_ids: vec![a.user.id.clone()],
    };
    let response = server
        .post_auth("/api/chats/group", &owner.token, &blank_name)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();

    let no_members = CreateGroupChatRequest {
        name: "Team".to_string(),
        description: None,
        member_ids: vec![],
    };
    let response = server
        .post_auth("/api/chats/group", &owner.token, &no_members)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();

    let unknown_member = CreateGroupChatRequest {
        name: "Team".to_string(),
        description: None,
        member_ids: vec![a.user.id.clone(), "1".to_string()],
    };
    let response = server
        .post_auth("/api/chats/group", &owner.token, &unknown_member)
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_malformed_body_uses_envelope() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register(&server).await;

    let response = server
        .post_raw("/api/chats/group", &owner.token, "{not json")
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "INVALID_BODY");
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_send_and_list_messages() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = register(&server).await;
    let bob = register(&server).await;
    let chat = direct_chat(&server, &alice.token, &bob.user.id).await;
    let path = format!("/api/chats/{}/messages", chat.id);

    let response = server
        .post_auth(&path, &alice.token, &SendMessageRequest::text("hello"))
        .await
        .unwrap();
    let first: MessageResponse = assert_data(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(first.chat_id, chat.id);
    assert_eq!(first.sender_id, alice.user.id);
    assert_eq!(first.message_type, "TEXT");
    assert!(first.statuses.is_none());

    let response = server
        .post_auth(&path, &bob.token, &SendMessageRequest::text("hi back"))
        .await
        .unwrap();
    let second: MessageResponse = assert_data(response, StatusCode::CREATED).await.unwrap();

    let response = server.get_auth(&path, &bob.token).await.unwrap();
    let history: Vec<MessageResponse> = assert_data(response, StatusCode::OK).await.unwrap();

    let ids: Vec<&str> = history.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
    assert_eq!(history[0].sender.username, alice.user.username);

    let own_statuses = history[0].statuses.as_ref().unwrap();
    assert_eq!(own_statuses.len(), 1);
    assert_eq!(own_statuses[0].user_id, bob.user.id);
    assert_eq!(own_statuses[0].status, "DELIVERED");
}

#[tokio::test]
async fn test_send_message_validation() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = register(&server).await;
    let bob = register(&server).await;
    let chat = direct_chat(&server, &alice.token, &bob.user.id).await;
    let path = format!("/api/chats/{}/messages", chat.id);

    let response = server
        .post_auth(&path, &alice.token, &SendMessageRequest::text("   "))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "EMPTY_MESSAGE");

    let image = SendMessageRequest {
        content: String::new(),
        message_type: Some("IMAGE".to_string()),
    };
    let response = server.post_auth(&path, &alice.token, &image).await.unwrap();
    let sent: MessageResponse = assert_data(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(sent.message_type, "IMAGE");

    let response = server
        .post_auth("/api/chats/abc/messages", &alice.token, &SendMessageRequest::text("x"))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_non_member_cannot_read_or_send() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = register(&server).await;
    let bob = register(&server).await;
    let eve = register(&server).await;
    let chat = direct_chat(&server, &alice.token, &bob.user.id).await;
    let path = format!("/api/chats/{}/messages", chat.id);

    let response = server.get_auth(&path, &eve.token).await.unwrap();
    let error = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.code, "NOT_CHAT_MEMBER");

    let response = server
        .post_auth(&path, &eve.token, &SendMessageRequest::text("let me in"))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_list_chats_summary() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = register(&server).await;
    let bob = register(&server).await;
    let carol = register(&server).await;

    let quiet = direct_chat(&server, &alice.token, &carol.user.id).await;
    let busy = direct_chat(&server, &alice.token, &bob.user.id).await;

    let path = format!("/api/chats/{}/messages", busy.id);
    server
        .post_auth(&path, &bob.token, &SendMessageRequest::text("ping"))
        .await
        .unwrap();

    let response = server.get_auth("/api/chats", &alice.token).await.unwrap();
    let chats: Vec<ChatSummaryResponse> = assert_data(response, StatusCode::OK).await.unwrap();

    assert_eq!(chats.len(), 2);
    assert_eq!(chats[0].id, busy.id);
    assert_eq!(chats[1].id, quiet.id);

    let last = chats[0].last_message.as_ref().unwrap();
    assert_eq!(last.content, "ping");
    assert_eq!(last.sender.id, bob.user.id);
    assert_eq!(chats[0].unread_count, 1);

    assert!(chats[1].last_message.is_none());
    assert_eq!(chats[1].unread_count, 0);
}
