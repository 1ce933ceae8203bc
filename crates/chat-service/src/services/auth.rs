//! Authentication service
//!
//! Handles user registration and login.

use chat_common::AppError;
use chat_core::entities::User;
use chat_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, ProfileResponse, RegisterRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and issue a token for it
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let email = User::normalize_email(&request.email);

        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self.ctx.password_service().hash(&request.password).await?;

        let user = User::new(self.ctx.generate_id(), email, request.username.trim().to_string());

        // A concurrent registration can still win the race; the store's
        // unique index reports it as EmailAlreadyExists.
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");

        let token = self.ctx.jwt_service().issue(user.id, &user.email)?;

        Ok(AuthResponse {
            user: ProfileResponse::from(user),
            token,
        })
    }

    /// Log in with email and password
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let email = User::normalize_email(&request.email);

        let Some(user) = self.ctx.user_repo().find_by_email(&email).await? else {
            warn!("Login attempt for unknown email");
            return Err(AppError::InvalidCredentials.into());
        };

        let Some(password_hash) = self.ctx.user_repo().get_password_hash(user.id).await? else {
            warn!(user_id = %user.id, "User has no stored password hash");
            return Err(AppError::InvalidCredentials.into());
        };

        if let Err(e) = self
            .ctx
            .password_service()
            .verify_or_error(&request.password, &password_hash)
            .await
        {
            warn!(user_id = %user.id, "Login failed");
            return Err(e.into());
        }

        info!(user_id = %user.id, "User logged in");

        let token = self.ctx.jwt_service().issue(user.id, &user.email)?;

        Ok(AuthResponse {
            user: ProfileResponse::from(user),
            token,
        })
    }
}
