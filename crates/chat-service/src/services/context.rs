//! Service context - dependency container for services
//!
//! Holds the repositories and credential helpers needed by services. The
//! repositories are trait objects so tests can swap in other implementations.

use std::sync::Arc;

use chat_common::auth::{JwtService, PasswordService};
use chat_core::traits::{ChatRepository, MemberRepository, MessageRepository, UserRepository};
use chat_core::SnowflakeGenerator;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    chat_repo: Arc<dyn ChatRepository>,
    member_repo: Arc<dyn MemberRepository>,
    message_repo: Arc<dyn MessageRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        chat_repo: Arc<dyn ChatRepository>,
        member_repo: Arc<dyn MemberRepository>,
        message_repo: Arc<dyn MessageRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            user_repo,
            chat_repo,
            member_repo,
            message_repo,
            jwt_service,
            password_service: PasswordService::new(),
            snowflake_generator,
        }
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn chat_repo(&self) -> &dyn ChatRepository {
        self.chat_repo.as_ref()
    }

    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Issues and verifies bearer tokens
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Next id for a user, chat or message
    pub fn generate_id(&self) -> chat_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    chat_repo: Option<Arc<dyn ChatRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn chat_repo(mut self, repo: Arc<dyn ChatRepository>) -> Self {
        self.chat_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::MissingDependency` naming the first unset port
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo.ok_or(ServiceError::MissingDependency("user_repo"))?,
            self.chat_repo.ok_or(ServiceError::MissingDependency("chat_repo"))?,
            self.member_repo.ok_or(ServiceError::MissingDependency("member_repo"))?,
            self.message_repo.ok_or(ServiceError::MissingDependency("message_repo"))?,
            self.jwt_service.ok_or(ServiceError::MissingDependency("jwt_service"))?,
            self.snowflake_generator
                .ok_or(ServiceError::MissingDependency("snowflake_generator"))?,
        ))
    }
}
