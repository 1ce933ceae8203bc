//! Profile lookups for the authenticated user

use chat_core::entities::User;
use chat_core::Snowflake;
use tracing::instrument;

use crate::dto::ProfileResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Own profile, including email
    #[instrument(skip(self))]
    pub async fn me(&self, user_id: Snowflake) -> ServiceResult<ProfileResponse> {
        let user = self.get_user_entity(user_id).await?;
        Ok(ProfileResponse::from(user))
    }

    #[instrument(skip(self))]
    pub async fn get_user_entity(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))
    }
}
