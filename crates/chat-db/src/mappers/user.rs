//! User entity <-> model mapper

use chat_core::entities::User;
use chat_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            username: model.username,
            avatar_url: model.avatar_url,
            last_seen: model.last_seen,
            created_at: model.created_at,
        }
    }
}
