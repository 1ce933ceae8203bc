//! Chat member entity <-> model mapper

use chat_core::entities::{ChatMember, MemberRole, User};
use chat_core::traits::MemberWithUser;
use chat_core::value_objects::Snowflake;

use crate::models::MemberWithUserModel;

impl From<MemberWithUserModel> for MemberWithUser {
    fn from(model: MemberWithUserModel) -> Self {
        MemberWithUser {
            member: ChatMember {
                chat_id: Snowflake::new(model.chat_id),
                user_id: Snowflake::new(model.user_id),
                role: MemberRole::from(model.role.as_str()),
                joined_at: model.joined_at,
            },
            user: User {
                id: Snowflake::new(model.user_id),
                email: model.email,
                username: model.username,
                avatar_url: model.avatar_url,
                last_seen: model.last_seen,
                created_at: model.created_at,
            },
        }
    }
}
