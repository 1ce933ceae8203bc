//! Chat entity <-> model mapper

use chat_core::entities::{Chat, ChatType};
use chat_core::value_objects::Snowflake;

use crate::models::ChatModel;

impl From<ChatModel> for Chat {
    fn from(model: ChatModel) -> Self {
        Chat {
            id: Snowflake::new(model.id),
            chat_type: ChatType::from(model.chat_type.as_str()),
            name: model.name,
            description: model.description,
            created_by: Snowflake::new(model.created_by),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
