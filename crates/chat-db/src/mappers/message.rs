//! Message and status entity <-> model mapper

use chat_core::entities::{DeliveryStatus, Message, MessageStatus, MessageType};
use chat_core::value_objects::Snowflake;

use crate::models::{MessageModel, MessageStatusModel};

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            chat_id: Snowflake::new(model.chat_id),
            sender_id: Snowflake::new(model.sender_id),
            content: model.content,
            message_type: MessageType::from(model.message_type.as_str()),
            created_at: model.created_at,
        }
    }
}

impl From<MessageStatusModel> for MessageStatus {
    fn from(model: MessageStatusModel) -> Self {
        MessageStatus {
            message_id: Snowflake::new(model.message_id),
            user_id: Snowflake::new(model.user_id),
            status: DeliveryStatus::from(model.status.as_str()),
            updated_at: model.updated_at,
        }
    }
}
