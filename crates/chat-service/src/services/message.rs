//! Message service
//!
//! Handles message history and sending.

use std::collections::HashMap;

use chat_core::entities::{Message, MessageStatus, MessageType, User};
use chat_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{MessageResponse, MessageWithDetails, SendMessageRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Full history of a chat, oldest first, with the caller's status rows
    #[instrument(skip(self))]
    pub async fn get_messages(
        &self,
        user_id: Snowflake,
        chat_id: Snowflake,
    ) -> ServiceResult<Vec<MessageResponse>> {
        self.require_member(chat_id, user_id).await?;

        let mut messages = self.ctx.message_repo().find_by_chat(chat_id).await?;
        messages.reverse();

        let message_ids: Vec<Snowflake> = messages.iter().map(|m| m.id).collect();
        let mut statuses: HashMap<Snowflake, Vec<MessageStatus>> = HashMap::new();
        for status in self
            .ctx
            .message_repo()
            .find_statuses(&message_ids, user_id)
            .await?
        {
            statuses.entry(status.message_id).or_default().push(status);
        }

        let senders = self.load_senders(&messages).await?;

        let mut responses = Vec::with_capacity(messages.len());
        for message in messages {
            let Some(sender) = senders.get(&message.sender_id).cloned() else {
                warn!(message_id = %message.id, "Skipping message with unknown sender");
                continue;
            };
            let own = statuses.remove(&message.id).unwrap_or_default();
            responses.push(MessageResponse::from(MessageWithDetails {
                message,
                sender,
                statuses: Some(own),
            }));
        }

        Ok(responses)
    }

    /// Send a message to a chat
    ///
    /// The message, the sender's SENT row, the chat bump and the DELIVERED
    /// rows for every other member are written as one unit.
    #[instrument(skip(self, request), fields(message_type = request.message_type.as_str()))]
    pub async fn send_message(
        &self,
        user_id: Snowflake,
        chat_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        if request.message_type == MessageType::Text && request.content.trim().is_empty() {
            return Err(DomainError::EmptyMessage.into());
        }

        self.require_member(chat_id, user_id).await?;

        let sender = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        let message = Message::new(
            self.ctx.generate_id(),
            chat_id,
            user_id,
            request.content,
            request.message_type,
        );

        let statuses = self.ctx.message_repo().send(&message).await?;

        info!(
            message_id = %message.id,
            chat_id = %chat_id,
            recipients = statuses.len().saturating_sub(1),
            "Message sent"
        );

        Ok(MessageResponse::from(MessageWithDetails {
            message,
            sender,
            statuses: None,
        }))
    }

    async fn require_member(&self, chat_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        if self.ctx.member_repo().is_member(chat_id, user_id).await? {
            Ok(())
        } else {
            Err(DomainError::NotChatMember.into())
        }
    }

    async fn load_senders(&self, messages: &[Message]) -> ServiceResult<HashMap<Snowflake, User>> {
        let mut ids: Vec<Snowflake> = messages.iter().map(|m| m.sender_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let users = self.ctx.user_repo().find_by_ids(&ids).await?;
        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}
