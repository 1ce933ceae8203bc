//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use chat_core::entities::{Message, MessageStatus};
use chat_core::error::DomainError;
use chat_core::traits::{MessageRepository, RepoResult};
use chat_core::value_objects::Snowflake;

use crate::models::{MessageModel, MessageStatusModel};

use super::error::{map_db_error, map_foreign_key_violation, raw_ids};

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message), fields(message_id = %message.id, chat_id = %message.chat_id))]
    async fn send(&self, message: &Message) -> RepoResult<Vec<MessageStatus>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO messages (id, chat_id, sender_id, content, type, created_at)
            VALUES ($1, $2, $3, $4, $5::message_type, $6)
            ",
        )
        .bind(message.id.into_inner())
        .bind(message.chat_id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(&message.content)
        .bind(message.message_type.as_str())
        .bind(message.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::ChatNotFound(message.chat_id)))?;

        let member_ids: Vec<Snowflake> = sqlx::query_scalar::<_, i64>(
            r"
            SELECT user_id FROM chat_members
            WHERE chat_id = $1
            ORDER BY joined_at, user_id
            ",
        )
        .bind(message.chat_id.into_inner())
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?
        .into_iter()
        .map(Snowflake::new)
        .collect();

        let statuses = MessageStatus::fan_out(message, &member_ids);
        let user_ids: Vec<i64> = statuses.iter().map(|s| s.user_id.into_inner()).collect();
        let states: Vec<&str> = statuses.iter().map(|s| s.status.as_str()).collect();

        sqlx::query(
            r"
            INSERT INTO message_statuses (message_id, user_id, status, updated_at)
            SELECT $1, s.user_id, s.status::delivery_status, $4
            FROM UNNEST($2::BIGINT[], $3::TEXT[]) AS s(user_id, status)
            ",
        )
        .bind(message.id.into_inner())
        .bind(user_ids)
        .bind(states)
        .bind(message.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            UPDATE chats
            SET updated_at = GREATEST(updated_at, $2)
            WHERE id = $1
            ",
        )
        .bind(message.chat_id.into_inner())
        .bind(message.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        debug!(recipients = statuses.len() - 1, "message statuses fanned out");

        Ok(statuses)
    }

    #[instrument(skip(self))]
    async fn find_by_chat(&self, chat_id: Snowflake) -> RepoResult<Vec<Message>> {
        let results = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT id, chat_id, sender_id, content, type::TEXT AS message_type, created_at
            FROM messages
            WHERE chat_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(chat_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self, chat_ids), fields(chats = chat_ids.len()))]
    async fn find_latest_in(&self, chat_ids: &[Snowflake]) -> RepoResult<Vec<Message>> {
        if chat_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT DISTINCT ON (chat_id)
                   id, chat_id, sender_id, content, type::TEXT AS message_type, created_at
            FROM messages
            WHERE chat_id = ANY($1)
            ORDER BY chat_id, created_at DESC, id DESC
            ",
        )
        .bind(raw_ids(chat_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self, chat_ids), fields(chats = chat_ids.len()))]
    async fn count_unread_in(
        &self,
        chat_ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<(Snowflake, i64)>> {
        if chat_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, (i64, i64)>(
            r"
            SELECT m.chat_id, COUNT(*)
            FROM messages m
            WHERE m.chat_id = ANY($1)
              AND NOT EXISTS (
                  SELECT 1 FROM message_statuses s
                  WHERE s.message_id = m.id AND s.user_id = $2 AND s.status = 'READ'
              )
            GROUP BY m.chat_id
            ",
        )
        .bind(raw_ids(chat_ids))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|(chat_id, count)| (Snowflake::new(chat_id), count))
            .collect())
    }

    #[instrument(skip(self, message_ids), fields(messages = message_ids.len()))]
    async fn find_statuses(
        &self,
        message_ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<MessageStatus>> {
        if message_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, MessageStatusModel>(
            r"
            SELECT message_id, user_id, status::TEXT AS status, updated_at
            FROM message_statuses
            WHERE message_id = ANY($1) AND user_id = $2
            ",
        )
        .bind(raw_ids(message_ids))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(MessageStatus::from).collect())
    }
}
