//! PostgreSQL implementation of ChatRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;
use tracing::{debug, instrument};

use chat_core::entities::{Chat, ChatMember, MemberRole};
use chat_core::error::DomainError;
use chat_core::traits::{ChatRepository, MemberWithUser, RepoResult};
use chat_core::value_objects::Snowflake;

use crate::models::{ChatModel, MemberWithUserModel};

use super::error::{map_db_error, map_foreign_key_violation, map_unique_violation, raw_ids};

/// PostgreSQL implementation of ChatRepository
#[derive(Clone)]
pub struct PgChatRepository {
    pool: PgPool,
}

impl PgChatRepository {
    /// Create a new PgChatRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Advisory lock key for an ordered user pair. Collisions only serialize
/// unrelated pairs, they never merge chats.
fn pair_lock_key(low: Snowflake, high: Snowflake) -> i64 {
    const PRIME: u64 = 0x0100_0000_01b3;
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in low
        .into_inner()
        .to_le_bytes()
        .into_iter()
        .chain(high.into_inner().to_le_bytes())
    {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash as i64
}

/// Direct-chat lookup shared by the pool and in-transaction paths
async fn select_direct<'e, E>(executor: E, user_a: i64, user_b: i64) -> RepoResult<Option<Chat>>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query_as::<_, ChatModel>(
        r"
        SELECT c.id, c.type::TEXT AS chat_type, c.name, c.description, c.created_by,
               c.created_at, c.updated_at
        FROM chats c
        JOIN chat_members m1 ON m1.chat_id = c.id AND m1.user_id = $1
        JOIN chat_members m2 ON m2.chat_id = c.id AND m2.user_id = $2
        WHERE c.type = 'DIRECT'
        ORDER BY c.created_at, c.id
        LIMIT 1
        ",
    )
    .bind(user_a)
    .bind(user_b)
    .fetch_optional(executor)
    .await
    .map_err(map_db_error)?;

    Ok(result.map(Chat::from))
}

async fn insert_chat<'e, E>(executor: E, chat: &Chat) -> RepoResult<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r"
        INSERT INTO chats (id, type, name, description, created_by, created_at, updated_at)
        VALUES ($1, $2::chat_type, $3, $4, $5, $6, $7)
        ",
    )
    .bind(chat.id.into_inner())
    .bind(chat.chat_type.as_str())
    .bind(&chat.name)
    .bind(&chat.description)
    .bind(chat.created_by.into_inner())
    .bind(chat.created_at)
    .bind(chat.updated_at)
    .execute(executor)
    .await
    .map_err(|e| map_foreign_key_violation(e, || DomainError::UserNotFound(chat.created_by)))?;

    Ok(())
}

async fn insert_members<'e, E>(executor: E, chat_id: Snowflake, members: &[ChatMember]) -> RepoResult<()>
where
    E: PgExecutor<'e>,
{
    let user_ids: Vec<i64> = members.iter().map(|m| m.user_id.into_inner()).collect();
    let roles: Vec<&str> = members.iter().map(|m| m.role.as_str()).collect();
    let joined: Vec<DateTime<Utc>> = members.iter().map(|m| m.joined_at).collect();

    sqlx::query(
        r"
        INSERT INTO chat_members (chat_id, user_id, role, joined_at)
        SELECT $1, m.user_id, m.role::member_role, m.joined_at
        FROM UNNEST($2::BIGINT[], $3::TEXT[], $4::TIMESTAMPTZ[]) AS m(user_id, role, joined_at)
        ",
    )
    .bind(chat_id.into_inner())
    .bind(user_ids)
    .bind(roles)
    .bind(joined)
    .execute(executor)
    .await
    .map_err(|e| {
        let duplicate = e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());
        if duplicate {
            map_unique_violation(e, || DomainError::AlreadyMember)
        } else {
            map_foreign_key_violation(e, || DomainError::UsersNotFound)
        }
    })?;

    Ok(())
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    #[instrument(skip(self))]
    async fn find_direct(&self, user_a: Snowflake, user_b: Snowflake) -> RepoResult<Option<Chat>> {
        select_direct(&self.pool, user_a.into_inner(), user_b.into_inner()).await
    }

    #[instrument(skip(self, chat), fields(chat_id = %chat.id))]
    async fn create_direct(
        &self,
        chat: &Chat,
        user_a: Snowflake,
        user_b: Snowflake,
    ) -> RepoResult<(Chat, bool)> {
        let (low, high) = if user_a <= user_b {
            (user_a, user_b)
        } else {
            (user_b, user_a)
        };

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Serialize creators of the same pair; released on commit/rollback.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(pair_lock_key(low, high))
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if let Some(existing) = select_direct(&mut *tx, low.into_inner(), high.into_inner()).await? {
            tx.commit().await.map_err(map_db_error)?;
            debug!(chat_id = %existing.id, "direct chat already existed");
            return Ok((existing, false));
        }

        insert_chat(&mut *tx, chat).await?;
        let members = [
            ChatMember {
                chat_id: chat.id,
                user_id: user_a,
                role: MemberRole::Member,
                joined_at: chat.created_at,
            },
            ChatMember {
                chat_id: chat.id,
                user_id: user_b,
                role: MemberRole::Member,
                joined_at: chat.created_at,
            },
        ];
        insert_members(&mut *tx, chat.id, &members).await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok((chat.clone(), true))
    }

    #[instrument(skip(self, chat, members), fields(chat_id = %chat.id, members = members.len()))]
    async fn create_with_members(&self, chat: &Chat, members: &[ChatMember]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        insert_chat(&mut *tx, chat).await?;
        insert_members(&mut *tx, chat.id, members).await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_member(&self, user_id: Snowflake) -> RepoResult<Vec<Chat>> {
        let results = sqlx::query_as::<_, ChatModel>(
            r"
            SELECT c.id, c.type::TEXT AS chat_type, c.name, c.description, c.created_by,
                   c.created_at, c.updated_at
            FROM chats c
            JOIN chat_members m ON m.chat_id = c.id
            WHERE m.user_id = $1
            ORDER BY c.updated_at DESC, c.id DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Chat::from).collect())
    }

    #[instrument(skip(self))]
    async fn members_with_users(&self, chat_id: Snowflake) -> RepoResult<Vec<MemberWithUser>> {
        let results = sqlx::query_as::<_, MemberWithUserModel>(
            r"
            SELECT m.chat_id, m.user_id, m.role::TEXT AS role, m.joined_at,
                   u.email, u.username, u.avatar_url, u.last_seen, u.created_at
            FROM chat_members m
            JOIN users u ON u.id = m.user_id
            WHERE m.chat_id = $1
            ORDER BY m.joined_at, m.user_id
            ",
        )
        .bind(chat_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(MemberWithUser::from).collect())
    }

    #[instrument(skip(self, chat_ids), fields(chats = chat_ids.len()))]
    async fn members_with_users_in(
        &self,
        chat_ids: &[Snowflake],
    ) -> RepoResult<Vec<MemberWithUser>> {
        if chat_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, MemberWithUserModel>(
            r"
            SELECT m.chat_id, m.user_id, m.role::TEXT AS role, m.joined_at,
                   u.email, u.username, u.avatar_url, u.last_seen, u.created_at
            FROM chat_members m
            JOIN users u ON u.id = m.user_id
            WHERE m.chat_id = ANY($1)
            ORDER BY m.chat_id, m.joined_at, m.user_id
            ",
        )
        .bind(raw_ids(chat_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(MemberWithUser::from).collect())
    }
}
