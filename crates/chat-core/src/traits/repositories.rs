//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Operations that touch several tables
//! (`create_direct`, `create_with_members`, `send`) are a single unit of work:
//! implementations must apply all of their writes or none.

use async_trait::async_trait;

use crate::entities::{Chat, ChatMember, Message, MessageStatus, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// A membership row joined with the member's user record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberWithUser {
    pub member: ChatMember,
    pub user: User,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find every user whose id is in `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Chat Repository
// ============================================================================

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Find a direct chat in which both users are members
    async fn find_direct(&self, user_a: Snowflake, user_b: Snowflake) -> RepoResult<Option<Chat>>;

    /// Create a direct chat between two users unless one already exists.
    ///
    /// Concurrent calls for the same pair converge on one chat. Returns the
    /// chat that now exists and whether this call created it.
    async fn create_direct(
        &self,
        chat: &Chat,
        user_a: Snowflake,
        user_b: Snowflake,
    ) -> RepoResult<(Chat, bool)>;

    /// Create a chat together with all of its membership rows
    async fn create_with_members(&self, chat: &Chat, members: &[ChatMember]) -> RepoResult<()>;

    /// List chats the user belongs to, most recently active first
    async fn find_by_member(&self, user_id: Snowflake) -> RepoResult<Vec<Chat>>;

    /// Members of a chat with their user records, in join order
    async fn members_with_users(&self, chat_id: Snowflake) -> RepoResult<Vec<MemberWithUser>>;

    /// `members_with_users` for several chats in one round trip. Rows are
    /// ordered by chat, then join order; callers group on `member.chat_id`.
    async fn members_with_users_in(
        &self,
        chat_ids: &[Snowflake],
    ) -> RepoResult<Vec<MemberWithUser>>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Check if user is a member of the chat
    async fn is_member(&self, chat_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Store a message and fan out its statuses in one unit of work:
    /// insert the message, SENT for the sender, bump the chat's `updated_at`,
    /// DELIVERED for every other member. Returns the status rows written.
    async fn send(&self, message: &Message) -> RepoResult<Vec<MessageStatus>>;

    /// All messages in a chat, newest first
    async fn find_by_chat(&self, chat_id: Snowflake) -> RepoResult<Vec<Message>>;

    /// Latest message of each chat in `chat_ids`; chats without messages
    /// are absent from the result
    async fn find_latest_in(&self, chat_ids: &[Snowflake]) -> RepoResult<Vec<Message>>;

    /// Per chat, the number of messages without a READ status for `user_id`.
    /// Chats with nothing unread may be omitted.
    async fn count_unread_in(
        &self,
        chat_ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<(Snowflake, i64)>>;

    /// Status rows of `user_id` for the given messages
    async fn find_statuses(
        &self,
        message_ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<MessageStatus>>;
}
