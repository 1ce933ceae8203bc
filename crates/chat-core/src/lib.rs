//! # chat-core
//!
//! Domain layer for the messaging backend: users, chats, memberships, messages
//! and their per-recipient delivery statuses, plus the repository ports the
//! infrastructure layer implements.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Chat, ChatMember, ChatType, DeliveryStatus, MemberRole, Message, MessageStatus, MessageType,
    User,
};
pub use error::DomainError;
pub use traits::{
    ChatRepository, MemberRepository, MemberWithUser, MessageRepository, RepoResult,
    UserRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
