//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in chat-core.

mod chat;
mod error;
mod member;
mod message;
mod user;

pub use chat::PgChatRepository;
pub use member::PgMemberRepository;
pub use message::PgMessageRepository;
pub use user::PgUserRepository;
