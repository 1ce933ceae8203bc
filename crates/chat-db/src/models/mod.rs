//! Database models - SQLx-compatible structs for PostgreSQL tables
//!
//! Enum columns are selected as `TEXT` (`type::TEXT AS chat_type`) and
//! converted in the mappers.

mod chat;
mod member;
mod message;
mod user;

pub use chat::ChatModel;
pub use member::MemberWithUserModel;
pub use message::{MessageModel, MessageStatusModel};
pub use user::UserModel;
