//! Domain entities - core business objects

mod chat;
mod member;
mod message;
mod user;

pub use chat::{Chat, ChatType};
pub use member::{ChatMember, MemberRole};
pub use message::{DeliveryStatus, Message, MessageStatus, MessageType};
pub use user::User;
