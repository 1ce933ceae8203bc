//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions for rows read from PostgreSQL.

mod chat;
mod member;
mod message;
mod user;
