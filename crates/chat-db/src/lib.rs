//! # chat-db
//!
//! Database layer implementing the chat-core repository traits with PostgreSQL via SQLx.
//!
//! - Connection pool management and readiness ping
//! - Embedded schema migrations run through the sqlx migrator
//! - Database models with SQLx `FromRow` derives and model → entity mappers
//! - Repository implementations; multi-table writes run in one transaction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chat_db::{create_pool, run_migrations, PgUserRepository, PoolConfig};
//!
//! async fn example() -> Result<(), sqlx::Error> {
//!     let pool = create_pool(&PoolConfig::new("postgres://localhost/chat")).await?;
//!     run_migrations(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     // ...
//!     pool.close().await;
//!     Ok(())
//! }
//! ```

pub mod mappers;
mod migrations;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use migrations::run_migrations;
pub use pool::{create_pool, ping, PgPool, PoolConfig};
pub use repositories::{
    PgChatRepository, PgMemberRepository, PgMessageRepository, PgUserRepository,
};
