//! Embedded schema migrations
//!
//! Scripts are compiled into the binary and applied through sqlx's
//! `Migrator`, which records checksums in `_sqlx_migrations` and holds an
//! advisory lock while running.

use std::borrow::Cow;
use std::future::Future;
use std::pin::Pin;

use sqlx::error::BoxDynError;
use sqlx::migrate::{Migration, MigrationSource, MigrationType, Migrator};
use sqlx::PgPool;
use tracing::info;

const MIGRATIONS: &[(i64, &str, &str)] = &[
    (1, "create users", include_str!("../migrations/0001_create_users.sql")),
    (2, "create chats", include_str!("../migrations/0002_create_chats.sql")),
    (3, "create messages", include_str!("../migrations/0003_create_messages.sql")),
];

#[derive(Debug, Clone, Copy)]
struct Embedded;

impl<'s> MigrationSource<'s> for Embedded {
    fn resolve(
        self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Migration>, BoxDynError>> + Send + 's>> {
        Box::pin(async move { Ok(embedded_migrations()) })
    }
}

fn embedded_migrations() -> Vec<Migration> {
    MIGRATIONS
        .iter()
        .map(|&(version, description, sql)| {
            Migration::new(
                version,
                Cow::Borrowed(description),
                MigrationType::Simple,
                Cow::Borrowed(sql),
                false,
            )
        })
        .collect()
}

/// Apply every migration that has not been recorded yet
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    let migrator = Migrator::new(Embedded).await?;
    migrator.run(pool).await?;

    info!(latest = MIGRATIONS.len(), "schema up to date");
    Ok(())
}
