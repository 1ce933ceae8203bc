//! Server setup and initialization
//!
//! Pool lifecycle: create, migrate, serve, close on shutdown.

use std::sync::Arc;

use axum::Router;
use chat_common::{AppConfig, AppError, AppResult, JwtService};
use chat_core::SnowflakeGenerator;
use chat_db::{
    create_pool, run_migrations, PgChatRepository, PgMemberRepository, PgMessageRepository,
    PgPool, PgUserRepository, PoolConfig,
};
use chat_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware(
        create_router(),
        &config.cors,
        config.app.env.is_production(),
    );
    api.merge(health_routes()).with_state(state)
}

/// Wire repositories and credential services onto an existing pool
pub fn create_app_state(config: AppConfig, pool: PgPool) -> AppResult<AppState> {
    let jwt_service = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.token_expiry));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .chat_repo(Arc::new(PgChatRepository::new(pool.clone())))
        .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
        .message_repo(Arc::new(PgMessageRepository::new(pool.clone())))
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(AppError::internal)?;

    Ok(AppState::new(service_context, config, pool))
}

/// Connect to PostgreSQL and bring the schema up to date
pub async fn connect_database(config: &AppConfig) -> AppResult<PgPool> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(AppError::internal)?;
    info!("PostgreSQL connection established");

    run_migrations(&pool).await.map_err(AppError::internal)?;
    info!("Database migrations applied");

    Ok(pool)
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(app: Router, address: &str) -> AppResult<()> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to bind to {address}: {e}")))?;

    info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let address = config.api.address();

    let pool = connect_database(&config).await?;
    let state = create_app_state(config, pool.clone())?;
    let app = create_app(state);

    let result = run_server(app, &address).await;

    info!("Closing database pool");
    pool.close().await;

    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
