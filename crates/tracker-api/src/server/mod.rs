//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use tracker_common::{load_emoji_policy, AppConfig, AppError};
use tracker_db::{
    create_pool, PgChannelRepository, PgStatsRepository, PgUsageRepository, PgUserRepository,
};
use tracker_service::ServiceContextBuilder;
use tracker_slack::SlackDirectoryClient;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware.
/// Health routes skip the rate limiter.
pub fn create_app(state: AppState) -> Router {
    let config = state.config().clone();

    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_middleware(health_routes());

    api.merge(health).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = tracker_db::DatabaseConfig::new(&config.database.url)
        .connections(config.database.min_connections, config.database.max_connections);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Apply migrations
    tracker_db::migrate(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    // Load the emoji policy
    let policy = load_emoji_policy(&config.emoji_config_path)
        .map_err(|e| AppError::Config(e.to_string()))?;

    // Directory client is optional; stats reads work without it
    let directory = config
        .slack
        .bot_token
        .as_deref()
        .map(|token| Arc::new(SlackDirectoryClient::new(token)));

    // Create repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let channel_repo = Arc::new(PgChannelRepository::new(pool.clone()));
    let usage_repo = Arc::new(PgUsageRepository::new(pool.clone()));
    let stats_repo = Arc::new(PgStatsRepository::new(pool.clone()));

    // Build service context
    let mut builder = ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(user_repo)
        .channel_repo(channel_repo)
        .usage_repo(usage_repo)
        .stats_repo(stats_repo)
        .policy(Arc::new(policy));
    if let Some(directory) = directory {
        builder = builder.directory(directory);
    }
    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API address: {e}")))?;

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
