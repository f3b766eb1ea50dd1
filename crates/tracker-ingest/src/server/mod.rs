//! Ingest server setup and runner

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use tracker_common::{load_emoji_policy, AppConfig, AppError};
use tracker_db::{
    create_pool, PgChannelRepository, PgStatsRepository, PgUsageRepository, PgUserRepository,
};
use tracker_service::{ServiceContextBuilder, SyncService};
use tracker_slack::SlackDirectoryClient;

use crate::handlers;
use crate::state::IngestState;

/// Build the ingest application
pub fn create_app(state: IngestState) -> Router {
    Router::new()
        .route("/slack/events", post(handlers::slack_events))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize all dependencies and create the ingest state
pub async fn create_app_state(config: AppConfig) -> Result<IngestState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = tracker_db::DatabaseConfig::new(&config.database.url)
        .connections(config.database.min_connections, config.database.max_connections);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    tracker_db::migrate(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let policy = load_emoji_policy(&config.emoji_config_path)
        .map_err(|e| AppError::Config(e.to_string()))?;

    let slack = config
        .slack
        .bot_token
        .as_deref()
        .map(|token| Arc::new(SlackDirectoryClient::new(token)));
    if slack.is_none() {
        warn!("SLACK_BOT_TOKEN not set; identity enrichment and author lookups are disabled");
    }

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let channel_repo = Arc::new(PgChannelRepository::new(pool.clone()));
    let usage_repo = Arc::new(PgUsageRepository::new(pool.clone()));
    let stats_repo = Arc::new(PgStatsRepository::new(pool.clone()));

    let mut builder = ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(user_repo)
        .channel_repo(channel_repo)
        .usage_repo(usage_repo)
        .stats_repo(stats_repo)
        .policy(Arc::new(policy));
    if let Some(slack) = &slack {
        builder = builder.directory(slack.clone());
    }
    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(IngestState::new(service_context, config, slack))
}

/// Run the ingest server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .ingest
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid ingest address: {e}")))?;

    let state = create_app_state(config).await?;

    // Optional one-shot directory import before serving
    if state.config().sync.on_startup && state.slack().is_some() {
        let sync = SyncService::new(state.service_context());
        let limit = u64::from(state.config().sync.limit);
        match sync.sync_users(limit).await {
            Ok(count) => info!(count, "Startup user sync finished"),
            Err(e) => warn!(error = %e, "Startup user sync failed"),
        }
        match sync.sync_channels(limit).await {
            Ok(count) => info!(count, "Startup channel sync finished"),
            Err(e) => warn!(error = %e, "Startup channel sync failed"),
        }
    }

    let app = create_app(state);

    info!("Starting ingest server on {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Ingest server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}
