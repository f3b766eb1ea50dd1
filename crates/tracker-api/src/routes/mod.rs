//! Route definitions
//!
//! The read API keeps the original flat paths; there is no versioned prefix.

use axum::{routing::get, Router};

use crate::handlers::{channels, emojis, health, leaderboard, stats, users};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate
/// middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // User stats
        .route("/users", get(users::list_users))
        .route("/users/:slack_id/stats", get(users::get_user_stats))
        .route("/users/:slack_id/history", get(users::get_user_history))
        // Leaderboard
        .route("/leaderboard", get(leaderboard::get_leaderboard))
        // Channel stats
        .route("/channels", get(channels::list_channels))
        .route("/channels/:slack_id/stats", get(channels::get_channel_stats))
        // Emoji policy
        .route("/emojis", get(emojis::get_emoji_config))
        // Global stats
        .route("/stats/global", get(stats::get_global_stats))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}
