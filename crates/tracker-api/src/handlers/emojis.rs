//! Emoji policy handler

use axum::{extract::State, Json};

use tracker_service::{EmojiConfigResponse, StatsService};

use crate::state::AppState;

/// The configured score table and settings, read-only
///
/// GET /emojis
pub async fn get_emoji_config(State(state): State<AppState>) -> Json<EmojiConfigResponse> {
    let service = StatsService::new(state.service_context());
    Json(service.emoji_config())
}
