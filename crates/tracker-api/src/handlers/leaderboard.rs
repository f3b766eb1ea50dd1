//! Leaderboard handler

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use tracker_core::entities::LeaderboardSort;
use tracker_service::{LeaderboardResponse, StatsService};

use crate::response::ApiResult;
use crate::state::AppState;

/// Default number of leaderboard entries
const DEFAULT_LIMIT: i64 = 50;

/// Leaderboard query parameters
#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    /// received_score | received_count | given_score | given_count;
    /// unrecognized values fall back to received_score
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Ranked users by the chosen metric
///
/// GET /leaderboard
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> ApiResult<Json<LeaderboardResponse>> {
    let sort = params
        .sort_by
        .as_deref()
        .map(LeaderboardSort::parse_or_default)
        .unwrap_or_default();
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);

    let service = StatsService::new(state.service_context());
    let leaderboard = service.leaderboard(sort, limit).await?;
    Ok(Json(leaderboard))
}
