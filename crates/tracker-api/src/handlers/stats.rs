//! Global statistics handler

use axum::{extract::State, Json};

use tracker_service::{GlobalStatsResponse, StatsService};

use crate::response::ApiResult;
use crate::state::AppState;

/// Workspace-wide totals and top emojis
///
/// GET /stats/global
pub async fn get_global_stats(
    State(state): State<AppState>,
) -> ApiResult<Json<GlobalStatsResponse>> {
    let service = StatsService::new(state.service_context());
    let stats = service.global_stats().await?;
    Ok(Json(stats))
}
