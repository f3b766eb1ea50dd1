//! Channel statistics handlers

use axum::{
    extract::{Path, State},
    Json,
};

use tracker_service::{ChannelListEntry, ChannelStatsResponse, StatsService};

use crate::extractors::ListPagination;
use crate::response::ApiResult;
use crate::state::AppState;

/// Totals, top emojis, and top users for one channel
///
/// GET /channels/{slack_id}/stats
pub async fn get_channel_stats(
    State(state): State<AppState>,
    Path(slack_id): Path<String>,
) -> ApiResult<Json<ChannelStatsResponse>> {
    let service = StatsService::new(state.service_context());
    let stats = service.channel_stats(&slack_id).await?;
    Ok(Json(stats))
}

/// List unarchived channels
///
/// GET /channels
pub async fn list_channels(
    State(state): State<AppState>,
    pagination: ListPagination,
) -> ApiResult<Json<Vec<ChannelListEntry>>> {
    let service = StatsService::new(state.service_context());
    let channels = service
        .list_channels(pagination.limit, pagination.offset)
        .await?;
    Ok(Json(channels))
}
