//! User statistics handlers

use axum::{
    extract::{Path, State},
    Json,
};

use tracker_service::{StatsService, UserHistoryResponse, UserListEntry, UserStatsResponse};

use crate::extractors::{HistoryPagination, ListPagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// Totals and top emojis for one user
///
/// GET /users/{slack_id}/stats
pub async fn get_user_stats(
    State(state): State<AppState>,
    Path(slack_id): Path<String>,
) -> ApiResult<Json<UserStatsResponse>> {
    let service = StatsService::new(state.service_context());
    let stats = service.user_stats(&slack_id).await?;
    Ok(Json(stats))
}

/// Paginated usage history for one user, newest first
///
/// GET /users/{slack_id}/history
pub async fn get_user_history(
    State(state): State<AppState>,
    Path(slack_id): Path<String>,
    pagination: HistoryPagination,
) -> ApiResult<Json<UserHistoryResponse>> {
    let service = StatsService::new(state.service_context());
    let history = service
        .user_history(&slack_id, pagination.limit, pagination.offset)
        .await?;
    Ok(Json(history))
}

/// List active users
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    pagination: ListPagination,
) -> ApiResult<Json<Vec<UserListEntry>>> {
    let service = StatsService::new(state.service_context());
    let users = service
        .list_users(pagination.limit, pagination.offset)
        .await?;
    Ok(Json(users))
}
