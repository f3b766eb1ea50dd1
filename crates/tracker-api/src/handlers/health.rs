//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};

use tracker_service::HealthResponse;

use crate::state::AppState;

/// System health: database connectivity plus Slack client status
///
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    // Check database connectivity
    let db_healthy = state
        .service_context()
        .pool()
        .acquire()
        .await
        .map(|_| true)
        .unwrap_or(false);

    // The Slack field reports whether a directory client is configured;
    // enrichment degrades gracefully without one
    let slack = state.service_context().directory().map(|_| true);

    let response = HealthResponse::from_checks(db_healthy, slack);
    let status = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
