//! Health check endpoints.

use axum::{extract::State, http::StatusCode, Json};
use telemetry::health;

use crate::response::HealthResponse;
use crate::state::AppState;

/// GET /health - Dependency status and tracked sessions.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let report = health().report();

    Json(HealthResponse {
        status: report.status.as_str().to_string(),
        commerce_api_connected: health().commerce_api.is_healthy(),
        active_sessions: state.activity.len() as u64,
        checked_at: report.checked_at.timestamp(),
        components: report.components,
    })
}

/// GET /health/ready - Pages degrade without the commerce API, so this only
/// fails if the registry says so.
pub async fn ready_handler() -> StatusCode {
    if health().is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health/live
pub async fn live_handler() -> StatusCode {
    StatusCode::OK
}
