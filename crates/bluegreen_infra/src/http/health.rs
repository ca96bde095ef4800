//! GET /healthz handler.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use bluegreen_core::report::HealthReport;

use super::state::AppState;

/// Liveness only. Chaos state is deliberately not consulted.
pub async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(HealthReport::healthy(&state.identity))
}
