//! GET / handler.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use bluegreen_core::report::StatusReport;

use super::now_iso;
use super::state::AppState;

/// Report identity and chaos state. Always 200.
pub async fn handle_status(State(state): State<Arc<AppState>>) -> Json<StatusReport> {
    Json(StatusReport::build(
        &state.identity,
        &state.chaos.snapshot(),
        now_iso(),
    ))
}
