//! POST /chaos/start and POST /chaos/stop handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use bluegreen_core::chaos::{ChaosKind, DEFAULT_CHAOS_MODE};
use bluegreen_core::report::{ChaosStarted, ChaosStopped};
use serde::Deserialize;

use super::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ChaosStartParams {
    /// Any string is accepted; missing or empty means `error`.
    pub mode: Option<String>,
}

impl ChaosStartParams {
    pub fn kind(&self) -> ChaosKind {
        let mode = self
            .mode
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_CHAOS_MODE);
        ChaosKind::from_mode(mode)
    }
}

pub async fn handle_chaos_start(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChaosStartParams>,
) -> Json<ChaosStarted> {
    let snapshot = state.chaos.start(params.kind());
    if matches!(snapshot.kind, ChaosKind::Unrecognized(_)) {
        tracing::warn!(mode = %snapshot.kind, "chaos started with unrecognized mode; no fault will be injected");
    } else {
        tracing::warn!(mode = %snapshot.kind, pool = %state.identity.pool, "chaos mode started");
    }
    Json(ChaosStarted::build(&state.identity, &snapshot.kind))
}

/// Idempotent: stopping while stopped returns the same body.
pub async fn handle_chaos_stop(State(state): State<Arc<AppState>>) -> Json<ChaosStopped> {
    state.chaos.stop();
    tracing::info!(pool = %state.identity.pool, "chaos mode stopped");
    Json(ChaosStopped::build(&state.identity))
}
