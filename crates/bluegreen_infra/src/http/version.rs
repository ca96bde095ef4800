//! GET /version handler, the chaos target.
//!
//! - chaos off (or unrecognized kind) → 200 version report
//! - chaos `error` → 500 `{"error":"Chaos mode: server error"}`
//! - chaos `timeout` → the handler never completes; the connection stays open
//!   until the client or proxy gives up

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bluegreen_core::chaos::VersionFault;
use bluegreen_core::report::{ErrorReport, VersionReport};

use super::now_iso;
use super::state::AppState;

pub async fn handle_version(State(state): State<Arc<AppState>>) -> Response {
    match state.chaos.snapshot().version_fault() {
        Some(VersionFault::ServerError) => {
            tracing::debug!(pool = %state.identity.pool, "chaos: returning simulated server error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorReport::chaos_server_error()),
            )
                .into_response()
        }
        Some(VersionFault::Hang) => {
            tracing::debug!(pool = %state.identity.pool, "chaos: holding request open");
            std::future::pending::<Response>().await
        }
        None => Json(VersionReport::build(&state.identity, now_iso())).into_response(),
    }
}
