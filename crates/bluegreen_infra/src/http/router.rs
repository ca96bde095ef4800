//! Route assembly for the status server.

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use super::identity_headers::identity_headers;
use super::state::AppState;
use super::{chaos, health, status, version};

pub const PATH_ROOT: &str = "/";
pub const PATH_HEALTH: &str = "/healthz";
pub const PATH_VERSION: &str = "/version";
pub const PATH_CHAOS_START: &str = "/chaos/start";
pub const PATH_CHAOS_STOP: &str = "/chaos/stop";

/// Build the router. The identity layer wraps every route and the fallback.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(PATH_ROOT, get(status::handle_status))
        .route(PATH_HEALTH, get(health::handle_health))
        .route(PATH_VERSION, get(version::handle_version))
        .route(PATH_CHAOS_START, post(chaos::handle_chaos_start))
        .route(PATH_CHAOS_STOP, post(chaos::handle_chaos_stop))
        .fallback(handle_not_found)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            identity_headers,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
