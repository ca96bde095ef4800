//! Middleware stamping the deployment identity on every response.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderName;
use axum::middleware::Next;
use axum::response::Response;

use super::state::AppState;

pub const HEADER_APP_POOL: &str = "x-app-pool";
pub const HEADER_RELEASE_ID: &str = "x-release-id";

/// Adds `X-App-Pool` and `X-Release-Id`, overwriting any value a handler set.
pub async fn identity_headers(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        HeaderName::from_static(HEADER_APP_POOL),
        state.pool_header().clone(),
    );
    headers.insert(
        HeaderName::from_static(HEADER_RELEASE_ID),
        state.release_header().clone(),
    );
    response
}
