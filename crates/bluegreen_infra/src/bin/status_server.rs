//! Blue/green status server binary.

use std::sync::Arc;

use anyhow::Context;
use bluegreen_infra::config::{ServerConfigInput, resolve_server_config};
use bluegreen_infra::http::{AppState, build_router};
use bluegreen_infra::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = resolve_server_config(ServerConfigInput::from_env())?;
    let state = Arc::new(AppState::new(config.identity.clone())?);
    let router = build_router(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!(
        pool = %config.identity.pool,
        release_id = %config.identity.release_id,
        bind_addr = %bind_addr,
        "status server listening"
    );

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
