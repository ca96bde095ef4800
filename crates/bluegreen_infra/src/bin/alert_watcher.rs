//! Access-log alert watcher binary.

use bluegreen_infra::config::{WatcherConfigInput, resolve_watcher_config};
use bluegreen_infra::{telemetry, watcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = resolve_watcher_config(WatcherConfigInput::from_env())?;
    watcher::run(config).await?;
    Ok(())
}
