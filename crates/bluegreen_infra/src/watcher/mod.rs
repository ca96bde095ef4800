//! Access-log alert watcher.
//!
//! Tails the proxy's JSON access log, feeds each event to
//! [`AlertState`](bluegreen_core::alerting::AlertState) and posts the resulting
//! alerts to Slack.

pub mod slack;
pub mod tail;

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use bluegreen_core::alerting::{AlertState, parse_access_log_line};
use thiserror::Error;

use crate::config::WatcherConfig;
use crate::http::now_iso;
use slack::SlackNotifier;
use tail::LogTail;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to read access log {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to build HTTP client")]
    Client(#[from] reqwest::Error),
}

/// Run until the log can no longer be read.
pub async fn run(config: WatcherConfig) -> Result<(), WatchError> {
    let notifier = SlackNotifier::new(config.slack_webhook_url.clone(), config.slack_prefix.clone())?;
    let mut state = AlertState::new(config.alert_policy());

    let policy = state.policy();
    tracing::info!(
        log_file = %config.log_file.display(),
        active_pool = %policy.active_pool,
        threshold_pct = policy.error_rate_threshold_pct,
        window = policy.window_size,
        min_events = policy.min_events_for_rate_alert(),
        cooldown_s = policy.cooldown.as_secs(),
        maintenance = policy.maintenance_mode,
        slack = notifier.is_enabled(),
        "alert watcher starting"
    );

    let mut tail = LogTail::open_at_end(&config.log_file).await?;
    loop {
        let line = tail.next_line().await?;
        let Some(event) = parse_access_log_line(&line) else {
            tracing::trace!(%line, "skipping unparseable log line");
            continue;
        };
        for alert in state.handle_event(event, Instant::now()) {
            tracing::warn!(key = %alert.cooldown_key(), "alert raised");
            notifier.post(&alert.render(&now_iso())).await;
        }
    }
}
