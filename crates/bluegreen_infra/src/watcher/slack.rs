//! Slack incoming-webhook notifier.
//!
//! Delivery is best effort: failures are logged and never stop the watcher.

use std::time::Duration;

use serde::Serialize;

use super::WatchError;

pub const SLACK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
struct SlackPayload<'a> {
    text: &'a str,
}

pub struct SlackNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
    prefix: String,
}

impl SlackNotifier {
    pub fn new(webhook_url: Option<String>, prefix: impl Into<String>) -> Result<Self, WatchError> {
        let client = reqwest::Client::builder().timeout(SLACK_TIMEOUT).build()?;
        Ok(Self {
            client,
            webhook_url: webhook_url.filter(|u| !u.is_empty()),
            prefix: prefix.into(),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    pub fn format_message(&self, text: &str) -> String {
        format!("{} | {}", self.prefix, text)
    }

    /// Post `text`. Returns true only if the webhook accepted it.
    pub async fn post(&self, text: &str) -> bool {
        let Some(url) = self.webhook_url.as_deref() else {
            tracing::info!(%text, "slack disabled; alert not posted");
            return false;
        };

        let message = self.format_message(text);
        let result = self
            .client
            .post(url)
            .json(&SlackPayload { text: &message })
            .send()
            .await
            .and_then(|resp| resp.error_for_status());

        match result {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to post slack alert");
                false
            }
        }
    }
}
