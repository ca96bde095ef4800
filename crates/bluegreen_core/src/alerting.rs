//! Access-log alert evaluation for blue/green failover monitoring.
//!
//! Consumes reverse-proxy access log events one at a time and decides when to
//! raise a failover alert (the serving pool changed) or a high error rate alert
//! (5xx share over the sliding window exceeds the threshold). Each alert key has
//! its own cooldown so a flapping pool or a sustained error rate does not flood
//! the channel.
//!
//! Time is injected by the caller; nothing here reads the clock.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use serde_json::Value;

/// Rate alerts need at least this many events in the window, whatever its size.
pub const MIN_EVENTS_FOR_RATE_ALERT: usize = 50;

/// One parsed line of the proxy's JSON access log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessLogEvent {
    pub pool: Option<String>,
    pub release: Option<String>,
    pub status: Option<u16>,
    /// Raw upstream status, possibly a list such as `"502, 200"` after a retry.
    pub upstream_status: Option<String>,
    pub upstream_addr: Option<String>,
    pub request_time: Option<f64>,
    pub upstream_response_time: Option<String>,
    pub time: Option<String>,
}

impl AccessLogEvent {
    /// True when any upstream attempt returned 5xx, or else the final status is 5xx.
    pub fn is_error(&self) -> bool {
        if let Some(upstream) = &self.upstream_status {
            let upstream_5xx = upstream
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .any(|s| s.starts_with('5'));
            if upstream_5xx {
                return true;
            }
        }
        matches!(self.status, Some(500..=599))
    }
}

/// Parse one access log line.
///
/// Returns `None` for blank lines, non-JSON, non-object JSON, and lines whose
/// `status` or `request_time` is present but not numeric.
pub fn parse_access_log_line(line: &str) -> Option<AccessLogEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let value: Value = serde_json::from_str(line).ok()?;
    let obj = value.as_object()?;

    let status = match present(obj.get("status")) {
        Some(v) => Some(parse_status(v)?),
        None => None,
    };
    let request_time = match present(obj.get("request_time")) {
        Some(v) => Some(parse_seconds(v)?),
        None => None,
    };

    Some(AccessLogEvent {
        // nginx logs "" when the upstream sent no pool header (proxy-generated 5xx).
        pool: text(obj.get("pool")).filter(|p| !p.is_empty()),
        release: text(obj.get("release")),
        status,
        upstream_status: text(obj.get("upstream_status")),
        upstream_addr: text(obj.get("upstream_addr")),
        request_time,
        upstream_response_time: text(obj.get("upstream_response_time")),
        time: text(obj.get("time")),
    })
}

fn present(v: Option<&Value>) -> Option<&Value> {
    v.filter(|v| !v.is_null())
}

fn text(v: Option<&Value>) -> Option<String> {
    match present(v)? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn parse_status(v: &Value) -> Option<u16> {
    match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64))
            .and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_seconds(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Tunables for [`AlertState`].
#[derive(Debug, Clone, PartialEq)]
pub struct AlertPolicy {
    /// Pool expected to be serving at startup.
    pub active_pool: String,
    /// Percent of 5xx responses in the window above which to alert.
    pub error_rate_threshold_pct: f64,
    /// Number of most recent events kept for the error rate.
    pub window_size: usize,
    /// Minimum time between two alerts with the same key.
    pub cooldown: Duration,
    /// Record events but never alert.
    pub maintenance_mode: bool,
}

impl AlertPolicy {
    /// Window length required before the error rate is trusted.
    pub fn min_events_for_rate_alert(&self) -> usize {
        MIN_EVENTS_FOR_RATE_ALERT.max(self.window_size / 2)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Failover {
        from: String,
        to: String,
        error_rate_pct: f64,
        window_len: usize,
        release: Option<String>,
        upstream: Option<String>,
    },
    HighErrorRate {
        error_rate_pct: f64,
        window_len: usize,
        active_pool: Option<String>,
        release: Option<String>,
    },
}

impl Alert {
    /// Cooldown key. Error rate alerts are banded by the percentage rounded half to even.
    pub fn cooldown_key(&self) -> String {
        match self {
            Alert::Failover { to, .. } => format!("failover_to_{to}"),
            Alert::HighErrorRate { error_rate_pct, .. } => {
                format!("error_rate_{}", error_rate_pct.round_ties_even() as i64)
            }
        }
    }

    /// Slack mrkdwn text for this alert.
    pub fn render(&self, timestamp: &str) -> String {
        match self {
            Alert::Failover {
                from,
                to,
                error_rate_pct,
                window_len,
                release,
                upstream,
            } => format!(
                "*Failover Detected*: {from} → {to}\n\
                 • time: {timestamp}\n\
                 • error_rate({window_len}): {error_rate_pct:.2}%\n\
                 • release: {release}\n\
                 • upstream: {upstream}\n\
                 Action: Check health of {from} and upstream logs.",
                release = or_na(release),
                upstream = or_na(upstream),
            ),
            Alert::HighErrorRate {
                error_rate_pct,
                window_len,
                active_pool,
                release,
            } => format!(
                "*High Error Rate*: {error_rate_pct:.2}% over last {window_len} requests\n\
                 • time: {timestamp}\n\
                 • active_pool: {active_pool}\n\
                 • release: {release}\n\
                 Action: Inspect upstream errors, consider toggling pools.",
                active_pool = or_na(active_pool),
                release = or_na(release),
            ),
        }
    }
}

fn or_na(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or("n/a")
}

/// Sliding-window alert evaluator.
pub struct AlertState {
    policy: AlertPolicy,
    last_pool: Option<String>,
    window: VecDeque<AccessLogEvent>,
    cooldowns: HashMap<String, Instant>,
}

impl AlertState {
    pub fn new(policy: AlertPolicy) -> Self {
        let last_pool = Some(policy.active_pool.clone()).filter(|p| !p.is_empty());
        Self {
            window: VecDeque::with_capacity(policy.window_size),
            policy,
            last_pool,
            cooldowns: HashMap::new(),
        }
    }

    pub fn policy(&self) -> &AlertPolicy {
        &self.policy
    }

    /// Pool that served the most recent event (or the configured active pool).
    pub fn last_pool(&self) -> Option<&str> {
        self.last_pool.as_deref()
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Percentage of error events in the window; 0 when empty.
    pub fn error_rate_pct(&self) -> f64 {
        if self.window.is_empty() {
            return 0.0;
        }
        let errors = self.window.iter().filter(|e| e.is_error()).count();
        errors as f64 / self.window.len() as f64 * 100.0
    }

    /// Feed one event and return the alerts it triggers (at most one of each kind).
    pub fn handle_event(&mut self, event: AccessLogEvent, now: Instant) -> Vec<Alert> {
        let pool = event.pool.clone().filter(|p| !p.is_empty());
        let release = event.release.clone();
        let upstream = event.upstream_addr.clone();

        self.push(event);

        if self.policy.maintenance_mode {
            return Vec::new();
        }

        let mut alerts = Vec::new();

        if let (Some(pool), Some(last)) = (pool.as_deref(), self.last_pool.as_deref()) {
            if pool != last {
                let alert = Alert::Failover {
                    from: last.to_string(),
                    to: pool.to_string(),
                    error_rate_pct: self.error_rate_pct(),
                    window_len: self.window.len(),
                    release: release.clone(),
                    upstream,
                };
                if self.cooldown_open(alert.cooldown_key(), now) {
                    alerts.push(alert);
                }
                // Track the new pool even when the alert is suppressed.
                self.last_pool = Some(pool.to_string());
            }
        }

        if self.window.len() >= self.policy.min_events_for_rate_alert() {
            let rate = self.error_rate_pct();
            if rate > self.policy.error_rate_threshold_pct {
                let alert = Alert::HighErrorRate {
                    error_rate_pct: rate,
                    window_len: self.window.len(),
                    active_pool: pool.or_else(|| self.last_pool.clone()),
                    release,
                };
                if self.cooldown_open(alert.cooldown_key(), now) {
                    alerts.push(alert);
                }
            }
        }

        alerts
    }

    fn push(&mut self, event: AccessLogEvent) {
        if self.policy.window_size == 0 {
            return;
        }
        while self.window.len() >= self.policy.window_size {
            self.window.pop_front();
        }
        self.window.push_back(event);
    }

    /// Returns true and arms the cooldown if `key` has not fired within the cooldown.
    fn cooldown_open(&mut self, key: String, now: Instant) -> bool {
        match self.cooldowns.get(&key) {
            Some(last) if now.saturating_duration_since(*last) < self.policy.cooldown => false,
            _ => {
                self.cooldowns.insert(key, now);
                true
            }
        }
    }
}
