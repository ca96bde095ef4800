use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use bluegreen_core::alerting::AlertPolicy;
use bluegreen_core::identity::Identity;
use thiserror::Error;

// Status server environment.
pub const ENV_APP_POOL: &str = "APP_POOL";
pub const ENV_RELEASE_ID: &str = "RELEASE_ID";
pub const ENV_PORT: &str = "PORT";

pub const PORT_DEFAULT: u16 = 3000;

// Alert watcher environment.
pub const ENV_LOG_FILE: &str = "NGINX_LOG_FILE";
pub const ENV_SLACK_WEBHOOK_URL: &str = "SLACK_WEBHOOK_URL";
pub const ENV_SLACK_PREFIX: &str = "SLACK_PREFIX";
pub const ENV_ACTIVE_POOL: &str = "ACTIVE_POOL";
pub const ENV_ERROR_RATE_THRESHOLD: &str = "ERROR_RATE_THRESHOLD";
pub const ENV_WINDOW_SIZE: &str = "WINDOW_SIZE";
pub const ENV_ALERT_COOLDOWN_SEC: &str = "ALERT_COOLDOWN_SEC";
pub const ENV_MAINTENANCE_MODE: &str = "MAINTENANCE_MODE";

pub const LOG_FILE_DEFAULT: &str = "/var/log/nginx/access.json";
pub const SLACK_PREFIX_DEFAULT: &str = "from: @Techalla";
pub const ACTIVE_POOL_DEFAULT: &str = "blue";
pub const ERROR_RATE_THRESHOLD_DEFAULT: f64 = 2.0;
pub const WINDOW_SIZE_DEFAULT: usize = 200;
pub const ALERT_COOLDOWN_SEC_DEFAULT: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} (expected {expected})")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("{key} is not a valid HTTP header value: {value:?}")]
    InvalidHeaderValue { key: &'static str, value: String },
}

/// Raw status server settings. `None` means unset or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfigInput {
    pub app_pool: Option<String>,
    pub release_id: Option<String>,
    pub port: Option<String>,
}

impl ServerConfigInput {
    pub fn from_env() -> Self {
        Self {
            app_pool: env_var(ENV_APP_POOL),
            release_id: env_var(ENV_RELEASE_ID),
            port: env_var(ENV_PORT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub identity: Identity,
    pub port: u16,
}

impl ServerConfig {
    /// All interfaces on the configured port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

pub fn resolve_server_config(input: ServerConfigInput) -> Result<ServerConfig, ConfigError> {
    let identity = Identity::from_raw(input.app_pool.as_deref(), input.release_id.as_deref());
    let port = parse_or(ENV_PORT, input.port.as_deref(), PORT_DEFAULT, "port number 0-65535")?;
    Ok(ServerConfig { identity, port })
}

/// Raw alert watcher settings. `None` means unset or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatcherConfigInput {
    pub log_file: Option<String>,
    pub slack_webhook_url: Option<String>,
    pub slack_prefix: Option<String>,
    pub active_pool: Option<String>,
    pub error_rate_threshold: Option<String>,
    pub window_size: Option<String>,
    pub alert_cooldown_sec: Option<String>,
    pub maintenance_mode: Option<String>,
}

impl WatcherConfigInput {
    pub fn from_env() -> Self {
        Self {
            log_file: env_var(ENV_LOG_FILE),
            slack_webhook_url: env_var(ENV_SLACK_WEBHOOK_URL),
            slack_prefix: env_var(ENV_SLACK_PREFIX),
            active_pool: env_var(ENV_ACTIVE_POOL),
            error_rate_threshold: env_var(ENV_ERROR_RATE_THRESHOLD),
            window_size: env_var(ENV_WINDOW_SIZE),
            alert_cooldown_sec: env_var(ENV_ALERT_COOLDOWN_SEC),
            maintenance_mode: env_var(ENV_MAINTENANCE_MODE),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatcherConfig {
    pub log_file: PathBuf,
    /// Alerts are only logged when unset.
    pub slack_webhook_url: Option<String>,
    pub slack_prefix: String,
    pub active_pool: String,
    pub error_rate_threshold_pct: f64,
    pub window_size: usize,
    pub alert_cooldown: Duration,
    pub maintenance_mode: bool,
}

impl WatcherConfig {
    pub fn alert_policy(&self) -> AlertPolicy {
        AlertPolicy {
            active_pool: self.active_pool.clone(),
            error_rate_threshold_pct: self.error_rate_threshold_pct,
            window_size: self.window_size,
            cooldown: self.alert_cooldown,
            maintenance_mode: self.maintenance_mode,
        }
    }
}

pub fn resolve_watcher_config(input: WatcherConfigInput) -> Result<WatcherConfig, ConfigError> {
    let error_rate_threshold_pct = parse_or(
        ENV_ERROR_RATE_THRESHOLD,
        input.error_rate_threshold.as_deref(),
        ERROR_RATE_THRESHOLD_DEFAULT,
        "percentage",
    )?;
    if !error_rate_threshold_pct.is_finite() {
        return Err(invalid(
            ENV_ERROR_RATE_THRESHOLD,
            input.error_rate_threshold.as_deref(),
            "percentage",
        ));
    }

    let window_size = parse_or(
        ENV_WINDOW_SIZE,
        input.window_size.as_deref(),
        WINDOW_SIZE_DEFAULT,
        "positive integer",
    )?;
    if window_size == 0 {
        return Err(invalid(
            ENV_WINDOW_SIZE,
            input.window_size.as_deref(),
            "positive integer",
        ));
    }

    let cooldown_sec = parse_or(
        ENV_ALERT_COOLDOWN_SEC,
        input.alert_cooldown_sec.as_deref(),
        ALERT_COOLDOWN_SEC_DEFAULT,
        "seconds",
    )?;

    let maintenance_mode = input
        .maintenance_mode
        .as_deref()
        .is_some_and(|v| v.eq_ignore_ascii_case("true"));

    Ok(WatcherConfig {
        log_file: PathBuf::from(input.log_file.as_deref().unwrap_or(LOG_FILE_DEFAULT)),
        slack_webhook_url: input.slack_webhook_url,
        slack_prefix: input
            .slack_prefix
            .unwrap_or_else(|| SLACK_PREFIX_DEFAULT.to_string()),
        active_pool: input
            .active_pool
            .unwrap_or_else(|| ACTIVE_POOL_DEFAULT.to_string()),
        error_rate_threshold_pct,
        window_size,
        alert_cooldown: Duration::from_secs(cooldown_sec),
        maintenance_mode,
    })
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<&str>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| invalid(key, Some(v), expected)),
    }
}

fn invalid(key: &'static str, value: Option<&str>, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.unwrap_or_default().to_string(),
        expected,
    }
}
