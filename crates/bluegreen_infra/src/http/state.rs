//! Shared state handed to every handler via `State<Arc<AppState>>`.

use axum::http::HeaderValue;
use bluegreen_core::chaos::ChaosState;
use bluegreen_core::identity::Identity;

use crate::config::{ConfigError, ENV_APP_POOL, ENV_RELEASE_ID};

pub struct AppState {
    /// Fixed at startup.
    pub identity: Identity,
    /// Mutated by the chaos endpoints, read by `/` and `/version`.
    pub chaos: ChaosState,
    pool_header: HeaderValue,
    release_header: HeaderValue,
}

impl AppState {
    /// Fails if the pool or release id cannot be sent as a header value.
    pub fn new(identity: Identity) -> Result<Self, ConfigError> {
        let pool_header = header_value(ENV_APP_POOL, &identity.pool)?;
        let release_header = header_value(ENV_RELEASE_ID, &identity.release_id)?;
        Ok(Self {
            identity,
            chaos: ChaosState::new(),
            pool_header,
            release_header,
        })
    }

    pub fn pool_header(&self) -> &HeaderValue {
        &self.pool_header
    }

    pub fn release_header(&self) -> &HeaderValue {
        &self.release_header
    }
}

fn header_value(key: &'static str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidHeaderValue {
        key,
        value: value.to_string(),
    })
}
