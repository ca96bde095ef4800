//! JSON bodies returned by the status server.
//!
//! Field names are camelCase on the wire. Timestamps are produced by the
//! caller so the payloads stay clock-free.

use serde::{Deserialize, Serialize};

use crate::chaos::{ChaosKind, ChaosSnapshot};
use crate::identity::Identity;

pub const SERVICE_NAME: &str = "Blue/Green Deployment";
pub const SERVICE_VERSION: &str = "1.0.0";

pub const STATUS_HEALTHY: &str = "healthy";
pub const STATUS_CHAOS: &str = "chaos";

pub const CHAOS_SERVER_ERROR: &str = "Chaos mode: server error";
pub const CHAOS_STARTED: &str = "Chaos mode started";
pub const CHAOS_STOPPED: &str = "Chaos mode stopped";

/// Static endpoint map advertised by `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointMap {
    pub version: String,
    pub health: String,
    pub chaos: String,
}

impl Default for EndpointMap {
    fn default() -> Self {
        Self {
            version: "/version".to_string(),
            health: "/healthz".to_string(),
            chaos: "/chaos/start and /chaos/stop".to_string(),
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub service: String,
    pub pool: String,
    pub release_id: String,
    pub status: String,
    pub chaos_mode: bool,
    /// Serialized as `null` while chaos is disabled.
    pub chaos_type: Option<String>,
    pub timestamp: String,
    pub endpoints: EndpointMap,
}

impl StatusReport {
    pub fn build(identity: &Identity, chaos: &ChaosSnapshot, timestamp: String) -> Self {
        let status = if chaos.enabled {
            STATUS_CHAOS
        } else {
            STATUS_HEALTHY
        };
        Self {
            service: SERVICE_NAME.to_string(),
            pool: identity.pool.clone(),
            release_id: identity.release_id.clone(),
            status: status.to_string(),
            chaos_mode: chaos.enabled,
            chaos_type: chaos.active_kind().map(|kind| kind.as_str().to_string()),
            timestamp,
            endpoints: EndpointMap::default(),
        }
    }
}

/// Body of `GET /healthz`. Always healthy; chaos does not reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub pool: String,
}

impl HealthReport {
    pub fn healthy(identity: &Identity) -> Self {
        Self {
            status: STATUS_HEALTHY.to_string(),
            pool: identity.pool.clone(),
        }
    }
}

/// Successful body of `GET /version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionReport {
    pub version: String,
    pub pool: String,
    pub release_id: String,
    pub timestamp: String,
}

impl VersionReport {
    pub fn build(identity: &Identity, timestamp: String) -> Self {
        Self {
            version: SERVICE_VERSION.to_string(),
            pool: identity.pool.clone(),
            release_id: identity.release_id.clone(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
}

impl ErrorReport {
    pub fn chaos_server_error() -> Self {
        Self {
            error: CHAOS_SERVER_ERROR.to_string(),
        }
    }
}

/// Body of `POST /chaos/start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaosStarted {
    pub message: String,
    pub mode: String,
    pub pool: String,
}

impl ChaosStarted {
    pub fn build(identity: &Identity, kind: &ChaosKind) -> Self {
        Self {
            message: CHAOS_STARTED.to_string(),
            mode: kind.as_str().to_string(),
            pool: identity.pool.clone(),
        }
    }
}

/// Body of `POST /chaos/stop`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaosStopped {
    pub message: String,
    pub pool: String,
}

impl ChaosStopped {
    pub fn build(identity: &Identity) -> Self {
        Self {
            message: CHAOS_STOPPED.to_string(),
            pool: identity.pool.clone(),
        }
    }
}
