//! Deployment identity: which pool and release answered a request.

/// Value reported when the pool or release is not configured.
pub const UNKNOWN: &str = "unknown";

/// Pool and release identifiers, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub pool: String,
    pub release_id: String,
}

impl Identity {
    pub fn new(pool: impl Into<String>, release_id: impl Into<String>) -> Self {
        Self {
            pool: pool.into(),
            release_id: release_id.into(),
        }
    }

    /// Build from raw configured values. Missing or empty values become `unknown`.
    pub fn from_raw(pool: Option<&str>, release_id: Option<&str>) -> Self {
        Self::new(or_unknown(pool), or_unknown(release_id))
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new(UNKNOWN, UNKNOWN)
    }
}

fn or_unknown(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN,
    }
}
