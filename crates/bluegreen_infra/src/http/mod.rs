//! HTTP surface of the status server.
//!
//! Route table:
//! - GET /            → deployment status report
//! - GET /healthz     → liveness probe, unaffected by chaos
//! - GET /version     → version report, degraded by chaos
//! - POST /chaos/start → enable chaos (`?mode=error|timeout|<any>`)
//! - POST /chaos/stop  → disable chaos
//!
//! Every response, including 404/405, carries `X-App-Pool` and `X-Release-Id`.

pub mod chaos;
pub mod health;
pub mod identity_headers;
pub mod router;
pub mod state;
pub mod status;
pub mod version;

pub use router::build_router;
pub use state::AppState;

use chrono::{SecondsFormat, Utc};

/// Current UTC time as ISO-8601 with millisecond precision, e.g. `2026-01-01T12:00:00.000Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
