//! Operator-toggled chaos state.
//!
//! Chaos degrades the version endpoint only. `start` overwrites the kind,
//! `stop` resets to the disabled default. Writes replace the whole value, so
//! concurrent callers see last-writer-wins.

use std::fmt;
use std::sync::{PoisonError, RwLock};

/// Mode used by `/chaos/start` when the caller gives none.
pub const DEFAULT_CHAOS_MODE: &str = "error";

/// What kind of fault chaos mode injects.
///
/// Operators may pass any mode string. Values other than `error` and `timeout`
/// are kept verbatim and echoed back, but inject no fault.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChaosKind {
    #[default]
    Error,
    Timeout,
    Unrecognized(String),
}

impl ChaosKind {
    pub fn from_mode(mode: &str) -> Self {
        match mode {
            "error" => ChaosKind::Error,
            "timeout" => ChaosKind::Timeout,
            other => ChaosKind::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ChaosKind::Error => "error",
            ChaosKind::Timeout => "timeout",
            ChaosKind::Unrecognized(mode) => mode.as_str(),
        }
    }
}

impl fmt::Display for ChaosKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fault the version endpoint must produce for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionFault {
    /// Canned 500 response.
    ServerError,
    /// Never respond.
    Hang,
}

/// Point-in-time copy of the chaos flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChaosSnapshot {
    pub enabled: bool,
    pub kind: ChaosKind,
}

impl ChaosSnapshot {
    /// The active kind, or `None` while chaos is disabled.
    pub fn active_kind(&self) -> Option<&ChaosKind> {
        self.enabled.then_some(&self.kind)
    }

    pub fn version_fault(&self) -> Option<VersionFault> {
        match self.active_kind()? {
            ChaosKind::Error => Some(VersionFault::ServerError),
            ChaosKind::Timeout => Some(VersionFault::Hang),
            ChaosKind::Unrecognized(_) => None,
        }
    }
}

/// Shared chaos flags, owned by the server state and handed to handlers.
#[derive(Debug, Default)]
pub struct ChaosState {
    inner: RwLock<ChaosSnapshot>,
}

impl ChaosState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable chaos with `kind`, replacing any previous kind.
    pub fn start(&self, kind: ChaosKind) -> ChaosSnapshot {
        self.replace(ChaosSnapshot {
            enabled: true,
            kind,
        })
    }

    /// Disable chaos and reset the kind. Calling it while stopped is a no-op.
    pub fn stop(&self) -> ChaosSnapshot {
        self.replace(ChaosSnapshot::default())
    }

    pub fn snapshot(&self) -> ChaosSnapshot {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, next: ChaosSnapshot) -> ChaosSnapshot {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next.clone();
        next
    }
}
