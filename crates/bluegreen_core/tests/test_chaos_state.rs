use bluegreen_core::chaos::{ChaosKind, ChaosSnapshot, ChaosState, DEFAULT_CHAOS_MODE, VersionFault};
use std::sync::Arc;
use std::thread;

/// GIVEN a fresh process WHEN chaos state is read THEN it is disabled with kind=error.
#[test]
fn test_default_state_is_disabled_error() {
    let state = ChaosState::new();
    let snap = state.snapshot();

    assert!(!snap.enabled, "chaos MUST start disabled");
    assert_eq!(snap.kind, ChaosKind::Error, "default kind MUST be error");
    assert_eq!(snap.active_kind(), None);
    assert_eq!(snap.version_fault(), None);
}

/// GIVEN chaos started with error WHEN version fault is evaluated THEN server error.
#[test]
fn test_start_error_injects_server_error() {
    let state = ChaosState::new();
    let snap = state.start(ChaosKind::Error);

    assert!(snap.enabled);
    assert_eq!(snap, state.snapshot(), "start MUST return the stored snapshot");
    assert_eq!(snap.version_fault(), Some(VersionFault::ServerError));
}

/// GIVEN chaos started with timeout WHEN version fault is evaluated THEN hang.
#[test]
fn test_start_timeout_injects_hang() {
    let state = ChaosState::new();
    state.start(ChaosKind::Timeout);

    assert_eq!(state.snapshot().version_fault(), Some(VersionFault::Hang));
    assert_eq!(
        state.snapshot().active_kind(),
        Some(&ChaosKind::Timeout),
        "active kind MUST be reported while enabled"
    );
}

/// GIVEN chaos enabled with error WHEN started again with timeout THEN kind is overwritten.
#[test]
fn test_start_overwrites_kind() {
    let state = ChaosState::new();
    state.start(ChaosKind::Error);
    state.start(ChaosKind::Timeout);

    let snap = state.snapshot();
    assert!(snap.enabled);
    assert_eq!(snap.kind, ChaosKind::Timeout);
}

/// GIVEN chaos enabled with timeout WHEN stopped THEN disabled and kind reset to error.
#[test]
fn test_stop_resets_to_default() {
    let state = ChaosState::new();
    state.start(ChaosKind::Timeout);

    let snap = state.stop();

    assert_eq!(snap, ChaosSnapshot::default());
    assert_eq!(state.snapshot().kind, ChaosKind::Error, "stop MUST reset kind");
}

/// GIVEN chaos already stopped WHEN stopped again THEN state is unchanged.
#[test]
fn test_stop_is_idempotent() {
    let state = ChaosState::new();
    let first = state.stop();
    let second = state.stop();

    assert_eq!(first, second);
    assert!(!second.enabled);
}

/// GIVEN an unknown mode string WHEN chaos starts THEN it is kept verbatim and injects nothing.
#[test]
fn test_unrecognized_mode_is_kept_but_inert() {
    let state = ChaosState::new();
    let snap = state.start(ChaosKind::from_mode("latency"));

    assert!(snap.enabled, "unknown modes still enable chaos");
    assert_eq!(snap.kind.as_str(), "latency");
    assert_eq!(snap.version_fault(), None, "unknown modes MUST NOT inject a fault");
}

#[test]
fn test_mode_parsing_is_exact() {
    assert_eq!(ChaosKind::from_mode(DEFAULT_CHAOS_MODE), ChaosKind::Error);
    assert_eq!(ChaosKind::from_mode("timeout"), ChaosKind::Timeout);
    assert_eq!(
        ChaosKind::from_mode("TIMEOUT"),
        ChaosKind::Unrecognized("TIMEOUT".to_string()),
        "mode matching is case-sensitive"
    );
    assert_eq!(ChaosKind::Timeout.to_string(), "timeout");
}

/// GIVEN concurrent writers WHEN they all finish THEN the state is one of the written values.
#[test]
fn test_concurrent_writes_leave_consistent_snapshot() {
    let state = Arc::new(ChaosState::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                for _ in 0..100 {
                    if i % 2 == 0 {
                        state.start(ChaosKind::Timeout);
                    } else {
                        state.stop();
                    }
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let snap = state.snapshot();
    let valid = snap == ChaosSnapshot::default()
        || (snap.enabled && snap.kind == ChaosKind::Timeout);
    assert!(valid, "snapshot MUST be a whole written value, got {snap:?}");
}
