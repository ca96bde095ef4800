//! Integration tests for POST /chaos/start and POST /chaos/stop, driven end to end.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use bluegreen_core::chaos::ChaosKind;
use bluegreen_core::identity::Identity;
use bluegreen_infra::http::chaos::ChaosStartParams;
use bluegreen_infra::http::{AppState, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn setup() -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::new(Identity::new("green", "rel-3")).unwrap());
    let app = build_router(Arc::clone(&state));
    (state, app)
}

async fn call(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// GIVEN no mode param WHEN POST /chaos/start THEN mode defaults to error.
#[tokio::test]
async fn test_start_defaults_to_error() {
    let (state, app) = setup();
    let (status, body) = call(&app, "POST", "/chaos/start").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Chaos mode started", "mode": "error", "pool": "green"})
    );
    let snap = state.chaos.snapshot();
    assert!(snap.enabled);
    assert_eq!(snap.kind, ChaosKind::Error);
}

#[tokio::test]
async fn test_start_empty_mode_defaults_to_error() {
    let (state, app) = setup();
    let (_, body) = call(&app, "POST", "/chaos/start?mode=").await;

    assert_eq!(body["mode"], "error");
    assert_eq!(state.chaos.snapshot().kind, ChaosKind::Error);
}

#[tokio::test]
async fn test_start_accepts_any_mode_verbatim() {
    let (state, app) = setup();
    let (status, body) = call(&app, "POST", "/chaos/start?mode=slow%20drip").await;

    assert_eq!(status, StatusCode::OK, "unknown modes MUST NOT be rejected");
    assert_eq!(body["mode"], "slow drip");
    assert_eq!(state.chaos.snapshot().kind.as_str(), "slow drip");
}

/// GIVEN chaos=error WHEN GET /version THEN 500; WHEN stopped THEN 200 and / is healthy again.
#[tokio::test]
async fn test_error_chaos_round_trip() {
    let (_state, app) = setup();

    let (status, _) = call(&app, "GET", "/version").await;
    assert_eq!(status, StatusCode::OK, "version MUST be 200 before any chaos call");

    call(&app, "POST", "/chaos/start?mode=error").await;
    let (status, body) = call(&app, "GET", "/version").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Chaos mode: server error"}));

    let (status, body) = call(&app, "POST", "/chaos/stop").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Chaos mode stopped", "pool": "green"}));

    let (status, body) = call(&app, "GET", "/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], "1.0.0");

    let (_, root) = call(&app, "GET", "/").await;
    assert_eq!(root["status"], "healthy");
    assert_eq!(root["chaosMode"], false);
    assert_eq!(root["chaosType"], Value::Null);
}

/// GIVEN chaos=timeout WHEN GET /version THEN it hangs; WHEN stopped THEN new requests succeed.
#[tokio::test]
async fn test_timeout_chaos_round_trip() {
    let (_state, app) = setup();

    let (_, body) = call(&app, "POST", "/chaos/start?mode=timeout").await;
    assert_eq!(body["mode"], "timeout");

    let hung = app
        .clone()
        .oneshot(Request::get("/version").body(Body::empty()).unwrap());
    assert!(
        tokio::time::timeout(Duration::from_millis(300), hung)
            .await
            .is_err(),
        "version MUST not respond while timeout chaos is on"
    );

    call(&app, "POST", "/chaos/stop").await;
    let (status, _) = call(&app, "GET", "/version").await;
    assert_eq!(status, StatusCode::OK);
}

/// GIVEN chaos error WHEN started again with timeout THEN the kind is overwritten.
#[tokio::test]
async fn test_restart_overwrites_mode() {
    let (state, app) = setup();
    call(&app, "POST", "/chaos/start?mode=error").await;
    call(&app, "POST", "/chaos/start?mode=timeout").await;

    assert_eq!(state.chaos.snapshot().kind, ChaosKind::Timeout);
    let (_, root) = call(&app, "GET", "/").await;
    assert_eq!(root["chaosType"], "timeout");
}

/// GIVEN chaos already stopped WHEN POST /chaos/stop repeatedly THEN the same body each time.
#[tokio::test]
async fn test_stop_is_idempotent() {
    let (state, app) = setup();
    let first = call(&app, "POST", "/chaos/stop").await;
    let second = call(&app, "POST", "/chaos/stop").await;

    assert_eq!(first, second);
    assert_eq!(first.0, StatusCode::OK);
    assert!(!state.chaos.snapshot().enabled);
}

#[test]
fn test_start_params_kind() {
    assert_eq!(ChaosStartParams::default().kind(), ChaosKind::Error);
    let params = ChaosStartParams {
        mode: Some("timeout".to_string()),
    };
    assert_eq!(params.kind(), ChaosKind::Timeout);
}
