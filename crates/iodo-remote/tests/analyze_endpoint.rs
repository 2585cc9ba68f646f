//! Integration tests against a stub analysis server on a loopback port.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use iodo_core::testing::FakePlatform;
use iodo_core::{
    AnalysisError, AnalysisPort, AnalysisSource, DiagnosticService, TelemetrySnapshot, codes,
};
use iodo_remote::{DefaultRemoteClient, RemoteClientConfig};

#[derive(Clone, Default)]
struct StubState {
    hits: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn analyze_ok(State(state): State<StubState>, Json(body): Json<Value>) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.bodies.lock().unwrap().push(body);
    Json(json!({
        "faults": [
            {"code": "THERMAL", "severity": "high", "message": "Device is overheating."}
        ],
        "summary": "Remote analysis found 1 issue."
    }))
}

async fn analyze_fails(State(state): State<StubState>) -> StatusCode {
    state.hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn analyze_garbage(State(state): State<StubState>) -> &'static str {
    state.hits.fetch_add(1, Ordering::SeqCst);
    "<html>maintenance</html>"
}

/// Serve `router` on an ephemeral loopback port and return its origin.
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://127.0.0.1:{port}")
}

fn client_for(origin: &str) -> DefaultRemoteClient {
    let config = RemoteClientConfig::new()
        .with_origin(origin)
        .with_timeout(Duration::from_secs(5));
    DefaultRemoteClient::new(&config).unwrap()
}

#[tokio::test]
async fn valid_reply_is_decoded_and_snapshot_is_posted_as_json() {
    let state = StubState::default();
    let router = Router::new()
        .route("/api/analyze", post(analyze_ok))
        .with_state(state.clone());
    let origin = spawn_stub(router).await;

    let snapshot = TelemetrySnapshot::new();
    let result = client_for(&origin).analyze(&snapshot).await.unwrap();

    assert_eq!(result.faults.len(), 1);
    assert_eq!(result.faults[0].code, "THERMAL");
    assert_eq!(state.hits.load(Ordering::SeqCst), 1);

    // The Json extractor only accepts application/json bodies.
    let bodies = state.bodies.lock().unwrap();
    assert_eq!(bodies[0], serde_json::to_value(&snapshot).unwrap());
}

#[tokio::test]
async fn server_error_is_unavailable_without_retry() {
    let state = StubState::default();
    let router = Router::new()
        .route("/api/analyze", post(analyze_fails))
        .with_state(state.clone());
    let origin = spawn_stub(router).await;

    let result = client_for(&origin).analyze(&TelemetrySnapshot::new()).await;

    assert!(matches!(result, Err(AnalysisError::RemoteUnavailable { .. })));
    assert_eq!(state.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn non_json_reply_is_unavailable() {
    let state = StubState::default();
    let router = Router::new()
        .route("/api/analyze", post(analyze_garbage))
        .with_state(state.clone());
    let origin = spawn_stub(router).await;

    let result = client_for(&origin).analyze(&TelemetrySnapshot::new()).await;
    assert!(matches!(result, Err(AnalysisError::RemoteUnavailable { .. })));
}

#[tokio::test]
async fn unreachable_origin_is_unavailable() {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let result = client_for(&format!("http://127.0.0.1:{port}"))
        .analyze(&TelemetrySnapshot::new())
        .await;
    assert!(matches!(result, Err(AnalysisError::RemoteUnavailable { .. })));
}

#[tokio::test]
async fn diagnostic_run_falls_back_when_server_fails() {
    let state = StubState::default();
    let router = Router::new()
        .route("/api/analyze", post(analyze_fails))
        .with_state(state.clone());
    let origin = spawn_stub(router).await;

    let platform = FakePlatform::healthy().with_battery(0.1, false);
    let service =
        DiagnosticService::new(&platform.into_capabilities(), Arc::new(client_for(&origin)));

    let report = service.run().await.unwrap();

    assert_eq!(report.analysis_source, AnalysisSource::Fallback);
    assert!(report.analysis.has_code(codes::BATT_LOW));
    assert_eq!(state.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn diagnostic_run_uses_remote_verdict() {
    let state = StubState::default();
    let router = Router::new()
        .route("/api/analyze", post(analyze_ok))
        .with_state(state.clone());
    let origin = spawn_stub(router).await;

    let platform = FakePlatform::healthy().with_battery(0.1, false);
    let service =
        DiagnosticService::new(&platform.into_capabilities(), Arc::new(client_for(&origin)));

    let report = service.run().await.unwrap();

    assert_eq!(report.analysis_source, AnalysisSource::Remote);
    assert!(!report.analysis.has_code(codes::BATT_LOW));
    assert_eq!(report.analysis.summary, "Remote analysis found 1 issue.");
}
