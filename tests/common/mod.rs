#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{DateTime, Utc};
use route_gateway::AppState;
use route_gateway::adapters::backend_client::HttpBackendClient;
use route_gateway::adapters::http::{RECORD_ID_HEADER, router};
use route_gateway::domain::audit::AuditRecord;
use route_gateway::domain::backend::{BackendReply, OptimizationBackend};
use route_gateway::domain::error::BackendError;
use route_gateway::domain::id::RecordId;
use route_gateway::infra::sqlite::audit_repo::AuditStore;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

/// Opens a fresh store in its own temp directory. Keep the `TempDir` alive
/// for as long as the store is used.
pub async fn setup_store() -> (AuditStore, TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store = AuditStore::connect(&database_url(&dir))
        .await
        .expect("failed to open audit store");
    (store, dir)
}

pub fn database_url(dir: &TempDir) -> String {
    format!("sqlite://{}", dir.path().join("audit.db").display())
}

/// The bus-routing request the frontend sends.
pub fn route_request(num_buses: u32) -> serde_json::Value {
    serde_json::json!({
        "num_buses": num_buses,
        "bus_capacity": 50,
        "stops": [
            {"name": "Main Street", "lat": 40.7128, "lon": -74.0060, "passengers": 10},
            {"name": "Harbor", "lat": 40.7061, "lon": -74.0087, "passengers": 15},
        ],
    })
}

pub fn route_response(num_buses: u32, total_distance_km: f64) -> serde_json::Value {
    serde_json::json!({
        "num_buses": num_buses,
        "total_distance_km": total_distance_km,
        "routes": [],
    })
}

pub fn make_record(payload: serde_json::Value, created_at: DateTime<Utc>) -> AuditRecord {
    let response = serde_json::json!({"echo": payload.clone()});
    AuditRecord::succeeded(RecordId::generate(), created_at, payload, response)
}

// ── Stub backend ───────────────────────────────────────────────────────────

type Responder = dyn Fn(&serde_json::Value) -> Result<BackendReply, BackendError> + Send + Sync;

/// In-process backend with a configurable answer and artificial latency.
pub struct StubBackend {
    respond: Box<Responder>,
    delay: Duration,
    calls: AtomicUsize,
}

impl StubBackend {
    /// Replies 200 with `{"echo": <payload>}`.
    pub fn echo() -> Self {
        Self::with(|payload| {
            Ok(BackendReply {
                status: 200,
                body: serde_json::json!({"echo": payload}),
            })
        })
    }

    pub fn with(
        respond: impl Fn(&serde_json::Value) -> Result<BackendReply, BackendError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OptimizationBackend for StubBackend {
    fn submit<'a>(
        &'a self,
        payload: &'a serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<BackendReply, BackendError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            (self.respond)(payload)
        })
    }
}

// ── HTTP helpers ───────────────────────────────────────────────────────────

pub fn app_with_backend(store: &AuditStore, backend: Arc<dyn OptimizationBackend>) -> Router {
    router(AppState {
        store: store.clone(),
        backend,
    })
}

pub fn app_with_backend_url(store: &AuditStore, backend_url: &str) -> Router {
    let client = HttpBackendClient::new(backend_url, Duration::from_secs(5))
        .expect("failed to build backend client");
    app_with_backend(store, Arc::new(client))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub record_id: Option<String>,
    pub body: serde_json::Value,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let record_id = response
        .headers()
        .get(RECORD_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is not JSON")
    };
    TestResponse {
        status,
        record_id,
        body,
    }
}

pub async fn post_optimize(app: &Router, payload: &serde_json::Value) -> TestResponse {
    let request = Request::post("/optimize")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("failed to build request");
    send(app, request).await
}

pub async fn get(app: &Router, path: &str) -> TestResponse {
    let request = Request::get(path)
        .body(Body::empty())
        .expect("failed to build request");
    send(app, request).await
}
