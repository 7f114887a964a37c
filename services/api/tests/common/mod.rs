#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::{Path, State},
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::Value;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use tower::ServiceExt;

/// Sends a request to `app` and returns the status and JSON body.
pub async fn send(app: Router, method: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri("/api/getToken");
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let req = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// A Bland stand-in that answers every authorize call with a fixed reply.
pub struct TokenUpstream {
    pub status: StatusCode,
    pub body: String,
    pub calls: AtomicUsize,
    pub last_agent_id: std::sync::Mutex<Option<String>>,
}

impl TokenUpstream {
    pub fn new(status: StatusCode, body: &str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.to_string(),
            calls: AtomicUsize::new(0),
            last_agent_id: std::sync::Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

async fn authorize(
    State(upstream): State<Arc<TokenUpstream>>,
    Path(agent_id): Path<String>,
) -> Response {
    upstream.calls.fetch_add(1, Ordering::SeqCst);
    *upstream.last_agent_id.lock().unwrap() = Some(agent_id);
    (
        upstream.status,
        [(header::CONTENT_TYPE, "application/json")],
        upstream.body.clone(),
    )
        .into_response()
}

/// Serves `upstream` on an ephemeral port and returns its base URL.
pub async fn spawn_upstream(upstream: Arc<TokenUpstream>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/v1/agents/{agent_id}/authorize", post(authorize))
        .with_state(upstream);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
