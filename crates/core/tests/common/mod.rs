//! In-process stand-in for the Bland API, bound to an ephemeral port.

#![allow(dead_code)]

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

#[derive(Clone, Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Recorded {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

pub struct MockUpstream {
    pub agent_reply: Reply,
    pub token_reply: Reply,
    pub conversation_reply: Reply,
    pub delay: Duration,
    pub agent_calls: AtomicUsize,
    pub token_calls: AtomicUsize,
    pub conversation_calls: AtomicUsize,
    pub requests: Mutex<Vec<Recorded>>,
}

impl Default for MockUpstream {
    fn default() -> Self {
        Self {
            agent_reply: Reply::json(
                StatusCode::OK,
                json!({ "status": "success", "agent": { "agent_id": "ag_123", "voice": "maya" } }),
            ),
            token_reply: Reply::json(StatusCode::OK, json!({ "token": "tok_xyz" })),
            conversation_reply: Reply::json(
                StatusCode::OK,
                json!({ "conversation_id": "conv_1", "status": "started" }),
            ),
            delay: Duration::ZERO,
            agent_calls: AtomicUsize::new(0),
            token_calls: AtomicUsize::new(0),
            conversation_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl MockUpstream {
    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.agent_calls.load(Ordering::SeqCst),
            self.token_calls.load(Ordering::SeqCst),
            self.conversation_calls.load(Ordering::SeqCst),
        )
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    async fn record(&self, path: String, headers: &HeaderMap, body: &str) {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = serde_json::from_str(body).unwrap_or(Value::Null);
        self.requests.lock().unwrap().push(Recorded {
            path,
            authorization,
            body,
        });
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

fn respond(reply: &Reply) -> Response {
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body.clone(),
    )
        .into_response()
}

async fn create_agent(
    State(mock): State<Arc<MockUpstream>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    mock.agent_calls.fetch_add(1, Ordering::SeqCst);
    mock.record("/v1/agents".to_string(), &headers, &body).await;
    respond(&mock.agent_reply)
}

async fn authorize(
    State(mock): State<Arc<MockUpstream>>,
    Path(agent_id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Response {
    mock.token_calls.fetch_add(1, Ordering::SeqCst);
    mock.record(format!("/v1/agents/{agent_id}/authorize"), &headers, &body)
        .await;
    respond(&mock.token_reply)
}

async fn conversations(
    State(mock): State<Arc<MockUpstream>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    mock.conversation_calls.fetch_add(1, Ordering::SeqCst);
    mock.record("/v1/conversations".to_string(), &headers, &body)
        .await;
    respond(&mock.conversation_reply)
}

/// Serves `mock` on `127.0.0.1:0` and returns its base URL.
pub async fn spawn_upstream(mock: Arc<MockUpstream>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/v1/agents", post(create_agent))
        .route("/v1/agents/{agent_id}/authorize", post(authorize))
        .route("/v1/conversations", post(conversations))
        .with_state(mock);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
