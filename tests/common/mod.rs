//! In-process mock of the OnlysaidKB HTTP API.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use onlysaidkb_mcp::KbConfig;
use serde_json::{Value, json};

/// A request the mock received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub body: Value,
    pub content_type: Option<String>,
    pub accept: Option<String>,
}

/// Shared log of received requests.
#[derive(Debug, Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<Recorded>>>);

impl RequestLog {
    fn push(&self, path: &str, headers: &HeaderMap, body: Value) {
        let header_str = |name| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let entry = Recorded {
            path: path.to_string(),
            body,
            content_type: header_str(header::CONTENT_TYPE),
            accept: header_str(header::ACCEPT),
        };
        self.0.lock().unwrap().push(entry);
    }

    pub fn all(&self) -> Vec<Recorded> {
        self.0.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.all().pop().unwrap()
    }
}

pub fn retrieve_response() -> Value {
    json!({
        "status": "ok",
        "results": [{"source": "doc1", "score": 0.9, "text": "System configuration lives in settings.yaml."}]
    })
}

pub fn query_response() -> Value {
    json!({
        "status": "completed",
        "answer": "Configuration is stored in settings.yaml.",
        "results": [{"source": "doc1", "score": 0.9}]
    })
}

pub fn workspace_view() -> Value {
    json!({
        "dataSources": [
            {"id": "89cbb96a", "name": "Handbook", "status": "ready", "count": 12}
        ],
        "folderStructures": {"89cbb96a": []},
        "documents": []
    })
}

async fn query(
    State(log): State<RequestLog>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    log.push("/query", &headers, body);
    Json(query_response())
}

async fn retrieve(
    State(log): State<RequestLog>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    log.push("/retrieve", &headers, body);
    Json(retrieve_response())
}

async fn view(
    State(log): State<RequestLog>,
    headers: HeaderMap,
    Path(workspace_id): Path<String>,
) -> Result<Json<Value>, (StatusCode, &'static str)> {
    log.push(&format!("/view/{workspace_id}"), &headers, Value::Null);
    if workspace_id == "missing" {
        return Err((StatusCode::NOT_FOUND, "not found"));
    }
    Ok(Json(workspace_view()))
}

async fn kb_status(Path((_workspace_id, kb_id)): Path<(String, String)>) -> Json<Value> {
    Json(json!({"id": kb_id, "status": "ready", "message": "Indexed 12 documents"}))
}

async fn health() -> &'static str {
    "ok"
}

/// Router answering every endpoint successfully.
pub fn healthy_router(log: RequestLog) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/query", post(query))
        .route("/retrieve", post(retrieve))
        .route("/view/{workspace_id}", get(view))
        .route("/kb_status/{workspace_id}/{kb_id}", get(kb_status))
        .with_state(log)
}

/// Router answering every endpoint with the given status and body.
pub fn failing_router(status: StatusCode, body: &'static str) -> Router {
    let reply = move || async move { (status, body) };
    Router::new()
        .route("/query", post(reply))
        .route("/retrieve", post(reply))
        .route("/view/{workspace_id}", get(reply))
        .route("/kb_status/{workspace_id}/{kb_id}", get(reply))
}

/// Router answering every endpoint with a raw 200 body.
pub fn raw_router(body: &'static str) -> Router {
    failing_router(StatusCode::OK, body)
}

/// Router that answers only after `delay`.
pub fn slow_router(delay: Duration) -> Router {
    let reply = move || async move {
        tokio::time::sleep(delay).await;
        Json(retrieve_response())
    };
    Router::new()
        .route("/query", post(reply))
        .route("/retrieve", post(reply))
}

/// Serves `router` on an ephemeral localhost port and returns its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Returns a base URL nothing is listening on.
pub fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

pub fn config(base_url: &str) -> Arc<KbConfig> {
    Arc::new(KbConfig::builder().base_url(base_url).build().unwrap())
}

pub fn config_with_timeout(base_url: &str, timeout: Duration) -> Arc<KbConfig> {
    Arc::new(
        KbConfig::builder()
            .base_url(base_url)
            .timeout(timeout)
            .build()
            .unwrap(),
    )
}
