//! Common test utilities for e2e tests
//!
//! Provides a test application backed by a JSON file store in a temporary
//! directory, plus request/response helpers.

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use tower::util::ServiceExt;

use todo_fetch_walkthrough::infrastructure::driven_adapters::config::{ClientConfig, ServerConfig};
use todo_fetch_walkthrough::infrastructure::driving_adapters::api_rest::{
    self, AppState, RunningServer,
};

/// Content type the walkthrough sends
pub const JSON_UTF8: &str = "application/json; charset=UTF-8";

/// Test application context
pub struct TestApp {
    pub router: Router,
    pub db_path: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    /// Create a new test application with a fresh, empty store
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("db.json");

        let state = AppState::from_config(server_config(db_path.clone()))
            .await
            .expect("Failed to open todo store");

        Self {
            router: api_rest::router(state),
            db_path,
            _dir: dir,
        }
    }

    /// Send a request with an optional JSON body through the router
    #[allow(dead_code)]
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, JSON_UTF8)
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Bind the router to an ephemeral port
    #[allow(dead_code)]
    pub async fn spawn(&self) -> RunningServer {
        self.spawn_on("127.0.0.1").await
    }

    /// Bind the router to an ephemeral port on `host`
    #[allow(dead_code)]
    pub async fn spawn_on(&self, host: &str) -> RunningServer {
        RunningServer::bind_ephemeral(host, self.router.clone())
            .await
            .expect("Failed to start test server")
    }

    /// Current contents of the JSON store file
    pub async fn stored(&self) -> StoreFile {
        let bytes = tokio::fs::read(&self.db_path).await.expect("Failed to read store");
        serde_json::from_slice(&bytes).expect("Store is not valid JSON")
    }
}

/// Server config pointing at `db_path`, with latency disabled
pub fn server_config(db_path: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        db_path,
        max_latency_ms: 0,
    }
}

/// Client config for a server at `base_url`
#[allow(dead_code)]
pub fn client_config(base_url: String) -> ClientConfig {
    ClientConfig {
        base_url,
        timeout_secs: 5,
        random_todo_count: 7,
    }
}

/// Read a whole response body as JSON
#[allow(dead_code)]
pub async fn json_body<T: serde::de::DeserializeOwned>(response: Response<Body>) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Todo response structure for deserialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: u64,
    pub todo_text: String,
    pub completed: bool,
}

/// On-disk store layout
#[derive(Debug, Deserialize)]
pub struct StoreFile {
    pub todos: Vec<TodoResponse>,
}

/// Error response structure for deserialization
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub request_id: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<Vec<FieldError>>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
