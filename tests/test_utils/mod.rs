//! Test utilities for integration tests
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tempfile::TempDir;
use tower::util::ServiceExt;

use tutor::api::{AppState, app};
use tutor::chat::HistoryStore;
use tutor::core::AppConfig;

pub struct TestApp {
    pub app: Router,
    pub state: Arc<RwLock<AppState>>,
    pub history_path: PathBuf,
    // Keeps the backing directory alive for the test's duration
    _dir: TempDir,
}

/// Creates a test application with a tempfile-backed history store and
/// the completion endpoint pointed at `llm_hostname` (a mockito server
/// in practice).
pub fn test_app(llm_hostname: &str) -> TestApp {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let history_path = dir.path().join("chat_history.json");

    let config = AppConfig {
        history_path: history_path.display().to_string(),
        openai_api_hostname: llm_hostname.to_string(),
        openai_api_key: String::from("test-api-key"),
        openai_model: String::from("gpt-4.1-mini"),
        system_message: String::from("You are a helpful assistant."),
    };
    let store = HistoryStore::new(&history_path);
    let state = Arc::new(RwLock::new(AppState::new(store, config)));

    TestApp {
        app: app(Arc::clone(&state)),
        state,
        history_path,
        _dir: dir,
    }
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Log in through the API the way a client would.
pub async fn login(app: &Router, username: &str, role: &str) -> StatusCode {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/session/login")
                .method("POST")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "username": username,
                        "role": role
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    response.status()
}
