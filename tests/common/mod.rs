// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use flexai_api::config::Config;
use flexai_api::db::{FirestoreDb, MemoryDb};
use flexai_api::error::AppError;
use flexai_api::routes::create_router;
use flexai_api::services::{CompletionRequest, CompletionService};
use flexai_api::AppState;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Completion service that answers from a script and records every request.
pub struct FakeCompletion {
    reply: std::result::Result<Vec<String>, String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

#[allow(dead_code)]
impl FakeCompletion {
    pub fn replying(text: &str) -> Self {
        Self::with_reply(Ok(vec![text.to_string()]))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_reply(Err(message.to_string()))
    }

    pub fn with_reply(reply: std::result::Result<Vec<String>, String>) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for FakeCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<Vec<String>, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone().map_err(AppError::CompletionApi)
    }

    fn has_credentials(&self) -> bool {
        true
    }
}

/// Test app wired to an in-memory store and a fake completion service.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub store: Arc<MemoryDb>,
    pub completion: Arc<FakeCompletion>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> Response<Body> {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Create a test app with offline dependencies.
#[allow(dead_code)]
pub fn create_test_app(completion: FakeCompletion) -> TestApp {
    let store = Arc::new(MemoryDb::new());
    let completion = Arc::new(completion);

    let state = Arc::new(AppState {
        config: Config::test_default(),
        store: store.clone(),
        completion: completion.clone(),
    });

    TestApp {
        router: create_router(state.clone()),
        state,
        store,
        completion,
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Create a router whose store is an offline Firestore client.
#[allow(dead_code)]
pub fn create_offline_app(completion: FakeCompletion) -> (axum::Router, Arc<FakeCompletion>) {
    let completion = Arc::new(completion);

    let state = Arc::new(AppState {
        config: Config::test_default(),
        store: Arc::new(FirestoreDb::new_mock()),
        completion: completion.clone(),
    });

    (create_router(state), completion)
}
