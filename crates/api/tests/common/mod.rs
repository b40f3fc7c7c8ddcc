#![allow(dead_code)]

use std::sync::Arc;

use arena_api::config::ServerConfig;
use arena_api::router::build_app_router;
use arena_api::state::AppState;
use arena_core::store::{InMemorySubmissionStore, InMemorySubscriberStore, SubscriberStore};
use arena_core::validation::cross_field::CheckSizePolicy;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        subscriber_cache_ttl_secs: 300,
        subscriber_cache_capacity: 100,
        check_size_policy: CheckSizePolicy::default(),
        database_url: None,
    }
}

/// The router plus handles on its in-memory stores, for tests that need to
/// inspect what was persisted.
pub struct TestApp {
    pub router: Router,
    pub submissions: Arc<InMemorySubmissionStore>,
    pub subscribers: Arc<InMemorySubscriberStore>,
}

/// Build the full application with in-memory stores and the given config.
pub fn build_test_app_with_config(config: ServerConfig) -> TestApp {
    let submissions = Arc::new(InMemorySubmissionStore::new());
    let subscribers = Arc::new(InMemorySubscriberStore::new());

    let state = AppState::new(config.clone(), submissions.clone(), subscribers.clone());
    let router = build_app_router(state, &config);

    TestApp {
        router,
        submissions,
        subscribers,
    }
}

/// Build the application around a caller-supplied subscriber store.
pub fn build_test_app_with_subscribers(subscribers: Arc<dyn SubscriberStore>) -> Router {
    let config = test_config();
    let state = AppState::new(
        config.clone(),
        Arc::new(InMemorySubmissionStore::new()),
        subscribers,
    );
    build_app_router(state, &config)
}

/// Build the full application router with all middleware layers.
///
/// Goes through the same `build_app_router` as `main.rs`, so tests exercise
/// the production middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery).
pub fn build_test_app() -> Router {
    build_test_app_with_config(test_config()).router
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Form fixtures
// ---------------------------------------------------------------------------

pub fn valid_founder() -> Value {
    json!({
        "fullName": "Ada Lovelace",
        "email": "Ada@Analytical.io",
        "companyName": "Analytical Engines",
        "website": "https://analytical.io",
        "stage": "seed",
        "description": "General-purpose computing machinery for everyone.",
        "agreeToTerms": true,
    })
}

pub fn valid_investor() -> Value {
    json!({
        "name": "José García",
        "email": "jose@example.com",
        "investorType": "individual",
        "accreditationStatus": "yes",
        "checkSize": "50k-100k",
        "country": "US",
        "state": "CA",
        "areasOfInterest": ["ai-ml", "fintech"],
        "mode": "506b",
        "agreeToTerms": true,
    })
}

/// Error codes reported against `field` in a `{ errors: [...] }` payload.
pub fn codes_for(errors: &Value, field: &str) -> Vec<String> {
    errors
        .as_array()
        .expect("errors should be an array")
        .iter()
        .filter(|e| e["field"] == field)
        .map(|e| e["code"].as_str().unwrap_or_default().to_string())
        .collect()
}
