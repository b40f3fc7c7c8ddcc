//! HTTP-level integration tests for the `/newsletter` endpoints.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arena_core::error::CoreError;
use arena_core::newsletter::{SubscribeOutcome, Subscriber, MAX_SOURCE_LEN};
use arena_core::store::{InMemorySubscriberStore, SubscriberStore};
use async_trait::async_trait;
use axum::http::StatusCode;
use common::{
    body_json, build_test_app, build_test_app_with_config, build_test_app_with_subscribers, get,
    post_json,
};
use serde_json::json;

/// Subscriber store whose writes can be made to apply and then report a
/// failure, like a commit whose acknowledgement is lost.
#[derive(Default)]
struct UnacknowledgedWrites {
    inner: InMemorySubscriberStore,
    fail_after_write: AtomicBool,
}

impl UnacknowledgedWrites {
    fn write_result<T>(&self, value: T) -> Result<T, CoreError> {
        if self.fail_after_write.load(Ordering::SeqCst) {
            return Err(CoreError::Internal("write acknowledgement lost".into()));
        }
        Ok(value)
    }
}

#[async_trait]
impl SubscriberStore for UnacknowledgedWrites {
    async fn find(&self, email: &str) -> Result<Option<Subscriber>, CoreError> {
        self.inner.find(email).await
    }

    async fn subscribe(
        &self,
        email: &str,
        source: Option<String>,
    ) -> Result<SubscribeOutcome, CoreError> {
        let outcome = self.inner.subscribe(email, source).await?;
        self.write_result(outcome)
    }

    async fn unsubscribe(&self, email: &str) -> Result<Option<Subscriber>, CoreError> {
        let subscriber = self.inner.unsubscribe(email).await?;
        self.write_result(subscriber)
    }
}

// ---------------------------------------------------------------------------
// Test: subscribe creates, then repeats are 200 with status active
// ---------------------------------------------------------------------------

#[tokio::test]
async fn subscribe_twice_is_idempotent() {
    let app = build_test_app();

    let response = post_json(
        app.clone(),
        "/api/v1/newsletter/subscribe",
        json!({ "email": "  Reader@Example.com ", "source": "footer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["action"], "created");
    assert_eq!(json["data"]["subscriber"]["email"], "reader@example.com");
    assert_eq!(json["data"]["subscriber"]["source"], "footer");

    let response = post_json(
        app,
        "/api/v1/newsletter/subscribe",
        json!({ "email": "reader@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["action"], "already_active");
    assert_eq!(json["data"]["subscriber"]["status"], "active");
}

// ---------------------------------------------------------------------------
// Test: unsubscribe then subscribe reactivates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unsubscribe_then_subscribe_reactivates() {
    let app = build_test_app();
    let body = json!({ "email": "reader@example.com" });

    post_json(app.clone(), "/api/v1/newsletter/subscribe", body.clone()).await;

    let response = post_json(app.clone(), "/api/v1/newsletter/unsubscribe", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "unsubscribed");
    assert!(json["data"]["unsubscribed_at"].is_string());

    // The cached lookup reflects the unsubscribe.
    let response = get(app.clone(), "/api/v1/newsletter/subscribers/reader@example.com").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "unsubscribed");

    let response = post_json(app.clone(), "/api/v1/newsletter/subscribe", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["action"], "reactivated");
    assert_eq!(json["data"]["subscriber"]["status"], "active");
    assert!(json["data"]["subscriber"]["unsubscribed_at"].is_null());

    let response = get(app, "/api/v1/newsletter/subscribers/reader@example.com").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "active");
}

// ---------------------------------------------------------------------------
// Test: unknown emails are 404 on unsubscribe and lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_email_returns_404() {
    let app = build_test_app();

    let response = post_json(
        app.clone(),
        "/api/v1/newsletter/unsubscribe",
        json!({ "email": "nobody@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let response = get(app, "/api/v1/newsletter/subscribers/nobody@example.com").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: lookup reads through to the store on a cache miss
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lookup_reads_through_on_cache_miss() {
    let app = build_test_app_with_config(common::test_config());

    // Written directly to the store, so the cache has never seen it.
    app.subscribers
        .subscribe("direct@example.com", None)
        .await
        .unwrap();

    let response = get(
        app.router,
        "/api/v1/newsletter/subscribers/Direct@Example.com",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "direct@example.com");
    assert_eq!(json["data"]["status"], "active");
}

// ---------------------------------------------------------------------------
// Test: invalid input is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_email_is_rejected() {
    let response = post_json(
        build_test_app(),
        "/api/v1/newsletter/subscribe",
        json!({ "email": "invalid-email" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["errors"][0]["field"], "email");
    assert_eq!(json["errors"][0]["code"], "INVALID_FORMAT");
}

#[tokio::test]
async fn overlong_source_is_rejected() {
    let response = post_json(
        build_test_app(),
        "/api/v1/newsletter/subscribe",
        json!({ "email": "reader@example.com", "source": "x".repeat(MAX_SOURCE_LEN + 1) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Test: a failed write drops the cached status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_unsubscribe_drops_cached_status() {
    let store = Arc::new(UnacknowledgedWrites::default());
    let app = build_test_app_with_subscribers(store.clone());
    let body = json!({ "email": "reader@example.com" });

    let response = post_json(app.clone(), "/api/v1/newsletter/subscribe", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    store.fail_after_write.store(true, Ordering::SeqCst);
    let response = post_json(app.clone(), "/api/v1/newsletter/unsubscribe", body).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // The store applied the unsubscribe; a stale cached "active" must not win.
    let response = get(app, "/api/v1/newsletter/subscribers/reader@example.com").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "unsubscribed");
}
