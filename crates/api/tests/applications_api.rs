//! HTTP-level integration tests for the `/applications` endpoints.

mod common;

use arena_core::store::SubmissionStore;
use arena_core::submission::SubmissionKind;
use axum::http::StatusCode;
use common::{body_json, build_test_app, build_test_app_with_config, codes_for, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: POST /api/v1/applications stores a valid founder application
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_application_returns_201_with_receipt() {
    let app = build_test_app_with_config(common::test_config());

    let response = post_json(
        app.router.clone(),
        "/api/v1/applications",
        common::valid_founder(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], 1);
    assert_eq!(json["data"]["kind"], "founder");
    assert!(json["data"]["received_at"].is_string());

    let stored = app.submissions.all().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].email, "ada@analytical.io");
    assert_eq!(stored[0].payload["companyName"], "Analytical Engines");
}

// ---------------------------------------------------------------------------
// Test: invalid founder application returns 400 and stores nothing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_application_returns_400_with_all_errors() {
    let app = build_test_app_with_config(common::test_config());

    let mut form = common::valid_founder();
    form["email"] = json!("invalid-email");
    form["stage"] = json!("ipo");
    form["agreeToTerms"] = json!(false);

    let response = post_json(app.router.clone(), "/api/v1/applications", form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["errors"].as_array().unwrap().len(), 3);
    assert_eq!(codes_for(&json["errors"], "email"), vec!["INVALID_FORMAT"]);
    assert_eq!(codes_for(&json["errors"], "stage"), vec!["INVALID_STAGE"]);
    assert_eq!(codes_for(&json["errors"], "agreeToTerms"), vec!["REQUIRED"]);

    assert_eq!(
        app.submissions.count(SubmissionKind::Founder).await.unwrap(),
        0
    );
}

// ---------------------------------------------------------------------------
// Test: empty form reports every required founder field
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_application_reports_required_fields() {
    let response = post_json(build_test_app(), "/api/v1/applications", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    for field in [
        "fullName",
        "email",
        "companyName",
        "stage",
        "description",
        "agreeToTerms",
    ] {
        assert_eq!(codes_for(&json["errors"], field), vec!["REQUIRED"], "{field}");
    }
    assert!(codes_for(&json["errors"], "website").is_empty());
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/applications/validate is a dry run
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validate_endpoint_returns_result_without_storing() {
    let app = build_test_app_with_config(common::test_config());

    let response = post_json(
        app.router.clone(),
        "/api/v1/applications/validate",
        common::valid_founder(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["isValid"], true);
    assert_eq!(json["data"]["errors"], json!([]));

    let mut form = common::valid_founder();
    form["fullName"] = json!("John<script>");
    let response = post_json(app.router.clone(), "/api/v1/applications/validate", form).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["isValid"], false);
    assert_eq!(
        codes_for(&json["data"]["errors"], "fullName"),
        vec!["INVALID_FORMAT"]
    );

    assert!(app.submissions.all().await.is_empty());
}

// ---------------------------------------------------------------------------
// Test: non-object body is rejected by the extractor
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_object_body_is_rejected() {
    let response = post_json(build_test_app(), "/api/v1/applications", json!([1, 2])).await;
    assert!(response.status().is_client_error());
}
