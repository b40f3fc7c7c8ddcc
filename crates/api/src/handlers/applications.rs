//! Handlers for founder applications.

use arena_core::submission::{NewSubmission, SubmissionKind};
use arena_core::validation::{self, FormData};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::handlers::reject_submission;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /applications
// ---------------------------------------------------------------------------

/// Validate and store a founder application.
///
/// Returns 201 with a receipt, or 400 with every validation error.
pub async fn submit_application(
    State(state): State<AppState>,
    Json(form): Json<FormData>,
) -> AppResult<impl IntoResponse> {
    let submission = NewSubmission::founder(form)
        .map_err(|result| reject_submission(SubmissionKind::Founder, result))?;

    let receipt = state.submissions.insert(submission).await?;

    tracing::info!(
        kind = receipt.kind.as_str(),
        submission_id = receipt.id,
        "Submission accepted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
}

// ---------------------------------------------------------------------------
// POST /applications/validate
// ---------------------------------------------------------------------------

/// Dry-run founder validation. Always 200; nothing is stored.
pub async fn validate_application(Json(form): Json<FormData>) -> impl IntoResponse {
    Json(DataResponse {
        data: validation::validate_form_data(&form),
    })
}
