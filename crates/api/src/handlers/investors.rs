//! Handlers for investor applications, including real-time field checks.

use arena_core::submission::{NewSubmission, SubmissionKind};
use arena_core::validation::FormData;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::reject_submission;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /investors/validate-field`.
#[derive(Debug, Deserialize)]
pub struct ValidateFieldRequest {
    /// Name of the field being edited, e.g. `"checkSize"`.
    pub field: String,
    /// New value; absent means `null`.
    #[serde(default)]
    pub value: Value,
    /// Current form snapshot.
    #[serde(default)]
    pub form: FormData,
}

// ---------------------------------------------------------------------------
// POST /investors
// ---------------------------------------------------------------------------

/// Validate and store an investor application.
///
/// Returns 201 with a receipt, or 400 with every validation error.
pub async fn submit_investor(
    State(state): State<AppState>,
    Json(form): Json<FormData>,
) -> AppResult<impl IntoResponse> {
    let submission = NewSubmission::investor(form, &state.investor_validator)
        .map_err(|result| reject_submission(SubmissionKind::Investor, result))?;

    let receipt = state.submissions.insert(submission).await?;

    tracing::info!(
        kind = receipt.kind.as_str(),
        submission_id = receipt.id,
        "Submission accepted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
}

// ---------------------------------------------------------------------------
// POST /investors/validate
// ---------------------------------------------------------------------------

/// Dry-run investor validation. Always 200; nothing is stored.
pub async fn validate_investor(
    State(state): State<AppState>,
    Json(form): Json<FormData>,
) -> impl IntoResponse {
    Json(DataResponse {
        data: state.investor_validator.validate(&form),
    })
}

// ---------------------------------------------------------------------------
// POST /investors/validate-field
// ---------------------------------------------------------------------------

/// Validate a single edit against the current form snapshot.
pub async fn validate_investor_field(
    State(state): State<AppState>,
    Json(input): Json<ValidateFieldRequest>,
) -> AppResult<impl IntoResponse> {
    let field = input.field.trim();
    if field.is_empty() {
        return Err(AppError::BadRequest("field must not be empty".into()));
    }

    let result = state
        .investor_validator
        .validate_field(field, input.value, &input.form);

    Ok(Json(DataResponse { data: result }))
}
