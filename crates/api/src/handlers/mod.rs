pub mod applications;
pub mod investors;
pub mod newsletter;

use arena_core::submission::SubmissionKind;
use arena_core::validation::ValidationResult;

use crate::error::AppError;

/// Log a rejected submission and turn its validation result into a 400.
pub(crate) fn reject_submission(kind: SubmissionKind, result: ValidationResult) -> AppError {
    tracing::info!(
        kind = kind.as_str(),
        error_count = result.errors().len(),
        "Submission rejected",
    );
    AppError::InvalidSubmission(result.into_errors())
}
