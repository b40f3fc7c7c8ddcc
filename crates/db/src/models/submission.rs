//! Row model for the `submissions` table.

use arena_core::error::CoreError;
use arena_core::submission::{StoredSubmission, SubmissionKind};
use arena_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubmissionRow {
    pub id: DbId,
    pub kind: String,
    pub email: String,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

impl TryFrom<SubmissionRow> for StoredSubmission {
    type Error = CoreError;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        let kind = SubmissionKind::parse(&row.kind).ok_or_else(|| {
            CoreError::Internal(format!(
                "submission {} has unknown kind '{}'",
                row.id, row.kind
            ))
        })?;
        Ok(StoredSubmission {
            id: row.id,
            kind,
            email: row.email,
            payload: row.payload,
            created_at: row.created_at,
        })
    }
}
