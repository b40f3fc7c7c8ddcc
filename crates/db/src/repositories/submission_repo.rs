//! Repository for the `submissions` table.

use sqlx::PgPool;

use crate::models::submission::SubmissionRow;

/// Column list for `submissions` queries.
const COLUMNS: &str = "id, kind, email, payload, created_at";

/// Provides insert and count operations for submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a submission, returning the full row.
    pub async fn create(
        pool: &PgPool,
        kind: &str,
        email: &str,
        payload: &serde_json::Value,
    ) -> Result<SubmissionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO submissions (kind, email, payload) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SubmissionRow>(&query)
            .bind(kind)
            .bind(email)
            .bind(payload)
            .fetch_one(pool)
            .await
    }

    /// Count submissions of the given kind.
    pub async fn count_by_kind(pool: &PgPool, kind: &str) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM submissions WHERE kind = $1")
            .bind(kind)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
