//! [`SubmissionStore`] and [`SubscriberStore`] backed by Postgres.

use arena_core::error::CoreError;
use arena_core::newsletter::{SubscribeAction, SubscribeOutcome, Subscriber};
use arena_core::store::{SubmissionStore, SubscriberStore};
use arena_core::submission::{
    NewSubmission, StoredSubmission, SubmissionKind, SubmissionReceipt,
};
use async_trait::async_trait;

use crate::repositories::{SubmissionRepo, SubscriberRepo};
use crate::DbPool;

/// Log a database failure and hide its details behind [`CoreError::Internal`].
fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |e| {
        tracing::error!(error = %e, "{context} failed");
        CoreError::Internal(format!("Database error during {context}"))
    }
}

#[derive(Clone)]
pub struct PgSubmissionStore {
    pool: DbPool,
}

impl PgSubmissionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, submission: NewSubmission) -> Result<SubmissionReceipt, CoreError> {
        let row = SubmissionRepo::create(
            &self.pool,
            submission.kind().as_str(),
            submission.email(),
            &submission.payload_json(),
        )
        .await
        .map_err(db_error("submission insert"))?;

        let stored = StoredSubmission::try_from(row)?;
        tracing::info!(
            submission_id = stored.id,
            kind = stored.kind.as_str(),
            "Submission stored",
        );
        Ok(SubmissionReceipt::from(&stored))
    }

    async fn count(&self, kind: SubmissionKind) -> Result<i64, CoreError> {
        SubmissionRepo::count_by_kind(&self.pool, kind.as_str())
            .await
            .map_err(db_error("submission count"))
    }

    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(db_error("health check"))
    }
}

#[derive(Clone)]
pub struct PgSubscriberStore {
    pool: DbPool,
}

impl PgSubscriberStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriberStore for PgSubscriberStore {
    async fn find(&self, email: &str) -> Result<Option<Subscriber>, CoreError> {
        SubscriberRepo::find_by_email(&self.pool, email)
            .await
            .map_err(db_error("subscriber lookup"))?
            .map(Subscriber::try_from)
            .transpose()
    }

    async fn subscribe(
        &self,
        email: &str,
        source: Option<String>,
    ) -> Result<SubscribeOutcome, CoreError> {
        let source = source.as_deref();

        if let Some(row) = SubscriberRepo::insert_if_absent(&self.pool, email, source)
            .await
            .map_err(db_error("subscriber insert"))?
        {
            return Ok(SubscribeOutcome {
                action: SubscribeAction::Created,
                subscriber: Subscriber::try_from(row)?,
            });
        }

        if let Some(row) = SubscriberRepo::reactivate(&self.pool, email, source)
            .await
            .map_err(db_error("subscriber reactivate"))?
        {
            return Ok(SubscribeOutcome {
                action: SubscribeAction::Reactivated,
                subscriber: Subscriber::try_from(row)?,
            });
        }

        // Neither inserted nor reactivated: the row exists and is active.
        let subscriber = self.find(email).await?.ok_or_else(|| {
            CoreError::Internal(format!("subscriber {email} vanished during subscribe"))
        })?;
        Ok(SubscribeOutcome {
            action: SubscribeAction::AlreadyActive,
            subscriber,
        })
    }

    async fn unsubscribe(&self, email: &str) -> Result<Option<Subscriber>, CoreError> {
        SubscriberRepo::unsubscribe(&self.pool, email)
            .await
            .map_err(db_error("subscriber unsubscribe"))?
            .map(Subscriber::try_from)
            .transpose()
    }
}
