//! Persistence seams for submissions and newsletter subscribers.
//!
//! Handlers depend on these traits only; the API wires either the Postgres
//! implementations from `arena-db` or the in-memory ones below.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::newsletter::{SubscribeAction, SubscribeOutcome, Subscriber};
use crate::submission::{NewSubmission, StoredSubmission, SubmissionKind, SubmissionReceipt};

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist a validated submission.
    async fn insert(&self, submission: NewSubmission) -> Result<SubmissionReceipt, CoreError>;

    /// Number of stored submissions of `kind`.
    async fn count(&self, kind: SubmissionKind) -> Result<i64, CoreError>;

    /// Cheap reachability check for health reporting.
    async fn ping(&self) -> Result<(), CoreError>;
}

#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Look up a subscriber by normalised email.
    async fn find(&self, email: &str) -> Result<Option<Subscriber>, CoreError>;

    /// Create, reactivate, or leave an active subscription untouched.
    async fn subscribe(
        &self,
        email: &str,
        source: Option<String>,
    ) -> Result<SubscribeOutcome, CoreError>;

    /// Mark a subscriber as unsubscribed. Returns `None` for unknown emails.
    async fn unsubscribe(&self, email: &str) -> Result<Option<Subscriber>, CoreError>;
}

// ---------------------------------------------------------------------------
// In-memory implementations
// ---------------------------------------------------------------------------

/// Process-local submission store, used in tests and database-less runs.
#[derive(Default)]
pub struct InMemorySubmissionStore {
    rows: RwLock<Vec<StoredSubmission>>,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<StoredSubmission> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn insert(&self, submission: NewSubmission) -> Result<SubmissionReceipt, CoreError> {
        let mut rows = self.rows.write().await;
        let stored = StoredSubmission {
            id: rows.len() as i64 + 1,
            kind: submission.kind(),
            email: submission.email().to_string(),
            payload: submission.payload_json(),
            created_at: Utc::now(),
        };
        let receipt = SubmissionReceipt::from(&stored);
        rows.push(stored);
        Ok(receipt)
    }

    async fn count(&self, kind: SubmissionKind) -> Result<i64, CoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|row| row.kind == kind).count() as i64)
    }

    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

/// Process-local subscriber store keyed by normalised email.
#[derive(Default)]
pub struct InMemorySubscriberStore {
    subscribers: RwLock<HashMap<String, Subscriber>>,
}

impl InMemorySubscriberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriberStore for InMemorySubscriberStore {
    async fn find(&self, email: &str) -> Result<Option<Subscriber>, CoreError> {
        Ok(self.subscribers.read().await.get(email).cloned())
    }

    async fn subscribe(
        &self,
        email: &str,
        source: Option<String>,
    ) -> Result<SubscribeOutcome, CoreError> {
        let now = Utc::now();
        let mut subscribers = self.subscribers.write().await;
        let outcome = match subscribers.get_mut(email) {
            Some(existing) => {
                let action = existing.resubscribe(source, now);
                SubscribeOutcome {
                    action,
                    subscriber: existing.clone(),
                }
            }
            None => {
                let subscriber = Subscriber::new_active(email.to_string(), source, now);
                subscribers.insert(email.to_string(), subscriber.clone());
                SubscribeOutcome {
                    action: SubscribeAction::Created,
                    subscriber,
                }
            }
        };
        Ok(outcome)
    }

    async fn unsubscribe(&self, email: &str) -> Result<Option<Subscriber>, CoreError> {
        let mut subscribers = self.subscribers.write().await;
        Ok(subscribers.get_mut(email).map(|subscriber| {
            subscriber.unsubscribe(Utc::now());
            subscriber.clone()
        }))
    }
}
