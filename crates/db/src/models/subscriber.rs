//! Row model for the `newsletter_subscribers` table.

use arena_core::error::CoreError;
use arena_core::newsletter::{Subscriber, SubscriptionStatus};
use arena_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `newsletter_subscribers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubscriberRow {
    pub email: String,
    pub status: String,
    pub source: Option<String>,
    pub subscribed_at: Timestamp,
    pub unsubscribed_at: Option<Timestamp>,
}

impl TryFrom<SubscriberRow> for Subscriber {
    type Error = CoreError;

    fn try_from(row: SubscriberRow) -> Result<Self, Self::Error> {
        let status = SubscriptionStatus::parse(&row.status).ok_or_else(|| {
            CoreError::Internal(format!(
                "subscriber {} has unknown status '{}'",
                row.email, row.status
            ))
        })?;
        Ok(Subscriber {
            email: row.email,
            status,
            source: row.source,
            subscribed_at: row.subscribed_at,
            unsubscribed_at: row.unsubscribed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn converts_unsubscribed_row() {
        let now = Utc::now();
        let subscriber = Subscriber::try_from(SubscriberRow {
            email: "a@b.co".into(),
            status: "unsubscribed".into(),
            source: Some("footer".into()),
            subscribed_at: now,
            unsubscribed_at: Some(now),
        })
        .unwrap();
        assert_eq!(subscriber.status, SubscriptionStatus::Unsubscribed);
        assert!(!subscriber.is_active());
    }

    #[test]
    fn rejects_unknown_status() {
        let result = Subscriber::try_from(SubscriberRow {
            email: "a@b.co".into(),
            status: "bounced".into(),
            source: None,
            subscribed_at: Utc::now(),
            unsubscribed_at: None,
        });
        assert!(result.is_err());
    }
}
