//! Repository for the `newsletter_subscribers` table.

use sqlx::PgPool;

use crate::models::subscriber::SubscriberRow;

/// Column list for `newsletter_subscribers` queries.
const COLUMNS: &str = "email, status, source, subscribed_at, unsubscribed_at";

/// Provides lookup and status transitions for newsletter subscribers.
pub struct SubscriberRepo;

impl SubscriberRepo {
    /// Find a subscriber by normalised email.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<SubscriberRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM newsletter_subscribers WHERE email = $1");
        sqlx::query_as::<_, SubscriberRow>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Insert an active subscriber. Returns `None` if the email already exists.
    pub async fn insert_if_absent(
        pool: &PgPool,
        email: &str,
        source: Option<&str>,
    ) -> Result<Option<SubscriberRow>, sqlx::Error> {
        let query = format!(
            "INSERT INTO newsletter_subscribers (email, source) \
             VALUES ($1, $2) \
             ON CONFLICT (email) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SubscriberRow>(&query)
            .bind(email)
            .bind(source)
            .fetch_optional(pool)
            .await
    }

    /// Reactivate an unsubscribed row. Returns `None` if the row is missing
    /// or already active.
    ///
    /// A `NULL` source keeps the previously recorded one.
    pub async fn reactivate(
        pool: &PgPool,
        email: &str,
        source: Option<&str>,
    ) -> Result<Option<SubscriberRow>, sqlx::Error> {
        let query = format!(
            "UPDATE newsletter_subscribers \
             SET status = 'active', subscribed_at = now(), unsubscribed_at = NULL, \
                 source = COALESCE($2, source) \
             WHERE email = $1 AND status = 'unsubscribed' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SubscriberRow>(&query)
            .bind(email)
            .bind(source)
            .fetch_optional(pool)
            .await
    }

    /// Mark a subscriber as unsubscribed, keeping the first unsubscribe time.
    /// Returns `None` for unknown emails.
    pub async fn unsubscribe(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<SubscriberRow>, sqlx::Error> {
        let query = format!(
            "UPDATE newsletter_subscribers \
             SET status = 'unsubscribed', \
                 unsubscribed_at = COALESCE(unsubscribed_at, now()) \
             WHERE email = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SubscriberRow>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
