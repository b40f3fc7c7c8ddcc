//! Newsletter subscription domain: statuses, transitions, and input rules.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Maximum length of the free-form `source` tag (e.g. `"footer"`, `"blog"`).
pub const MAX_SOURCE_LEN: usize = 64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Unsubscribed,
}

impl SubscriptionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Unsubscribed => "unsubscribed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(SubscriptionStatus::Active),
            "unsubscribed" => Some(SubscriptionStatus::Unsubscribed),
            _ => None,
        }
    }
}

/// A newsletter subscriber, keyed by normalised email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subscriber {
    pub email: String,
    pub status: SubscriptionStatus,
    pub source: Option<String>,
    pub subscribed_at: Timestamp,
    pub unsubscribed_at: Option<Timestamp>,
}

impl Subscriber {
    pub fn new_active(email: String, source: Option<String>, now: Timestamp) -> Self {
        Self {
            email,
            status: SubscriptionStatus::Active,
            source,
            subscribed_at: now,
            unsubscribed_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }

    /// Apply a subscribe request to an existing record.
    ///
    /// Active subscribers are left untouched; unsubscribed ones are
    /// reactivated with a fresh `subscribed_at`.
    pub fn resubscribe(&mut self, source: Option<String>, now: Timestamp) -> SubscribeAction {
        if self.is_active() {
            return SubscribeAction::AlreadyActive;
        }
        self.status = SubscriptionStatus::Active;
        self.subscribed_at = now;
        self.unsubscribed_at = None;
        if source.is_some() {
            self.source = source;
        }
        SubscribeAction::Reactivated
    }

    /// Mark as unsubscribed. Idempotent: the first timestamp is kept.
    pub fn unsubscribe(&mut self, now: Timestamp) {
        if self.is_active() {
            self.status = SubscriptionStatus::Unsubscribed;
            self.unsubscribed_at = Some(now);
        }
    }
}

/// What a subscribe request did.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubscribeAction {
    Created,
    AlreadyActive,
    Reactivated,
}

/// Result of a subscribe request against a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeOutcome {
    pub action: SubscribeAction,
    pub subscriber: Subscriber,
}

/// Canonical form of an email address used as the subscriber key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalise an optional source tag: blank becomes `None`.
pub fn normalize_source(source: Option<&str>) -> Option<String> {
    source
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
