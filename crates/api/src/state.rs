use std::sync::Arc;
use std::time::Duration;

use arena_core::store::{SubmissionStore, SubscriberStore};
use arena_core::subscriber_cache::SubscriberCache;
use arena_core::validation::InvestorFormValidator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Persisted founder and investor applications.
    pub submissions: Arc<dyn SubmissionStore>,
    /// Newsletter subscribers.
    pub subscribers: Arc<dyn SubscriberStore>,
    /// Status lookups, refreshed on subscribe/unsubscribe.
    pub subscriber_cache: Arc<SubscriberCache>,
    /// Investor validation with the configured check-size policy.
    pub investor_validator: Arc<InvestorFormValidator>,
}

impl AppState {
    /// Assemble state around the given stores; the cache and validator are
    /// built from `config`.
    pub fn new(
        config: ServerConfig,
        submissions: Arc<dyn SubmissionStore>,
        subscribers: Arc<dyn SubscriberStore>,
    ) -> Self {
        let subscriber_cache = SubscriberCache::new(
            Duration::from_secs(config.subscriber_cache_ttl_secs),
            config.subscriber_cache_capacity,
        );
        let investor_validator = InvestorFormValidator::new(config.check_size_policy.clone());
        tracing::debug!(
            ttl_secs = subscriber_cache.ttl().as_secs(),
            capacity = subscriber_cache.capacity(),
            "Subscriber cache configured",
        );

        Self {
            config: Arc::new(config),
            submissions,
            subscribers,
            subscriber_cache: Arc::new(subscriber_cache),
            investor_validator: Arc::new(investor_validator),
        }
    }
}
