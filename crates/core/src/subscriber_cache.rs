//! Bounded TTL cache for subscriber status lookups.
//!
//! Owned by the API state and injected into handlers; there is no global
//! instance. Contract:
//!
//! - an entry older than the TTL is never returned, and is dropped when read;
//! - the cache never holds more than `capacity` entries. Inserting a new key
//!   into a full cache first purges expired entries, then evicts the entry
//!   closest to expiry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::newsletter::Subscriber;

struct CacheEntry {
    subscriber: Subscriber,
    expires_at: Instant,
    /// Insertion order, breaks ties between equal expiry instants.
    seq: u64,
}

pub struct SubscriberCache {
    ttl: Duration,
    capacity: usize,
    entries: RwLock<HashMap<String, CacheEntry>>,
    next_seq: AtomicU64,
}

impl SubscriberCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            entries: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cached subscriber for a normalised email, if present and fresh.
    pub async fn get(&self, email: &str) -> Option<Subscriber> {
        {
            let entries = self.entries.read().await;
            match entries.get(email) {
                None => return None,
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.subscriber.clone())
                }
                Some(_) => {}
            }
        }

        // Expired: drop it, unless a concurrent insert refreshed it meanwhile.
        let mut entries = self.entries.write().await;
        if entries
            .get(email)
            .is_some_and(|entry| entry.expires_at <= Instant::now())
        {
            entries.remove(email);
        }
        None
    }

    /// Insert or refresh the entry for `subscriber.email`.
    pub async fn insert(&self, subscriber: Subscriber) {
        if self.capacity == 0 {
            return;
        }
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        if !entries.contains_key(&subscriber.email) && entries.len() >= self.capacity {
            entries.retain(|_, entry| entry.expires_at > now);
            if entries.len() >= self.capacity {
                let soonest = entries
                    .iter()
                    .min_by_key(|(_, entry)| (entry.expires_at, entry.seq))
                    .map(|(key, _)| key.clone());
                if let Some(key) = soonest {
                    entries.remove(&key);
                }
            }
        }

        entries.insert(
            subscriber.email.clone(),
            CacheEntry {
                subscriber,
                expires_at: now + self.ttl,
                seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            },
        );
    }

    pub async fn invalidate(&self, email: &str) {
        self.entries.write().await.remove(email);
    }

    /// Number of stored entries, including any not yet purged after expiry.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
