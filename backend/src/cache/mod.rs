//! Process-local TTL cache for upstream API responses.
//!
//! Memoizes Open Library and NYT payloads so repeated identical requests do
//! not hit the third-party APIs. TTL is passive: expiry is checked when a key
//! is read, there is no background sweeper. Concurrent misses on the same key
//! may each invoke the fetch; the results are idempotent upstream reads, so
//! last-writer-wins is fine.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::errors::ServiceResult;

#[derive(Clone, Debug)]
struct CacheEntry {
    value: Value,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn new(value: Value, ttl: Duration) -> Self {
        let expires_at = Utc::now()
            + chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(365));
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// In-memory key/value cache with per-entry time-to-live.
#[derive(Default)]
pub struct ResponseCache {
    store: RwLock<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value, or `None` on a miss or an expired entry.
    /// Expired entries are removed on read.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let store = self.store.read().await;
        if let Some(entry) = store.get(key) {
            if entry.is_expired() {
                drop(store);
                self.evict_if_expired(key).await;
                return None;
            }
            return Some(entry.value.clone());
        }
        None
    }

    // The key is re-checked under the write lock: an insert may have replaced
    // the entry with a fresh one between the read above and this write, and
    // that entry must survive.
    async fn evict_if_expired(&self, key: &str) {
        let mut store = self.store.write().await;
        if let Some(entry) = store.get(key) {
            if entry.is_expired() {
                store.remove(key);
            }
        }
    }

    /// Stores a value. Overwriting a key restarts its TTL window.
    pub async fn insert(&self, key: &str, value: Value, ttl: Duration) {
        let mut store = self.store.write().await;
        store.insert(key.to_string(), CacheEntry::new(value, ttl));
    }

    /// Returns the cached value for `key`, or runs `fetch`, stores its result
    /// with the given TTL, and returns it. A fetch error propagates to the
    /// caller and nothing is cached.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        fetch: F,
    ) -> ServiceResult<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ServiceResult<Value>>,
    {
        if let Some(value) = self.get(key).await {
            tracing::debug!(key, "cache hit");
            return Ok(value);
        }

        tracing::debug!(key, "cache miss, fetching upstream");
        let value = fetch().await?;
        self.insert(key, value.clone(), ttl).await;
        Ok(value)
    }

    /// Removes a key, returning whether it was present (expired or not).
    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.remove(key).is_some()
    }

    /// Drops every entry.
    pub async fn clear(&self) {
        self.store.write().await.clear();
    }
}
