//! In-memory cache implementation.
//!
//! Backs the `memory` cache backend and serves as an inspectable cache in
//! tests via [`InMemoryCache::contains`].

use super::CacheInterface;
use async_trait::async_trait;
use larder_core::{HealthCheck, HealthStatus, LarderResult};
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

/// Process-local cache keyed by string, backed by `moka`.
///
/// Expired entries are dropped by moka's housekeeping, not only when their
/// key is read again.
#[derive(Debug, Clone)]
pub struct InMemoryCache {
    entries: Cache<String, String>,
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::with_ttl(None)
    }
}

impl InMemoryCache {
    /// Create a cache whose entries live until evicted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache whose entries also expire after `ttl`.
    #[must_use]
    pub fn with_ttl(ttl: Option<Duration>) -> Self {
        let builder = Cache::builder();
        let entries = match ttl {
            Some(ttl) => builder.time_to_live(ttl).build(),
            None => builder.build(),
        };
        Self { entries }
    }

    /// Returns true if a live entry exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored entries, after pending expirations are applied.
    pub async fn len(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    /// Returns true if no entries are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    async fn get_raw(&self, key: &str) -> LarderResult<Option<String>> {
        let value = self.entries.get(key).await;
        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }
        Ok(value)
    }

    async fn put_raw(&self, key: &str, value: &str) -> LarderResult<()> {
        self.entries
            .insert(key.to_string(), value.to_string())
            .await;
        debug!("Cached key '{}'", key);
        Ok(())
    }

    async fn evict(&self, key: &str) -> LarderResult<()> {
        let removed = self.entries.remove(key).await.is_some();
        debug!("Evicted key '{}': {}", key, removed);
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for InMemoryCache {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_evict() {
        let cache = InMemoryCache::new();

        cache.put_raw("user::1", "{}").await.unwrap();
        assert!(cache.contains("user::1"));
        assert_eq!(cache.get_raw("user::1").await.unwrap().as_deref(), Some("{}"));

        cache.evict("user::1").await.unwrap();
        assert!(!cache.contains("user::1"));
        assert_eq!(cache.get_raw("user::1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_evict_missing_key_succeeds() {
        let cache = InMemoryCache::new();
        cache.evict("user::404").await.unwrap();
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_put_replaces_entry() {
        let cache = InMemoryCache::new();
        cache.put_raw("k", "a").await.unwrap();
        cache.put_raw("k", "b").await.unwrap();

        assert_eq!(cache.get_raw("k").await.unwrap().as_deref(), Some("b"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = InMemoryCache::with_ttl(Some(Duration::from_millis(20)));
        cache.put_raw("k", "v").await.unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(!cache.contains("k"));
        assert_eq!(cache.get_raw("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unread_expired_entries_are_released() {
        let cache = InMemoryCache::with_ttl(Some(Duration::from_millis(10)));
        for id in 0..1_000 {
            cache
                .put_raw(&format!("user::{id}"), "{}")
                .await
                .unwrap();
        }

        tokio::time::sleep(Duration::from_millis(50)).await;
        cache.put_raw("other", "{}").await.unwrap();
        cache.evict("other").await.unwrap();

        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_entries_without_ttl_persist() {
        let cache = InMemoryCache::new();
        cache.put_raw("k", "v").await.unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(cache.contains("k"));
        assert_eq!(cache.len().await, 1);
    }
}
