//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use larder_core::{LarderError, LarderResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cache interface for storing and retrieving cached data.
///
/// Uses JSON strings for type-erased storage to maintain dyn-compatibility.
/// Entry lifetime is a property of the implementation, not of each call.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CacheInterface: Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> LarderResult<Option<String>>;

    /// Store a raw JSON value, replacing any previous entry.
    async fn put_raw(&self, key: &str, value: &str) -> LarderResult<()>;

    /// Remove the entry for a key. Evicting a missing key succeeds.
    async fn evict(&self, key: &str) -> LarderResult<()>;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> LarderResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json).map_err(|e| {
                    LarderError::cache(format!("Corrupt entry for key '{}': {}", key, e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Put a typed value into the cache.
    async fn put<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T) -> LarderResult<()> {
        let json = serde_json::to_string(value)?;
        self.put_raw(key, &json).await
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}
