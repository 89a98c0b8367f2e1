//! Caching infrastructure for the service layer.
//!
//! A cache abstraction with Redis and in-memory implementations. Values
//! are stored as JSON strings so the trait stays dyn-compatible.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
pub mod metrics;
mod redis_cache;

#[cfg(any(test, feature = "test-utils"))]
pub use cache_interface::MockCacheInterface;
pub use cache_interface::{CacheExt, CacheInterface};
pub use cache_keys::CacheKeys;
pub use memory_cache::InMemoryCache;
pub use redis_cache::{create_redis_pool, RedisCacheService};
