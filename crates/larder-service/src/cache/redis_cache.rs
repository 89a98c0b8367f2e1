//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, Runtime};
use larder_config::RedisConfig;
use larder_core::{HealthCheck, HealthStatus, LarderError, LarderResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Create a Redis connection pool and verify it with a PING.
pub async fn create_redis_pool(config: &RedisConfig) -> LarderResult<Pool> {
    info!("Creating Redis connection pool...");

    let pool = Config::from_url(&config.url)
        .builder()
        .map_err(|e| LarderError::Configuration(format!("Invalid Redis config: {}", e)))?
        .max_size(config.pool_size)
        .wait_timeout(Some(config.wait_timeout()))
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| LarderError::Configuration(format!("Failed to create pool: {}", e)))?;

    let mut conn = pool
        .get()
        .await
        .map_err(|e| LarderError::cache(format!("Failed to get Redis connection: {}", e)))?;
    deadpool_redis::redis::cmd("PING")
        .query_async::<String>(&mut *conn)
        .await
        .map_err(|e| LarderError::cache(format!("Redis PING failed: {}", e)))?;

    info!("Redis connection pool created successfully");
    Ok(pool)
}

/// Redis-based cache service.
pub struct RedisCacheService {
    pool: Arc<Pool>,
    ttl: Option<Duration>,
}

impl RedisCacheService {
    /// Create a cache whose entries live until evicted.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool, ttl: None }
    }

    /// Create a cache whose entries also expire after `ttl`.
    #[must_use]
    pub fn with_ttl(pool: Arc<Pool>, ttl: Option<Duration>) -> Self {
        Self { pool, ttl }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> LarderResult<deadpool_redis::Connection> {
        self.pool.get().await.map_err(|e| {
            warn!("Failed to get Redis connection: {}", e);
            LarderError::cache(format!("Failed to get Redis connection: {}", e))
        })
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    async fn get_raw(&self, key: &str) -> LarderResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            LarderError::cache(format!("Failed to get key '{}': {}", key, e))
        })?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn put_raw(&self, key: &str, value: &str) -> LarderResult<()> {
        let mut conn = self.get_conn().await?;

        let result = match self.ttl {
            Some(ttl) => conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1)).await,
            None => conn.set::<_, _, ()>(key, value).await,
        };
        result.map_err(|e| LarderError::cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}'", key);
        Ok(())
    }

    async fn evict(&self, key: &str) -> LarderResult<()> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            LarderError::cache(format!("Failed to delete key '{}': {}", key, e))
        })?;

        debug!("Evicted key '{}': {}", key, deleted > 0);
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for RedisCacheService {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        let mut conn = match self.get_conn().await {
            Ok(conn) => conn,
            Err(e) => return HealthStatus::Unhealthy(e.to_string()),
        };

        match deadpool_redis::redis::cmd("PING")
            .query_async::<String>(&mut *conn)
            .await
        {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(format!("PING failed: {}", e)),
        }
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisCacheService")
            .field("pool_size", &status.size)
            .field("available", &status.available)
            .field("ttl", &self.ttl)
            .finish()
    }
}
