//! Component wiring.
//!
//! Builds the store, cache and user service selected by configuration and
//! hands out shared references. Every collaborator receives its
//! dependencies through its constructor.

use larder_config::{AppConfig, CacheBackend, StoreBackend};
use larder_core::{HealthCheck, LarderResult};
use larder_repository::{
    create_pool, DatabasePool, DatabasePoolInterface, InMemoryUserRepository, MySqlUserRepository,
    UserRepository,
};
use larder_service::{
    create_redis_pool, CacheInterface, CacheKeys, InMemoryCache, RedisCacheService, UserService,
    UserServiceImpl,
};
use larder_rest::AppState;
use std::sync::Arc;
use tracing::info;

/// The wired application components.
pub struct AppComponents {
    user_service: Arc<dyn UserService>,
    health_checks: Vec<Arc<dyn HealthCheck>>,
    db_pool: Option<Arc<DatabasePool>>,
}

impl AppComponents {
    /// Builds every component for the configured backends.
    pub async fn build(config: &AppConfig) -> LarderResult<Self> {
        let mut health_checks: Vec<Arc<dyn HealthCheck>> = Vec::new();
        let mut db_pool = None;

        let user_repository: Arc<dyn UserRepository> = match config.store.backend {
            StoreBackend::Mysql => {
                let pool = create_pool(&config.database).await?;
                health_checks.push(pool.clone());
                db_pool = Some(pool.clone());
                Arc::new(MySqlUserRepository::new(pool))
            }
            StoreBackend::Memory => {
                let repository = Arc::new(InMemoryUserRepository::new());
                health_checks.push(repository.clone());
                repository
            }
        };
        info!("Store backend: {}", config.store.backend);

        let cache: Arc<dyn CacheInterface> = match config.cache.backend {
            CacheBackend::Redis => {
                let pool = create_redis_pool(&config.redis).await?;
                let cache = Arc::new(RedisCacheService::with_ttl(
                    Arc::new(pool),
                    config.cache.ttl(),
                ));
                health_checks.push(cache.clone());
                cache
            }
            CacheBackend::Memory => {
                let cache = Arc::new(InMemoryCache::with_ttl(config.cache.ttl()));
                health_checks.push(cache.clone());
                cache
            }
        };
        info!("Cache backend: {}", config.cache.backend);

        let user_service = UserServiceImpl::new(user_repository, cache)
            .with_cache_keys(CacheKeys::new(config.cache.key_prefix.clone()));

        Ok(Self {
            user_service: Arc::new(user_service),
            health_checks,
            db_pool,
        })
    }

    /// Returns the user service.
    #[must_use]
    pub fn user_service(&self) -> Arc<dyn UserService> {
        Arc::clone(&self.user_service)
    }

    /// Returns the REST application state.
    #[must_use]
    pub fn app_state(&self) -> AppState {
        AppState::new(self.user_service(), self.health_checks.clone())
    }

    /// Releases backend connections.
    pub async fn shutdown(&self) {
        if let Some(pool) = &self.db_pool {
            pool.close().await;
        }
    }
}

impl std::fmt::Debug for AppComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppComponents")
            .field("health_checks", &self.health_checks.len())
            .field("db_pool", &self.db_pool)
            .finish_non_exhaustive()
    }
}
