//! User service implementation.

use crate::cache::cache_keys::USER_NAMESPACE;
use crate::cache::metrics::CacheMetrics;
use crate::cache::{CacheExt, CacheInterface, CacheKeys};
use crate::dto::{CreateUserRequest, UpdateUserRequest};
use crate::user_service::UserService;
use async_trait::async_trait;
use larder_core::{LarderError, LarderResult, User, UserId, ValidateExt, USER_RESOURCE};
use larder_repository::UserRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// User service over a shared store and cache.
///
/// Requests are validated here as well as at the HTTP boundary, so callers
/// that bypass the REST layer get the same rules.
///
/// No lock spans the store write and the cache eviction, so a concurrent
/// `get_user` that misses before an update can repopulate the cache with
/// the pre-update record.
pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    cache: Arc<dyn CacheInterface>,
    keys: CacheKeys,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<dyn UserRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self {
            user_repository,
            cache,
            keys: CacheKeys::default(),
        }
    }

    /// Uses the given key builder for cache entries.
    #[must_use]
    pub fn with_cache_keys(mut self, keys: CacheKeys) -> Self {
        self.keys = keys;
        self
    }

    async fn evict(&self, id: UserId) -> LarderResult<()> {
        self.cache.evict(&self.keys.user(id)).await?;
        CacheMetrics::eviction(USER_NAMESPACE);
        Ok(())
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create_user(&self, request: CreateUserRequest) -> LarderResult<User> {
        debug!("Creating user: {}", request.name);

        request.validate_request()?;

        let saved_user = self.user_repository.save(&User::new(request.name)).await?;
        let id = saved_user
            .id
            .ok_or_else(|| LarderError::internal("Store returned a user without an id"))?;

        info!("User created: {}", id);
        Ok(saved_user)
    }

    async fn get_user(&self, id: UserId) -> LarderResult<User> {
        debug!("Getting user: {}", id);

        let cache_key = self.keys.user(id);

        if let Some(cached) = self.cache.get::<User>(&cache_key).await? {
            debug!("Cache hit for user: {}", id);
            CacheMetrics::hit(USER_NAMESPACE);
            return Ok(cached);
        }
        CacheMetrics::miss(USER_NAMESPACE);

        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| LarderError::not_found(USER_RESOURCE, id))?;

        self.cache.put(&cache_key, &user).await?;
        CacheMetrics::put(USER_NAMESPACE);

        Ok(user)
    }

    async fn update_user(&self, request: UpdateUserRequest) -> LarderResult<User> {
        debug!("Updating user: {}", request.id);

        request.validate_request()?;

        let id = request.id;
        let updated_user = self
            .user_repository
            .save(&User::with_id(id, request.name))
            .await?;

        self.evict(id).await?;

        info!("User updated: {}", id);
        Ok(updated_user)
    }

    async fn delete_user(&self, id: UserId) -> LarderResult<()> {
        debug!("Deleting user: {}", id);

        self.user_repository.delete_by_id(id).await?;
        self.evict(id).await?;

        info!("User deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::metrics::names;
    use crate::cache::{InMemoryCache, MockCacheInterface};
    use larder_repository::{InMemoryUserRepository, MockUserRepository};
    use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
    use mockall::Sequence;

    struct Fixture {
        service: UserServiceImpl,
        store: Arc<InMemoryUserRepository>,
        cache: Arc<InMemoryCache>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryUserRepository::new());
        let cache = Arc::new(InMemoryCache::new());
        let service = UserServiceImpl::new(store.clone(), cache.clone());
        Fixture {
            service,
            store,
            cache,
        }
    }

    fn create(name: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
        }
    }

    fn update(id: i32, name: &str) -> UpdateUserRequest {
        UpdateUserRequest {
            id: UserId::new(id),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_get_update_delete_scenario() {
        let f = fixture();

        let created = f.service.create_user(create("Alice")).await.unwrap();
        assert_eq!(created, User::with_id(UserId::new(1), "Alice"));
        assert!(f.cache.is_empty().await);

        let first = f.service.get_user(UserId::new(1)).await.unwrap();
        assert_eq!(first, created);
        assert_eq!(f.store.reads(), 1);

        let second = f.service.get_user(UserId::new(1)).await.unwrap();
        assert_eq!(second, created);
        assert_eq!(f.store.reads(), 1);

        let updated = f.service.update_user(update(1, "Bob")).await.unwrap();
        assert_eq!(updated, User::with_id(UserId::new(1), "Bob"));
        assert!(!f.cache.contains("user::1"));

        let fetched = f.service.get_user(UserId::new(1)).await.unwrap();
        assert_eq!(fetched, User::with_id(UserId::new(1), "Bob"));

        f.service.delete_user(UserId::new(1)).await.unwrap();
        assert!(!f.cache.contains("user::1"));

        let err = f.service.get_user(UserId::new(1)).await.unwrap_err();
        assert!(matches!(err, LarderError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_ids() {
        let f = fixture();

        let a = f.service.create_user(create("Alice")).await.unwrap();
        let b = f.service.create_user(create("Bob")).await.unwrap();

        assert!(a.id.is_some());
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found_and_not_cached() {
        let f = fixture();

        let err = f.service.get_user(UserId::new(9)).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert!(f.cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_populates_cache() {
        let f = fixture();
        f.service.create_user(create("Alice")).await.unwrap();

        f.service.get_user(UserId::new(1)).await.unwrap();
        assert!(f.cache.contains("user::1"));
    }

    #[tokio::test]
    async fn test_cache_key_prefix_applied() {
        let f = fixture();
        let service = UserServiceImpl::new(f.store.clone(), f.cache.clone())
            .with_cache_keys(CacheKeys::new(Some("larder".to_string())));

        service.create_user(create("Alice")).await.unwrap();
        service.get_user(UserId::new(1)).await.unwrap();

        assert!(f.cache.contains("larder:user::1"));
        assert!(!f.cache.contains("user::1"));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let f = fixture();

        let err = f.service.update_user(update(5, "Ghost")).await.unwrap_err();
        assert!(matches!(err, LarderError::NotFound { .. }));
        assert!(f.store.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_succeeds() {
        let f = fixture();
        f.service.delete_user(UserId::new(5)).await.unwrap();
    }

    #[tokio::test]
    async fn test_blank_name_rejected_before_store() {
        let store = MockUserRepository::new();
        let cache = MockCacheInterface::new();
        let service = UserServiceImpl::new(Arc::new(store), Arc::new(cache));

        let err = service.create_user(create("  ")).await.unwrap_err();
        assert!(matches!(err, LarderError::Validation(_)));

        let err = service.update_user(update(1, "")).await.unwrap_err();
        assert!(matches!(err, LarderError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_does_not_touch_cache() {
        let mut store = MockUserRepository::new();
        store
            .expect_save()
            .withf(|user| user.id.is_none() && user.name == "Alice")
            .times(1)
            .returning(|user| Ok(User::with_id(UserId::new(1), user.name.clone())));
        // No expectations: any cache call fails the test.
        let cache = MockCacheInterface::new();

        let service = UserServiceImpl::new(Arc::new(store), Arc::new(cache));
        let created = service.create_user(create("Alice")).await.unwrap();
        assert_eq!(created.id, Some(UserId::new(1)));
    }

    #[tokio::test]
    async fn test_update_writes_store_before_evicting() {
        let mut seq = Sequence::new();
        let mut store = MockUserRepository::new();
        let mut cache = MockCacheInterface::new();

        store
            .expect_save()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|user| Ok(user.clone()));
        cache
            .expect_evict()
            .withf(|key| key == "user::1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        cache.expect_put_raw().never();

        let service = UserServiceImpl::new(Arc::new(store), Arc::new(cache));
        let updated = service.update_user(update(1, "Bob")).await.unwrap();
        assert_eq!(updated, User::with_id(UserId::new(1), "Bob"));
    }

    #[tokio::test]
    async fn test_delete_writes_store_before_evicting() {
        let mut seq = Sequence::new();
        let mut store = MockUserRepository::new();
        let mut cache = MockCacheInterface::new();

        store
            .expect_delete_by_id()
            .withf(|id| *id == UserId::new(3))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        cache
            .expect_evict()
            .withf(|key| key == "user::3")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let service = UserServiceImpl::new(Arc::new(store), Arc::new(cache));
        service.delete_user(UserId::new(3)).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_failure_on_update_skips_eviction() {
        let mut store = MockUserRepository::new();
        store
            .expect_save()
            .returning(|_| Err(LarderError::Database("connection reset".to_string())));
        let mut cache = MockCacheInterface::new();
        cache.expect_evict().never();

        let service = UserServiceImpl::new(Arc::new(store), Arc::new(cache));
        let err = service.update_user(update(1, "Bob")).await.unwrap_err();
        assert!(matches!(err, LarderError::Database(_)));
    }

    #[tokio::test]
    async fn test_store_failure_on_delete_skips_eviction() {
        let mut store = MockUserRepository::new();
        store
            .expect_delete_by_id()
            .returning(|_| Err(LarderError::Database("lock wait timeout".to_string())));
        let mut cache = MockCacheInterface::new();
        cache.expect_evict().never();

        let service = UserServiceImpl::new(Arc::new(store), Arc::new(cache));
        let err = service.delete_user(UserId::new(1)).await.unwrap_err();
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn test_cache_failure_on_eviction_returned_after_store_write() {
        let store = Arc::new(InMemoryUserRepository::new());
        store.save(&User::new("Alice")).await.unwrap();

        let mut cache = MockCacheInterface::new();
        cache
            .expect_evict()
            .times(1)
            .returning(|_| Err(LarderError::cache("connection refused")));

        let service = UserServiceImpl::new(store.clone(), Arc::new(cache));
        let err = service.update_user(update(1, "Bob")).await.unwrap_err();
        assert!(matches!(err, LarderError::Cache(_)));

        let stored = store.find_by_id(UserId::new(1)).await.unwrap();
        assert_eq!(stored, Some(User::with_id(UserId::new(1), "Bob")));
    }

    #[tokio::test]
    async fn test_cache_failure_on_get_lookup_skips_store() {
        let mut store = MockUserRepository::new();
        store.expect_find_by_id().never();
        let mut cache = MockCacheInterface::new();
        cache
            .expect_get_raw()
            .returning(|_| Err(LarderError::cache("timeout")));

        let service = UserServiceImpl::new(Arc::new(store), Arc::new(cache));
        let err = service.get_user(UserId::new(1)).await.unwrap_err();
        assert!(matches!(err, LarderError::Cache(_)));
    }

    #[tokio::test]
    async fn test_cache_failure_on_put_is_returned() {
        let mut store = MockUserRepository::new();
        store
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(User::with_id(id, "Alice"))));
        let mut cache = MockCacheInterface::new();
        cache.expect_get_raw().returning(|_| Ok(None));
        cache
            .expect_put_raw()
            .times(1)
            .returning(|_, _| Err(LarderError::cache("OOM command not allowed")));

        let service = UserServiceImpl::new(Arc::new(store), Arc::new(cache));
        let err = service.get_user(UserId::new(1)).await.unwrap_err();
        assert_eq!(err.error_code(), "CACHE_ERROR");
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let f = fixture();
        let service = Arc::new(f.service);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.create_user(create(&format!("user-{i}"))).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
        assert_eq!(f.store.len(), 16);
    }

    fn counter(snapshotter: &Snapshotter, name: &str) -> u64 {
        snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter(|(key, _, _, _)| key.key().name() == name)
            .map(|(_, _, _, value)| match value {
                DebugValue::Counter(count) => count,
                _ => 0,
            })
            .sum()
    }

    #[test]
    fn test_cache_traffic_is_counted() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        metrics::with_local_recorder(&recorder, || {
            runtime.block_on(async {
                let f = fixture();
                f.service.create_user(create("Alice")).await.unwrap();

                f.service.get_user(UserId::new(1)).await.unwrap();
                assert_eq!(counter(&snapshotter, names::CACHE_MISSES_TOTAL), 1);
                assert_eq!(counter(&snapshotter, names::CACHE_PUTS_TOTAL), 1);
                assert_eq!(counter(&snapshotter, names::CACHE_HITS_TOTAL), 0);

                f.service.get_user(UserId::new(1)).await.unwrap();
                assert_eq!(counter(&snapshotter, names::CACHE_HITS_TOTAL), 1);

                f.service.update_user(update(1, "Bob")).await.unwrap();
                assert_eq!(counter(&snapshotter, names::CACHE_EVICTIONS_TOTAL), 1);
            });
        });
    }
}
