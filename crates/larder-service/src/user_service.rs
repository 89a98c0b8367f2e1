//! User service trait definition.

use crate::dto::{CreateUserRequest, UpdateUserRequest};
use async_trait::async_trait;
use larder_core::{LarderResult, User, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User access layer.
///
/// Reads go through the cache; writes go to the store and then evict
/// the cached entry. Store and cache failures propagate unchanged.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Creates a new user. The store assigns the id; the cache is not touched.
    async fn create_user(&self, request: CreateUserRequest) -> LarderResult<User>;

    /// Gets a user by ID, populating the cache on a miss.
    async fn get_user(&self, id: UserId) -> LarderResult<User>;

    /// Replaces an existing user, then evicts its cache entry.
    async fn update_user(&self, request: UpdateUserRequest) -> LarderResult<User>;

    /// Deletes a user, then evicts its cache entry. Deleting a missing user succeeds.
    async fn delete_user(&self, id: UserId) -> LarderResult<()>;
}
