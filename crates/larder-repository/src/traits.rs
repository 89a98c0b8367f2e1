//! Repository trait definitions.

use async_trait::async_trait;
use larder_core::{LarderResult, User, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User store.
///
/// Implementations must be safe to share across concurrent requests.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a user.
    ///
    /// A user without an id is inserted and returned with its assigned id.
    /// A user with an id fully replaces the stored record; replacing an id
    /// that does not exist fails with `NotFound`.
    async fn save(&self, user: &User) -> LarderResult<User>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> LarderResult<Option<User>>;

    /// Deletes a user by ID. Deleting a missing id succeeds.
    async fn delete_by_id(&self, id: UserId) -> LarderResult<()>;
}
