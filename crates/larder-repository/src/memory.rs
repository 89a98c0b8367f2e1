//! In-memory user repository.
//!
//! Backs the `memory` store backend and doubles as a probe in tests:
//! [`InMemoryUserRepository::reads`] counts calls to `find_by_id`.

use crate::traits::UserRepository;
use async_trait::async_trait;
use larder_core::{HealthCheck, HealthStatus, LarderError, LarderResult, User, UserId, USER_RESOURCE};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use tracing::debug;

/// Process-local user store with store-assigned ids starting at 1.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<UserId, String>>,
    next_id: AtomicI32,
    reads: AtomicUsize,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(1),
            reads: AtomicUsize::new(0),
        }
    }

    /// Number of `find_by_id` calls served so far.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Returns true if no users are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> LarderResult<User> {
        let mut users = self.users.write();
        match user.id {
            None => {
                let id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
                users.insert(id, user.name.clone());
                debug!("Inserted user {}", id);
                Ok(User::with_id(id, user.name.clone()))
            }
            Some(id) => match users.get_mut(&id) {
                Some(name) => {
                    name.clone_from(&user.name);
                    debug!("Replaced user {}", id);
                    Ok(user.clone())
                }
                None => Err(LarderError::not_found(USER_RESOURCE, id)),
            },
        }
    }

    async fn find_by_id(&self, id: UserId) -> LarderResult<Option<User>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .users
            .read()
            .get(&id)
            .map(|name| User::with_id(id, name.clone())))
    }

    async fn delete_by_id(&self, id: UserId) -> LarderResult<()> {
        if self.users.write().remove(&id).is_none() {
            debug!("No user {} to delete", id);
        }
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for InMemoryUserRepository {
    fn name(&self) -> &str {
        "store"
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}
