//! User entity.

use crate::UserId;
use serde::{Deserialize, Serialize};

/// Resource name used in errors and cache namespaces.
pub const USER_RESOURCE: &str = "User";

/// The single record type Larder persists and caches.
///
/// `id` is `None` until the store has assigned one; every user returned
/// by a store carries `Some(id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Store-assigned identifier.
    #[serde(default)]
    pub id: Option<UserId>,

    /// Display name.
    pub name: String,
}

impl User {
    /// Creates a user that has not been persisted yet.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Creates a user carrying an existing identifier.
    #[must_use]
    pub fn with_id(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Returns true if the store has not assigned an id yet.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
