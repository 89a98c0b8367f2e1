//! Cache key generators for consistent key naming.

use larder_core::UserId;

/// Logical namespace holding user entries.
pub const USER_NAMESPACE: &str = "user";

/// Builds cache keys, optionally under a deployment-wide prefix.
///
/// Keys render as `user::{id}`, or `{prefix}:user::{id}` with a prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheKeys {
    prefix: Option<String>,
}

impl CacheKeys {
    /// Creates a key builder. An empty prefix is treated as no prefix.
    #[must_use]
    pub fn new(prefix: Option<String>) -> Self {
        Self {
            prefix: prefix.filter(|p| !p.is_empty()),
        }
    }

    /// Generate a cache key for a user by ID.
    #[must_use]
    pub fn user(&self, id: UserId) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}::{}", prefix, USER_NAMESPACE, id),
            None => format!("{}::{}", USER_NAMESPACE, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_key_without_prefix() {
        let keys = CacheKeys::default();
        assert_eq!(keys.user(UserId::new(1)), "user::1");
    }

    #[test]
    fn test_user_key_with_prefix() {
        let keys = CacheKeys::new(Some("larder".to_string()));
        assert_eq!(keys.user(UserId::new(42)), "larder:user::42");
    }

    #[test]
    fn test_empty_prefix_ignored() {
        let keys = CacheKeys::new(Some(String::new()));
        assert_eq!(keys, CacheKeys::default());
    }
}
