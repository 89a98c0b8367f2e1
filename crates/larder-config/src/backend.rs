//! Backend selection for the store and the cache.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which persistence backend holds user records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// MySQL through an SQLx connection pool.
    #[default]
    Mysql,
    /// Process-local map, lost on restart.
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mysql => write!(f, "mysql"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Which backend holds cached user records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Redis through a deadpool connection pool.
    #[default]
    Redis,
    /// Process-local map.
    Memory,
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redis => write!(f, "redis"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_defaults() {
        assert_eq!(StoreBackend::default(), StoreBackend::Mysql);
        assert_eq!(CacheBackend::default(), CacheBackend::Redis);
    }

    #[test]
    fn test_backend_display() {
        assert_eq!(StoreBackend::Memory.to_string(), "memory");
        assert_eq!(CacheBackend::Redis.to_string(), "redis");
    }
}
