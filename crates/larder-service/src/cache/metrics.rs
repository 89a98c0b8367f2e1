//! Prometheus counters for cache traffic.

use metrics::{counter, describe_counter};

/// Metric names for the cache.
pub mod names {
    /// Lookups answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "larder_cache_hits_total";
    /// Lookups that fell through to the store.
    pub const CACHE_MISSES_TOTAL: &str = "larder_cache_misses_total";
    /// Entries written after a miss.
    pub const CACHE_PUTS_TOTAL: &str = "larder_cache_puts_total";
    /// Entries evicted after a write.
    pub const CACHE_EVICTIONS_TOTAL: &str = "larder_cache_evictions_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::CACHE_HITS_TOTAL, "Total number of cache hits");
    describe_counter!(names::CACHE_MISSES_TOTAL, "Total number of cache misses");
    describe_counter!(names::CACHE_PUTS_TOTAL, "Total number of cache puts");
    describe_counter!(
        names::CACHE_EVICTIONS_TOTAL,
        "Total number of cache evictions"
    );
}

/// Cache metrics recorder.
#[derive(Clone)]
pub struct CacheMetrics;

impl CacheMetrics {
    /// Record a cache hit.
    pub fn hit(namespace: &'static str) {
        counter!(names::CACHE_HITS_TOTAL, "namespace" => namespace).increment(1);
    }

    /// Record a cache miss.
    pub fn miss(namespace: &'static str) {
        counter!(names::CACHE_MISSES_TOTAL, "namespace" => namespace).increment(1);
    }

    /// Record a cache put.
    pub fn put(namespace: &'static str) {
        counter!(names::CACHE_PUTS_TOTAL, "namespace" => namespace).increment(1);
    }

    /// Record a cache eviction.
    pub fn eviction(namespace: &'static str) {
        counter!(names::CACHE_EVICTIONS_TOTAL, "namespace" => namespace).increment(1);
    }
}
