//! Cache Metrics System
//!
//! Counters describing how a cache has been used, reported through the
//! [`CacheMetrics`] trait as a `BTreeMap<String, f64>`. A `BTreeMap` keeps the
//! keys in a stable order so reports can be diffed and compared across runs.
//!
//! Metrics are observational only: nothing in the cache reads them back.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lfu;

pub use lfu::LfuCacheMetrics;

/// Counters shared by every cache type.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (fetches) made against the cache
    pub requests: u64,

    /// Lookups that found their key
    pub cache_hits: u64,

    /// New keys stored
    pub insertions: u64,

    /// Inserts that replaced the value of a key already present
    pub updates: u64,

    /// Entries removed by eviction, whether capacity-driven or requested
    pub evictions: u64,

    /// Entries removed explicitly by key
    pub removals: u64,
}

impl CoreCacheMetrics {
    /// Creates a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that found nothing.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new key entering the cache.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records a value replacement for an existing key.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records an entry leaving the cache through eviction.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records an entry removed by key.
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Misses, derived as `requests - cache_hits`.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of lookups that hit, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, or 0.0 before the first lookup.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a map for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Uniform metrics reporting for cache implementations.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short name of the eviction algorithm, e.g. `"LFU"`.
    fn algorithm_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_metrics_rates() {
        let mut core = CoreCacheMetrics::new();
        assert_eq!(core.hit_rate(), 0.0);
        assert_eq!(core.miss_rate(), 0.0);

        core.record_hit();
        core.record_hit();
        core.record_hit();
        core.record_miss();
        assert_eq!(core.requests, 4);
        assert_eq!(core.cache_misses(), 1);
        assert_eq!(core.hit_rate(), 0.75);
        assert_eq!(core.miss_rate(), 0.25);
    }

    #[test]
    fn test_core_metrics_map() {
        let mut core = CoreCacheMetrics::new();
        let map = core.to_btreemap();
        assert!(!map.contains_key("eviction_rate"));

        core.record_insertion();
        core.record_update();
        core.record_miss();
        core.record_eviction();
        core.record_removal();
        let map = core.to_btreemap();
        assert_eq!(map["insertions"], 1.0);
        assert_eq!(map["updates"], 1.0);
        assert_eq!(map["evictions"], 1.0);
        assert_eq!(map["removals"], 1.0);
        assert_eq!(map["cache_misses"], 1.0);
        assert_eq!(map["eviction_rate"], 1.0);
    }
}
