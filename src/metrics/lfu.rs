//! LFU Cache Metrics
//!
//! Frequency-list activity on top of the core counters: how often accesses
//! were absorbed by an in-place count bump versus a move to another bucket,
//! and how much bucket churn that caused.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LFU-specific metrics (extends [`CoreCacheMetrics`]).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LfuCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Access count increments (one per successful fetch)
    pub frequency_increments: u64,

    /// Increments handled by raising a sole-occupant bucket's count in place
    pub in_place_bumps: u64,

    /// Frequency buckets allocated
    pub buckets_created: u64,

    /// Frequency buckets unlinked after emptying
    pub buckets_released: u64,

    /// Highest access count ever reached by any key
    pub max_frequency: u64,
}

impl LfuCacheMetrics {
    /// Creates a zeroed set of LFU counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fetch that raised an item's count to `new_frequency`.
    pub fn record_frequency_increment(&mut self, new_frequency: usize) {
        self.core.record_hit();
        self.frequency_increments += 1;
        self.max_frequency = self.max_frequency.max(new_frequency as u64);
    }

    /// Records an increment absorbed without relinking.
    pub fn record_in_place_bump(&mut self) {
        self.in_place_bumps += 1;
    }

    /// Records a new bucket spliced into the list.
    pub fn record_bucket_created(&mut self) {
        self.buckets_created += 1;
    }

    /// Records an emptied bucket leaving the list.
    pub fn record_bucket_released(&mut self) {
        self.buckets_released += 1;
    }

    /// Buckets currently linked, derived from creations and releases.
    pub fn active_frequency_levels(&self) -> u64 {
        self.buckets_created - self.buckets_released
    }

    /// Share of increments that took the in-place path, or 0.0 before any.
    pub fn in_place_ratio(&self) -> f64 {
        if self.frequency_increments > 0 {
            self.in_place_bumps as f64 / self.frequency_increments as f64
        } else {
            0.0
        }
    }

    /// Converts LFU metrics to a map for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        metrics.insert(
            "frequency_increments".to_string(),
            self.frequency_increments as f64,
        );
        metrics.insert("in_place_bumps".to_string(), self.in_place_bumps as f64);
        metrics.insert("in_place_ratio".to_string(), self.in_place_ratio());
        metrics.insert("buckets_created".to_string(), self.buckets_created as f64);
        metrics.insert("buckets_released".to_string(), self.buckets_released as f64);
        metrics.insert(
            "active_frequency_levels".to_string(),
            self.active_frequency_levels() as f64,
        );
        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);

        metrics
    }
}

impl CacheMetrics for LfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfu_metrics_tracking() {
        let mut metrics = LfuCacheMetrics::new();
        metrics.record_bucket_created();
        metrics.record_frequency_increment(2);
        metrics.record_in_place_bump();
        metrics.record_frequency_increment(3);
        metrics.record_bucket_created();
        metrics.record_bucket_released();

        assert_eq!(metrics.core.cache_hits, 2);
        assert_eq!(metrics.frequency_increments, 2);
        assert_eq!(metrics.max_frequency, 3);
        assert_eq!(metrics.active_frequency_levels(), 1);
        assert_eq!(metrics.in_place_ratio(), 0.5);
    }

    #[test]
    fn test_lfu_metrics_report() {
        let metrics = LfuCacheMetrics::new();
        assert_eq!(metrics.algorithm_name(), "LFU");

        let report = metrics.metrics();
        assert_eq!(report["in_place_ratio"], 0.0);
        assert_eq!(report["active_frequency_levels"], 0.0);
        assert!(report.contains_key("hit_rate"));
    }
}
