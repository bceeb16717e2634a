#![no_std]
extern crate alloc;
extern crate fastlfu;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::num::NonZeroUsize;
use fastlfu::config::LfuCacheConfig;
use fastlfu::metrics::CacheMetrics;
use fastlfu::LfuCache;

fn make_lfu<K: core::hash::Hash + Eq + Clone, V>(cap: usize) -> LfuCache<K, V> {
    let config = LfuCacheConfig {
        capacity: NonZeroUsize::new(cap),
    };
    LfuCache::init(config, None)
}

#[test]
fn test_lfu_in_no_std() {
    let mut cache = make_lfu(2);

    // Using String as it requires the alloc crate
    let key1 = String::from("key1");
    let key2 = String::from("key2");
    let key3 = String::from("key3");

    cache.insert(key1.clone(), 1);
    cache.insert(key2.clone(), 2);

    assert_eq!(*cache.fetch(&key1).unwrap(), 1);
    assert_eq!(*cache.fetch(&key1).unwrap(), 1);
    assert_eq!(*cache.fetch(&key2).unwrap(), 2);

    // key2 has the lower count and makes room for key3
    assert_eq!(cache.insert(key3.clone(), 3), Some((key2.clone(), 2)));
    assert!(cache.contains(&key1));
    assert!(!cache.contains(&key2));
    assert_eq!(cache.frequency(&key3), Some(1));
}

#[test]
fn test_lfu_with_vec_values() {
    let mut cache = make_lfu(3);

    cache.insert(String::from("a"), Vec::from([1, 2, 3]));
    cache.insert(String::from("b"), Vec::from([4, 5, 6]));

    if let Some(values) = cache.fetch_mut("a") {
        values.push(4);
    }
    assert_eq!(cache.peek("a").map(Vec::len), Some(4));
    assert_eq!(cache.frequency("a"), Some(2));
}

#[test]
fn test_evict_and_metrics_in_no_std() {
    let mut cache = make_lfu(8);
    for i in 0..8 {
        cache.insert(format!("key{}", i), i);
    }
    for i in 0..4 {
        cache.fetch(&format!("key{}", i));
    }

    assert_eq!(cache.evict_multiple(4), 4);
    for i in 0..4 {
        assert!(cache.contains(&format!("key{}", i)));
    }

    let metrics = cache.metrics();
    assert_eq!(metrics.get("evictions"), Some(&4.0));
    assert_eq!(cache.algorithm_name(), "LFU");
}
