//! Concurrent Cache Correctness Tests
//!
//! These tests check that the sharded LFU wrapper keeps its eviction
//! semantics and bookkeeping consistent while several threads use it.
//!
//! ## Segments
//!
//! 1. **Algorithm Correctness**: eviction picks low-count keys with many
//!    segments in play
//! 2. **Thread Safety Invariants**: counts and lengths add up after
//!    concurrent access

#![cfg(feature = "concurrent")]

use fastlfu::ConcurrentLfuCache;
use scoped_threadpool::Pool;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

const THREADS: u32 = 4;

// ============================================================================
// SEGMENT 1: ALGORITHM CORRECTNESS UNDER CONCURRENCY
// ============================================================================

#[test]
fn test_concurrent_lfu_evict_takes_lowest_count() {
    let cache: ConcurrentLfuCache<u32, u32> = ConcurrentLfuCache::with_segments(None, 4);

    for i in 0..32 {
        cache.insert(i, i);
    }

    // Every key but the multiples of 8 gets two extra accesses
    let mut pool = Pool::new(THREADS);
    pool.scoped(|scope| {
        for t in 0..THREADS {
            let cache = &cache;
            scope.execute(move || {
                for i in (0..32).filter(|i| i % THREADS == t && i % 8 != 0) {
                    cache.fetch(&i);
                    cache.fetch(&i);
                }
            });
        }
    });

    let mut evicted: Vec<u32> = (0..4).filter_map(|_| cache.evict()).map(|(k, _)| k).collect();
    evicted.sort_unstable();
    assert_eq!(evicted, vec![0, 8, 16, 24]);
    assert_eq!(cache.len(), 28);
}

#[test]
fn test_concurrent_lfu_respects_capacity() {
    let cache: ConcurrentLfuCache<u32, u32> =
        ConcurrentLfuCache::with_segments(NonZeroUsize::new(64), 4);

    let mut pool = Pool::new(THREADS);
    pool.scoped(|scope| {
        for t in 0..THREADS {
            let cache = &cache;
            scope.execute(move || {
                for i in 0..1_000 {
                    cache.insert(t * 1_000 + i, i);
                }
            });
        }
    });

    assert!(cache.len() <= 64, "len {} over capacity", cache.len());
    assert!(!cache.is_empty());
}

// ============================================================================
// SEGMENT 2: THREAD SAFETY INVARIANTS
// ============================================================================

#[test]
fn test_concurrent_fetch_counts_every_access() {
    let cache: ConcurrentLfuCache<String, usize> = ConcurrentLfuCache::unbounded();
    for i in 0..16 {
        cache.insert(format!("key{}", i), i);
    }

    let hits = AtomicUsize::new(0);
    let mut pool = Pool::new(THREADS);
    pool.scoped(|scope| {
        for _ in 0..THREADS {
            let (cache, hits) = (&cache, &hits);
            scope.execute(move || {
                for round in 0..100 {
                    let key = format!("key{}", round % 16);
                    if cache.fetch(&key).is_some() {
                        hits.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
    });

    assert_eq!(hits.load(Ordering::Relaxed), 400);
    let total: usize = (0..16)
        .map(|i| cache.frequency(&format!("key{}", i)).unwrap())
        .sum();
    // 16 insertions at count 1 plus one increment per hit
    assert_eq!(total, 16 + 400);
}

#[test]
fn test_concurrent_remove_and_insert_keep_len_consistent() {
    let cache: ConcurrentLfuCache<u32, u32> = ConcurrentLfuCache::with_segments(None, 8);
    let removed = AtomicUsize::new(0);

    let mut pool = Pool::new(THREADS);
    pool.scoped(|scope| {
        for t in 0..THREADS {
            let (cache, removed) = (&cache, &removed);
            scope.execute(move || {
                let base = t * 500;
                for i in base..base + 500 {
                    cache.insert(i, i);
                }
                for i in (base..base + 500).step_by(2) {
                    if cache.remove(&i).is_some() {
                        removed.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
    });

    assert_eq!(removed.load(Ordering::Relaxed), 1_000);
    assert_eq!(cache.len(), 1_000);
    assert_eq!(cache.fetch_with(&1, |v| v + 1), Some(2));
    assert_eq!(cache.fetch(&0), None);

    cache.clear();
    assert!(cache.is_empty());
}
