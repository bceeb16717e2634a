//! Sharded Concurrent LFU Cache
//!
//! [`LfuCache`] itself takes no locks. `ConcurrentLfuCache` is the external
//! sharding discipline packaged up: keys are hashed onto independent
//! segments, each an `LfuCache` behind its own `parking_lot::Mutex`.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    ConcurrentLfuCache                        │
//! │                                                              │
//! │  hash(key) % N  ──▶  segment                                 │
//! │                                                              │
//! │  ┌────────────┐ ┌────────────┐       ┌────────────┐          │
//! │  │ Mutex      │ │ Mutex      │  ...  │ Mutex      │          │
//! │  │  LfuCache  │ │  LfuCache  │       │  LfuCache  │          │
//! │  └────────────┘ └────────────┘       └────────────┘          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `Mutex` rather than an `RwLock`: a fetch changes the frequency list, so
//! every operation needs exclusive access to its segment anyway.
//!
//! Access counts are tracked per segment. Capacity-driven eviction happens
//! inside the segment the new key hashes to, so the victim is the least
//! frequently used key of that segment, not necessarily of the whole cache.
//! [`evict`](ConcurrentLfuCache::evict) does look across all segments.
//!
//! # Example
//!
//! ```rust
//! use fastlfu::ConcurrentLfuCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentLfuCache::unbounded());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 let key = format!("key-{}-{}", t, i);
//!                 cache.insert(key.clone(), i);
//!                 assert_eq!(cache.fetch(&key), Some(i));
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for h in handles {
//!     h.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! ```

extern crate alloc;

use crate::config::LfuCacheConfig;
use crate::lfu::LfuCache;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// Returns the default number of segments.
#[inline]
pub fn default_segment_count() -> usize {
    16
}

/// A thread-safe LFU cache built from independently locked segments.
pub struct ConcurrentLfuCache<K, V, S = DefaultHashBuilder> {
    segments: Box<[Mutex<LfuCache<K, V, S>>]>,
    hash_builder: S,
}

impl<K, V> ConcurrentLfuCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
{
    /// Creates a bounded cache with the default segment count, or one
    /// segment per entry when `capacity` is smaller than that.
    pub fn new(capacity: NonZeroUsize) -> Self {
        let segment_count = default_segment_count().min(capacity.get());
        Self::with_segments(Some(capacity), segment_count)
    }

    /// Creates an unbounded cache with the default segment count.
    pub fn unbounded() -> Self {
        Self::with_segments(None, default_segment_count())
    }

    /// Creates a cache with `segment_count` segments. A total `capacity` is
    /// split evenly across them.
    ///
    /// # Panics
    ///
    /// Panics if `segment_count` is zero or exceeds `capacity`.
    pub fn with_segments(capacity: Option<NonZeroUsize>, segment_count: usize) -> Self {
        Self::with_segments_and_hasher(capacity, segment_count, DefaultHashBuilder::default())
    }
}

impl<K, V, S> ConcurrentLfuCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    /// Creates a cache with a custom hasher, shared by the segment selector
    /// and every segment.
    pub fn with_segments_and_hasher(
        capacity: Option<NonZeroUsize>,
        segment_count: usize,
        hash_builder: S,
    ) -> Self {
        assert!(segment_count > 0, "segment_count must be greater than 0");

        let per_segment = capacity.map(|cap| {
            assert!(
                cap.get() >= segment_count,
                "capacity must be >= segment_count"
            );
            // cap >= segment_count > 0, so the quotient is at least 1
            NonZeroUsize::new(cap.get() / segment_count).unwrap_or(NonZeroUsize::MIN)
        });
        let config = LfuCacheConfig {
            capacity: per_segment,
        };

        let segments: Vec<_> = (0..segment_count)
            .map(|_| Mutex::new(LfuCache::with_hasher(config, hash_builder.clone())))
            .collect();

        Self {
            segments: segments.into_boxed_slice(),
            hash_builder,
        }
    }

    #[inline]
    fn segment_index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hash_builder.hash_one(key) as usize) % self.segments.len()
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total number of keys across all segments.
    ///
    /// Segments are locked one at a time, so under concurrent writes the
    /// result is approximate.
    pub fn len(&self) -> usize {
        self.segments.iter().map(|s| s.lock().len()).sum()
    }

    /// Returns `true` if no segment holds a key.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.lock().is_empty())
    }

    /// Inserts into the key's segment. See [`LfuCache::insert`].
    pub fn insert(&self, key: K, value: V) -> Option<(K, V)> {
        let idx = self.segment_index(&key);
        self.segments[idx].lock().insert(key, value)
    }

    /// Fetches a clone of the value and counts the access.
    pub fn fetch<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.fetch_with(key, V::clone)
    }

    /// Counts the access and runs `f` on the value while the segment lock is
    /// held.
    pub fn fetch_with<Q, R, F>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        let idx = self.segment_index(key);
        let mut segment = self.segments[idx].lock();
        let value = segment.fetch(key)?;
        Some(f(value))
    }

    /// Current access count of `key`.
    pub fn frequency<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.segment_index(key);
        self.segments[idx].lock().frequency(key)
    }

    /// Removes `key`, returning its value.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.segment_index(key);
        self.segments[idx].lock().remove(key)
    }

    /// Evicts one entry from the segment whose lowest access count is the
    /// smallest overall. Costs one lock per segment.
    pub fn evict(&self) -> Option<(K, V)> {
        loop {
            let candidate = self
                .segments
                .iter()
                .enumerate()
                .filter_map(|(idx, s)| s.lock().min_frequency().map(|f| (f, idx)))
                .min()?;
            // Another thread may have drained the segment in the meantime.
            if let Some(evicted) = self.segments[candidate.1].lock().evict() {
                return Some(evicted);
            }
        }
    }

    /// Removes every entry from every segment.
    pub fn clear(&self) {
        for segment in self.segments.iter() {
            segment.lock().clear();
        }
    }
}

impl<K, V, S> core::fmt::Debug for ConcurrentLfuCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConcurrentLfuCache")
            .field("segment_count", &self.segments.len())
            .finish()
    }
}
