//! Least Frequently Used Cache Implementation.
//!
//! Evicts the entry with the lowest access count, in constant time. Keys
//! sharing an access count live together in a frequency bucket, and the
//! buckets form a sentinel-anchored ring in ascending count order:
//!
//! ```text
//!   index: key ──▶ item { value, bucket, slot }
//!                              │
//!                              ▼
//!   sentinel ⇄ [1: a d e] ⇄ [2: b] ⇄ [5: c] ⇄ (back to sentinel)
//!      ▲
//!      └── sentinel.next is always the eviction bucket
//! ```
//!
//! A fetch moves the key from its bucket to the one for `count + 1`, which is
//! either the immediate successor or a new bucket spliced in right after the
//! current one. When the key is alone in its bucket and no `count + 1` bucket
//! exists, the bucket's count is simply raised in place. Eviction takes any
//! key from the sentinel's successor. Buckets that empty are unlinked at once,
//! so every step is O(1) and nothing ever scans the list.
//!
//! Inserting a key is not an access: new keys start at count 1, and
//! re-inserting an existing key replaces its value but keeps its count.

extern crate alloc;

use crate::config::LfuCacheConfig;
use crate::freq_list::{BucketId, FrequencyList, ItemId};
use crate::index::{Item, ItemIndex};
use crate::metrics::{CacheMetrics, LfuCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// Upper bound on the slots reserved when a bounded cache is built.
const MAX_INITIAL_RESERVE: usize = 1024;

/// An O(1) Least Frequently Used (LFU) cache.
///
/// Every successful [`fetch`](Self::fetch) raises the key's access count by
/// one. [`evict`](Self::evict) removes a key with the lowest count; when
/// several keys share that count, which of them goes is unspecified. A
/// bounded cache evicts one entry on its own before admitting a new key.
///
/// The cache is a plain single-threaded value. Share it behind a lock, or
/// use [`ConcurrentLfuCache`](crate::ConcurrentLfuCache) with the
/// `concurrent` feature.
///
/// # Examples
///
/// ```
/// use fastlfu::LfuCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LfuCache::bounded(NonZeroUsize::new(3).unwrap());
///
/// cache.insert("a", 1);
/// cache.insert("b", 2);
/// cache.insert("c", 3);
///
/// // Raise the access counts of "a" and "c"
/// assert_eq!(cache.fetch(&"a"), Some(&1));
/// assert_eq!(cache.fetch(&"c"), Some(&3));
///
/// // The cache is full: "b" has the lowest count and makes room for "d"
/// assert_eq!(cache.insert("d", 4), Some(("b", 2)));
/// assert!(!cache.contains(&"b"));
/// assert_eq!(cache.len(), 3);
/// ```
pub struct LfuCache<K, V, S = DefaultHashBuilder> {
    config: LfuCacheConfig,
    list: FrequencyList,
    index: ItemIndex<K, V, S>,
    metrics: LfuCacheMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Creates an unbounded cache.
    ///
    /// # Examples
    ///
    /// ```
    /// use fastlfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new();
    /// for i in 0..10_000 {
    ///     cache.insert(i, i);
    /// }
    /// assert_eq!(cache.len(), 10_000);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(LfuCacheConfig::unbounded(), DefaultHashBuilder::default())
    }

    /// Creates a cache that never holds more than `capacity` keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use fastlfu::LfuCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let cache: LfuCache<&str, u32> = LfuCache::bounded(NonZeroUsize::new(10).unwrap());
    /// assert_eq!(cache.capacity(), NonZeroUsize::new(10));
    /// ```
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self::with_hasher(
            LfuCacheConfig::bounded(capacity),
            DefaultHashBuilder::default(),
        )
    }
}

impl<K, V> Default for LfuCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> LfuCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    /// Creates a cache from a configuration, optionally with a custom hasher.
    ///
    /// # Examples
    ///
    /// ```
    /// use fastlfu::config::LfuCacheConfig;
    /// use fastlfu::LfuCache;
    /// use core::num::NonZeroUsize;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let config = LfuCacheConfig::bounded(NonZeroUsize::new(100).unwrap());
    /// let cache: LfuCache<String, i32> = LfuCache::init(config, None);
    /// assert!(cache.is_empty());
    ///
    /// let cache: LfuCache<String, i32, RandomState> =
    ///     LfuCache::init(config, Some(RandomState::new()));
    /// assert!(cache.is_empty());
    /// ```
    pub fn init(config: LfuCacheConfig, hasher: Option<S>) -> Self {
        Self::with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K, V, S> LfuCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Creates a cache from a configuration and hash builder.
    pub fn with_hasher(config: LfuCacheConfig, hash_builder: S) -> Self {
        // Large bounds grow on demand instead of reserving everything now.
        let reserve = config
            .capacity
            .map_or(0, |cap| cap.get().min(MAX_INITIAL_RESERVE));
        LfuCache {
            config,
            list: FrequencyList::new(),
            index: ItemIndex::with_capacity_and_hasher(reserve, hash_builder),
            metrics: LfuCacheMetrics::new(),
        }
    }

    /// Returns the capacity limit, or `None` for an unbounded cache.
    #[inline]
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.config.capacity
    }

    /// Returns the number of keys in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the cache holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.len() == 0
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.config
            .capacity
            .is_some_and(|cap| self.index.len() >= cap.get())
    }

    /// Returns the collected metrics.
    #[inline]
    pub fn lfu_metrics(&self) -> &LfuCacheMetrics {
        &self.metrics
    }

    /// Associates `key` with `value`.
    ///
    /// If the key is already cached, only its value changes; its access count
    /// and bucket stay as they are, and the replaced pair is returned.
    /// Otherwise the key enters at count 1. If the cache is bounded and full,
    /// one least frequently used entry is evicted first and returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(id) = self.index.find(&key) {
            let old = mem::replace(&mut self.index.item_mut(id).value, value);
            self.metrics.core.record_update();
            return Some((key, old));
        }

        let evicted = if self.is_full() { self.evict() } else { None };

        let sentinel = self.list.sentinel();
        let first = self.list.first();
        let bucket = if !self.list.is_sentinel(first) && self.list.count(first) == 1 {
            first
        } else {
            self.metrics.record_bucket_created();
            self.list.bucket_after(sentinel, first, 1)
        };

        let slot = self.list.len(bucket);
        let id = self.index.insert(key, value, bucket, slot);
        let attached = self.list.attach(bucket, id);
        debug_assert_eq!(attached, slot);

        self.metrics.core.record_insertion();
        evicted
    }

    /// Returns a reference to the value for `key` and counts the access.
    ///
    /// The key may be any borrowed form of the cache's key type, but
    /// [`Hash`] and [`Eq`] on the borrowed form *must* match those for
    /// the key type. A miss changes nothing but the miss counter.
    pub fn fetch<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.touch(key)?;
        Some(&self.index.item(id).value)
    }

    /// Returns a mutable reference to the value for `key` and counts the
    /// access.
    pub fn fetch_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.touch(key)?;
        Some(&mut self.index.item_mut(id).value)
    }

    /// Returns the value for `key` without counting an access.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.index.find(key)?;
        Some(&self.index.item(id).value)
    }

    /// Returns `true` if `key` is cached. Does not count an access.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.find(key).is_some()
    }

    /// Returns the access count of `key`: 1 right after insertion, plus one
    /// per successful fetch since.
    pub fn frequency<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.index.find(key)?;
        Some(self.list.count(self.index.item(id).bucket))
    }

    /// Returns the lowest access count present, i.e. the count of the next
    /// eviction victim.
    pub fn min_frequency(&self) -> Option<usize> {
        let first = self.list.first();
        (!self.list.is_sentinel(first)).then(|| self.list.count(first))
    }

    /// Returns the highest access count present.
    pub fn max_frequency(&self) -> Option<usize> {
        let last = self.list.last();
        (!self.list.is_sentinel(last)).then(|| self.list.count(last))
    }

    /// Iterates `(access count, number of keys)` per bucket, lowest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use fastlfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new();
    /// cache.insert("a", 1);
    /// cache.insert("b", 2);
    /// cache.insert("c", 3);
    /// cache.fetch(&"c");
    /// cache.fetch(&"c");
    ///
    /// let levels: Vec<_> = cache.frequencies().collect();
    /// assert_eq!(levels, vec![(1, 2), (3, 1)]);
    /// ```
    pub fn frequencies(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.list
            .iter()
            .map(|(count, members)| (count, members.len()))
    }

    /// Removes and returns one entry with the lowest access count.
    ///
    /// Returns `None`, changing nothing, if the cache is empty. Among keys
    /// sharing the lowest count the choice is unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use fastlfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new();
    /// cache.insert("a", 1);
    /// cache.insert("b", 2);
    /// cache.fetch(&"b");
    ///
    /// assert_eq!(cache.evict(), Some(("a", 1)));
    /// assert_eq!(cache.evict(), Some(("b", 2)));
    /// assert_eq!(cache.evict(), None);
    /// ```
    pub fn evict(&mut self) -> Option<(K, V)> {
        let lowest = self.list.first();
        if self.list.is_sentinel(lowest) {
            return None;
        }
        self.evict_from(lowest)
    }

    /// Evicts up to `n` entries, lowest access counts first, and returns how
    /// many were evicted. Fewer than `n` means the cache is now empty.
    pub fn evict_multiple(&mut self, n: usize) -> usize {
        let mut evicted = 0;
        while evicted < n {
            let lowest = self.list.first();
            if self.list.is_sentinel(lowest) {
                break;
            }
            // Drain this bucket before looking at the sentinel again; the
            // last eviction from it unlinks it.
            let batch = self.list.len(lowest).min(n - evicted);
            for _ in 0..batch {
                if self.evict_from(lowest).is_none() {
                    return evicted;
                }
                evicted += 1;
            }
        }
        evicted
    }

    /// Removes `key`, returning its value if it was cached.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.index.find(key)?;
        let item = self.take(id)?;
        self.metrics.core.record_removal();
        Some(item.value)
    }

    /// Removes every entry. Metrics are kept.
    pub fn clear(&mut self) {
        self.metrics.buckets_released += self.list.bucket_count() as u64;
        self.list.clear();
        self.index.clear();
    }

    /// Looks up `key` and moves it one count up the frequency list.
    fn touch<Q>(&mut self, key: &Q) -> Option<ItemId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(id) = self.index.find(key) else {
            self.metrics.core.record_miss();
            return None;
        };

        let (cur, slot) = {
            let item = self.index.item(id);
            (item.bucket, item.slot)
        };
        let nxt = self.list.next(cur);
        let target = self.list.count(cur) + 1;
        let successor_fits = !self.list.is_sentinel(nxt) && self.list.count(nxt) == target;
        self.metrics.record_frequency_increment(target);

        if self.list.len(cur) == 1 && !successor_fits {
            self.list.bump(cur);
            self.metrics.record_in_place_bump();
            return Some(id);
        }

        let dest = if successor_fits {
            nxt
        } else {
            self.metrics.record_bucket_created();
            self.list.bucket_after(cur, nxt, target)
        };
        let new_slot = self.list.attach(dest, id);
        let item = self.index.item_mut(id);
        item.bucket = dest;
        item.slot = new_slot;

        self.release(cur, slot);
        Some(id)
    }

    /// Evicts one member of `bucket`, which must be linked and non-empty.
    fn evict_from(&mut self, bucket: BucketId) -> Option<(K, V)> {
        let victim = self.list.last_member(bucket)?;
        let item = self.take(victim)?;
        self.metrics.core.record_eviction();
        Some((item.key, item.value))
    }

    /// Detaches the item from its bucket and drops it from the index.
    fn take(&mut self, id: ItemId) -> Option<Item<K, V>> {
        let (bucket, slot) = {
            let item = self.index.item(id);
            (item.bucket, item.slot)
        };
        self.release(bucket, slot);
        self.index.remove(id)
    }

    /// Vacates `slot` in `bucket`, fixing up whichever item was moved into
    /// the hole, and unlinks the bucket if nothing is left in it.
    fn release(&mut self, bucket: BucketId, slot: usize) {
        if let Some(moved) = self.list.detach(bucket, slot) {
            self.index.item_mut(moved).slot = slot;
        }
        if self.list.len(bucket) == 0 {
            self.list.unlink(bucket);
            self.metrics.record_bucket_released();
        }
    }

    /// Panics if any structural invariant is broken: ascending non-empty
    /// buckets, item back-references agreeing with bucket membership, and
    /// `len()` matching the total bucket population.
    #[cfg(any(test, debug_assertions))]
    pub fn validate_invariants(&self) {
        let population = self.list.validate();
        let indexed = self.index.validate();
        assert_eq!(population, indexed, "bucket population differs from index");
        assert_eq!(indexed, self.len());

        let mut cursor = self.list.first();
        while !self.list.is_sentinel(cursor) {
            for (slot, &id) in self.list.members(cursor).iter().enumerate() {
                let item = self.index.item(id);
                assert_eq!(item.bucket, cursor, "item points at the wrong bucket");
                assert_eq!(item.slot, slot, "item slot out of date");
            }
            cursor = self.list.next(cursor);
        }

        if let Some(cap) = self.config.capacity {
            assert!(self.len() <= cap.get(), "over capacity");
        }
    }
}

impl<K, V, S> core::fmt::Debug for LfuCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LfuCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.index.len())
            .field("buckets", &self.list.bucket_count())
            .finish()
    }
}

impl<K, V, S> CacheMetrics for LfuCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}
