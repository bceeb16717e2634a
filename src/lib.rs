#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## How It Works
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                              LfuCache                                │
//! │                                                                      │
//! │   index (HashMap)            items (slab)                            │
//! │   ┌──────┬──────┐           ┌──────┬──────────────────────────┐      │
//! │   │ "a"  │ id 0 │──────────▶│ id 0 │ value, bucket: B1, slot 0│      │
//! │   │ "b"  │ id 1 │──────────▶│ id 1 │ value, bucket: B2, slot 0│      │
//! │   │ "c"  │ id 2 │──────────▶│ id 2 │ value, bucket: B1, slot 1│      │
//! │   └──────┴──────┘           └──────┴──────────────────────────┘      │
//! │                                                                      │
//! │   frequency list (slab, circular, ascending)                         │
//! │   ┌──────────┐    ┌────────────┐    ┌────────────┐                   │
//! │   │ sentinel │ ⇄  │ B1 count=1 │ ⇄  │ B2 count=3 │ ⇄ (sentinel)      │
//! │   └──────────┘    │ [id0, id2] │    │ [id1]      │                   │
//! │                   └────────────┘    └────────────┘                   │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Operation        | Cost      | Notes                                        |
//! |------------------|-----------|----------------------------------------------|
//! | `insert`         | O(1)      | New keys start at count 1; updates keep count |
//! | `fetch`          | O(1)      | Count + 1; moves at most one step in the list |
//! | `evict`          | O(1)      | Any key from the lowest-count bucket         |
//! | `evict_multiple` | O(n)      | Drains lowest buckets first                  |
//! | `remove`         | O(1)      | By key                                       |
//! | `len`            | O(1)      |                                              |
//!
//! ## Example
//!
//! ```rust
//! use fastlfu::LfuCache;
//! use core::num::NonZeroUsize;
//!
//! let mut cache = LfuCache::bounded(NonZeroUsize::new(2).unwrap());
//! cache.insert("rare", 1);
//! cache.insert("popular", 2);
//!
//! for _ in 0..10 {
//!     cache.fetch(&"popular");
//! }
//!
//! // "rare" is evicted to make room
//! assert_eq!(cache.insert("new", 3), Some(("rare", 1)));
//! assert_eq!(cache.frequency(&"popular"), Some(11));
//! ```
//!
//! ## Concurrent Access
//!
//! [`LfuCache`] is single-threaded. Wrap it in a lock, or enable the
//! `concurrent` feature for a sharded wrapper:
//!
//! ```toml
//! [dependencies]
//! fastlfu = { version = "0.1", features = ["concurrent"] }
//! ```
//!
//! ## Modules
//!
//! - [`lfu`]: The O(1) LFU cache
//! - [`config`]: Cache configuration
//! - [`metrics`]: Usage counters and reporting
//! - [`concurrent`]: Sharded thread-safe wrapper (requires `concurrent` feature)

#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Slab arena backing buckets and items.
mod slab;

/// Circular, ascending list of frequency buckets.
mod freq_list;

/// Key lookup and item records.
mod index;

/// Cache configuration.
pub mod config;

/// Least Frequently Used (LFU) cache implementation.
///
/// Constant-time insert, fetch and eviction using a frequency-bucket list.
pub mod lfu;

/// Cache metrics system.
///
/// Counters for hits, misses, evictions and frequency-list activity,
/// reported through the [`CacheMetrics`](metrics::CacheMetrics) trait.
pub mod metrics;

/// Sharded thread-safe wrapper around [`LfuCache`].
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use config::LfuCacheConfig;
pub use lfu::LfuCache;
pub use metrics::{CacheMetrics, LfuCacheMetrics};

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLfuCache;
