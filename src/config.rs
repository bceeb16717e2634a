//! Cache Configuration
//!
//! Configuration for [`LfuCache`](crate::LfuCache). Like the rest of the
//! crate's configuration, it is a plain struct with public fields: build it
//! directly or through the two helper constructors.
//!
//! # Examples
//!
//! ```
//! use fastlfu::config::LfuCacheConfig;
//! use fastlfu::LfuCache;
//! use core::num::NonZeroUsize;
//!
//! // Grows without bound; eviction only happens when the caller asks for it.
//! let config = LfuCacheConfig { capacity: None };
//! let cache: LfuCache<String, i32> = LfuCache::init(config, None);
//! assert_eq!(cache.capacity(), None);
//!
//! // Holds at most 1000 keys; inserting a new key into a full cache
//! // evicts one least frequently used entry first.
//! let config = LfuCacheConfig::bounded(NonZeroUsize::new(1000).unwrap());
//! let cache: LfuCache<String, Vec<u8>> = LfuCache::init(config, None);
//! assert_eq!(cache.capacity().map(NonZeroUsize::get), Some(1000));
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LFU (Least Frequently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of keys, or `None` for an unbounded cache
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct LfuCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    /// `None` disables automatic eviction.
    pub capacity: Option<NonZeroUsize>,
}

impl LfuCacheConfig {
    /// Configuration for a cache with no capacity limit.
    pub const fn unbounded() -> Self {
        Self { capacity: None }
    }

    /// Configuration for a cache holding at most `capacity` keys.
    pub const fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            capacity: Some(capacity),
        }
    }
}

impl fmt::Debug for LfuCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
