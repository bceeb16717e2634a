//! Item index: key lookup plus the item records themselves.
//!
//! Each key maps to an [`ItemId`] in an arena of [`Item`]s. An item carries
//! the caller's key and value together with a back-reference to the bucket
//! holding it and its position inside that bucket, which is what lets the
//! cache move or drop an entry without searching.

extern crate alloc;

use crate::freq_list::{BucketId, ItemId};
use crate::slab::Slab;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// A cached entry.
#[derive(Debug, Clone)]
pub(crate) struct Item<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// Bucket currently holding this item.
    pub(crate) bucket: BucketId,
    /// Position within the bucket's member set.
    pub(crate) slot: usize,
}

pub(crate) struct ItemIndex<K, V, S> {
    map: HashMap<K, ItemId, S>,
    items: Slab<Item<K, V>>,
}

impl<K, V, S> ItemIndex<K, V, S> {
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}

impl<K, V, S> ItemIndex<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    pub(crate) fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            items: Slab::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<ItemId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).copied()
    }

    #[inline]
    pub(crate) fn item(&self, id: ItemId) -> &Item<K, V> {
        &self.items[id]
    }

    #[inline]
    pub(crate) fn item_mut(&mut self, id: ItemId) -> &mut Item<K, V> {
        &mut self.items[id]
    }

    /// Indexes a new item. The key must not already be present.
    pub(crate) fn insert(&mut self, key: K, value: V, bucket: BucketId, slot: usize) -> ItemId {
        let id = self.items.insert(Item {
            key: key.clone(),
            value,
            bucket,
            slot,
        });
        let previous = self.map.insert(key, id);
        debug_assert!(previous.is_none(), "key indexed twice");
        id
    }

    /// Drops the item from both the map and the arena.
    pub(crate) fn remove(&mut self, id: ItemId) -> Option<Item<K, V>> {
        let item = self.items.remove(id)?;
        self.map.remove(&item.key);
        Some(item)
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.items.clear();
    }

    /// Cross-checks map and arena, returning the number of live items.
    #[cfg(any(test, debug_assertions))]
    pub(crate) fn validate(&self) -> usize {
        assert_eq!(self.map.len(), self.items.len());
        for (id, item) in self.items.iter() {
            assert_eq!(self.map.get(&item.key), Some(&id), "index points elsewhere");
        }
        self.items.len()
    }
}

impl<K, V, S> core::fmt::Debug for ItemIndex<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemIndex")
            .field("len", &self.map.len())
            .finish()
    }
}
