//! Circular frequency list.
//!
//! Buckets are kept in a ring anchored by a sentinel, in strictly ascending
//! order of access count when walked through `next`:
//!
//! ```text
//!          ┌──────────────────────────────────────────────────┐
//!          ▼                                                  │
//!   ┌────────────┐   ┌────────────┐   ┌────────────┐   ┌────────────┐
//!   │  sentinel  │──▶│ count = 1  │──▶│ count = 2  │──▶│ count = 5  │
//!   │ (count 0)  │◀──│ {a, d, e}  │◀──│ {b}        │◀──│ {c}        │
//!   └────────────┘   └────────────┘   └────────────┘   └────────────┘
//!          │                                                  ▲
//!          └──────────────────────────────────────────────────┘
//! ```
//!
//! The sentinel's `next` is always the lowest occupied count and its `prev`
//! the highest. A bucket exists only while it has members; whoever empties
//! one must [`unlink`](FrequencyList::unlink) it straight away. There is no
//! search: callers reach buckets through an item's back-reference or through
//! the sentinel.

extern crate alloc;

use crate::slab::{Slab, SlabId};
use alloc::vec::Vec;

/// Handle to a bucket in a [`FrequencyList`].
pub(crate) type BucketId = SlabId;

/// Handle to an item, owned by the item index. Buckets only store these.
pub(crate) type ItemId = SlabId;

#[derive(Debug, Clone)]
struct Bucket {
    /// Access count shared by every member. Zero only for the sentinel.
    count: usize,
    /// Unordered member set. Items remember their position here so removal
    /// is a swap-remove.
    members: Vec<ItemId>,
    prev: BucketId,
    next: BucketId,
}

/// Ascending ring of frequency buckets.
#[derive(Debug, Clone)]
pub(crate) struct FrequencyList {
    buckets: Slab<Bucket>,
    sentinel: BucketId,
}

impl FrequencyList {
    pub(crate) fn new() -> Self {
        let mut buckets = Slab::new();
        let sentinel = Self::push_sentinel(&mut buckets);
        Self { buckets, sentinel }
    }

    fn push_sentinel(buckets: &mut Slab<Bucket>) -> BucketId {
        let id = buckets.vacant_id();
        buckets.insert(Bucket {
            count: 0,
            members: Vec::new(),
            prev: id,
            next: id,
        })
    }

    /// Drops every bucket, leaving only a fresh sentinel.
    pub(crate) fn clear(&mut self) {
        self.buckets.clear();
        self.sentinel = Self::push_sentinel(&mut self.buckets);
    }

    #[inline]
    pub(crate) fn sentinel(&self) -> BucketId {
        self.sentinel
    }

    #[inline]
    pub(crate) fn is_sentinel(&self, id: BucketId) -> bool {
        id == self.sentinel
    }

    /// Lowest-count bucket, or the sentinel when the list is empty.
    #[inline]
    pub(crate) fn first(&self) -> BucketId {
        self.buckets[self.sentinel].next
    }

    /// Highest-count bucket, or the sentinel when the list is empty.
    #[inline]
    pub(crate) fn last(&self) -> BucketId {
        self.buckets[self.sentinel].prev
    }

    #[inline]
    pub(crate) fn next(&self, id: BucketId) -> BucketId {
        self.buckets[id].next
    }

    #[inline]
    pub(crate) fn count(&self, id: BucketId) -> usize {
        self.buckets[id].count
    }

    /// Number of members in the bucket.
    #[inline]
    pub(crate) fn len(&self, id: BucketId) -> usize {
        self.buckets[id].members.len()
    }

    /// Number of linked buckets, sentinel excluded.
    #[inline]
    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len() - 1
    }

    /// Allocates a bucket for `count` and splices it between `prev` and
    /// `next`, which must be adjacent with `prev.count < count < next.count`
    /// (the sentinel as `next` stands for infinity).
    pub(crate) fn bucket_after(&mut self, prev: BucketId, next: BucketId, count: usize) -> BucketId {
        debug_assert_eq!(self.buckets[prev].next, next);
        debug_assert!(count > 0);
        debug_assert!(self.is_sentinel(prev) || self.buckets[prev].count < count);
        debug_assert!(self.is_sentinel(next) || count < self.buckets[next].count);

        let id = self.buckets.insert(Bucket {
            count,
            members: Vec::new(),
            prev,
            next,
        });
        self.buckets[prev].next = id;
        self.buckets[next].prev = id;
        id
    }

    /// Removes an empty bucket from the ring and frees its slot.
    pub(crate) fn unlink(&mut self, id: BucketId) {
        debug_assert!(!self.is_sentinel(id), "the sentinel is never unlinked");
        debug_assert!(self.buckets[id].members.is_empty());

        let (prev, next) = {
            let bucket = &self.buckets[id];
            (bucket.prev, bucket.next)
        };
        self.buckets[prev].next = next;
        self.buckets[next].prev = prev;
        self.buckets.remove(id);
    }

    /// Raises a sole-occupant bucket's count by one without relinking.
    ///
    /// Valid only when no bucket for `count + 1` follows it; the ring stays
    /// ascending because the successor's count was already above that.
    pub(crate) fn bump(&mut self, id: BucketId) {
        debug_assert!(!self.is_sentinel(id));
        debug_assert_eq!(self.buckets[id].members.len(), 1);

        let next = self.buckets[id].next;
        let count = self.buckets[id].count + 1;
        debug_assert!(self.is_sentinel(next) || self.buckets[next].count > count);
        self.buckets[id].count = count;
    }

    /// Adds `item` to the bucket and returns its position in the member set.
    pub(crate) fn attach(&mut self, id: BucketId, item: ItemId) -> usize {
        debug_assert!(!self.is_sentinel(id), "the sentinel holds no items");
        let members = &mut self.buckets[id].members;
        members.push(item);
        members.len() - 1
    }

    /// Removes the member at `slot`.
    ///
    /// Returns the item that was moved into `slot` to fill the hole, if any;
    /// the caller must update that item's recorded position.
    pub(crate) fn detach(&mut self, id: BucketId, slot: usize) -> Option<ItemId> {
        let members = &mut self.buckets[id].members;
        members.swap_remove(slot);
        members.get(slot).copied()
    }

    #[cfg(any(test, debug_assertions))]
    pub(crate) fn members(&self, id: BucketId) -> &[ItemId] {
        &self.buckets[id].members
    }

    /// Any member of the bucket. Which one is unspecified.
    #[inline]
    pub(crate) fn last_member(&self, id: BucketId) -> Option<ItemId> {
        self.buckets[id].members.last().copied()
    }

    /// Walks the buckets in ascending count order, sentinel excluded.
    pub(crate) fn iter(&self) -> Buckets<'_> {
        Buckets {
            list: self,
            cursor: self.first(),
        }
    }

    /// Checks ordering, non-emptiness and ring consistency, returning the
    /// total member count.
    #[cfg(any(test, debug_assertions))]
    pub(crate) fn validate(&self) -> usize {
        let mut total = 0;
        let mut linked = 0;
        let mut prev = self.sentinel;
        let mut cursor = self.first();
        while !self.is_sentinel(cursor) {
            let bucket = &self.buckets[cursor];
            assert_eq!(bucket.prev, prev, "broken back link");
            assert!(!bucket.members.is_empty(), "empty bucket left linked");
            if !self.is_sentinel(prev) {
                assert!(
                    self.buckets[prev].count < bucket.count,
                    "counts not strictly ascending"
                );
            }
            total += bucket.members.len();
            linked += 1;
            prev = cursor;
            cursor = bucket.next;
        }
        assert_eq!(self.buckets[self.sentinel].prev, prev, "sentinel tail");
        assert!(self.buckets[self.sentinel].members.is_empty());
        assert_eq!(linked, self.bucket_count(), "unreachable buckets");
        total
    }
}

impl Default for FrequencyList {
    fn default() -> Self {
        Self::new()
    }
}

/// Ascending iterator over `(count, members)` of each bucket.
#[derive(Debug)]
pub(crate) struct Buckets<'a> {
    list: &'a FrequencyList,
    cursor: BucketId,
}

impl<'a> Iterator for Buckets<'a> {
    type Item = (usize, &'a [ItemId]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.list.is_sentinel(self.cursor) {
            return None;
        }
        let bucket = &self.list.buckets[self.cursor];
        self.cursor = bucket.next;
        Some((bucket.count, bucket.members.as_slice()))
    }
}
