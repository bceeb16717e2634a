//! Slab arena with stable integer handles.
//!
//! Buckets and items are stored here instead of behind raw pointers. A
//! [`SlabId`] stays valid until the slot is removed; freed slots are reused
//! in LIFO order so steady-state churn does not grow the backing vector.

extern crate alloc;

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

/// Handle to a live slot in a [`Slab`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlabId(usize);

impl SlabId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Vector-backed arena with a free list.
#[derive(Debug, Clone)]
pub(crate) struct Slab<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> Slab<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Stores `value` and returns its handle.
    pub(crate) fn insert(&mut self, value: T) -> SlabId {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(value);
                idx
            }
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            }
        };
        self.len += 1;
        SlabId(idx)
    }

    /// Handle the next [`insert`](Self::insert) will return.
    pub(crate) fn vacant_id(&self) -> SlabId {
        SlabId(self.free.last().copied().unwrap_or(self.slots.len()))
    }

    /// Frees the slot and hands back its value.
    pub(crate) fn remove(&mut self, id: SlabId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(value)
    }

    #[inline]
    pub(crate) fn get(&self, id: SlabId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: SlabId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }

    /// Iterates live slots in slot order.
    #[cfg(any(test, debug_assertions))]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (SlabId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|value| (SlabId(idx), value)))
    }
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Handles are only minted by the owning structure, so a dead handle here is a
// broken invariant rather than bad caller input.
impl<T> Index<SlabId> for Slab<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: SlabId) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => unreachable!("stale slab handle {}", id.index()),
        }
    }
}

impl<T> IndexMut<SlabId> for Slab<T> {
    #[inline]
    fn index_mut(&mut self, id: SlabId) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => unreachable!("stale slab handle {}", id.index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let mut slab = Slab::new();
        let a = slab.insert("a");
        let b = slab.insert("b");
        assert_eq!(slab.len(), 2);
        assert_eq!(slab.get(a), Some(&"a"));
        assert_eq!(slab[b], "b");

        assert_eq!(slab.remove(a), Some("a"));
        assert_eq!(slab.remove(a), None);
        assert_eq!(slab.get(a), None);
        assert_eq!(slab.len(), 1);
    }

    #[test]
    fn test_freed_slot_is_reused() {
        let mut slab = Slab::with_capacity(4);
        let a = slab.insert(1);
        let _b = slab.insert(2);
        slab.remove(a);
        assert_eq!(slab.vacant_id(), a);
        let c = slab.insert(3);
        assert_eq!(c.index(), a.index());
        assert_eq!(slab[c], 3);
    }

    #[test]
    fn test_clear_and_iter() {
        let mut slab = Slab::new();
        let a = slab.insert(10);
        let b = slab.insert(20);
        let c = slab.insert(30);
        slab.remove(b);

        let live: alloc::vec::Vec<_> = slab.iter().map(|(id, v)| (id, *v)).collect();
        assert_eq!(live, alloc::vec![(a, 10), (c, 30)]);

        slab.clear();
        assert_eq!(slab.len(), 0);
        assert_eq!(slab.iter().count(), 0);
    }
}
