//! Dense enumerable id set with O(1) insert, remove and lookup.
//!
//! Ids live contiguously in a vector; a side map records each id's slot.
//! Removal swaps the last id into the vacated slot, so enumeration order is
//! not stable across removals.

use std::collections::HashMap;
use std::hash::Hash;

/// Arena-style index over ids.
#[derive(Debug, Clone)]
pub struct IdIndex<K> {
    ids: Vec<K>,
    slots: HashMap<K, usize>,
}

impl<K: Copy + Eq + Hash> IdIndex<K> {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Create an empty index with room for `capacity` ids.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// Insert an id. Returns false if it was already present.
    pub fn insert(&mut self, id: K) -> bool {
        if self.slots.contains_key(&id) {
            return false;
        }
        self.slots.insert(id, self.ids.len());
        self.ids.push(id);
        true
    }

    /// Remove an id. Returns false if it was not present.
    pub fn remove(&mut self, id: &K) -> bool {
        let Some(slot) = self.slots.remove(id) else {
            return false;
        };
        self.ids.swap_remove(slot);
        if let Some(moved) = self.ids.get(slot) {
            self.slots.insert(*moved, slot);
        }
        true
    }

    #[must_use]
    pub fn contains(&self, id: &K) -> bool {
        self.slots.contains_key(id)
    }

    /// All ids, in unspecified order.
    #[must_use]
    pub fn values(&self) -> &[K] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<K: Copy + Eq + Hash> Default for IdIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(index: &IdIndex<u32>) {
        assert_eq!(index.ids.len(), index.slots.len());
        for (slot, id) in index.ids.iter().enumerate() {
            assert_eq!(index.slots.get(id), Some(&slot));
        }
    }

    #[test]
    fn insert_is_idempotent() {
        let mut index = IdIndex::new();
        assert!(index.insert(1u32));
        assert!(!index.insert(1));
        assert_eq!(index.len(), 1);
        assert_consistent(&index);
    }

    #[test]
    fn remove_swaps_last_into_hole() {
        let mut index = IdIndex::new();
        for id in [10u32, 20, 30, 40] {
            index.insert(id);
        }

        assert!(index.remove(&20));

        assert_eq!(index.values(), &[10, 40, 30]);
        assert!(!index.contains(&20));
        assert_consistent(&index);
    }

    #[test]
    fn remove_last_and_missing() {
        let mut index = IdIndex::new();
        index.insert(1u32);
        index.insert(2);

        assert!(index.remove(&2));
        assert!(!index.remove(&2));
        assert!(!index.remove(&99));
        assert_eq!(index.values(), &[1]);
        assert_consistent(&index);
    }

    #[test]
    fn drain_to_empty_then_reuse() {
        let mut index = IdIndex::with_capacity(4);
        for id in 0u32..4 {
            index.insert(id);
        }
        for id in [3u32, 0, 2, 1] {
            assert!(index.remove(&id));
            assert_consistent(&index);
        }
        assert!(index.is_empty());

        assert!(index.insert(3));
        assert_eq!(index.values(), &[3]);
    }
}
