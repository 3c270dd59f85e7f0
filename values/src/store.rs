//! The physical table behind an array.
//!
//! Entries live in a slot list that defines iteration order. A hash index maps
//! each key to its slot. Removal empties the slot in place and iteration
//! skips the hole; once holes outnumber live entries the slot list is compacted
//! and the index rebuilt.
//!
//! ```text
//! slots:  [ (0, a) | (1, b) | _ | ("k", c) | _ ]
//! index:  { 0 -> 0, 1 -> 1, "k" -> 3 }
//! ```

use alloc::vec::Vec;
use core::iter::FusedIterator;
use core::slice;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry as IndexEntry;

use crate::allocator::{KeyAllocator, MaxKeyPolicy};
use crate::error::{Error, Result};
use crate::key::Key;

/// Holes below this count are never worth a compaction pass.
const COMPACT_MIN_HOLES: usize = 16;

type Slot<V> = Option<(Key, V)>;

/// Insertion-ordered key/value table with O(1) lookup and removal.
///
/// This is the unshared storage; value semantics across copies are provided
/// by [`ArrayValue`](crate::ArrayValue).
#[derive(Debug)]
pub struct KeyedOrderedStore<V> {
    slots: Vec<Slot<V>>,
    index: HashMap<Key, usize>,
    allocator: KeyAllocator,
}

impl<V> KeyedOrderedStore<V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            allocator: KeyAllocator::new(),
        }
    }

    /// Pre-sizes the table. The capacity is a hint; the store grows past it.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            allocator: KeyAllocator::new(),
        }
    }

    /// Number of live entries.
    pub fn count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn allocator(&self) -> &KeyAllocator {
        &self.allocator
    }

    // --- Reads ---

    pub fn get(&self, key: &Key) -> Result<&V> {
        self.try_get(key)
            .ok_or_else(|| Error::KeyNotFound(key.clone()))
    }

    pub fn try_get(&self, key: &Key) -> Option<&V> {
        let pos = *self.index.get(key)?;
        self.slots[pos].as_ref().map(|(_, v)| v)
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    /// Entries in insertion order. Each call starts over from the first entry.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.count(),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Key> + ExactSizeIterator + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn first(&self) -> Option<(&Key, &V)> {
        self.iter().next()
    }

    pub fn last(&self) -> Option<(&Key, &V)> {
        self.iter().next_back()
    }

    // --- Mutations ---

    /// Inserts `value` under the next free integer key and returns that key.
    pub fn append(&mut self, value: V) -> Result<i64> {
        // Every live integer key is at or below the maximum, so the key
        // after it is always free.
        let key = self.allocator.advance()?;
        self.push(Key::Int(key), value);
        Ok(key)
    }

    /// Overwrites an existing key in place or appends a new entry at the end.
    pub fn set(&mut self, key: Key, value: V) {
        self.allocator.observe(&key);
        match self.index.entry(key) {
            IndexEntry::Occupied(entry) => {
                if let Some((_, slot)) = &mut self.slots[*entry.get()] {
                    *slot = value;
                }
            }
            IndexEntry::Vacant(entry) => {
                let key = entry.key().clone();
                entry.insert(self.slots.len());
                self.slots.push(Some((key, value)));
            }
        }
    }

    pub(crate) fn get_mut(&mut self, key: &Key) -> Option<&mut V> {
        let pos = *self.index.get(key)?;
        self.slots[pos].as_mut().map(|(_, v)| v)
    }

    /// Removes `key`, returning its value. Absent keys are a no-op.
    ///
    /// The integer key maximum is left untouched.
    pub fn remove(&mut self, key: &Key) -> Option<V> {
        let pos = self.index.remove(key)?;
        let (_, value) = self.slots[pos].take()?;

        // Trailing holes cost nothing to drop, which keeps remove-last O(1).
        while matches!(self.slots.last(), Some(None)) {
            self.slots.pop();
        }

        let holes = self.slots.len() - self.index.len();
        if holes >= COMPACT_MIN_HOLES && holes > self.index.len() {
            self.compact();
        }
        Some(value)
    }

    /// Drops every entry. The integer key maximum survives.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    fn push(&mut self, key: Key, value: V) {
        debug_assert!(!self.index.contains_key(&key), "duplicate key {key}");
        self.index.insert(key.clone(), self.slots.len());
        self.slots.push(Some((key, value)));
    }

    /// Squeezes out holes and rebuilds the index.
    fn compact(&mut self) {
        tracing::trace!(
            live = self.index.len(),
            slots = self.slots.len(),
            "compacting array store"
        );
        self.slots.retain(Option::is_some);
        for (pos, slot) in self.slots.iter().enumerate() {
            if let Some((key, _)) = slot {
                if let Some(entry) = self.index.get_mut(key) {
                    *entry = pos;
                }
            }
        }
    }
}

impl<V: Clone> KeyedOrderedStore<V> {
    /// All of `values`, keyed 0, 1, 2, ...
    pub fn from_slice(values: &[V]) -> Self {
        Self::from_values(values.iter().cloned(), values.len())
    }

    /// `len` values of `values` starting at `start`, keyed from 0.
    pub fn from_slice_window(values: &[V], start: usize, len: usize) -> Result<Self> {
        Ok(Self::from_slice(window(values, start, len)?))
    }

    /// The values of a window that satisfy `keep`, keyed consecutively from 0.
    ///
    /// To skip every occurrence of one value pass `|v| *v != skipped`; to keep
    /// only that value pass `|v| *v == kept`.
    pub fn from_slice_filtered(
        values: &[V],
        start: usize,
        len: usize,
        mut keep: impl FnMut(&V) -> bool,
    ) -> Result<Self> {
        let window = window(values, start, len)?;
        Ok(Self::from_values(
            window.iter().filter(|v| keep(v)).cloned(),
            window.len(),
        ))
    }

    /// Appends everything `source` yields, in order. `None` yields an empty
    /// store.
    pub fn from_iterable<I: IntoIterator<Item = V>>(source: Option<I>) -> Self {
        match source {
            Some(source) => {
                let iter = source.into_iter();
                let hint = iter.size_hint().0;
                Self::from_values(iter, hint)
            }
            None => Self::new(),
        }
    }

    /// Private copy for a copy-on-write split.
    ///
    /// Values are cloned shallowly with `V::clone`. Holes are dropped on the
    /// way, so the copy starts compact.
    pub(crate) fn duplicate(&self, policy: MaxKeyPolicy) -> Self {
        let mut copy = Self::with_capacity(self.count());
        for (key, value) in self.iter() {
            copy.push(key.clone(), value.clone());
        }
        copy.allocator = self.allocator;
        if policy == MaxKeyPolicy::Recompute {
            copy.allocator.recompute(copy.index.keys());
        }
        tracing::trace!(
            entries = copy.count(),
            max_int_key = copy.allocator.max(),
            ?policy,
            "duplicated shared array store"
        );
        copy
    }

    fn from_values(values: impl Iterator<Item = V>, capacity: usize) -> Self {
        let mut store = Self::with_capacity(capacity);
        for value in values {
            let key = Key::from(store.slots.len());
            store.allocator.observe(&key);
            store.push(key, value);
        }
        store
    }
}

impl<V: Clone> Clone for KeyedOrderedStore<V> {
    fn clone(&self) -> Self {
        self.duplicate(MaxKeyPolicy::Preserve)
    }
}

impl<V> Default for KeyedOrderedStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn window<V>(values: &[V], start: usize, len: usize) -> Result<&[V]> {
    start
        .checked_add(len)
        .and_then(|end| values.get(start..end))
        .ok_or(Error::WindowOutOfBounds {
            start,
            len,
            available: values.len(),
        })
}

// =============================================================================
// Iteration
// =============================================================================

/// Borrowing iterator over a store's entries in insertion order.
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    slots: slice::Iter<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.slots.find_map(Option::as_ref)?;
        self.remaining -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let (key, value) = self.slots.rfind(|slot| slot.is_some())?.as_ref()?;
        self.remaining -= 1;
        Some((key, value))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}
