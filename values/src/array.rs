use core::fmt;

use crate::allocator::{KeyAllocator, MaxKeyPolicy};
use crate::cow::Shared;
use crate::error::Result;
use crate::key::Key;
use crate::store::{Iter, KeyedOrderedStore};

/// The host runtime's array: an ordered map from integer or string keys to
/// values, with value semantics.
///
/// Copies are cheap. [`clone_alias`](Self::clone_alias) (and `Clone`) share
/// the backing store with the source; the first mutation through either
/// handle gives that handle a private copy, so neither ever observes the
/// other's writes. Reads never copy.
///
/// `V` is the host's boxed value. Copying a store clones each `V` once, so a
/// `V` that is itself a reference-counted box is shared, not deep-copied.
///
/// # Example
///
/// ```
/// use ordarray_values::ArrayValue;
///
/// let mut a = ArrayValue::new();
/// a.set("a", 1);
/// a.set("b", 2);
///
/// let mut b = a.clone_alias();
/// b.set("c", 3);
///
/// assert_eq!(a.count(), 2);
/// assert_eq!(b.count(), 3);
/// assert_eq!(b.get("c"), Ok(&3));
/// ```
pub struct ArrayValue<V> {
    shared: Shared<V>,
}

static_assertions::assert_not_impl_any!(ArrayValue<i64>: Send, Sync);

impl<V> ArrayValue<V> {
    pub fn new() -> Self {
        Self::from_store(KeyedOrderedStore::new())
    }

    /// Pre-sized array. Both capacities are hints, never limits.
    pub fn with_capacity(int_capacity: usize, string_capacity: usize) -> Self {
        Self::from_store(KeyedOrderedStore::with_capacity(
            int_capacity.saturating_add(string_capacity),
        ))
    }

    /// A new handle sharing `source`'s store.
    ///
    /// With [`MaxKeyPolicy::Preserve`] the new handle keeps `source`'s integer
    /// key maximum when it later splits off. With [`MaxKeyPolicy::Recompute`]
    /// that split derives the maximum from the integer keys it copies, so keys
    /// removed before the split may be handed out again.
    pub fn alias(source: &Self, policy: MaxKeyPolicy) -> Self {
        Self {
            shared: source.shared.alias(policy),
        }
    }

    /// Shallow O(1) copy. The physical copy is deferred to the first write.
    pub fn clone_alias(&self) -> Self {
        Self::alias(self, MaxKeyPolicy::Preserve)
    }

    fn from_store(store: KeyedOrderedStore<V>) -> Self {
        Self {
            shared: Shared::new(store),
        }
    }

    pub(crate) fn store(&self) -> &KeyedOrderedStore<V> {
        self.shared.store()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns [`Error::KeyNotFound`](crate::Error::KeyNotFound) when absent.
    pub fn get(&self, key: impl Into<Key>) -> Result<&V> {
        self.store().get(&key.into())
    }

    pub fn try_get(&self, key: impl Into<Key>) -> Option<&V> {
        self.store().try_get(&key.into())
    }

    pub fn contains(&self, key: impl Into<Key>) -> bool {
        self.store().contains(&key.into())
    }

    pub fn count(&self) -> usize {
        self.store().count()
    }

    pub fn len(&self) -> usize {
        self.count()
    }

    pub fn is_empty(&self) -> bool {
        self.store().is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> Iter<'_, V> {
        self.store().iter()
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Key> + ExactSizeIterator + '_ {
        self.store().keys()
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.store().values()
    }

    pub fn first(&self) -> Option<(&Key, &V)> {
        self.store().first()
    }

    pub fn last(&self) -> Option<(&Key, &V)> {
        self.store().last()
    }

    /// Highest integer key this array's lineage has used, or -1.
    pub fn max_int_key(&self) -> i64 {
        self.store().allocator().max()
    }

    /// The key the next [`append`](Self::append) would use.
    ///
    /// A handle still sharing its store under [`MaxKeyPolicy::Recompute`]
    /// answers for the store its first write will split off.
    pub fn next_key(&self) -> Result<i64> {
        if self.shared.policy() == MaxKeyPolicy::Recompute && !self.shared.is_exclusive() {
            let mut allocator = KeyAllocator::new();
            allocator.recompute(self.keys());
            return allocator.next();
        }
        self.store().allocator().next()
    }

    /// Handles currently sharing this array's store, this one included.
    pub fn sharers(&self) -> usize {
        self.shared.sharers()
    }

    pub fn shares_store_with(&self, other: &Self) -> bool {
        self.shared.ptr_eq(&other.shared)
    }
}

impl<V: Clone> ArrayValue<V> {
    // =========================================================================
    // Construction
    // =========================================================================

    pub fn from_slice(values: &[V]) -> Self {
        Self::from_store(KeyedOrderedStore::from_slice(values))
    }

    pub fn from_slice_window(values: &[V], start: usize, len: usize) -> Result<Self> {
        KeyedOrderedStore::from_slice_window(values, start, len).map(Self::from_store)
    }

    /// Values of the window `start..start + len` for which `keep` holds,
    /// keyed 0, 1, 2, ... in order.
    pub fn from_slice_filtered(
        values: &[V],
        start: usize,
        len: usize,
        keep: impl FnMut(&V) -> bool,
    ) -> Result<Self> {
        KeyedOrderedStore::from_slice_filtered(values, start, len, keep).map(Self::from_store)
    }

    /// Every value `source` yields, appended in order. `None` is an empty
    /// array.
    pub fn from_iterable<I: IntoIterator<Item = V>>(source: Option<I>) -> Self {
        Self::from_store(KeyedOrderedStore::from_iterable(source))
    }

    /// Builds an array from key/value pairs followed by an optional unkeyed
    /// value, the way an `array(k => v, ..., v)` literal does.
    ///
    /// Pairs go through [`set`](Self::set), so a repeated key keeps the
    /// position of its first occurrence and the value of its last.
    pub fn keyed<K: Into<Key>>(
        pairs: impl IntoIterator<Item = (K, V)>,
        trailing: Option<V>,
    ) -> Self {
        let mut array = Self::new();
        for (key, value) in pairs {
            array.set(key, value);
        }
        if let Some(value) = trailing {
            array.push(value);
        }
        array
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Appends under the next free integer key and returns that key.
    pub fn append(&mut self, value: V) -> Result<i64> {
        // Fail before splitting so an error leaves no private copy behind.
        self.next_key()?;
        self.shared.make_mut().append(value)
    }

    /// [`append`](Self::append) for contexts that cannot fail. When the
    /// integer key space is exhausted the value is dropped and a warning
    /// logged.
    pub fn push(&mut self, value: V) {
        if let Err(err) = self.append(value) {
            tracing::warn!(%err, "value not appended");
        }
    }

    /// Inserts or overwrites. Overwriting keeps the entry's position.
    pub fn set(&mut self, key: impl Into<Key>, value: V) {
        self.shared.make_mut().set(key.into(), value);
    }

    /// Mutable access to an existing entry.
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut V> {
        let key = key.into();
        if !self.store().contains(&key) {
            return None;
        }
        self.shared.make_mut().get_mut(&key)
    }

    /// Removes `key` and returns its value. Absent keys are a no-op and never
    /// force a copy.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<V> {
        self.remove_key(&key.into())
    }

    pub(crate) fn remove_key(&mut self, key: &Key) -> Option<V> {
        if !self.store().contains(key) {
            return None;
        }
        self.shared.make_mut().remove(key)
    }

    /// Removes every entry. The integer key maximum is kept.
    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.shared.make_mut().clear();
        }
    }
}

impl<V> Default for ArrayValue<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for ArrayValue<V> {
    fn clone(&self) -> Self {
        self.clone_alias()
    }
}

impl<V: PartialEq> PartialEq for ArrayValue<V> {
    /// Same entries in the same order. Compares element by element even when
    /// both handles share a store, so a `NaN` is unequal to itself here too.
    fn eq(&self, other: &Self) -> bool {
        self.count() == other.count() && self.iter().eq(other.iter())
    }
}

impl<V: fmt::Debug> fmt::Debug for ArrayValue<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "array(length = {}) ", self.count())?;
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> fmt::Display for ArrayValue<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(crate::convert::PRINTABLE_TYPE_NAME)
    }
}

impl<'a, V> IntoIterator for &'a ArrayValue<V> {
    type Item = (&'a Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: Clone> FromIterator<V> for ArrayValue<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::from_iterable(Some(iter))
    }
}

impl<V: Clone> Extend<V> for ArrayValue<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

// =============================================================================
// Literal macros
// =============================================================================

/// Builds an [`ArrayValue`] from unkeyed values, keyed 0, 1, 2, ...
///
/// ```
/// use ordarray_values::array;
///
/// let a = array![10, 20];
/// assert_eq!(a.get(1), Ok(&20));
/// ```
#[macro_export]
macro_rules! array {
    () => {
        $crate::ArrayValue::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::ArrayValue::from_iterable(Some([$($value),+]))
    };
}

/// Builds an [`ArrayValue`] from `key => value` pairs, optionally followed by
/// one unkeyed value.
///
/// ```
/// use ordarray_values::{Key, keyed};
///
/// let a = keyed!["x" => 1, "y" => 2, 99];
/// let keys: Vec<_> = a.keys().cloned().collect();
/// assert_eq!(keys, [Key::from("x"), Key::from("y"), Key::from(0)]);
/// ```
#[macro_export]
macro_rules! keyed {
    (@push $array:ident;) => {};
    (@push $array:ident; $key:expr => $value:expr $(, $($rest:tt)*)?) => {
        $array.set($key, $value);
        $crate::keyed!(@push $array; $($($rest)*)?);
    };
    (@push $array:ident; $value:expr $(,)?) => {
        $array.push($value);
    };
    ($($args:tt)*) => {{
        let mut array = $crate::ArrayValue::new();
        $crate::keyed!(@push array; $($args)*);
        array
    }};
}
