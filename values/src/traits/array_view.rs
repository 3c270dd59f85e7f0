use crate::array::ArrayValue;
use crate::error::Result;
use crate::key::Key;

/// Read access an expression evaluator needs for indexing and `foreach`.
pub trait ArrayView<V> {
    fn len(&self) -> usize;

    fn lookup(&self, key: &Key) -> Option<&V>;

    /// Entries in iteration order.
    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a Key, &'a V)>
    where
        V: 'a;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write access for assignment, `$a[] = v` and `unset($a[k])`.
pub trait ArrayMut<V>: ArrayView<V> {
    fn assign(&mut self, key: Key, value: V);

    fn push_back(&mut self, value: V) -> Result<i64>;

    fn unset(&mut self, key: &Key) -> Option<V>;
}

impl<V> ArrayView<V> for ArrayValue<V> {
    fn len(&self) -> usize {
        self.count()
    }

    fn lookup(&self, key: &Key) -> Option<&V> {
        self.store().try_get(key)
    }

    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a Key, &'a V)>
    where
        V: 'a,
    {
        self.iter()
    }
}

impl<V: Clone> ArrayMut<V> for ArrayValue<V> {
    fn assign(&mut self, key: Key, value: V) {
        self.set(key, value);
    }

    fn push_back(&mut self, value: V) -> Result<i64> {
        self.append(value)
    }

    fn unset(&mut self, key: &Key) -> Option<V> {
        self.remove_key(key)
    }
}
