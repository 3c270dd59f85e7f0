//! Integer key allocation for unkeyed appends.

use crate::error::{Error, Result};
use crate::key::Key;

/// Tracks the highest integer key a store has ever held.
///
/// The maximum only grows: removing the entry that holds it does not give the
/// key back, so an append after a removal never reuses a key. The one way to
/// lower it is [`KeyAllocator::recompute`], which a duplication performs only
/// when its alias asked for [`MaxKeyPolicy::Recompute`](crate::MaxKeyPolicy).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyAllocator {
    max: i64,
}

impl KeyAllocator {
    pub const fn new() -> Self {
        Self { max: -1 }
    }

    /// Highest integer key seen so far, or -1 when there has been none.
    pub fn max(&self) -> i64 {
        self.max
    }

    /// The key the next unkeyed append will receive.
    pub fn next(&self) -> Result<i64> {
        self.max.checked_add(1).ok_or(Error::KeySpaceExhausted)
    }

    /// Takes the next key and records it as the new maximum.
    pub fn advance(&mut self) -> Result<i64> {
        let key = self.next()?;
        self.max = key;
        Ok(key)
    }

    /// Records an explicitly inserted key.
    pub fn observe(&mut self, key: &Key) {
        if let Key::Int(n) = *key {
            self.max = self.max.max(n);
        }
    }

    /// Resets the maximum to the largest live integer key, floored at -1.
    pub fn recompute<'a>(&mut self, keys: impl IntoIterator<Item = &'a Key>) {
        self.max = keys
            .into_iter()
            .filter_map(Key::as_int)
            .fold(-1, i64::max);
    }
}

/// How a copy-on-write split treats the integer key maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxKeyPolicy {
    /// Copy the maximum as is, so keys removed before the split are never
    /// handed out again.
    #[default]
    Preserve,
    /// Derive the maximum from the integer keys still live at the split.
    Recompute,
}

impl Default for KeyAllocator {
    fn default() -> Self {
        Self::new()
    }
}
