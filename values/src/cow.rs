//! Copy-on-write sharing of stores.
//!
//! Assigning an array in the host language is frequent and must be cheap, so
//! copies only bump a reference count. The first mutation through a handle
//! whose store is shared splits it off onto a private duplicate. Reads never
//! split.

use alloc::rc::Rc;

use crate::allocator::MaxKeyPolicy;
use crate::store::KeyedOrderedStore;

/// A reference-counted handle to a store, plus the policy for its next split.
///
/// The sharer count is the `Rc` strong count: every live handle to the same
/// store holds exactly one strong reference and nothing holds weak ones.
#[derive(Debug)]
pub struct Shared<V> {
    store: Rc<KeyedOrderedStore<V>>,
    policy: MaxKeyPolicy,
}

impl<V> Shared<V> {
    pub fn new(store: KeyedOrderedStore<V>) -> Self {
        Self {
            store: Rc::new(store),
            policy: MaxKeyPolicy::Preserve,
        }
    }

    /// A second handle onto the same store.
    ///
    /// `policy` only governs the split this new handle performs, if it ever
    /// performs one.
    pub fn alias(&self, policy: MaxKeyPolicy) -> Self {
        Self {
            store: Rc::clone(&self.store),
            policy,
        }
    }

    pub fn store(&self) -> &KeyedOrderedStore<V> {
        &self.store
    }

    /// Number of handles currently aliasing this store, this one included.
    pub fn sharers(&self) -> usize {
        Rc::strong_count(&self.store)
    }

    pub fn is_exclusive(&self) -> bool {
        self.sharers() == 1
    }

    pub fn policy(&self) -> MaxKeyPolicy {
        self.policy
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }
}

impl<V: Clone> Shared<V> {
    /// Exclusive access to the store, splitting it off first if it is shared.
    ///
    /// After a split the old store has one sharer fewer and this handle owns
    /// a fresh store with a sharer count of 1. A pending
    /// [`MaxKeyPolicy::Recompute`] is consumed by the split.
    pub fn make_mut(&mut self) -> &mut KeyedOrderedStore<V> {
        if !self.is_exclusive() {
            let copy = self.store.duplicate(self.policy);
            // Dropping the old `Rc` is what releases our share of it.
            self.store = Rc::new(copy);
            self.policy = MaxKeyPolicy::Preserve;
        }
        Rc::make_mut(&mut self.store)
    }
}
