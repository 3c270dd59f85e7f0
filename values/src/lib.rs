#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod allocator;
pub mod array;
pub mod convert;
pub mod cow;
pub mod error;
pub mod key;
pub mod store;
pub mod traits;

pub use allocator::{KeyAllocator, MaxKeyPolicy};
pub use array::ArrayValue;
pub use convert::{Convertible, GenericObject, Number, NumberInfo, TypeCode};
pub use error::{Error, Result};
pub use key::Key;
pub use store::KeyedOrderedStore;
pub use traits::{ArrayMut, ArrayView};
