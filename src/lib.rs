//! Ordarray - the array value type of a dynamically typed scripting runtime
//!
//! # Overview
//!
//! An array is one ordered table keyed by a mix of integers and strings. It
//! behaves like a value: assigning it produces an independent copy. The copy
//! is deferred until one side writes, so assignment costs a reference-count
//! bump no matter how large the array is.
//!
//! # Quick Start
//!
//! ```
//! use ordarray::{ArrayValue, Convertible, Key, keyed};
//!
//! let mut fruit = keyed!["apple" => 3, "pear" => 5];
//! fruit.append(7).unwrap(); // key 0
//! fruit.set(10, 1);
//! assert_eq!(fruit.append(2), Ok(11));
//!
//! // Assignment shares storage until someone writes.
//! let mut basket = fruit.clone();
//! basket.remove("apple");
//! assert!(fruit.contains("apple"));
//! assert!(!basket.contains("apple"));
//!
//! // Scalar conversions go by element count.
//! assert_eq!(fruit.to_long(), 5);
//! assert!(fruit.to_boolean());
//! assert_eq!(fruit.to_string(), "Array");
//!
//! let keys: Vec<Key> = basket.keys().cloned().collect();
//! assert_eq!(keys, [Key::from("pear"), Key::from(0), Key::from(10), Key::from(11)]);
//! ```
//!
//! # Keys
//!
//! `Key::Int` and `Key::Str` never compare equal, even for `5` and `"5"`.
//! Hosts that want numeric strings to act as integers convert them before
//! calling in.
//!
//! # Errors
//!
//! Only [`ArrayValue::get`] on a missing key, windowed construction past the
//! end of its source and appends after key `i64::MAX` fail. Everything else,
//! including every scalar conversion, is total.

pub use ordarray_values::{
    ArrayMut, ArrayValue, ArrayView, Convertible, Error, GenericObject, Key, KeyAllocator,
    KeyedOrderedStore, MaxKeyPolicy, Number, NumberInfo, Result, TypeCode, array, convert, keyed,
};
