//! Errors raised by array operations.
//!
//! Every failing operation leaves the array exactly as it was before the call.

use thiserror::Error;

use crate::key::Key;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `get` on a key the array does not hold. `try_get` reports the same
    /// condition as `None` instead.
    #[error("undefined array key \"{0}\"")]
    KeyNotFound(Key),

    /// A windowed construction asked for elements past the end of its source.
    #[error("window {start}..{start}+{len} exceeds source of length {available}")]
    WindowOutOfBounds {
        start: usize,
        len: usize,
        available: usize,
    },

    /// An unkeyed append after `i64::MAX` has already been used as a key.
    #[error("cannot add element to the array as the next element is already occupied")]
    KeySpaceExhausted,
}

pub type Result<T> = core::result::Result<T, Error>;
