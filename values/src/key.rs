//! Array keys.
//!
//! An array is indexed by a mix of integers and strings living in the same
//! ordered table. The two kinds never compare equal to each other: the string
//! `"5"` and the integer `5` are different keys. Turning numeric strings into
//! integers is the job of whoever produces the key, not of this type.

use alloc::string::String;
use core::fmt;

use ecow::EcoString;

/// A key in an [`ArrayValue`](crate::ArrayValue).
///
/// Ordering and equality look at the tag first and the payload second, so
/// every `Int` sorts before every `Str`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Int(i64),
    Str(EcoString),
}

static_assertions::assert_impl_all!(Key: Send, Sync);

impl Key {
    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(n) => Some(*n),
            Key::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Str(s) => Some(s.as_str()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(value.into())
    }
}

impl From<u32> for Key {
    fn from(value: u32) -> Self {
        Key::Int(value.into())
    }
}

impl From<usize> for Key {
    /// Indices past `i64::MAX` saturate.
    fn from(value: usize) -> Self {
        Key::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.into())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value.into())
    }
}

impl From<EcoString> for Key {
    fn from(value: EcoString) -> Self {
        Key::Str(value)
    }
}

impl From<char> for Key {
    fn from(value: char) -> Self {
        Key::Str(EcoString::from(&*value.encode_utf8(&mut [0; 4])))
    }
}
