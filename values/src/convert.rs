//! Scalar coercions queried by the host's conversion machinery.
//!
//! Every conversion here is total. An array converts to a number as its
//! element count, to a boolean as "is non-empty", and to a string as the
//! literal `Array` regardless of its contents.

use alloc::vec::Vec;

use ecow::EcoString;

use crate::array::ArrayValue;

/// Name reported by type-introspection functions.
pub const TYPE_NAME: &str = "array";

/// What an array looks like when printed or converted to a string.
pub const PRINTABLE_TYPE_NAME: &str = "Array";

/// Host runtime type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    Null,
    Boolean,
    Long,
    Double,
    String,
    Array,
    Object,
}

/// Numeric result of a coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Long(i64),
    Double(f64),
}

bitflags::bitflags! {
    /// Describes where a [`Number`] came from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NumberInfo: u8 {
        const LONG_INTEGER = 1 << 0;
        const DOUBLE = 1 << 1;
        /// The source was fully numeric (no trailing garbage).
        const IS_NUMERIC = 1 << 2;
        /// The number is an array's element count.
        const IS_ARRAY = 1 << 3;
    }
}

/// An untyped object with named, ordered fields.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericObject<V> {
    fields: Vec<(EcoString, V)>,
}

impl<V> GenericObject<V> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, v)| v)
    }

    pub fn set(&mut self, name: impl Into<EcoString>, value: V) {
        let name = name.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }
}

impl<V> Default for GenericObject<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Conversions from a runtime value to the host's scalar types.
pub trait Convertible {
    type Object;

    fn type_code(&self) -> TypeCode;

    fn to_double(&self) -> f64;

    fn to_long(&self) -> i64;

    fn to_boolean(&self) -> bool;

    fn to_number(&self) -> (Number, NumberInfo);

    fn to_text(&self) -> EcoString;

    /// Like [`Convertible::to_text`], for contexts where the host reports
    /// lossy conversions.
    fn to_text_or_notice(&self) -> EcoString {
        self.to_text()
    }

    fn to_object(&self) -> Self::Object;
}

impl<V> Convertible for ArrayValue<V> {
    type Object = GenericObject<V>;

    fn type_code(&self) -> TypeCode {
        TypeCode::Array
    }

    fn to_double(&self) -> f64 {
        self.count() as f64
    }

    fn to_long(&self) -> i64 {
        i64::try_from(self.count()).unwrap_or(i64::MAX)
    }

    fn to_boolean(&self) -> bool {
        self.count() != 0
    }

    fn to_number(&self) -> (Number, NumberInfo) {
        (
            Number::Long(self.to_long()),
            NumberInfo::IS_ARRAY | NumberInfo::LONG_INTEGER,
        )
    }

    fn to_text(&self) -> EcoString {
        EcoString::from(PRINTABLE_TYPE_NAME)
    }

    fn to_text_or_notice(&self) -> EcoString {
        tracing::warn!(count = self.count(), "Array to string conversion");
        self.to_text()
    }

    /// Always an empty object; the array's entries are not copied into fields.
    fn to_object(&self) -> GenericObject<V> {
        GenericObject::new()
    }
}
