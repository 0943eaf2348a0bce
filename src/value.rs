//! Dynamic value type flowing between codecs and the structure facade.
//!
//! `Codec` is a tagged variant over the known codec kinds; `Value` is the
//! matching tagged variant over the decoded data those codecs produce.
//! Strongly typed callers go through [`FromValue`] rather than matching
//! directly.
use crate::structure::Record;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Bytes(Vec<u8>),
    Text(String),
    /// Resolved member of a declared enum, carried as its ordinal.
    Enum(i64),
    /// Bitwise combination of a declared flag set.
    Flags(u64),
    /// The unit value produced by a zero-width codec (`Padding`).
    Unit,
    /// An eagerly decoded nested structure. Always owned — a nested
    /// decode never keeps its sub-cursor alive past the parent read.
    Nested(Box<Record<'static>>),
}

impl Value {
    /// Widens any integer-shaped variant (including `Enum`) to `i128` for
    /// range/domain checks. Returns `None` for non-integer variants.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::I8(v) => Some(*v as i128),
            Value::I16(v) => Some(*v as i128),
            Value::I32(v) => Some(*v as i128),
            Value::I64(v) => Some(*v as i128),
            Value::U8(v) => Some(*v as i128),
            Value::U16(v) => Some(*v as i128),
            Value::U32(v) => Some(*v as i128),
            Value::U64(v) => Some(*v as i128),
            Value::Enum(v) => Some(*v as i128),
            Value::Flags(v) => Some(*v as i128),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_nested(&self) -> Option<&Record<'static>> {
        match self {
            Value::Nested(r) => Some(r),
            _ => None,
        }
    }
}

/// Implemented for every Rust type a caller may extract a [`Value`] into.
/// Centralizes the tag match that would otherwise be repeated at every
/// call site that wants a concretely typed field value.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_from_value_int {
    ($ty:ty, $variant:ident) => {
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(*v),
                    _ => None,
                }
            }
        }
    };
}

impl_from_value_int!(i8, I8);
impl_from_value_int!(i16, I16);
impl_from_value_int!(i32, I32);
impl_from_value_int!(i64, I64);
impl_from_value_int!(u8, U8);
impl_from_value_int!(u16, U16);
impl_from_value_int!(u32, U32);
impl_from_value_int!(u64, U64);
impl_from_value_int!(f32, F32);
impl_from_value_int!(f64, F64);

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bytes().map(|b| b.to_vec())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_text().map(|s| s.to_owned())
    }
}
