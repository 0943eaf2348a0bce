//! The field codec interface: the contract every field type satisfies.
//!
//! Codecs are a tagged variant over the known kinds, dispatched through a
//! vtable (`Box<dyn Codec>`) rather than an enum, since each kind differs
//! widely in its associated parameters; a capability interface lets any
//! user-defined codec join the same dispatch.
pub mod composite;
pub mod primitive;
pub mod text;

use std::fmt;

use crate::cursor::Cursor;
use crate::error::{DecodeError, ValidationError};
use crate::structure::Record;
use crate::value::Value;

/// Whether a field's byte length is known at declaration time or must be
/// probed against a live buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSize {
    Static(u64),
    Dynamic,
}

/// Byte order for multi-byte primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Big,
    Little,
}

/// Text encoding selector for the text codecs. `Utf8` needs no optional
/// dependency; anything else requires the `extended-encodings` feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    #[cfg(feature = "extended-encodings")]
    Other(&'static encoding_rs::Encoding),
}

impl Default for TextEncoding {
    fn default() -> Self {
        TextEncoding::Utf8
    }
}

impl TextEncoding {
    pub(crate) fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|e| DecodeError::InvalidText(e.to_string())),
            #[cfg(feature = "extended-encodings")]
            TextEncoding::Other(enc) => {
                let (text, _, had_errors) = enc.decode(bytes);
                if had_errors {
                    Err(DecodeError::InvalidText(format!(
                        "invalid bytes for encoding {}",
                        enc.name()
                    )))
                } else {
                    Ok(text.into_owned())
                }
            }
        }
    }

    pub(crate) fn encode(&self, text: &str) -> Result<Vec<u8>, DecodeError> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            #[cfg(feature = "extended-encodings")]
            TextEncoding::Other(enc) => {
                let (bytes, _, had_errors) = enc.encode(text);
                if had_errors {
                    Err(DecodeError::InvalidText(format!(
                        "{text:?} is not representable in encoding {}",
                        enc.name()
                    )))
                } else {
                    Ok(bytes.into_owned())
                }
            }
        }
    }
}

/// Recognized, structure-inheritable option values. A structure declares these once; fields that recognize an
/// option but did not set it explicitly inherit the structure's value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Endianness(Endianness),
    Encoding(TextEncoding),
    Signed(bool),
    Padding(u8),
    Terminator(u8),
}

/// Structure-level option bag, consulted by [`Codec::inherit_options`] at
/// declaration time. Keys are recognized-option names (`"endianness"`,
/// `"encoding"`, `"padding"`, `"terminator"`, `"signed"`).
#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    values: Vec<(&'static str, OptionValue)>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn set(&mut self, key: &'static str, value: OptionValue) {
        if let Some(slot) = self.values.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.values.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// The intermediate payload a dynamic-size probe hands back so a later
/// decode can skip re-scanning the buffer.
#[derive(Debug, Clone)]
pub enum ProbeCache {
    /// `LengthIndexed`: prefix length and text length, both in bytes.
    TextLength { prefix_len: u64, text_len: u64 },
    /// `Terminated`: the decoded-ready content bytes and total bytes
    /// consumed (content + terminator byte, or 0 at true EOF).
    Terminated { content: Vec<u8>, total: u64 },
    /// `NestedObject`: the fully decoded inner record, ready to hand back
    /// without a second pass over the buffer.
    Nested(Record<'static>),
}

/// Contract every field type satisfies.
///
/// Implementors are owned inside a `Box<dyn Codec>` on a [`crate::structure::FieldEntry`];
/// dispatch is virtual rather than generic so a `Configuration`'s field list
/// can hold heterogeneous codecs in one `Vec`.
pub trait Codec: fmt::Debug {
    /// `Static(n)` or `Dynamic`; determines whether the offset-chain
    /// compiler can fold this field into a flat byte count.
    fn size(&self) -> FieldSize;

    /// Whether `value` is acceptable for this field (wrong length,
    /// out-of-range integer, enum-domain violation, etc).
    fn validate(&self, field: &str, value: &Value) -> Result<(), ValidationError>;

    /// Decode one value starting at the cursor's current position, and
    /// report how many bytes were consumed.
    fn read(&self, field: &str, cursor: &mut dyn Cursor) -> Result<(Value, u64), DecodeError>;

    /// Encode `value` to the cursor's current position, returning bytes
    /// written.
    fn write(
        &self,
        field: &str,
        value: &Value,
        cursor: &mut dyn Cursor,
    ) -> Result<u64, ValidationError>;

    /// In-memory equivalent of `write`, with no cursor involved.
    fn pack(&self, field: &str, value: &Value) -> Result<Vec<u8>, ValidationError>;

    /// In-memory equivalent of `read`, with no cursor involved.
    fn unpack(&self, field: &str, bytes: &[u8]) -> Result<Value, DecodeError>;

    /// Dynamic-sized codecs only: determine how many bytes this field
    /// occupies without producing the decoded value, and return a cache
    /// payload a later `decode_with_cache` call can reuse.
    fn probe_size(
        &self,
        _field: &str,
        _cursor: &mut dyn Cursor,
    ) -> Result<(u64, ProbeCache), DecodeError> {
        unreachable!("probe_size is only called on codecs whose size() is Dynamic")
    }

    /// Dynamic-sized codecs only: decode using a previously computed probe
    /// cache, avoiding a second scan of the buffer.
    fn decode_with_cache(
        &self,
        _field: &str,
        _cursor: &mut dyn Cursor,
        _cache: &ProbeCache,
    ) -> Result<Value, DecodeError> {
        unreachable!("decode_with_cache is only called on codecs whose size() is Dynamic")
    }

    /// The value to fall back on when `write`/`dump` is asked for a field
    /// with no explicit value assigned (only `FixedBytes` has one).
    fn default_value(&self) -> Option<Value> {
        None
    }

    /// Recognized option names this codec reads from a structure's option
    /// bag when the field itself did not set them explicitly. The default
    /// (no inheritable options) fits codecs like `Bytes`/`Padding`.
    fn recognized_options(&self) -> &'static [&'static str] {
        &[]
    }

    /// Apply a structure-inherited option. Called once per recognized
    /// option not already set explicitly on this field, at `.build()` time.
    fn inherit_option(&mut self, _key: &str, _value: &OptionValue) {}
}
