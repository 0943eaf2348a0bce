//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (declaration-time misuse,
//! value validation, unassigned fields, and buffer/decode failures).
use thiserror::Error;

//==================================================================================CONFIGURATION_ERROR
#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Raised while declaring a structure or constructing a codec, before any
/// bytes are ever touched.
pub enum ConfigurationError {
    /// A structure declared the same field name twice.
    #[error("field name {0:?} already declared on this structure")]
    DuplicateFieldName(String),
    /// An integer codec was asked for an unsupported byte width.
    #[error("unsupported integer width: {width} bytes (expected 1, 2, 4, or 8)")]
    InvalidIntegerWidth { width: u8 },
    /// A float codec was asked for an unsupported byte width.
    #[error("unsupported float width: {width} bytes (expected 2, 4, or 8)")]
    InvalidFloatWidth { width: u8 },
    /// `LengthIndexed` was given a prefix codec whose size is not static.
    #[error("length-indexed text needs a fixed-width length prefix")]
    DynamicLengthPrefix,
}

//==================================================================================VALIDATION_ERROR
#[derive(Error, Debug, Clone, PartialEq)]
/// Raised when a value does not satisfy a codec's contract, from either
/// `Codec::validate` or while packing a value for `write`/`pack`.
pub enum ValidationError {
    /// Integer value does not fit the declared width/signedness.
    #[error("field {field}: value {value} does not fit in {width} bytes (signed={signed})")]
    IntegerOutOfRange {
        field: String,
        value: i128,
        width: u8,
        signed: bool,
    },
    /// `FixedBytes` value read or assigned does not equal the declared constant.
    #[error("field {field}: expected fixed bytes {expected:?}, got {actual:?}")]
    FixedBytesMismatch {
        field: String,
        expected: Vec<u8>,
        actual: Vec<u8>,
    },
    /// `Bytes`/`FixedLength` length does not match the declared size.
    #[error("field {field}: expected length {expected}, got {actual}")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },
    /// `Enum` value is not one of the declared members.
    #[error("field {field}: {value} is not a member of the declared enum")]
    EnumDomain { field: String, value: i64 },
    /// `Flags` value sets bits outside the declared mask.
    #[error("field {field}: flags {value:#x} set bits outside the declared mask {mask:#x}")]
    FlagsDomain { field: String, value: u64, mask: u64 },
    /// A string could not be encoded with the field's declared encoding.
    #[error("field {field}: string is not representable in the declared encoding")]
    Encoding { field: String },
    /// `validate()` found a field with no assigned value.
    #[error("field {field} has no assigned value")]
    Missing { field: String },
    /// Caller supplied a `Value` variant the codec cannot accept.
    #[error("field {field}: value is not the kind this codec expects")]
    TypeMismatch { field: String },
}

//==================================================================================MISSING_FIELD
#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Surfaced when an unbound field is read or written: no explicit value was
/// ever assigned, and no cursor is bound to fall back on for lazy access.
#[error("field {0:?} is not assigned on this record")]
pub struct MissingField(pub String);

impl From<MissingField> for ValidationError {
    fn from(err: MissingField) -> Self {
        ValidationError::Missing { field: err.0 }
    }
}

//==================================================================================DECODE_ERROR
#[derive(Error, Debug)]
/// Propagated from the cursor or the host's text-decoding facilities,
/// unchanged, when the buffer ends mid-field or produced bytes cannot be
/// interpreted.
pub enum DecodeError {
    /// Buffer ended before the field's declared or probed size was satisfied.
    #[error("unexpected end of buffer: needed {needed} bytes, {available} available")]
    UnexpectedEof { needed: u64, available: u64 },
    /// Decoded bytes were not valid UTF-8 (or the selected encoding).
    #[error("could not decode bytes as text: {0}")]
    InvalidText(String),
    /// A decoded `Enum` ordinal is not one of the declared members.
    #[error("field {field}: {value} is not a member of the declared enum")]
    EnumDomain { field: String, value: i64 },
    /// A decoded `Flags` value sets bits outside the declared mask.
    #[error("field {field}: flags {value:#x} set bits outside the declared mask {mask:#x}")]
    FlagsDomain { field: String, value: u64, mask: u64 },
    /// Cursor I/O failure (seek past file end on a non-extending backend, etc).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

//==================================================================================ACCESS_ERROR
#[derive(Error, Debug, Clone)]
/// Raised from [`crate::structure::Record::get`] and its neighbors: the
/// union of every way a field access can fail, whether the record is
/// owned or cursor-bound.
pub enum AccessError {
    #[error(transparent)]
    Missing(#[from] MissingField),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("field {0:?} does not hold the requested type")]
    WrongType(String),
}

impl Clone for DecodeError {
    fn clone(&self) -> Self {
        match self {
            DecodeError::UnexpectedEof { needed, available } => DecodeError::UnexpectedEof {
                needed: *needed,
                available: *available,
            },
            DecodeError::InvalidText(s) => DecodeError::InvalidText(s.clone()),
            DecodeError::EnumDomain { field, value } => DecodeError::EnumDomain {
                field: field.clone(),
                value: *value,
            },
            DecodeError::FlagsDomain { field, value, mask } => DecodeError::FlagsDomain {
                field: field.clone(),
                value: *value,
                mask: *mask,
            },
            DecodeError::Io(e) => DecodeError::Io(std::io::Error::new(e.kind(), e.to_string())),
        }
    }
}
