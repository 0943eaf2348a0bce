//! Composite codecs built on top of another codec: the generic `Transform`
//! domain restriction (instantiated as `Enum` and `Flags`), and the
//! nested-structure codec.
use std::fmt;
use std::sync::Arc;

use crate::codec::{Codec, FieldSize, ProbeCache};
use crate::cursor::{Cursor, SubCursor};
use crate::error::{DecodeError, ValidationError};
use crate::structure::Configuration;
use crate::value::Value;

//==================================================================================TRANSFORM
/// A decoded-value domain restriction: `Transform` reads through an inner
/// integer-shaped codec, then asks `D` to check the raw value's domain and
/// wrap it into the `Value` variant that domain owns. `Enum` and `Flags`
/// are both instantiations of this mechanism rather than separate ad hoc
/// implementations.
pub trait TransformDomain: fmt::Debug {
    /// Reject a value the caller assigned before it is written/packed.
    fn check(&self, field: &str, raw: i128) -> Result<(), ValidationError>;
    /// Reject a value just decoded from the wire.
    fn check_decoded(&self, field: &str, raw: i128) -> Result<(), DecodeError>;
    /// Wrap an already-validated raw value into this domain's `Value` variant.
    fn to_value(&self, raw: i128) -> Value;
}

#[derive(Debug)]
pub struct Transform<D: TransformDomain> {
    inner: Box<dyn Codec>,
    domain: D,
}

impl<D: TransformDomain> Transform<D> {
    pub fn new(inner: Box<dyn Codec>, domain: D) -> Self {
        Self { inner, domain }
    }
}

impl<D: TransformDomain> Codec for Transform<D> {
    fn size(&self) -> FieldSize {
        self.inner.size()
    }

    fn validate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        let raw = value.as_integer().ok_or_else(|| ValidationError::TypeMismatch {
            field: field.to_string(),
        })?;
        self.domain.check(field, raw)
    }

    fn read(&self, field: &str, cursor: &mut dyn Cursor) -> Result<(Value, u64), DecodeError> {
        let (raw, size) = self.inner.read(field, cursor)?;
        let raw = raw.as_integer().expect("inner codec is integer-shaped");
        self.domain.check_decoded(field, raw)?;
        Ok((self.domain.to_value(raw), size))
    }

    fn write(
        &self,
        field: &str,
        value: &Value,
        cursor: &mut dyn Cursor,
    ) -> Result<u64, ValidationError> {
        self.validate(field, value)?;
        self.inner.write(field, value, cursor)
    }

    fn pack(&self, field: &str, value: &Value) -> Result<Vec<u8>, ValidationError> {
        self.validate(field, value)?;
        self.inner.pack(field, value)
    }

    fn unpack(&self, field: &str, bytes: &[u8]) -> Result<Value, DecodeError> {
        let raw = self.inner.unpack(field, bytes)?;
        let raw = raw.as_integer().expect("inner codec is integer-shaped");
        self.domain.check_decoded(field, raw)?;
        Ok(self.domain.to_value(raw))
    }
}

//==================================================================================ENUM
/// Restricts the decoded value to a declared set of ordinals, surfacing the
/// result as `Value::Enum`.
#[derive(Debug)]
pub struct EnumDomain {
    members: Vec<i64>,
}

impl TransformDomain for EnumDomain {
    fn check(&self, field: &str, raw: i128) -> Result<(), ValidationError> {
        let raw = raw as i64;
        if self.members.contains(&raw) {
            Ok(())
        } else {
            Err(ValidationError::EnumDomain {
                field: field.to_string(),
                value: raw,
            })
        }
    }

    fn check_decoded(&self, field: &str, raw: i128) -> Result<(), DecodeError> {
        let raw = raw as i64;
        if self.members.contains(&raw) {
            Ok(())
        } else {
            Err(DecodeError::EnumDomain {
                field: field.to_string(),
                value: raw,
            })
        }
    }

    fn to_value(&self, raw: i128) -> Value {
        Value::Enum(raw as i64)
    }
}

pub type Enum = Transform<EnumDomain>;

impl Enum {
    pub fn new(inner: Box<dyn Codec>, members: impl IntoIterator<Item = i64>) -> Self {
        Transform::new(
            inner,
            EnumDomain {
                members: members.into_iter().collect(),
            },
        )
    }
}

//==================================================================================FLAGS
/// Restricts the decoded value to a declared bitmask, surfacing the result
/// as `Value::Flags`.
#[derive(Debug)]
pub struct FlagsDomain {
    mask: u64,
}

impl TransformDomain for FlagsDomain {
    fn check(&self, field: &str, raw: i128) -> Result<(), ValidationError> {
        let bits = raw as u64;
        if bits & !self.mask == 0 {
            Ok(())
        } else {
            Err(ValidationError::FlagsDomain {
                field: field.to_string(),
                value: bits,
                mask: self.mask,
            })
        }
    }

    fn check_decoded(&self, field: &str, raw: i128) -> Result<(), DecodeError> {
        let bits = raw as u64;
        if bits & !self.mask == 0 {
            Ok(())
        } else {
            Err(DecodeError::FlagsDomain {
                field: field.to_string(),
                value: bits,
                mask: self.mask,
            })
        }
    }

    fn to_value(&self, raw: i128) -> Value {
        Value::Flags(raw as u64)
    }
}

pub type Flags = Transform<FlagsDomain>;

impl Flags {
    pub fn new(inner: Box<dyn Codec>, mask: u64) -> Self {
        Transform::new(inner, FlagsDomain { mask })
    }
}

//==================================================================================NESTED_OBJECT
/// A fully-contained sub-record decoded eagerly, field by field, through a
/// sub-cursor bound to the parent's current position. Because
/// the wire layout is plain concatenation, probing and decoding are the
/// same pass: `probe_size` already produces the finished `Record`, and
/// `decode_with_cache` just hands it back.
#[derive(Debug, Clone)]
pub struct NestedObject {
    config: Arc<Configuration>,
}

impl NestedObject {
    pub fn new(config: Arc<Configuration>) -> Self {
        Self { config }
    }
}

impl Codec for NestedObject {
    fn size(&self) -> FieldSize {
        self.config.static_size().map_or(FieldSize::Dynamic, FieldSize::Static)
    }

    fn validate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        match value {
            Value::Nested(_) => Ok(()),
            _ => Err(ValidationError::TypeMismatch {
                field: field.to_string(),
            }),
        }
    }

    fn read(&self, field: &str, cursor: &mut dyn Cursor) -> Result<(Value, u64), DecodeError> {
        let (size, cache) = self.probe_size(field, cursor)?;
        let value = self.decode_with_cache(field, cursor, &cache)?;
        Ok((value, size))
    }

    fn probe_size(
        &self,
        _field: &str,
        cursor: &mut dyn Cursor,
    ) -> Result<(u64, ProbeCache), DecodeError> {
        let base = cursor.tell()?;
        let record = {
            let mut sub = SubCursor::new(cursor, base);
            self.config.decode_eager(&mut sub)?
        };
        let consumed = cursor.tell()? - base;
        Ok((consumed, ProbeCache::Nested(record)))
    }

    fn decode_with_cache(
        &self,
        _field: &str,
        _cursor: &mut dyn Cursor,
        cache: &ProbeCache,
    ) -> Result<Value, DecodeError> {
        let ProbeCache::Nested(record) = cache else {
            unreachable!("NestedObject always produces a Nested cache")
        };
        Ok(Value::Nested(Box::new(record.clone())))
    }

    fn write(
        &self,
        field: &str,
        value: &Value,
        cursor: &mut dyn Cursor,
    ) -> Result<u64, ValidationError> {
        self.validate(field, value)?;
        let record = value.as_nested().expect("validated above");
        let base = cursor.tell().map_err(|_| ValidationError::TypeMismatch {
            field: field.to_string(),
        })?;
        {
            let mut sub = SubCursor::new(cursor, base);
            record
                .dump_into(&mut sub)
                .map_err(|_| ValidationError::TypeMismatch {
                    field: field.to_string(),
                })?;
        }
        let consumed = cursor.tell().map_err(|_| ValidationError::TypeMismatch {
            field: field.to_string(),
        })? - base;
        Ok(consumed)
    }

    fn pack(&self, field: &str, value: &Value) -> Result<Vec<u8>, ValidationError> {
        self.validate(field, value)?;
        let record = value.as_nested().expect("validated above");
        record.dumps().map_err(|_| ValidationError::TypeMismatch {
            field: field.to_string(),
        })
    }

    fn unpack(&self, field: &str, bytes: &[u8]) -> Result<Value, DecodeError> {
        use crate::cursor::SliceCursor;
        let mut cursor = SliceCursor::new(bytes);
        let record = self.config.decode_eager(&mut cursor)?;
        let _ = field;
        Ok(Value::Nested(Box::new(record)))
    }
}

#[cfg(test)]
#[path = "composite_tests.rs"]
mod tests;
