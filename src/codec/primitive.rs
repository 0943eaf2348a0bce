//! Integer, Float, Bytes, FixedBytes, and Padding codecs.
use crate::codec::{Codec, Endianness, FieldSize, OptionValue};
use crate::cursor::Cursor;
use crate::error::{ConfigurationError, DecodeError, ValidationError};
use crate::value::Value;

//==================================================================================INTEGER
/// Fixed-width, signed-or-unsigned, big- or little-endian integer.
#[derive(Debug, Clone)]
pub struct Integer {
    width: u8,
    signed: bool,
    endianness: Endianness,
    endianness_explicit: bool,
}

impl Integer {
    /// `width` must be one of 1, 2, 4, or 8 bytes.
    pub fn new(width: u8, signed: bool) -> Result<Self, ConfigurationError> {
        if !matches!(width, 1 | 2 | 4 | 8) {
            return Err(ConfigurationError::InvalidIntegerWidth { width });
        }
        Ok(Self {
            width,
            signed,
            endianness: Endianness::Big,
            endianness_explicit: false,
        })
    }

    pub fn u8() -> Self {
        Self::new(1, false).expect("width 1 is always valid")
    }
    pub fn i8() -> Self {
        Self::new(1, true).expect("width 1 is always valid")
    }
    pub fn u16() -> Self {
        Self::new(2, false).expect("width 2 is always valid")
    }
    pub fn i16() -> Self {
        Self::new(2, true).expect("width 2 is always valid")
    }
    pub fn u32() -> Self {
        Self::new(4, false).expect("width 4 is always valid")
    }
    pub fn i32() -> Self {
        Self::new(4, true).expect("width 4 is always valid")
    }
    pub fn u64() -> Self {
        Self::new(8, false).expect("width 8 is always valid")
    }
    pub fn i64() -> Self {
        Self::new(8, true).expect("width 8 is always valid")
    }

    pub fn little_endian(mut self) -> Self {
        self.endianness = Endianness::Little;
        self.endianness_explicit = true;
        self
    }

    pub fn big_endian(mut self) -> Self {
        self.endianness = Endianness::Big;
        self.endianness_explicit = true;
        self
    }

    fn bounds(&self) -> (i128, i128) {
        let bits = self.width as u32 * 8;
        if self.signed {
            let max = (1i128 << (bits - 1)) - 1;
            let min = -(1i128 << (bits - 1));
            (min, max)
        } else {
            (0, (1i128 << bits) - 1)
        }
    }

    fn decode_value(&self, raw: i128) -> Value {
        match (self.width, self.signed) {
            (1, true) => Value::I8(raw as i8),
            (1, false) => Value::U8(raw as u8),
            (2, true) => Value::I16(raw as i16),
            (2, false) => Value::U16(raw as u16),
            (4, true) => Value::I32(raw as i32),
            (4, false) => Value::U32(raw as u32),
            (8, true) => Value::I64(raw as i64),
            (8, false) => Value::U64(raw as u64),
            _ => unreachable!("width is validated at construction"),
        }
    }

    fn encode_bytes(&self, raw: i128) -> Vec<u8> {
        let bytes = raw.to_le_bytes();
        let mut le = bytes[..self.width as usize].to_vec();
        if self.endianness == Endianness::Big {
            le.reverse();
        }
        le
    }

    fn decode_bytes(&self, buf: &[u8]) -> i128 {
        let mut le: [u8; 16] = [0; 16];
        match self.endianness {
            Endianness::Little => le[..buf.len()].copy_from_slice(buf),
            Endianness::Big => {
                for (i, b) in buf.iter().rev().enumerate() {
                    le[i] = *b;
                }
            }
        }
        let unsigned = u128::from_le_bytes(le);
        if self.signed {
            let bits = self.width as u32 * 8;
            let sign_bit = 1u128 << (bits - 1);
            if unsigned & sign_bit != 0 {
                // sign-extend into the full i128 range
                return (unsigned as i128) - (1i128 << bits);
            }
        }
        unsigned as i128
    }
}

impl Codec for Integer {
    fn size(&self) -> FieldSize {
        FieldSize::Static(self.width as u64)
    }

    fn validate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        let raw = value
            .as_integer()
            .ok_or_else(|| ValidationError::TypeMismatch {
                field: field.to_string(),
            })?;
        let (min, max) = self.bounds();
        if raw < min || raw > max {
            return Err(ValidationError::IntegerOutOfRange {
                field: field.to_string(),
                value: raw,
                width: self.width,
                signed: self.signed,
            });
        }
        Ok(())
    }

    fn read(&self, _field: &str, cursor: &mut dyn Cursor) -> Result<(Value, u64), DecodeError> {
        let mut buf = vec![0u8; self.width as usize];
        cursor.read_exact(&mut buf)?;
        Ok((self.decode_value(self.decode_bytes(&buf)), self.width as u64))
    }

    fn write(
        &self,
        field: &str,
        value: &Value,
        cursor: &mut dyn Cursor,
    ) -> Result<u64, ValidationError> {
        self.validate(field, value)?;
        let raw = value.as_integer().expect("validated above");
        let bytes = self.encode_bytes(raw);
        cursor
            .write(&bytes)
            .map_err(|_| ValidationError::TypeMismatch {
                field: field.to_string(),
            })?;
        Ok(self.width as u64)
    }

    fn pack(&self, field: &str, value: &Value) -> Result<Vec<u8>, ValidationError> {
        self.validate(field, value)?;
        Ok(self.encode_bytes(value.as_integer().expect("validated above")))
    }

    fn unpack(&self, _field: &str, bytes: &[u8]) -> Result<Value, DecodeError> {
        if bytes.len() != self.width as usize {
            return Err(DecodeError::UnexpectedEof {
                needed: self.width as u64,
                available: bytes.len() as u64,
            });
        }
        Ok(self.decode_value(self.decode_bytes(bytes)))
    }

    fn recognized_options(&self) -> &'static [&'static str] {
        &["endianness", "signed"]
    }

    fn inherit_option(&mut self, key: &str, value: &OptionValue) {
        if key == "endianness" && !self.endianness_explicit {
            if let OptionValue::Endianness(e) = value {
                self.endianness = *e;
            }
        }
    }
}

//==================================================================================FLOAT
/// IEEE 754 half/single/double, big-endian on the wire unless `little_endian()`
/// is selected — matching the platform convention the `Integer` codec uses.
#[derive(Debug, Clone)]
pub struct Float {
    width: u8,
    endianness: Endianness,
}

impl Float {
    pub fn new(width: u8) -> Result<Self, ConfigurationError> {
        if !matches!(width, 2 | 4 | 8) {
            return Err(ConfigurationError::InvalidFloatWidth { width });
        }
        Ok(Self {
            width,
            endianness: Endianness::Big,
        })
    }

    pub fn f16() -> Self {
        Self::new(2).expect("width 2 is always valid")
    }
    pub fn f32() -> Self {
        Self::new(4).expect("width 4 is always valid")
    }
    pub fn f64() -> Self {
        Self::new(8).expect("width 8 is always valid")
    }

    pub fn little_endian(mut self) -> Self {
        self.endianness = Endianness::Little;
        self
    }

    fn order(&self, bytes: &[u8]) -> Vec<u8> {
        let mut v = bytes.to_vec();
        if self.endianness == Endianness::Little {
            v.reverse();
        }
        v
    }

    fn unorder(&self, bytes: &[u8]) -> Vec<u8> {
        let mut v = bytes.to_vec();
        if self.endianness == Endianness::Little {
            v.reverse();
        }
        v
    }
}

impl Codec for Float {
    fn size(&self) -> FieldSize {
        FieldSize::Static(self.width as u64)
    }

    fn validate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        match value {
            Value::F32(_) | Value::F64(_) => Ok(()),
            _ => Err(ValidationError::TypeMismatch {
                field: field.to_string(),
            }),
        }
    }

    fn read(&self, _field: &str, cursor: &mut dyn Cursor) -> Result<(Value, u64), DecodeError> {
        let mut buf = vec![0u8; self.width as usize];
        cursor.read_exact(&mut buf)?;
        let wire = self.unorder(&buf);
        let value = match self.width {
            2 => {
                let bits = u16::from_be_bytes([wire[0], wire[1]]);
                Value::F32(f16_to_f32(bits))
            }
            4 => Value::F32(f32::from_be_bytes(wire.try_into().unwrap())),
            8 => Value::F64(f64::from_be_bytes(wire.try_into().unwrap())),
            _ => unreachable!("width is validated at construction"),
        };
        Ok((value, self.width as u64))
    }

    fn write(
        &self,
        field: &str,
        value: &Value,
        cursor: &mut dyn Cursor,
    ) -> Result<u64, ValidationError> {
        let bytes = self.pack(field, value)?;
        cursor
            .write(&bytes)
            .map_err(|_| ValidationError::TypeMismatch {
                field: field.to_string(),
            })?;
        Ok(self.width as u64)
    }

    fn pack(&self, field: &str, value: &Value) -> Result<Vec<u8>, ValidationError> {
        self.validate(field, value)?;
        let be = match (self.width, value) {
            (2, Value::F32(v)) => f32_to_f16(*v).to_be_bytes().to_vec(),
            (4, Value::F32(v)) => v.to_be_bytes().to_vec(),
            (8, Value::F64(v)) => v.to_be_bytes().to_vec(),
            (8, Value::F32(v)) => (*v as f64).to_be_bytes().to_vec(),
            (4, Value::F64(v)) => (*v as f32).to_be_bytes().to_vec(),
            (2, Value::F64(v)) => f32_to_f16(*v as f32).to_be_bytes().to_vec(),
            _ => unreachable!("validated above"),
        };
        Ok(self.order(&be))
    }

    fn unpack(&self, _field: &str, bytes: &[u8]) -> Result<Value, DecodeError> {
        if bytes.len() != self.width as usize {
            return Err(DecodeError::UnexpectedEof {
                needed: self.width as u64,
                available: bytes.len() as u64,
            });
        }
        let be = self.unorder(bytes);
        Ok(match self.width {
            2 => Value::F32(f16_to_f32(u16::from_be_bytes([be[0], be[1]]))),
            4 => Value::F32(f32::from_be_bytes(be.try_into().unwrap())),
            8 => Value::F64(f64::from_be_bytes(be.try_into().unwrap())),
            _ => unreachable!("width is validated at construction"),
        })
    }
}

/// Narrow an `f32` to an IEEE 754 half-precision bit pattern.
fn f32_to_f16(value: f32) -> u16 {
    let bits = value.to_bits();
    let sign = (bits >> 16) & 0x8000;
    let exp = ((bits >> 23) & 0xff) as i32;
    let mantissa = bits & 0x7fffff;

    if exp == 0xff {
        let mant16 = if mantissa != 0 { 0x200 } else { 0 };
        return (sign | 0x7c00 | mant16) as u16;
    }
    let half_exp = exp - 127 + 15;
    if half_exp >= 0x1f {
        return (sign | 0x7c00) as u16;
    }
    if half_exp <= 0 {
        if half_exp < -10 {
            return sign as u16;
        }
        let mantissa_with_implicit = mantissa | 0x800000;
        let shift = 14 - half_exp;
        let half_mantissa = mantissa_with_implicit >> shift;
        return (sign | half_mantissa) as u16;
    }
    let half_mantissa = mantissa >> 13;
    (sign | ((half_exp as u32) << 10) | half_mantissa) as u16
}

/// Widen an IEEE 754 half-precision bit pattern to `f32`.
fn f16_to_f32(bits: u16) -> f32 {
    let sign = (bits & 0x8000) as u32;
    let exp = ((bits >> 10) & 0x1f) as u32;
    let mantissa = (bits & 0x3ff) as u32;

    let f_bits: u32 = if exp == 0 {
        if mantissa == 0 {
            sign << 16
        } else {
            let mut e: i32 = -1;
            let mut m = mantissa;
            loop {
                m <<= 1;
                e -= 1;
                if m & 0x400 != 0 {
                    break;
                }
            }
            m &= 0x3ff;
            let exp32 = (e + 15 + 127) as u32;
            (sign << 16) | (exp32 << 23) | (m << 13)
        }
    } else if exp == 0x1f {
        (sign << 16) | 0x7f800000 | (mantissa << 13)
    } else {
        let exp32 = exp + (127 - 15);
        (sign << 16) | (exp32 << 23) | (mantissa << 13)
    };
    f32::from_bits(f_bits)
}

//==================================================================================BYTES
/// Fixed-width raw byte field.
#[derive(Debug, Clone)]
pub struct Bytes {
    size: usize,
}

impl Bytes {
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl Codec for Bytes {
    fn size(&self) -> FieldSize {
        FieldSize::Static(self.size as u64)
    }

    fn validate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        match value.as_bytes() {
            Some(b) if b.len() == self.size => Ok(()),
            Some(b) => Err(ValidationError::LengthMismatch {
                field: field.to_string(),
                expected: self.size,
                actual: b.len(),
            }),
            None => Err(ValidationError::TypeMismatch {
                field: field.to_string(),
            }),
        }
    }

    fn read(&self, _field: &str, cursor: &mut dyn Cursor) -> Result<(Value, u64), DecodeError> {
        let mut buf = vec![0u8; self.size];
        // Truncation on a short read is returned as-is: a plain
        // `read`, not `read_exact`.
        let n = cursor.read(&mut buf)?;
        buf.truncate(n);
        Ok((Value::Bytes(buf), n as u64))
    }

    fn write(
        &self,
        field: &str,
        value: &Value,
        cursor: &mut dyn Cursor,
    ) -> Result<u64, ValidationError> {
        self.validate(field, value)?;
        let bytes = value.as_bytes().expect("validated above");
        let n = cursor
            .write(bytes)
            .map_err(|_| ValidationError::TypeMismatch {
                field: field.to_string(),
            })?;
        Ok(n as u64)
    }

    fn pack(&self, field: &str, value: &Value) -> Result<Vec<u8>, ValidationError> {
        self.validate(field, value)?;
        Ok(value.as_bytes().expect("validated above").to_vec())
    }

    fn unpack(&self, field: &str, bytes: &[u8]) -> Result<Value, DecodeError> {
        if bytes.len() != self.size {
            return Err(DecodeError::UnexpectedEof {
                needed: self.size as u64,
                available: bytes.len() as u64,
            });
        }
        let _ = field;
        Ok(Value::Bytes(bytes.to_vec()))
    }
}

//==================================================================================FIXED_BYTES
/// A constant byte sequence. Acts both as a validator (reads must match) and
/// as the default value used by `write`/`dump` when the field is
/// unassigned.
#[derive(Debug, Clone)]
pub struct FixedBytes {
    value: Vec<u8>,
}

impl FixedBytes {
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Codec for FixedBytes {
    fn size(&self) -> FieldSize {
        FieldSize::Static(self.value.len() as u64)
    }

    fn validate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        match value.as_bytes() {
            Some(b) if b == self.value.as_slice() => Ok(()),
            Some(b) => Err(ValidationError::FixedBytesMismatch {
                field: field.to_string(),
                expected: self.value.clone(),
                actual: b.to_vec(),
            }),
            None => Err(ValidationError::TypeMismatch {
                field: field.to_string(),
            }),
        }
    }

    fn read(&self, field: &str, cursor: &mut dyn Cursor) -> Result<(Value, u64), DecodeError> {
        let mut buf = vec![0u8; self.value.len()];
        cursor.read_exact(&mut buf)?;
        if buf != self.value {
            return Err(DecodeError::InvalidText(format!(
                "field {field}: expected fixed bytes {:?}, got {:?}",
                self.value, buf
            )));
        }
        Ok((Value::Bytes(buf), self.value.len() as u64))
    }

    fn write(
        &self,
        field: &str,
        value: &Value,
        cursor: &mut dyn Cursor,
    ) -> Result<u64, ValidationError> {
        // The caller-supplied bytes are written verbatim; `self.value` only
        // validates and supplies the default.
        let bytes = value.as_bytes().unwrap_or(&self.value);
        let n = cursor.write(bytes).map_err(|_| ValidationError::TypeMismatch {
            field: field.to_string(),
        })?;
        Ok(n as u64)
    }

    fn pack(&self, _field: &str, value: &Value) -> Result<Vec<u8>, ValidationError> {
        Ok(value.as_bytes().unwrap_or(&self.value).to_vec())
    }

    fn unpack(&self, field: &str, bytes: &[u8]) -> Result<Value, DecodeError> {
        if bytes != self.value {
            return Err(DecodeError::InvalidText(format!(
                "field {field}: expected fixed bytes {:?}, got {:?}",
                self.value, bytes
            )));
        }
        Ok(Value::Bytes(bytes.to_vec()))
    }

    fn default_value(&self) -> Option<Value> {
        Some(Value::Bytes(self.value.clone()))
    }
}

//==================================================================================PADDING
/// Reserved byte range with no decoded value: a pure cursor-advancing
/// placeholder for mixed fixed/variable records that need to skip bytes
/// the caller never interprets.
#[derive(Debug, Clone)]
pub struct Padding {
    size: u64,
}

impl Padding {
    pub fn new(size: u64) -> Self {
        Self { size }
    }
}

impl Codec for Padding {
    fn size(&self) -> FieldSize {
        FieldSize::Static(self.size)
    }

    fn validate(&self, _field: &str, _value: &Value) -> Result<(), ValidationError> {
        Ok(())
    }

    fn read(&self, _field: &str, cursor: &mut dyn Cursor) -> Result<(Value, u64), DecodeError> {
        let mut buf = vec![0u8; self.size as usize];
        cursor.read_exact(&mut buf)?;
        Ok((Value::Unit, self.size))
    }

    fn write(
        &self,
        field: &str,
        _value: &Value,
        cursor: &mut dyn Cursor,
    ) -> Result<u64, ValidationError> {
        let zeros = vec![0u8; self.size as usize];
        cursor
            .write(&zeros)
            .map_err(|_| ValidationError::TypeMismatch {
                field: field.to_string(),
            })?;
        Ok(self.size)
    }

    fn pack(&self, _field: &str, _value: &Value) -> Result<Vec<u8>, ValidationError> {
        Ok(vec![0u8; self.size as usize])
    }

    fn unpack(&self, _field: &str, _bytes: &[u8]) -> Result<Value, DecodeError> {
        Ok(Value::Unit)
    }

    fn default_value(&self) -> Option<Value> {
        Some(Value::Unit)
    }
}

#[cfg(test)]
#[path = "primitive_tests.rs"]
mod tests;
