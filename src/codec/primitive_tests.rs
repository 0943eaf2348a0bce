use super::*;
use crate::cursor::{SliceCursor, VecCursor};
use crate::error::ValidationError;

#[test]
fn integer_round_trips_big_endian() {
    let codec = Integer::u32();
    let mut cur = VecCursor::new();
    let value = Value::U32(0x01020304);
    codec.write("n", &value, &mut cur).unwrap();
    assert_eq!(cur.into_inner(), vec![0x01, 0x02, 0x03, 0x04]);

    let data = [0x01u8, 0x02, 0x03, 0x04];
    let mut cur = SliceCursor::new(&data);
    let (decoded, size) = codec.read("n", &mut cur).unwrap();
    assert_eq!(decoded, Value::U32(0x01020304));
    assert_eq!(size, 4);
}

#[test]
fn integer_little_endian_reorders_bytes() {
    let codec = Integer::u16().little_endian();
    let data = [0x34u8, 0x12];
    let mut cur = SliceCursor::new(&data);
    let (decoded, _) = codec.read("n", &mut cur).unwrap();
    assert_eq!(decoded, Value::U16(0x1234));
}

#[test]
fn integer_sign_extends_negative_values() {
    let codec = Integer::i8();
    let data = [0xffu8];
    let mut cur = SliceCursor::new(&data);
    let (decoded, _) = codec.read("n", &mut cur).unwrap();
    assert_eq!(decoded, Value::I8(-1));
}

#[test]
fn integer_rejects_out_of_range_values() {
    let codec = Integer::u8();
    let err = codec.validate("n", &Value::I32(300)).unwrap_err();
    assert!(matches!(err, ValidationError::IntegerOutOfRange { .. }));
}

#[test]
fn u8_accepts_its_maximum_value() {
    let codec = Integer::u8();
    codec.validate("n", &Value::U16(255)).unwrap();
}

#[test]
fn u8_rejects_one_past_its_maximum() {
    let codec = Integer::u8();
    let err = codec.validate("n", &Value::U16(256)).unwrap_err();
    assert!(matches!(err, ValidationError::IntegerOutOfRange { .. }));
}

#[test]
fn u8_rejects_negative_values() {
    let codec = Integer::u8();
    let err = codec.validate("n", &Value::I32(-1)).unwrap_err();
    assert!(matches!(err, ValidationError::IntegerOutOfRange { .. }));
}

#[test]
fn i8_accepts_its_minimum_and_maximum_values() {
    let codec = Integer::i8();
    codec.validate("n", &Value::I32(-128)).unwrap();
    codec.validate("n", &Value::I32(127)).unwrap();
}

#[test]
fn i8_rejects_one_past_either_bound() {
    let codec = Integer::i8();
    let low = codec.validate("n", &Value::I32(-129)).unwrap_err();
    assert!(matches!(low, ValidationError::IntegerOutOfRange { .. }));
    let high = codec.validate("n", &Value::I32(128)).unwrap_err();
    assert!(matches!(high, ValidationError::IntegerOutOfRange { .. }));
}

#[test]
fn integer_rejects_non_integer_value() {
    let codec = Integer::u8();
    let err = codec.validate("n", &Value::Text("x".into())).unwrap_err();
    assert!(matches!(err, ValidationError::TypeMismatch { .. }));
}

#[test]
fn integer_inherits_endianness_when_not_explicit() {
    let mut codec = Integer::u16();
    codec.inherit_option("endianness", &OptionValue::Endianness(Endianness::Little));
    let data = [0x34u8, 0x12];
    let mut cur = SliceCursor::new(&data);
    let (decoded, _) = codec.read("n", &mut cur).unwrap();
    assert_eq!(decoded, Value::U16(0x1234));
}

#[test]
fn integer_explicit_endianness_is_not_overridden() {
    let mut codec = Integer::u16().big_endian();
    codec.inherit_option("endianness", &OptionValue::Endianness(Endianness::Little));
    let data = [0x12u8, 0x34];
    let mut cur = SliceCursor::new(&data);
    let (decoded, _) = codec.read("n", &mut cur).unwrap();
    assert_eq!(decoded, Value::U16(0x1234));
}

#[test]
fn float32_round_trips() {
    let codec = Float::f32();
    let mut cur = VecCursor::new();
    codec.write("f", &Value::F32(3.5), &mut cur).unwrap();
    cur.seek(0).unwrap();
    let (decoded, size) = codec.read("f", &mut cur).unwrap();
    assert_eq!(decoded, Value::F32(3.5));
    assert_eq!(size, 4);
}

#[test]
fn float64_round_trips_special_values() {
    let codec = Float::f64();
    for v in [0.0f64, -0.0, f64::INFINITY, f64::NEG_INFINITY] {
        let mut cur = VecCursor::new();
        codec.write("f", &Value::F64(v), &mut cur).unwrap();
        cur.seek(0).unwrap();
        let (decoded, _) = codec.read("f", &mut cur).unwrap();
        assert_eq!(decoded, Value::F64(v));
    }
}

#[test]
fn float64_nan_round_trips_to_a_nan() {
    let codec = Float::f64();
    let mut cur = VecCursor::new();
    codec.write("f", &Value::F64(f64::NAN), &mut cur).unwrap();
    cur.seek(0).unwrap();
    let (decoded, _) = codec.read("f", &mut cur).unwrap();
    match decoded {
        Value::F64(v) => assert!(v.is_nan()),
        other => panic!("expected a float, got {other:?}"),
    }
}

#[test]
fn float16_round_trips_common_values() {
    let codec = Float::f16();
    for v in [1.0f32, -2.5, 0.0, 100.0] {
        let mut cur = VecCursor::new();
        codec.write("f", &Value::F32(v), &mut cur).unwrap();
        cur.seek(0).unwrap();
        let (decoded, size) = codec.read("f", &mut cur).unwrap();
        assert_eq!(size, 2);
        match decoded {
            Value::F32(got) => assert!((got - v).abs() < 0.01, "{got} vs {v}"),
            other => panic!("expected a float, got {other:?}"),
        }
    }
}

#[test]
fn bytes_validates_length() {
    let codec = Bytes::new(3);
    let err = codec.validate("b", &Value::Bytes(vec![1, 2])).unwrap_err();
    assert!(matches!(err, ValidationError::LengthMismatch { .. }));
}

#[test]
fn bytes_round_trips() {
    let codec = Bytes::new(3);
    let mut cur = VecCursor::new();
    codec
        .write("b", &Value::Bytes(vec![9, 8, 7]), &mut cur)
        .unwrap();
    cur.seek(0).unwrap();
    let (decoded, size) = codec.read("b", &mut cur).unwrap();
    assert_eq!(decoded, Value::Bytes(vec![9, 8, 7]));
    assert_eq!(size, 3);
}

#[test]
fn fixed_bytes_rejects_mismatch() {
    let codec = FixedBytes::new(vec![0xca, 0xfe]);
    let data = [0x00u8, 0x00];
    let mut cur = SliceCursor::new(&data);
    let err = codec.read("magic", &mut cur).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidText(_)));
}

#[test]
fn fixed_bytes_supplies_its_own_default() {
    let codec = FixedBytes::new(vec![0xca, 0xfe]);
    assert_eq!(codec.default_value(), Some(Value::Bytes(vec![0xca, 0xfe])));
}

#[test]
fn padding_advances_without_producing_a_value() {
    let codec = Padding::new(3);
    let data = [0u8; 3];
    let mut cur = SliceCursor::new(&data);
    let (decoded, size) = codec.read("reserved", &mut cur).unwrap();
    assert_eq!(decoded, Value::Unit);
    assert_eq!(size, 3);
}

#[test]
fn padding_write_emits_zeros() {
    let codec = Padding::new(2);
    let mut cur = VecCursor::new();
    codec.write("reserved", &Value::Unit, &mut cur).unwrap();
    assert_eq!(cur.into_inner(), vec![0, 0]);
}
