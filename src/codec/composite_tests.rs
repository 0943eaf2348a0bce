use super::*;
use crate::codec::primitive::Integer;
use crate::cursor::{SliceCursor, VecCursor};
use crate::structure::StructureBuilder;

#[test]
fn enum_accepts_declared_members() {
    let codec = Enum::new(Box::new(Integer::u8()), [0, 1, 2]);
    let data = [1u8];
    let mut cur = SliceCursor::new(&data);
    let (value, size) = codec.read("kind", &mut cur).unwrap();
    assert_eq!(value, Value::Enum(1));
    assert_eq!(size, 1);
}

#[test]
fn enum_rejects_undeclared_ordinal() {
    let codec = Enum::new(Box::new(Integer::u8()), [0, 1, 2]);
    let data = [9u8];
    let mut cur = SliceCursor::new(&data);
    assert!(codec.read("kind", &mut cur).is_err());
}

#[test]
fn enum_writes_through_the_inner_codec() {
    let codec = Enum::new(Box::new(Integer::u8()), [0, 1, 2]);
    let mut cur = VecCursor::new();
    codec.write("kind", &Value::Enum(2), &mut cur).unwrap();
    assert_eq!(cur.into_inner(), vec![2]);
}

#[test]
fn flags_accepts_bits_within_mask() {
    let codec = Flags::new(Box::new(Integer::u8()), 0b0000_0111);
    let data = [0b0000_0101u8];
    let mut cur = SliceCursor::new(&data);
    let (value, _) = codec.read("flags", &mut cur).unwrap();
    assert_eq!(value, Value::Flags(0b101));
}

#[test]
fn flags_rejects_bits_outside_mask() {
    let codec = Flags::new(Box::new(Integer::u8()), 0b0000_0111);
    let data = [0b1000_0000u8];
    let mut cur = SliceCursor::new(&data);
    assert!(codec.read("flags", &mut cur).is_err());
}

fn inner_config() -> std::sync::Arc<crate::structure::Configuration> {
    StructureBuilder::new()
        .field("x", Integer::u8())
        .unwrap()
        .field("y", Integer::u8())
        .unwrap()
        .build()
}

#[test]
fn nested_object_decodes_eagerly_through_a_sub_cursor() {
    let codec = NestedObject::new(inner_config());
    let data = [10u8, 20, 99]; // third byte belongs to whatever follows
    let mut cur = SliceCursor::new(&data);
    let (value, size) = codec.read("inner", &mut cur).unwrap();
    assert_eq!(size, 2);
    let mut record = match value {
        Value::Nested(r) => *r,
        other => panic!("expected a nested record, got {other:?}"),
    };
    let x: u8 = record.get("x").unwrap();
    let y: u8 = record.get("y").unwrap();
    assert_eq!((x, y), (10, 20));
    // The parent cursor only advanced past the nested record's own bytes.
    assert_eq!(cur.tell().unwrap(), 2);
}

#[test]
fn nested_object_round_trips_through_write() {
    let codec = NestedObject::new(inner_config());
    let mut inner = crate::structure::Record::new(inner_config());
    inner.set("x", Value::U8(3)).unwrap();
    inner.set("y", Value::U8(4)).unwrap();

    let mut cur = VecCursor::new();
    codec
        .write("inner", &Value::Nested(Box::new(inner)), &mut cur)
        .unwrap();
    assert_eq!(cur.into_inner(), vec![3, 4]);
}
