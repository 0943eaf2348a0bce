use super::*;
use crate::codec::primitive::Integer;
use crate::cursor::{SliceCursor, VecCursor};

#[test]
fn fixed_length_retains_padding_on_read() {
    let codec = FixedLength::new(5).padding(b' ');
    let data = b"hi   ";
    let mut cur = SliceCursor::new(data);
    let (value, size) = codec.read("name", &mut cur).unwrap();
    assert_eq!(value, Value::Text("hi   ".to_string()));
    assert_eq!(size, 5);
}

#[test]
fn fixed_length_unpack_retains_padding() {
    let codec = FixedLength::new(20);
    let mut data = b"hi".to_vec();
    data.resize(20, 0u8);
    let value = codec.unpack("name", &data).unwrap();
    let mut expected = "hi".to_string();
    expected.extend(std::iter::repeat('\0').take(18));
    assert_eq!(value, Value::Text(expected));
}

#[test]
fn fixed_length_pads_on_write() {
    let codec = FixedLength::new(5).padding(b'\0');
    let mut cur = VecCursor::new();
    codec
        .write("name", &Value::Text("hi".to_string()), &mut cur)
        .unwrap();
    assert_eq!(cur.into_inner(), b"hi\0\0\0".to_vec());
}

#[test]
fn fixed_length_rejects_text_too_long() {
    let codec = FixedLength::new(3);
    let err = codec
        .validate("name", &Value::Text("abcd".to_string()))
        .unwrap_err();
    assert!(matches!(err, ValidationError::LengthMismatch { .. }));
}

#[test]
fn length_indexed_round_trips() {
    let codec = LengthIndexed::new(Box::new(Integer::u8())).unwrap();
    let mut cur = VecCursor::new();
    codec
        .write("name", &Value::Text("hello".to_string()), &mut cur)
        .unwrap();
    let bytes = cur.into_inner();
    assert_eq!(bytes, {
        let mut v = vec![5u8];
        v.extend_from_slice(b"hello");
        v
    });

    let mut cur = SliceCursor::new(&bytes);
    let (value, size) = codec.read("name", &mut cur).unwrap();
    assert_eq!(value, Value::Text("hello".to_string()));
    assert_eq!(size, 6, "probe size includes the prefix byte");
}

#[test]
fn length_indexed_rejects_dynamic_prefix() {
    let inner = LengthIndexed::new(Box::new(Integer::u8())).unwrap();
    let err = LengthIndexed::new(Box::new(inner)).unwrap_err();
    assert_eq!(err, ConfigurationError::DynamicLengthPrefix);
}

#[test]
fn terminated_reads_up_to_terminator() {
    let codec = Terminated::new(0);
    let data = b"hello\0trailing";
    let mut cur = SliceCursor::new(data);
    let (value, size) = codec.read("name", &mut cur).unwrap();
    assert_eq!(value, Value::Text("hello".to_string()));
    assert_eq!(size, 6);
}

#[test]
fn terminated_at_true_eof_decodes_to_empty_string() {
    let codec = Terminated::new(0);
    let data: [u8; 0] = [];
    let mut cur = SliceCursor::new(&data);
    let (value, size) = codec.read("name", &mut cur).unwrap();
    assert_eq!(value, Value::Text(String::new()));
    assert_eq!(size, 0);
}

#[test]
fn terminated_eof_after_partial_content_returns_that_content() {
    let codec = Terminated::new(0);
    let data = b"partial";
    let mut cur = SliceCursor::new(data);
    let (value, size) = codec.read("name", &mut cur).unwrap();
    assert_eq!(value, Value::Text("partial".to_string()));
    assert_eq!(size, 7);
}

#[test]
fn terminated_write_appends_terminator() {
    let codec = Terminated::new(0);
    let mut cur = VecCursor::new();
    codec
        .write("name", &Value::Text("hi".to_string()), &mut cur)
        .unwrap();
    assert_eq!(cur.into_inner(), b"hi\0".to_vec());
}

#[test]
fn terminated_inherits_terminator_when_not_explicit() {
    let mut codec = Terminated::default_terminator();
    codec.inherit_option("terminator", &OptionValue::Terminator(b'|'));
    let data = b"a|b";
    let mut cur = SliceCursor::new(data);
    let (value, size) = codec.read("name", &mut cur).unwrap();
    assert_eq!(value, Value::Text("a".to_string()));
    assert_eq!(size, 2);
}

#[test]
fn terminated_marks_encoding_explicit_and_inherit_option_does_not_clear_it() {
    let mut codec = Terminated::new(0).encoding(TextEncoding::Utf8);
    assert!(codec.encoding_explicit);
    codec.inherit_option("encoding", &OptionValue::Encoding(TextEncoding::Utf8));
    assert!(codec.encoding_explicit, "inherit_option must not clear an explicit flag");
}

#[test]
fn length_indexed_marks_encoding_explicit_and_inherit_option_does_not_clear_it() {
    let mut codec = LengthIndexed::new(Box::new(Integer::u8()))
        .unwrap()
        .encoding(TextEncoding::Utf8);
    assert!(codec.encoding_explicit);
    codec.inherit_option("encoding", &OptionValue::Encoding(TextEncoding::Utf8));
    assert!(codec.encoding_explicit, "inherit_option must not clear an explicit flag");
}
