//! Declares a small packet structure, writes an instance to bytes, then
//! reads it back two ways: eagerly (`loads`) and lazily (`load`).
use std::sync::Arc;

use steelframe::codec::primitive::{Bytes, FixedBytes, Integer};
use steelframe::codec::text::FixedLength;
use steelframe::{Endianness, OptionValue, Record, SliceCursor, StructureBuilder, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = StructureBuilder::new()
        .option("endianness", OptionValue::Endianness(Endianness::Little))
        .field("magic", FixedBytes::new(*b"PKT1"))?
        .field("id", Integer::u32())?
        .field("name", FixedLength::new(16))?
        .field("payload", Bytes::new(8))?
        .build();

    let mut packet = Record::new(Arc::clone(&config));
    packet.set("magic", Value::Bytes(b"PKT1".to_vec()))?;
    packet.set("id", Value::U32(42))?;
    packet.set("name", Value::Text("telemetry".to_string()))?;
    packet.set("payload", Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef, 0, 0, 0, 0]))?;
    packet.validate()?;

    let bytes = packet.dumps()?;
    println!("encoded {} bytes", bytes.len());

    let eager = Record::loads(Arc::clone(&config), &bytes)?;
    println!("eager id = {}", eager.clone().get::<u32>("id")?);

    let cursor: Box<dyn steelframe::Cursor> = Box::new(SliceCursor::new(&bytes));
    let mut lazy = Record::load(config, cursor);
    println!("lazy name = {}", lazy.get::<String>("name")?);
    println!("lazy payload offset = {}", lazy.field_offset("payload")?);

    Ok(())
}
