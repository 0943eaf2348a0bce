//! A point structure nested inside a shape structure: the outer record
//! decodes the inner one eagerly and caches it, so accessing it later costs
//! no second pass over the buffer.
use std::sync::Arc;

use steelframe::codec::composite::NestedObject;
use steelframe::codec::primitive::Integer;
use steelframe::{Record, StructureBuilder, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let point = StructureBuilder::new()
        .field("x", Integer::i32())?
        .field("y", Integer::i32())?
        .build();

    let shape = StructureBuilder::new()
        .field("kind", Integer::u8())?
        .field("origin", NestedObject::new(Arc::clone(&point)))?
        .field("radius", Integer::u32())?
        .build();

    let mut origin = Record::new(Arc::clone(&point));
    origin.set("x", Value::I32(-3))?;
    origin.set("y", Value::I32(7))?;

    let mut circle = Record::new(Arc::clone(&shape));
    circle.set("kind", Value::U8(1))?;
    circle.set("origin", Value::Nested(Box::new(origin)))?;
    circle.set("radius", Value::U32(10))?;

    let bytes = circle.dumps()?;
    println!("encoded {} bytes", bytes.len());

    let mut decoded = Record::loads(shape, &bytes)?;
    let nested = decoded.get_value("origin")?;
    let mut nested_record = nested.as_nested().expect("origin is nested").clone();
    println!(
        "origin = ({}, {}), radius = {}",
        nested_record.get::<i32>("x")?,
        nested_record.get::<i32>("y")?,
        decoded.get::<u32>("radius")?,
    );

    Ok(())
}
