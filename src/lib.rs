//! `steelframe`: declarative binary record formats with lazy,
//! offset-memoizing field access.
//!
//! A structure is declared once through [`structure::StructureBuilder`],
//! compiling its fields' sizes into an offset chain (`engine::chain`). An
//! instance is either `load`ed against a live [`cursor::Cursor`], where
//! fields are decoded and their offsets memoized on first access, or
//! `loads`/`new` to work entirely in memory.
pub mod codec;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod structure;
pub mod value;

pub use codec::{Codec, Endianness, FieldSize, OptionSet, OptionValue, TextEncoding};
pub use cursor::{Cursor, FileCursor, SliceCursor, SubCursor, VecCursor};
pub use error::{AccessError, ConfigurationError, DecodeError, MissingField, ValidationError};
pub use structure::{Configuration, Record, StructureBuilder};
pub use value::{FromValue, Value};
