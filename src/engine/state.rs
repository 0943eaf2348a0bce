//! Per-instance memoized resolution of field offsets, sizes, and decoded
//! values against a live cursor. One `State` belongs to exactly
//! one cursor-bound [`crate::structure::Record`]; it is never shared, so all
//! its methods take `&mut self`.
use crate::codec::{FieldSize, ProbeCache};
use crate::cursor::Cursor;
use crate::engine::FieldId;
use crate::error::DecodeError;
use crate::structure::Configuration;
use crate::value::Value;

#[derive(Debug)]
pub struct State {
    offsets: Vec<Option<u64>>,
    sizes: Vec<Option<u64>>,
    probe_caches: Vec<Option<ProbeCache>>,
    values: Vec<Option<Value>>,
}

impl State {
    pub fn new(field_count: usize) -> Self {
        Self {
            offsets: vec![None; field_count],
            sizes: vec![None; field_count],
            probe_caches: vec![None; field_count],
            values: vec![None; field_count],
        }
    }

    /// Absolute byte offset of `id`, resolving and caching any dynamic
    /// field sizes its chain depends on along the way.
    pub fn offset_of(
        &mut self,
        config: &Configuration,
        cursor: &mut dyn Cursor,
        id: FieldId,
    ) -> Result<u64, DecodeError> {
        if let Some(offset) = self.offsets[id.0 as usize] {
            return Ok(offset);
        }
        let mut offset = 0u64;
        let chain = config.chain(id).clone();
        for step in &chain {
            match step {
                crate::engine::ChainStep::Static(n) => offset += n,
                crate::engine::ChainStep::FieldSize(dep) => {
                    offset += self.size_of(config, cursor, *dep)?;
                }
            }
        }
        self.offsets[id.0 as usize] = Some(offset);
        Ok(offset)
    }

    /// Byte size of field `id`, probing a dynamic field's live encoding
    /// only once.
    pub fn size_of(
        &mut self,
        config: &Configuration,
        cursor: &mut dyn Cursor,
        id: FieldId,
    ) -> Result<u64, DecodeError> {
        if let Some(size) = self.sizes[id.0 as usize] {
            return Ok(size);
        }
        let entry = config.field(id);
        match entry.codec.size() {
            FieldSize::Static(n) => {
                self.sizes[id.0 as usize] = Some(n);
                Ok(n)
            }
            FieldSize::Dynamic => {
                let offset = self.offset_of(config, cursor, id)?;
                cursor.seek(offset)?;
                let (size, cache) = entry.codec.probe_size(&entry.name, cursor)?;
                log::trace!("probed field {:?} ({}) at offset {offset}: {size} bytes", id, entry.name);
                self.sizes[id.0 as usize] = Some(size);
                self.probe_caches[id.0 as usize] = Some(cache);
                Ok(size)
            }
        }
    }

    /// Decoded value of field `id`, seeking to its offset and reusing a
    /// probe cache from `size_of` if one was already produced.
    pub fn value_of(
        &mut self,
        config: &Configuration,
        cursor: &mut dyn Cursor,
        id: FieldId,
    ) -> Result<Value, DecodeError> {
        if let Some(value) = &self.values[id.0 as usize] {
            return Ok(value.clone());
        }
        let offset = self.offset_of(config, cursor, id)?;
        let entry = config.field(id);
        let value = match entry.codec.size() {
            FieldSize::Static(_) => {
                cursor.seek(offset)?;
                entry.codec.read(&entry.name, cursor)?.0
            }
            FieldSize::Dynamic => {
                if self.probe_caches[id.0 as usize].is_none() {
                    self.size_of(config, cursor, id)?;
                }
                cursor.seek(offset)?;
                let cache = self.probe_caches[id.0 as usize]
                    .clone()
                    .expect("just populated by size_of");
                entry.codec.decode_with_cache(&entry.name, cursor, &cache)?
            }
        };
        self.values[id.0 as usize] = Some(value.clone());
        Ok(value)
    }

    /// Seed an explicit value for `id`, as when a caller writes to a
    /// cursor-bound record before it has been read.
    pub fn set_value(&mut self, id: FieldId, value: Value) {
        self.values[id.0 as usize] = Some(value);
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
