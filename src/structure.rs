//! The declaration surface (`StructureBuilder`) and the decoded-record
//! facade (`Record`): an in-process, composable structure declaration in
//! place of an external schema file.
use std::fmt;
use std::sync::Arc;

use crate::codec::{Codec, FieldSize, OptionSet, OptionValue};
use crate::cursor::{Cursor, SliceCursor, VecCursor};
use crate::engine::chain::{compile_chains, Chain};
use crate::engine::{FieldId, State};
use crate::error::{AccessError, ConfigurationError, DecodeError, MissingField, ValidationError};
use crate::value::{FromValue, Value};

/// One declared field: its name and the codec that reads, writes, and
/// validates it.
pub struct FieldEntry {
    pub(crate) name: String,
    pub(crate) codec: Box<dyn Codec>,
}

impl fmt::Debug for FieldEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldEntry")
            .field("name", &self.name)
            .field("codec", &self.codec)
            .finish()
    }
}

/// A compiled, immutable structure declaration: the field list, their
/// offset chains, and the structure-level option bag they inherited from.
/// Shared by reference (`Arc`) between every `Record` built from it.
#[derive(Debug)]
pub struct Configuration {
    fields: Vec<FieldEntry>,
    chains: Vec<Chain>,
}

impl Configuration {
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field_id(&self, name: &str) -> Option<FieldId> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .map(|i| FieldId(i as u32))
    }

    pub(crate) fn field(&self, id: FieldId) -> &FieldEntry {
        &self.fields[id.0 as usize]
    }

    pub(crate) fn chain(&self, id: FieldId) -> &Chain {
        &self.chains[id.0 as usize]
    }

    /// Total byte size, if every field is statically sized; `None` the
    /// moment one field is dynamic, since only a live buffer can answer
    /// that question.
    pub fn static_size(&self) -> Option<u64> {
        let mut total = 0u64;
        for field in &self.fields {
            match field.codec.size() {
                FieldSize::Static(n) => total += n,
                FieldSize::Dynamic => return None,
            }
        }
        Some(total)
    }

    /// Decode every field in declaration order against a plain
    /// concatenated buffer — the strategy nested objects use, since their
    /// wire layout has no offset chain of its own to exploit.
    pub(crate) fn decode_eager(
        self: &Arc<Self>,
        cursor: &mut dyn Cursor,
    ) -> Result<Record<'static>, DecodeError> {
        let mut values = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let (value, _) = field.codec.read(&field.name, cursor).map_err(|e| {
                log::debug!("eager decode failed on field {:?}: {e}", field.name);
                e
            })?;
            values.push(Some(value));
        }
        Ok(Record::from_owned(Arc::clone(self), values))
    }
}

/// Declares a structure's fields and structure-level options, then
/// compiles them into a [`Configuration`].
pub struct StructureBuilder {
    fields: Vec<FieldEntry>,
    options: OptionSet,
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            options: OptionSet::new(),
        }
    }

    /// Set a structure-level option every recognizing field inherits
    /// unless it set that option explicitly itself.
    pub fn option(mut self, key: &'static str, value: OptionValue) -> Self {
        self.options.set(key, value);
        self
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        codec: impl Codec + 'static,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        if self.fields.iter().any(|f| f.name == name) {
            return Err(ConfigurationError::DuplicateFieldName(name));
        }
        self.fields.push(FieldEntry {
            name,
            codec: Box::new(codec),
        });
        Ok(self)
    }

    pub fn build(mut self) -> Arc<Configuration> {
        for field in &mut self.fields {
            for key in field.codec.recognized_options() {
                if let Some(value) = self.options.get(key) {
                    field.codec.inherit_option(key, value);
                }
            }
        }
        let sizes: Vec<FieldSize> = self.fields.iter().map(|f| f.codec.size()).collect();
        let chains = compile_chains(&sizes);
        Arc::new(Configuration {
            fields: self.fields,
            chains,
        })
    }
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Either a plain in-memory field list (`Owned`, produced by `new`/`loads`
/// after eager decode, or by hand via `set`) or a window onto a live
/// cursor (`Bound`, produced by `load`) whose fields are decoded lazily
/// and memoized in a [`State`]. `'c` is the cursor's borrow, letting a
/// bound record wrap a borrowed [`SliceCursor`] as well as an owning
/// [`VecCursor`]/[`crate::cursor::FileCursor`].
enum Backing<'c> {
    Owned(Vec<Option<Value>>),
    Bound {
        cursor: Box<dyn Cursor + 'c>,
        state: State,
    },
}

/// A structure instance: either fully materialized in memory, or a lazy
/// view over a cursor that resolves and caches fields on first access.
pub struct Record<'c> {
    config: Arc<Configuration>,
    backing: Backing<'c>,
}

impl<'c> Record<'c> {
    /// A fresh, fully-unassigned owned record.
    pub fn new(config: Arc<Configuration>) -> Self {
        let n = config.field_count();
        Self {
            config,
            backing: Backing::Owned(vec![None; n]),
        }
    }

    fn from_owned(config: Arc<Configuration>, values: Vec<Option<Value>>) -> Self {
        Self {
            config,
            backing: Backing::Owned(values),
        }
    }

    /// Bind a cursor for lazy, offset-memoizing field access.
    pub fn load(config: Arc<Configuration>, cursor: Box<dyn Cursor + 'c>) -> Self {
        let n = config.field_count();
        Self {
            config,
            backing: Backing::Bound {
                cursor,
                state: State::new(n),
            },
        }
    }

    /// Eagerly decode every field from an in-memory buffer.
    pub fn loads(config: Arc<Configuration>, bytes: &[u8]) -> Result<Record<'static>, DecodeError> {
        let mut cursor = SliceCursor::new(bytes);
        config.decode_eager(&mut cursor)
    }

    /// Assign a field's value (owned records only resolve this eagerly;
    /// cursor-bound records seed the cache so a later read short-circuits).
    pub fn set(&mut self, field: &str, value: Value) -> Result<(), ValidationError> {
        let id = self.field_id(field)?;
        self.config.field(id).codec.validate(field, &value)?;
        match &mut self.backing {
            Backing::Owned(values) => values[id.0 as usize] = Some(value),
            Backing::Bound { state, .. } => state.set_value(id, value),
        }
        Ok(())
    }

    /// Raw decoded [`Value`] for `field`.
    pub fn get_value(&mut self, field: &str) -> Result<Value, AccessError> {
        let id = self
            .config
            .field_id(field)
            .ok_or_else(|| AccessError::Missing(MissingField(field.to_string())))?;
        match &mut self.backing {
            Backing::Owned(values) => match &values[id.0 as usize] {
                Some(v) => Ok(v.clone()),
                None => self
                    .config
                    .field(id)
                    .codec
                    .default_value()
                    .ok_or_else(|| AccessError::Missing(MissingField(field.to_string()))),
            },
            Backing::Bound { cursor, state } => {
                Ok(state.value_of(&self.config, cursor.as_mut(), id)?)
            }
        }
    }

    /// Strongly typed field access, via [`FromValue`].
    pub fn get<T: FromValue>(&mut self, field: &str) -> Result<T, AccessError> {
        let value = self.get_value(field)?;
        T::from_value(&value).ok_or_else(|| AccessError::WrongType(field.to_string()))
    }

    /// Byte size this field occupies, probing a dynamic field if needed.
    pub fn field_size(&mut self, field: &str) -> Result<u64, AccessError> {
        let id = self.field_id(field)?;
        let entry = self.config.field(id);
        match &mut self.backing {
            Backing::Owned(values) => match entry.codec.size() {
                FieldSize::Static(n) => Ok(n),
                FieldSize::Dynamic => {
                    let value = values[id.0 as usize]
                        .clone()
                        .or_else(|| entry.codec.default_value())
                        .ok_or_else(|| AccessError::Missing(MissingField(field.to_string())))?;
                    Ok(entry.codec.pack(field, &value)?.len() as u64)
                }
            },
            Backing::Bound { cursor, state } => {
                Ok(state.size_of(&self.config, cursor.as_mut(), id)?)
            }
        }
    }

    /// Absolute byte offset of `field` within a cursor-bound record.
    pub fn field_offset(&mut self, field: &str) -> Result<u64, AccessError> {
        let id = self.field_id(field)?;
        match &mut self.backing {
            Backing::Owned(_) => Err(AccessError::WrongType(field.to_string())),
            Backing::Bound { cursor, state } => {
                Ok(state.offset_of(&self.config, cursor.as_mut(), id)?)
            }
        }
    }

    /// Validate every assigned (or defaulted) field. Only meaningful on an
    /// owned record; a cursor-bound record's bytes are assumed valid until
    /// decoded, at which point `get` would have already surfaced a decode
    /// error.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Backing::Owned(values) = &self.backing {
            for (index, field) in self.config.fields.iter().enumerate() {
                match &values[index] {
                    Some(value) => field.codec.validate(&field.name, value)?,
                    None => {
                        if field.codec.default_value().is_none() {
                            log::debug!("validate: field {:?} has no value and no default", field.name);
                            return Err(ValidationError::Missing {
                                field: field.name.clone(),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Encode every field to `cursor` in declaration order, validating as
    /// it goes. Owned records only: a cursor-bound record already has its
    /// bytes.
    pub fn dump_into(&self, cursor: &mut dyn Cursor) -> Result<u64, ValidationError> {
        let values = match &self.backing {
            Backing::Owned(values) => values,
            Backing::Bound { .. } => {
                return Err(ValidationError::TypeMismatch {
                    field: "<record>".to_string(),
                })
            }
        };
        let mut total = 0u64;
        for (field, slot) in self.config.fields.iter().zip(values.iter()) {
            let value = match slot {
                Some(v) => v.clone(),
                None => field.codec.default_value().ok_or_else(|| ValidationError::Missing {
                    field: field.name.clone(),
                })?,
            };
            total += field.codec.write(&field.name, &value, cursor)?;
        }
        Ok(total)
    }

    /// In-memory equivalent of `dump_into`.
    pub fn dumps(&self) -> Result<Vec<u8>, ValidationError> {
        let mut cursor = VecCursor::new();
        self.dump_into(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    fn field_id(&self, field: &str) -> Result<FieldId, ValidationError> {
        self.config
            .field_id(field)
            .ok_or_else(|| ValidationError::TypeMismatch {
                field: field.to_string(),
            })
    }
}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.backing {
            Backing::Owned(values) => f.debug_struct("Record").field("values", values).finish(),
            Backing::Bound { .. } => f
                .debug_struct("Record")
                .field("backing", &"<cursor-bound>")
                .finish(),
        }
    }
}

impl Clone for Record<'_> {
    /// Only an owned record can be cloned; a cursor-bound record holds a
    /// `Box<dyn Cursor>` with no well-defined duplication semantics.
    fn clone(&self) -> Self {
        match &self.backing {
            Backing::Owned(values) => Record {
                config: Arc::clone(&self.config),
                backing: Backing::Owned(values.clone()),
            },
            Backing::Bound { .. } => {
                panic!("cannot clone a cursor-bound record; decode it into an owned record first")
            }
        }
    }
}

impl PartialEq for Record<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.backing, &other.backing) {
            (Backing::Owned(a), Backing::Owned(b)) => Arc::ptr_eq(&self.config, &other.config) && a == b,
            _ => panic!("cannot compare cursor-bound records; decode them into owned records first"),
        }
    }
}

#[cfg(test)]
#[path = "structure_tests.rs"]
mod tests;
