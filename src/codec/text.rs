//! Text codecs: fixed-width, length-prefixed, and terminator-delimited.
use crate::codec::{Codec, FieldSize, OptionValue, ProbeCache, TextEncoding};
use crate::cursor::Cursor;
use crate::error::{ConfigurationError, DecodeError, ValidationError};
use crate::value::Value;

//==================================================================================FIXED_LENGTH
/// Fixed-width text, padded with a single repeated byte on write. Padding
/// bytes are retained on read; the codec never trims them.
#[derive(Debug, Clone)]
pub struct FixedLength {
    size: usize,
    padding: u8,
    padding_explicit: bool,
    encoding: TextEncoding,
    encoding_explicit: bool,
}

impl FixedLength {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            padding: 0,
            padding_explicit: false,
            encoding: TextEncoding::Utf8,
            encoding_explicit: false,
        }
    }

    pub fn padding(mut self, byte: u8) -> Self {
        self.padding = byte;
        self.padding_explicit = true;
        self
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self.encoding_explicit = true;
        self
    }
}

impl Codec for FixedLength {
    fn size(&self) -> FieldSize {
        FieldSize::Static(self.size as u64)
    }

    fn validate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        let text = value.as_text().ok_or_else(|| ValidationError::TypeMismatch {
            field: field.to_string(),
        })?;
        let encoded = self
            .encoding
            .encode(text)
            .map_err(|_| ValidationError::Encoding {
                field: field.to_string(),
            })?;
        if encoded.len() > self.size {
            return Err(ValidationError::LengthMismatch {
                field: field.to_string(),
                expected: self.size,
                actual: encoded.len(),
            });
        }
        Ok(())
    }

    fn read(&self, field: &str, cursor: &mut dyn Cursor) -> Result<(Value, u64), DecodeError> {
        let mut buf = vec![0u8; self.size];
        cursor.read_exact(&mut buf)?;
        let text = self.encoding.decode(&buf)?;
        let _ = field;
        Ok((Value::Text(text), self.size as u64))
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
        Ok(self.size as u64)
    }

    fn pack(&self, field: &str, value: &Value) -> Result<Vec<u8>, ValidationError> {
        self.validate(field, value)?;
        let text = value.as_text().expect("validated above");
        let mut encoded = self.encoding.encode(text).expect("validated above");
        encoded.resize(self.size, self.padding);
        Ok(encoded)
    }

    fn unpack(&self, field: &str, bytes: &[u8]) -> Result<Value, DecodeError> {
        if bytes.len() != self.size {
            return Err(DecodeError::UnexpectedEof {
                needed: self.size as u64,
                available: bytes.len() as u64,
            });
        }
        let _ = field;
        Ok(Value::Text(self.encoding.decode(bytes)?))
    }

    fn recognized_options(&self) -> &'static [&'static str] {
        &["padding", "encoding"]
    }

    fn inherit_option(&mut self, key: &str, value: &OptionValue) {
        match (key, value) {
            ("padding", OptionValue::Padding(b)) if !self.padding_explicit => {
                self.padding = *b;
            }
            ("encoding", OptionValue::Encoding(e)) if !self.encoding_explicit => {
                self.encoding = e.clone();
            }
            _ => {}
        }
    }
}

//==================================================================================LENGTH_INDEXED
/// A length prefix (itself any integer-shaped codec) followed by that many
/// bytes of text. Probe size resolution: it is the *total* byte
/// count, prefix included.
pub struct LengthIndexed {
    prefix: Box<dyn Codec>,
    encoding: TextEncoding,
    encoding_explicit: bool,
}

impl std::fmt::Debug for LengthIndexed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LengthIndexed")
            .field("prefix", &self.prefix)
            .field("encoding", &self.encoding)
            .field("encoding_explicit", &self.encoding_explicit)
            .finish()
    }
}

impl LengthIndexed {
    pub fn new(prefix: Box<dyn Codec>) -> Result<Self, ConfigurationError> {
        if prefix.size() == FieldSize::Dynamic {
            return Err(ConfigurationError::DynamicLengthPrefix);
        }
        Ok(Self {
            prefix,
            encoding: TextEncoding::Utf8,
            encoding_explicit: false,
        })
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self.encoding_explicit = true;
        self
    }

    fn prefix_len(&self) -> u64 {
        match self.prefix.size() {
            FieldSize::Static(n) => n,
            FieldSize::Dynamic => unreachable!("validated in new()"),
        }
    }
}

impl Codec for LengthIndexed {
    fn size(&self) -> FieldSize {
        FieldSize::Dynamic
    }

    fn validate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        value.as_text().map(|_| ()).ok_or_else(|| ValidationError::TypeMismatch {
            field: field.to_string(),
        })
    }

    fn read(&self, field: &str, cursor: &mut dyn Cursor) -> Result<(Value, u64), DecodeError> {
        let (total, cache) = self.probe_size(field, cursor)?;
        let value = self.decode_with_cache(field, cursor, &cache)?;
        Ok((value, total))
    }

    fn probe_size(
        &self,
        field: &str,
        cursor: &mut dyn Cursor,
    ) -> Result<(u64, ProbeCache), DecodeError> {
        let prefix_len = self.prefix_len();
        let (len_value, _) = self.prefix.read(field, cursor)?;
        let text_len = len_value
            .as_integer()
            .ok_or_else(|| DecodeError::InvalidText(format!("field {field}: length prefix did not decode to an integer")))?;
        if text_len < 0 {
            return Err(DecodeError::InvalidText(format!(
                "field {field}: negative length prefix {text_len}"
            )));
        }
        let text_len = text_len as u64;
        // Consume the text bytes now so the cursor ends up past the field
        // either way; cache them for `decode_with_cache`.
        let mut buf = vec![0u8; text_len as usize];
        cursor.read_exact(&mut buf)?;
        Ok((
            prefix_len + text_len,
            ProbeCache::TextLength {
                prefix_len,
                text_len,
            },
        ))
    }

    fn decode_with_cache(
        &self,
        field: &str,
        cursor: &mut dyn Cursor,
        cache: &ProbeCache,
    ) -> Result<Value, DecodeError> {
        let ProbeCache::TextLength { prefix_len, text_len } = cache else {
            unreachable!("LengthIndexed always produces a TextLength cache")
        };
        // The text bytes were already consumed in `probe_size`; re-read them
        // from just before the current position.
        let here = cursor.tell()?;
        let start = here - text_len;
        cursor.seek(start)?;
        let mut buf = vec![0u8; *text_len as usize];
        cursor.read_exact(&mut buf)?;
        let _ = prefix_len;
        Ok(Value::Text(self.encoding.decode(&buf)?))
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
        Ok(bytes.len() as u64)
    }

    fn pack(&self, field: &str, value: &Value) -> Result<Vec<u8>, ValidationError> {
        self.validate(field, value)?;
        let text = value.as_text().expect("validated above");
        let encoded = self.encoding.encode(text).map_err(|_| ValidationError::Encoding {
            field: field.to_string(),
        })?;
        let len_value = integer_value_for(self.prefix_len(), encoded.len() as u64);
        let mut out = self.prefix.pack(field, &len_value)?;
        out.extend_from_slice(&encoded);
        Ok(out)
    }

    fn unpack(&self, field: &str, bytes: &[u8]) -> Result<Value, DecodeError> {
        let prefix_len = self.prefix_len() as usize;
        if bytes.len() < prefix_len {
            return Err(DecodeError::UnexpectedEof {
                needed: prefix_len as u64,
                available: bytes.len() as u64,
            });
        }
        let len_value = self.prefix.unpack(field, &bytes[..prefix_len])?;
        let text_len = len_value.as_integer().unwrap_or(0) as usize;
        if bytes.len() != prefix_len + text_len {
            return Err(DecodeError::UnexpectedEof {
                needed: (prefix_len + text_len) as u64,
                available: bytes.len() as u64,
            });
        }
        Ok(Value::Text(self.encoding.decode(&bytes[prefix_len..])?))
    }

    fn recognized_options(&self) -> &'static [&'static str] {
        &["encoding"]
    }

    fn inherit_option(&mut self, key: &str, value: &OptionValue) {
        if key == "encoding" && !self.encoding_explicit {
            if let OptionValue::Encoding(e) = value {
                self.encoding = e.clone();
            }
        }
    }
}

fn integer_value_for(width: u64, n: u64) -> Value {
    match width {
        1 => Value::U8(n as u8),
        2 => Value::U16(n as u16),
        4 => Value::U32(n as u32),
        8 => Value::U64(n),
        _ => Value::U64(n),
    }
}

//==================================================================================TERMINATED
/// Text read up to (and consuming, but not including) a single terminator
/// byte. At true EOF with no bytes consumed, decodes to an empty string
/// with size 0; a terminator-less EOF
/// after partial content returns that content with size equal to the bytes
/// actually consumed.
#[derive(Debug, Clone)]
pub struct Terminated {
    terminator: u8,
    terminator_explicit: bool,
    encoding: TextEncoding,
    encoding_explicit: bool,
}

impl Terminated {
    pub fn new(terminator: u8) -> Self {
        Self {
            terminator,
            terminator_explicit: true,
            encoding: TextEncoding::Utf8,
            encoding_explicit: false,
        }
    }

    /// Structure-level default terminator (e.g. NUL), overridable by
    /// `inherit_option`.
    pub fn default_terminator() -> Self {
        Self {
            terminator: 0,
            terminator_explicit: false,
            encoding: TextEncoding::Utf8,
            encoding_explicit: false,
        }
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self.encoding_explicit = true;
        self
    }
}

impl Codec for Terminated {
    fn size(&self) -> FieldSize {
        FieldSize::Dynamic
    }

    fn validate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        let text = value.as_text().ok_or_else(|| ValidationError::TypeMismatch {
            field: field.to_string(),
        })?;
        if text.as_bytes().contains(&self.terminator) {
            return Err(ValidationError::Encoding {
                field: field.to_string(),
            });
        }
        Ok(())
    }

    fn read(&self, field: &str, cursor: &mut dyn Cursor) -> Result<(Value, u64), DecodeError> {
        let (total, cache) = self.probe_size(field, cursor)?;
        let value = self.decode_with_cache(field, cursor, &cache)?;
        Ok((value, total))
    }

    fn probe_size(
        &self,
        _field: &str,
        cursor: &mut dyn Cursor,
    ) -> Result<(u64, ProbeCache), DecodeError> {
        let mut content = Vec::new();
        let mut one = [0u8; 1];
        loop {
            let n = cursor.read(&mut one)?;
            if n == 0 {
                // True EOF. If we already consumed bytes looking for the
                // terminator, those bytes count; otherwise this is the
                // clean empty-string case.
                let total = content.len() as u64;
                return Ok((total, ProbeCache::Terminated { content, total }));
            }
            if one[0] == self.terminator {
                let total = content.len() as u64 + 1;
                return Ok((total, ProbeCache::Terminated { content, total }));
            }
            content.push(one[0]);
        }
    }

    fn decode_with_cache(
        &self,
        _field: &str,
        _cursor: &mut dyn Cursor,
        cache: &ProbeCache,
    ) -> Result<Value, DecodeError> {
        let ProbeCache::Terminated { content, .. } = cache else {
            unreachable!("Terminated always produces a Terminated cache")
        };
        Ok(Value::Text(self.encoding.decode(content)?))
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
        Ok(bytes.len() as u64)
    }

    fn pack(&self, field: &str, value: &Value) -> Result<Vec<u8>, ValidationError> {
        self.validate(field, value)?;
        let text = value.as_text().expect("validated above");
        let mut encoded = self.encoding.encode(text).map_err(|_| ValidationError::Encoding {
            field: field.to_string(),
        })?;
        encoded.push(self.terminator);
        Ok(encoded)
    }

    fn unpack(&self, field: &str, bytes: &[u8]) -> Result<Value, DecodeError> {
        let content = match bytes.iter().position(|b| *b == self.terminator) {
            Some(i) => &bytes[..i],
            None => bytes,
        };
        let _ = field;
        Ok(Value::Text(self.encoding.decode(content)?))
    }

    fn recognized_options(&self) -> &'static [&'static str] {
        &["terminator", "encoding"]
    }

    fn inherit_option(&mut self, key: &str, value: &OptionValue) {
        match (key, value) {
            ("terminator", OptionValue::Terminator(b)) if !self.terminator_explicit => {
                self.terminator = *b;
            }
            ("encoding", OptionValue::Encoding(e)) if !self.encoding_explicit => {
                self.encoding = e.clone();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
