//! Binary encoder and decoder used by the identifier codec.
//!
//! Integers are written as unsigned LEB128 varints: 7 data bits per byte,
//! least-significant group first, high bit set on every byte but the last.
//! Strings are a varuint byte length followed by UTF-8 bytes.

use unsigned_varint::{decode as varint_decode, encode as varint_encode};

use crate::error::DecodeError;

/// Sink for encoded values.
pub trait Write {
    fn write_u8(&mut self, value: u8);

    fn write_buf(&mut self, buf: &[u8]);

    fn write_var_uint(&mut self, value: u64) {
        let mut buf = varint_encode::u64_buffer();
        self.write_buf(varint_encode::u64(value, &mut buf));
    }

    fn write_var_string(&mut self, value: &str) {
        self.write_var_uint(value.len() as u64);
        self.write_buf(value.as_bytes());
    }
}

/// Source of encoded values.
pub trait Read {
    /// Offset of the next unread byte
    fn position(&self) -> usize;

    fn read_u8(&mut self) -> Result<u8, DecodeError>;

    fn read_buf(&mut self, len: usize) -> Result<&[u8], DecodeError>;

    /// Reads one varuint.
    ///
    /// Only minimal encodings are accepted: a trailing zero group (e.g.
    /// `0x80 0x00` for 0) is reported as malformed, so every value has exactly
    /// one byte representation on the wire.
    fn read_var_uint(&mut self) -> Result<u64, DecodeError>;

    fn read_var_string(&mut self) -> Result<String, DecodeError>;
}

impl Write for Vec<u8> {
    fn write_u8(&mut self, value: u8) {
        self.push(value);
    }

    fn write_buf(&mut self, buf: &[u8]) {
        self.extend_from_slice(buf);
    }
}

/// A growable output buffer.
#[derive(Debug, Default, Clone)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Encoder {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

impl Write for Encoder {
    fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    fn write_buf(&mut self, buf: &[u8]) {
        self.buf.extend_from_slice(buf);
    }
}

/// A read cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Decoder { buf, pos: 0 }
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    pub fn has_content(&self) -> bool {
        self.pos < self.buf.len()
    }
}

impl Read for Decoder<'_> {
    fn position(&self) -> usize {
        self.pos
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let byte = *self
            .buf
            .get(self.pos)
            .ok_or(DecodeError::UnexpectedEof { offset: self.pos })?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_buf(&mut self, len: usize) -> Result<&[u8], DecodeError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or(DecodeError::UnexpectedEof {
                offset: self.buf.len(),
            })?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_var_uint(&mut self) -> Result<u64, DecodeError> {
        let rest = self.remaining();
        let (value, tail) =
            varint_decode::u64(rest).map_err(|e| DecodeError::from_varint(e, self.pos))?;
        self.pos += rest.len() - tail.len();
        Ok(value)
    }

    fn read_var_string(&mut self) -> Result<String, DecodeError> {
        let len = self.read_var_uint()?;
        let len = usize::try_from(len).map_err(|_| DecodeError::UnexpectedEof {
            offset: self.buf.len(),
        })?;
        let start = self.pos;
        let bytes = self.read_buf(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { offset: start })
    }
}
