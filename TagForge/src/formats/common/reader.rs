//! Strict bounded reader over tag bytes
//!
//! Every read checks the remaining length first and fails with
//! [`Error::Truncated`] without consuming anything. Byte order is chosen per
//! call, so a big-endian length field can sit inside a little-endian record.
//!
//! [`Error::Truncated`]: crate::Error::Truncated

use byteorder::ByteOrder;

use crate::error::{Error, Result};

/// Cursor over a byte slice that never reads past its end.
#[derive(Debug, Clone)]
pub struct TagReader<'a> {
    data: &'a [u8],
    pos: usize,
    structure: &'static str,
}

impl<'a> TagReader<'a> {
    /// Create a reader over `data`, naming errors after `structure`.
    pub fn new(data: &'a [u8], structure: &'static str) -> Self {
        Self {
            data,
            pos: 0,
            structure,
        }
    }

    /// Current offset from the start of the reader's slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail unless at least `needed` bytes remain for `structure`.
    pub fn ensure(&self, structure: &'static str, needed: usize) -> Result<()> {
        if needed > self.remaining() {
            return Err(Error::Truncated {
                structure,
                needed,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Split off a sub-reader over the next `len` bytes and advance past them.
    ///
    /// Fixed-size records are decoded through a section so that a short stream
    /// is rejected before any field is populated.
    pub fn section(&mut self, structure: &'static str, len: usize) -> Result<TagReader<'a>> {
        let bytes = self.take_as(structure, len)?;
        Ok(TagReader::new(bytes, structure))
    }

    /// Take the next `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take_as(self.structure, len)
    }

    fn take_as(&mut self, structure: &'static str, len: usize) -> Result<&'a [u8]> {
        self.ensure(structure, len)?;
        let data = self.data;
        let bytes = &data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Skip `len` padding bytes.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.take(len).map(|_| ())
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16<B: ByteOrder>(&mut self) -> Result<u16> {
        Ok(B::read_u16(self.take(2)?))
    }

    pub fn read_i16<B: ByteOrder>(&mut self) -> Result<i16> {
        Ok(B::read_i16(self.take(2)?))
    }

    pub fn read_u32<B: ByteOrder>(&mut self) -> Result<u32> {
        Ok(B::read_u32(self.take(4)?))
    }

    pub fn read_i32<B: ByteOrder>(&mut self) -> Result<i32> {
        Ok(B::read_i32(self.take(4)?))
    }

    pub fn read_f32<B: ByteOrder>(&mut self) -> Result<f32> {
        Ok(B::read_f32(self.take(4)?))
    }

    /// Assert that a fixed-size section was consumed exactly.
    pub fn finish(self) -> Result<()> {
        if self.pos != self.data.len() {
            return Err(Error::SizeMismatch {
                structure: self.structure,
                expected: self.data.len(),
                found: self.pos,
            });
        }
        Ok(())
    }
}
