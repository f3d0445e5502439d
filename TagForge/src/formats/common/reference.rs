//! Tag references, string ids, tag data and their trailing regions
//!
//! Each of these records stores a length in its fixed part; the bytes it
//! describes are appended after every fixed record of the owning structure.

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use super::reader::TagReader;
use super::types::FourCC;
use super::writer::{to_i32, to_u32};
use crate::error::{Error, Result};

/// Size of a tag reference in bytes
pub const REFERENCE_SIZE: usize = 16;

/// Size of a tag data record in bytes
pub const TAG_DATA_SIZE: usize = 20;

/// Cross-tag dependency: target group plus path.
///
/// The path length travels in the fixed record; the path itself (with a NUL
/// terminator) is trailing data and is skipped entirely when the recorded
/// length is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub group: FourCC,
    pub path_pointer: u32,
    pub path_length: i32,
    pub tag_index: i32,
    pub path: String,
}

impl Reference {
    pub fn new(group: FourCC, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        Ok(Self {
            group,
            path_pointer: 0,
            path_length: to_i32("reference path length", path.len())?,
            tag_index: -1,
            path,
        })
    }

    /// Reference with no path, as written for absent dependencies.
    pub fn empty(group: FourCC) -> Self {
        Self {
            group,
            path_pointer: 0,
            path_length: 0,
            tag_index: -1,
            path: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.path_length <= 0
    }

    /// `None` when the reference carries no path.
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() { None } else { Some(self) }
    }

    /// Read the fixed record; the path is filled in by [`Reference::read_path`].
    pub fn read<B: ByteOrder>(reader: &mut TagReader<'_>) -> Result<Self> {
        Ok(Self {
            group: FourCC::read::<B>(reader)?,
            path_pointer: reader.read_u32::<B>()?,
            path_length: reader.read_i32::<B>()?,
            tag_index: reader.read_i32::<B>()?,
            path: String::new(),
        })
    }

    pub fn write<B: ByteOrder>(&self, out: &mut Vec<u8>) -> Result<()> {
        self.group.write::<B>(out)?;
        out.write_u32::<B>(self.path_pointer)?;
        out.write_i32::<B>(self.path_length)?;
        out.write_i32::<B>(self.tag_index)?;
        Ok(())
    }

    pub fn read_path(&mut self, reader: &mut TagReader<'_>) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        self.path = read_trailing_string(reader, "reference path", self.path_length as usize, true)?;
        Ok(())
    }

    pub fn write_path(&self, out: &mut Vec<u8>) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        if self.path.len() != self.path_length as usize {
            return Err(Error::SizeMismatch {
                structure: "reference path",
                expected: self.path_length as usize,
                found: self.path.len(),
            });
        }
        write_trailing_string(out, &self.path, true);
        Ok(())
    }
}

/// Write an optional reference's fixed record, using `group` when absent.
pub fn write_optional_reference<B: ByteOrder>(
    out: &mut Vec<u8>,
    reference: Option<&Reference>,
    group: FourCC,
) -> Result<()> {
    match reference {
        Some(reference) => reference.write::<B>(out),
        None => Reference::empty(group).write::<B>(out),
    }
}

/// Write an optional reference's trailing path.
pub fn write_optional_path(out: &mut Vec<u8>, reference: Option<&Reference>) -> Result<()> {
    match reference {
        Some(reference) => reference.write_path(out),
        None => Ok(()),
    }
}

/// Interned-string field whose length is a legacy big-endian `u32`.
///
/// The encoding ignores the file's byte order: callers never pass one in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringId {
    pub length: u32,
}

impl StringId {
    pub fn for_str(value: &str) -> Result<Self> {
        Ok(Self {
            length: to_u32("string id length", value.len())?,
        })
    }

    pub fn read(reader: &mut TagReader<'_>) -> Result<Self> {
        Ok(Self {
            length: reader.read_u32::<BigEndian>()?,
        })
    }

    pub fn write(self, out: &mut Vec<u8>) -> Result<()> {
        out.write_u32::<BigEndian>(self.length)?;
        Ok(())
    }

    pub fn read_value(self, reader: &mut TagReader<'_>) -> Result<String> {
        read_trailing_string(reader, "string id", self.length as usize, false)
    }
}

/// Variable-length byte payload record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagData {
    pub size: i32,
    pub flags: u32,
    pub file_offset: u32,
    pub pointer: u32,
    pub unknown: u32,
}

impl TagData {
    pub fn with_size(size: usize) -> Result<Self> {
        Ok(Self {
            size: to_i32("tag data size", size)?,
            ..Self::default()
        })
    }

    pub fn len(&self) -> usize {
        self.size.max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.size <= 0
    }

    pub fn read<B: ByteOrder>(reader: &mut TagReader<'_>) -> Result<Self> {
        Ok(Self {
            size: reader.read_i32::<B>()?,
            flags: reader.read_u32::<B>()?,
            file_offset: reader.read_u32::<B>()?,
            pointer: reader.read_u32::<B>()?,
            unknown: reader.read_u32::<B>()?,
        })
    }

    pub fn write<B: ByteOrder>(&self, out: &mut Vec<u8>) -> Result<()> {
        out.write_i32::<B>(self.size)?;
        out.write_u32::<B>(self.flags)?;
        out.write_u32::<B>(self.file_offset)?;
        out.write_u32::<B>(self.pointer)?;
        out.write_u32::<B>(self.unknown)?;
        Ok(())
    }

    pub fn read_payload<'a>(&self, reader: &mut TagReader<'a>) -> Result<&'a [u8]> {
        reader.ensure("tag data", self.len())?;
        reader.take(self.len())
    }
}

/// Read `len` bytes of trailing string data, plus a NUL when `terminated`.
///
/// The text must be UTF-8 so that its byte length survives re-encoding.
pub fn read_trailing_string(
    reader: &mut TagReader<'_>,
    structure: &'static str,
    len: usize,
    terminated: bool,
) -> Result<String> {
    let total = len + usize::from(terminated);
    let bytes = reader.section(structure, total)?.take(total)?;
    let (text, terminator) = bytes.split_at(len);
    if let Some(&found) = terminator.first().filter(|&&b| b != 0) {
        return Err(Error::MissingTerminator { structure, found });
    }
    let text = std::str::from_utf8(text).map_err(|_| Error::InvalidUtf8 { structure })?;
    Ok(text.to_string())
}

/// Append string bytes, plus a NUL when `terminated`.
pub fn write_trailing_string(out: &mut Vec<u8>, value: &str, terminated: bool) {
    out.extend_from_slice(value.as_bytes());
    if terminated {
        out.push(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::common::types::groups;
    use byteorder::{BigEndian, LittleEndian};

    #[test]
    fn test_reference_reencodes_byte_for_byte() {
        let mut bytes = b"mtib".to_vec();
        bytes.extend_from_slice(&0x1234u32.to_le_bytes());
        bytes.extend_from_slice(&5i32.to_le_bytes());
        bytes.extend_from_slice(&(-1i32).to_le_bytes());
        bytes.extend_from_slice(b"rocks\0");

        let mut reader = TagReader::new(&bytes, "test");
        let mut reference = Reference::read::<LittleEndian>(&mut reader).unwrap();
        reference.read_path(&mut reader).unwrap();
        assert_eq!(reference.group, groups::BITMAP);
        assert_eq!(reference.path, "rocks");
        assert!(reader.is_empty());

        let mut out = Vec::new();
        reference.write::<LittleEndian>(&mut out).unwrap();
        reference.write_path(&mut out).unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn test_zero_length_reference_writes_no_trailing_bytes() {
        let mut reference = Reference::new(groups::BITMAP, "levels\\rock").unwrap();
        reference.path_length = 0;

        let mut out = Vec::new();
        reference.write_path(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_string_id_length_is_always_big_endian() {
        let mut out = Vec::new();
        StringId::for_str("base_map").unwrap().write(&mut out).unwrap();
        assert_eq!(out, [0, 0, 0, 8]);

        let mut reader = TagReader::new(&out, "test");
        assert_eq!(StringId::read(&mut reader).unwrap().length, 8);
        // The same bytes read in the payload order would be wrong
        assert_eq!(LittleEndian::read_u32(&out), 0x0800_0000);
        assert_eq!(BigEndian::read_u32(&out), 8);
    }

    fn raw_reference(path: &[u8], declared: i32) -> Vec<u8> {
        let mut bytes = b"mtib".to_vec();
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&declared.to_le_bytes());
        bytes.extend_from_slice(&(-1i32).to_le_bytes());
        bytes.extend_from_slice(path);
        bytes
    }

    #[test]
    fn test_path_must_be_utf8() {
        let bytes = raw_reference(b"levels\\roc\xe9\0", 11);
        let mut reader = TagReader::new(&bytes, "test");
        let mut reference = Reference::read::<LittleEndian>(&mut reader).unwrap();
        assert!(matches!(
            reference.read_path(&mut reader),
            Err(Error::InvalidUtf8 { structure: "reference path" })
        ));
    }

    #[test]
    fn test_path_must_end_in_nul() {
        let bytes = raw_reference(b"abX", 2);
        let mut reader = TagReader::new(&bytes, "test");
        let mut reference = Reference::read::<LittleEndian>(&mut reader).unwrap();
        assert!(matches!(
            reference.read_path(&mut reader),
            Err(Error::MissingTerminator { structure: "reference path", found: b'X' })
        ));
    }

    #[test]
    fn test_string_id_value_has_no_terminator() {
        let bytes = b"base_map";
        let mut reader = TagReader::new(bytes, "test");
        let value = StringId { length: 8 }.read_value(&mut reader).unwrap();
        assert_eq!(value, "base_map");
        assert!(reader.is_empty());
    }

    #[test]
    fn test_truncated_path() {
        let bytes = b"roc";
        let mut reader = TagReader::new(bytes, "test");
        let err = read_trailing_string(&mut reader, "reference path", 5, true).unwrap_err();
        assert!(matches!(
            err,
            Error::Truncated { structure: "reference path", needed: 6, remaining: 3 }
        ));
    }
}
