//! 64-byte tag file header shared by both generations

use byteorder::{ByteOrder, WriteBytesExt};

use super::reader::TagReader;
use super::types::FourCC;
use crate::error::Result;

/// Size of the tag header in bytes
pub const HEADER_SIZE: usize = 64;

/// Tag file header.
///
/// Identifies the tag's group, version and the engine tag that selects the
/// body layout. Everything else is carried verbatim so a decoded header
/// re-encodes to the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagHeader {
    /// Legacy id and name area, unused by both engines
    pub reserved: [u8; 36],
    pub group: FourCC,
    /// CRC-32 of the bytes following the header
    pub checksum: u32,
    pub data_offset: u32,
    pub data_length: u32,
    pub unknown: u32,
    pub version: u16,
    pub destination: u8,
    pub plugin_handle: i8,
    pub engine_tag: FourCC,
}

impl TagHeader {
    /// Fresh header with writer defaults; offsets and checksum are filled in
    /// by [`TagHeader::finalize`].
    pub fn new(group: FourCC, version: u16, engine_tag: FourCC) -> Self {
        Self {
            reserved: [0; 36],
            group,
            checksum: 0,
            data_offset: HEADER_SIZE as u32,
            data_length: 0,
            unknown: 0,
            version,
            destination: 0,
            plugin_handle: -1,
            engine_tag,
        }
    }

    pub fn read<B: ByteOrder>(reader: &mut TagReader<'_>) -> Result<Self> {
        let mut r = reader.section("tag header", HEADER_SIZE)?;
        let header = Self {
            reserved: r.read_array::<36>()?,
            group: FourCC::read::<B>(&mut r)?,
            checksum: r.read_u32::<B>()?,
            data_offset: r.read_u32::<B>()?,
            data_length: r.read_u32::<B>()?,
            unknown: r.read_u32::<B>()?,
            version: r.read_u16::<B>()?,
            destination: r.read_u8()?,
            plugin_handle: r.read_i8()?,
            engine_tag: FourCC::read::<B>(&mut r)?,
        };
        r.finish()?;
        Ok(header)
    }

    pub fn write<B: ByteOrder>(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&self.reserved);
        self.group.write::<B>(out)?;
        out.write_u32::<B>(self.checksum)?;
        out.write_u32::<B>(self.data_offset)?;
        out.write_u32::<B>(self.data_length)?;
        out.write_u32::<B>(self.unknown)?;
        out.write_u16::<B>(self.version)?;
        out.write_u8(self.destination)?;
        out.write_i8(self.plugin_handle)?;
        self.engine_tag.write::<B>(out)?;
        Ok(())
    }

    /// Recompute the offset, length and checksum fields for `body`.
    pub fn finalize(&mut self, body: &[u8]) -> Result<()> {
        self.data_offset = HEADER_SIZE as u32;
        self.data_length = super::writer::to_u32("data_length", body.len())?;
        self.checksum = crc32fast::hash(body);
        Ok(())
    }
}

/// Serialize `header` followed by `body`, with recomputed header fields.
pub fn assemble_tag<B: ByteOrder>(header: &TagHeader, body: &[u8]) -> Result<Vec<u8>> {
    let mut header = header.clone();
    header.finalize(body)?;

    let mut output = Vec::with_capacity(HEADER_SIZE + body.len());
    header.write::<B>(&mut output)?;
    output.extend_from_slice(body);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::common::types::{engine_tags, groups};
    use byteorder::{BigEndian, LittleEndian};

    fn sample_bytes() -> Vec<u8> {
        let mut bytes: Vec<u8> = (0u8..36).collect();
        bytes.extend_from_slice(b"dahs"); // group, little-endian
        bytes.extend_from_slice(&0xDEADBEEFu32.to_le_bytes());
        bytes.extend_from_slice(&64u32.to_le_bytes());
        bytes.extend_from_slice(&128u32.to_le_bytes());
        bytes.extend_from_slice(&7u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.push(3);
        bytes.push(0xFF);
        bytes.extend_from_slice(b"!MLB");
        bytes
    }

    #[test]
    fn test_header_reencodes_byte_for_byte() {
        let bytes = sample_bytes();
        let mut reader = TagReader::new(&bytes, "tag");
        let header = TagHeader::read::<LittleEndian>(&mut reader).unwrap();

        assert_eq!(header.group, groups::SHADER);
        assert_eq!(header.engine_tag, engine_tags::BLM);
        assert_eq!(header.plugin_handle, -1);
        assert_eq!(header.destination, 3);

        let mut out = Vec::new();
        header.write::<LittleEndian>(&mut out).unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn test_big_endian_header() {
        let header = TagHeader::new(groups::SHADER_MODEL, 2, engine_tags::BLAM);
        let mut out = Vec::new();
        header.write::<BigEndian>(&mut out).unwrap();
        assert_eq!(out.len(), HEADER_SIZE);
        assert_eq!(&out[36..40], b"soso");
        assert_eq!(&out[60..64], b"blam");
    }

    #[test]
    fn test_assemble_recomputes_fields() {
        let header = TagHeader::new(groups::SHADER, 1, engine_tags::BLM);
        let body = [1u8, 2, 3, 4, 5];
        let tag = assemble_tag::<LittleEndian>(&header, &body).unwrap();

        let mut reader = TagReader::new(&tag, "tag");
        let read_back = TagHeader::read::<LittleEndian>(&mut reader).unwrap();
        assert_eq!(read_back.data_offset, 64);
        assert_eq!(read_back.data_length, 5);
        assert_eq!(read_back.checksum, crc32fast::hash(&body));
        assert_eq!(&tag[HEADER_SIZE..], &body);
    }

    #[test]
    fn test_truncated_header() {
        let bytes = sample_bytes();
        let mut reader = TagReader::new(&bytes[..40], "tag");
        assert!(matches!(
            TagHeader::read::<LittleEndian>(&mut reader),
            Err(crate::Error::Truncated { structure: "tag header", needed: 64, remaining: 40 })
        ));
    }
}
