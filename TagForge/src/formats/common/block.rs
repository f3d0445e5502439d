//! Block count records, block headers and opaque blocks

use byteorder::{ByteOrder, WriteBytesExt};

use super::reader::TagReader;
use super::types::{BLOCK_MARKER, FourCC};
use super::writer::to_i32;
use crate::error::{Error, Result};

/// Size of a block header in bytes
pub const BLOCK_HEADER_SIZE: usize = 16;

/// Size of a block count record in bytes
pub const BLOCK_COUNT_SIZE: usize = 12;

/// Header preceding the elements of every non-empty second-generation array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub marker: FourCC,
    pub version: i32,
    pub count: i32,
    /// Element size in bytes
    pub stride: i32,
}

impl BlockHeader {
    pub fn new(version: i32, count: i32, stride: i32) -> Self {
        Self {
            marker: BLOCK_MARKER,
            version,
            count,
            stride,
        }
    }

    pub fn read<B: ByteOrder>(reader: &mut TagReader<'_>) -> Result<Self> {
        let mut r = reader.section("block header", BLOCK_HEADER_SIZE)?;
        let header = Self {
            marker: FourCC::read::<B>(&mut r)?,
            version: r.read_i32::<B>()?,
            count: r.read_i32::<B>()?,
            stride: r.read_i32::<B>()?,
        };
        r.finish()?;
        Ok(header)
    }

    pub fn write<B: ByteOrder>(&self, out: &mut Vec<u8>) -> Result<()> {
        self.marker.write::<B>(out)?;
        out.write_i32::<B>(self.version)?;
        out.write_i32::<B>(self.count)?;
        out.write_i32::<B>(self.stride)?;
        Ok(())
    }

    /// Total bytes occupied by the fixed elements.
    pub fn span(&self) -> usize {
        (self.count.max(0) as usize).saturating_mul(self.stride.max(0) as usize)
    }
}

/// Count-only record embedded in the owning structure's fixed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockCount {
    pub count: i32,
    pub address: u32,
    pub definition: u32,
}

impl BlockCount {
    pub fn new(count: usize) -> Result<Self> {
        Ok(Self {
            count: to_i32("block count", count)?,
            address: 0,
            definition: 0,
        })
    }

    pub fn read<B: ByteOrder>(reader: &mut TagReader<'_>) -> Result<Self> {
        Ok(Self {
            count: reader.read_i32::<B>()?,
            address: reader.read_u32::<B>()?,
            definition: reader.read_u32::<B>()?,
        })
    }

    pub fn write<B: ByteOrder>(&self, out: &mut Vec<u8>) -> Result<()> {
        out.write_i32::<B>(self.count)?;
        out.write_u32::<B>(self.address)?;
        out.write_u32::<B>(self.definition)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.count.max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count <= 0
    }
}

/// Read the block header for an array declared by `count`.
///
/// Returns `None` for empty arrays, which carry no header. The header must
/// agree with the declared count and the layout's `stride`, and the stream
/// must hold all `count * stride` element bytes before anything is decoded.
pub fn read_block_header<B: ByteOrder>(
    reader: &mut TagReader<'_>,
    structure: &'static str,
    count: BlockCount,
    stride: usize,
) -> Result<Option<BlockHeader>> {
    if count.is_empty() {
        return Ok(None);
    }

    let header = BlockHeader::read::<B>(reader)?;
    if header.marker != BLOCK_MARKER {
        return Err(Error::InvalidBlockMarker {
            structure,
            found: header.marker.to_string(),
        });
    }
    if header.count != count.count {
        return Err(Error::SizeMismatch {
            structure,
            expected: count.len(),
            found: header.count.max(0) as usize,
        });
    }
    if header.stride.max(0) as usize != stride {
        return Err(Error::SizeMismatch {
            structure,
            expected: stride,
            found: header.stride.max(0) as usize,
        });
    }

    reader.ensure(structure, header.span())?;
    Ok(Some(header))
}

/// Write the block header for `count` elements of `stride` bytes; empty
/// arrays get no header.
pub fn write_block_header<B: ByteOrder>(
    out: &mut Vec<u8>,
    version: i32,
    count: usize,
    stride: usize,
) -> Result<()> {
    if count == 0 {
        return Ok(());
    }
    BlockHeader::new(version, to_i32("block count", count)?, to_i32("block stride", stride)?)
        .write::<B>(out)
}

/// Array whose element layout is carried verbatim.
///
/// Elements must not own trailing data of their own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawBlock {
    pub version: i32,
    pub stride: usize,
    pub elements: Vec<Vec<u8>>,
}

impl RawBlock {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn count(&self) -> Result<BlockCount> {
        BlockCount::new(self.elements.len())
    }

    pub fn read<B: ByteOrder>(
        reader: &mut TagReader<'_>,
        structure: &'static str,
        count: BlockCount,
    ) -> Result<Self> {
        if count.is_empty() {
            return Ok(Self::default());
        }

        // The stride is taken from the header since the element layout is opaque.
        let header = BlockHeader::read::<B>(reader)?;
        if header.marker != BLOCK_MARKER {
            return Err(Error::InvalidBlockMarker {
                structure,
                found: header.marker.to_string(),
            });
        }
        if header.count != count.count {
            return Err(Error::SizeMismatch {
                structure,
                expected: count.len(),
                found: header.count.max(0) as usize,
            });
        }
        // Elements of a non-empty block occupy at least one byte each
        if header.stride <= 0 {
            return Err(Error::SizeMismatch {
                structure,
                expected: 1,
                found: header.stride.max(0) as usize,
            });
        }
        reader.ensure(structure, header.span())?;

        let stride = header.stride as usize;
        let mut elements = Vec::with_capacity(count.len());
        for _ in 0..count.len() {
            elements.push(reader.take(stride)?.to_vec());
        }

        Ok(Self {
            version: header.version,
            stride,
            elements,
        })
    }

    pub fn write<B: ByteOrder>(&self, out: &mut Vec<u8>) -> Result<()> {
        if let Some(bad) = self.elements.iter().find(|e| e.len() != self.stride) {
            return Err(Error::SizeMismatch {
                structure: "raw block element",
                expected: self.stride,
                found: bad.len(),
            });
        }
        write_block_header::<B>(out, self.version, self.elements.len(), self.stride)?;
        for element in &self.elements {
            out.extend_from_slice(element);
        }
        Ok(())
    }
}
