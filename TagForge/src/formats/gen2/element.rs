//! Arrays whose elements own trailing data

use byteorder::LittleEndian;

use crate::error::{Error, Result};
use crate::formats::common::{BlockCount, TagReader, read_block_header, write_block_header};

/// An element of a second-generation block.
///
/// Elements are decoded in two passes: every fixed record first, then each
/// element's trailing data in element order.
pub(crate) trait BlockElement: Sized {
    /// Structure name used in errors
    const STRUCTURE: &'static str;
    /// Fixed record size in bytes
    const SIZE: usize;

    /// Fixed record, decoded before any trailing data.
    type Record;

    fn read_record(reader: &mut TagReader<'_>) -> Result<Self::Record>;
    fn read_trailing(record: Self::Record, reader: &mut TagReader<'_>) -> Result<Self>;

    fn write_record(&self, out: &mut Vec<u8>) -> Result<()>;
    fn write_trailing(&self, out: &mut Vec<u8>) -> Result<()>;
}

pub(crate) fn read_elements<T: BlockElement>(
    reader: &mut TagReader<'_>,
    count: BlockCount,
) -> Result<Vec<T>> {
    if read_block_header::<LittleEndian>(reader, T::STRUCTURE, count, T::SIZE)?.is_none() {
        return Ok(Vec::new());
    }

    let mut records = Vec::with_capacity(count.len());
    for _ in 0..count.len() {
        let mut r = reader.section(T::STRUCTURE, T::SIZE)?;
        records.push(T::read_record(&mut r)?);
        r.finish()?;
    }

    records
        .into_iter()
        .map(|record| T::read_trailing(record, reader))
        .collect()
}

pub(crate) fn write_elements<T: BlockElement>(out: &mut Vec<u8>, elements: &[T]) -> Result<()> {
    write_block_header::<LittleEndian>(out, 0, elements.len(), T::SIZE)?;

    for element in elements {
        let start = out.len();
        element.write_record(out)?;
        if out.len() - start != T::SIZE {
            return Err(Error::SizeMismatch {
                structure: T::STRUCTURE,
                expected: T::SIZE,
                found: out.len() - start,
            });
        }
    }
    for element in elements {
        element.write_trailing(out)?;
    }
    Ok(())
}
