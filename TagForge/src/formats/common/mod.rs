//! Primitive codec shared by both tag generations
//!
//! Headers, block records, references, string ids and trailing data. Byte
//! order is a type parameter on every call (`BigEndian` for first-generation
//! files, `LittleEndian` for second-generation files); the few legacy length
//! fields that are always big-endian encode that themselves.

pub mod block;
pub mod header;
pub mod reader;
pub mod reference;
pub mod types;
pub mod writer;

pub use block::{BlockCount, BlockHeader, RawBlock, read_block_header, write_block_header};
pub use header::{HEADER_SIZE, TagHeader, assemble_tag};
pub use reader::TagReader;
pub use reference::{
    Reference, StringId, TagData, read_trailing_string, write_optional_path,
    write_optional_reference, write_trailing_string,
};
pub use types::{BLOCK_MARKER, Bgra, ColorRgb, FourCC, Point2, engine_tags, groups};
pub use writer::write_padding;
