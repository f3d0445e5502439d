//! Tag writing helpers

use crate::error::{Error, Result};

/// Append `len` zero bytes of padding.
pub fn write_padding(out: &mut Vec<u8>, len: usize) {
    out.resize(out.len() + len, 0);
}

/// Convert an in-memory count or length to the `i32` the format stores.
pub fn to_i32(field: &'static str, value: usize) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::ValueOutOfRange { field, value })
}

/// Convert an in-memory count or length to a `u32` field.
pub fn to_u32(field: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::ValueOutOfRange { field, value })
}

