//! Semantic remap tables between the two generations
//!
//! Immutable, exhaustive mappings with no runtime state.

mod bitmap;
mod material;

pub use bitmap::{
    BitmapClassV1, BitmapClassV2, CompressionV1, CompressionV2, remap_class, remap_compression,
};
pub use material::material_name;
