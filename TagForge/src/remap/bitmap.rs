//! Bitmap type and format tables
//!
//! Both generations number these enumerations the same way, but they are
//! distinct on-disk fields and are kept as distinct types.

use crate::macros::tag_enum;

tag_enum! {
    /// First-generation bitmap type
    pub enum BitmapClassV1 as "bitmap type" {
        TwoDimensionalTextures = 0,
        ThreeDimensionalTextures = 1,
        CubeMaps = 2,
        Sprites = 3,
        InterfaceBitmaps = 4,
    }
}

tag_enum! {
    /// Second-generation bitmap type
    pub enum BitmapClassV2 as "bitmap type" {
        TwoDimensionalTextures = 0,
        ThreeDimensionalTextures = 1,
        CubeMaps = 2,
        Sprites = 3,
        InterfaceBitmaps = 4,
    }
}

tag_enum! {
    /// First-generation bitmap format
    pub enum CompressionV1 as "bitmap format" {
        /// DXT1
        ColorKeyTransparency = 0,
        /// DXT3
        ExplicitAlpha = 1,
        /// DXT5
        InterpolatedAlpha = 2,
        Color16Bit = 3,
        Color32Bit = 4,
        Monochrome = 5,
    }
}

tag_enum! {
    /// Second-generation bitmap format
    pub enum CompressionV2 as "bitmap format" {
        CompressedWithColorKeyTransparency = 0,
        CompressedWithExplicitAlpha = 1,
        CompressedWithInterpolatedAlpha = 2,
        Color16Bit = 3,
        Color32Bit = 4,
        Monochrome = 5,
    }
}

pub fn remap_class(class: BitmapClassV1) -> BitmapClassV2 {
    match class {
        BitmapClassV1::TwoDimensionalTextures => BitmapClassV2::TwoDimensionalTextures,
        BitmapClassV1::ThreeDimensionalTextures => BitmapClassV2::ThreeDimensionalTextures,
        BitmapClassV1::CubeMaps => BitmapClassV2::CubeMaps,
        BitmapClassV1::Sprites => BitmapClassV2::Sprites,
        BitmapClassV1::InterfaceBitmaps => BitmapClassV2::InterfaceBitmaps,
    }
}

pub fn remap_compression(compression: CompressionV1) -> CompressionV2 {
    match compression {
        CompressionV1::ColorKeyTransparency => CompressionV2::CompressedWithColorKeyTransparency,
        CompressionV1::ExplicitAlpha => CompressionV2::CompressedWithExplicitAlpha,
        CompressionV1::InterpolatedAlpha => CompressionV2::CompressedWithInterpolatedAlpha,
        CompressionV1::Color16Bit => CompressionV2::Color16Bit,
        CompressionV1::Color32Bit => CompressionV2::Color32Bit,
        CompressionV1::Monochrome => CompressionV2::Monochrome,
    }
}
