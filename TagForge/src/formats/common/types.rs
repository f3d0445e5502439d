//! Scalar types shared by both tag generations

use std::fmt;

use byteorder::{ByteOrder, WriteBytesExt};

use super::reader::TagReader;
use crate::error::Result;

/// Four-character code naming a tag group, engine, or block marker.
///
/// Stored as a `u32` in the file's byte order whose value is the characters
/// read big-endian, so little-endian files show the characters reversed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const fn new(code: &[u8; 4]) -> Self {
        Self(*code)
    }

    pub fn read<B: ByteOrder>(reader: &mut TagReader<'_>) -> Result<Self> {
        Ok(Self(reader.read_u32::<B>()?.to_be_bytes()))
    }

    pub fn write<B: ByteOrder>(self, out: &mut Vec<u8>) -> Result<()> {
        out.write_u32::<B>(u32::from_be_bytes(self.0))?;
        Ok(())
    }

    /// Raw value as a big-endian `u32` (used in error reports).
    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCC({self})")
    }
}

/// Tag group codes
pub mod groups {
    use super::FourCC;

    /// First-generation environment shader
    pub const SHADER_ENVIRONMENT: FourCC = FourCC::new(b"senv");
    /// First-generation model shader
    pub const SHADER_MODEL: FourCC = FourCC::new(b"soso");
    /// Second-generation unified shader
    pub const SHADER: FourCC = FourCC::new(b"shad");
    /// Second-generation shader template
    pub const SHADER_TEMPLATE: FourCC = FourCC::new(b"stem");
    /// Second-generation shader light response
    pub const LIGHT_RESPONSE: FourCC = FourCC::new(b"slit");
    pub const BITMAP: FourCC = FourCC::new(b"bitm");
    pub const LENS_FLARE: FourCC = FourCC::new(b"lens");
}

/// Engine tags stored in the header's last field
pub mod engine_tags {
    use super::FourCC;

    /// First-generation retail
    pub const BLAM: FourCC = FourCC::new(b"blam");
    /// Second-generation first beta layout
    pub const LAMB: FourCC = FourCC::new(b"LAMB");
    /// Second-generation second beta layout
    pub const MLAB: FourCC = FourCC::new(b"MLAB");
    /// Second-generation retail layout
    pub const BLM: FourCC = FourCC::new(b"BLM!");
}

/// Marker carried by every block header
pub const BLOCK_MARKER: FourCC = FourCC::new(b"tbfd");

/// Linear RGB color stored as three floats.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorRgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn read<B: ByteOrder>(reader: &mut TagReader<'_>) -> Result<Self> {
        Ok(Self {
            r: reader.read_f32::<B>()?,
            g: reader.read_f32::<B>()?,
            b: reader.read_f32::<B>()?,
        })
    }

    pub fn write<B: ByteOrder>(self, out: &mut Vec<u8>) -> Result<()> {
        out.write_f32::<B>(self.r)?;
        out.write_f32::<B>(self.g)?;
        out.write_f32::<B>(self.b)?;
        Ok(())
    }

    pub fn is_black(self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    /// Multiply every channel by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }
}

/// Packed color stop stored as blue, green, red, alpha bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bgra {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Bgra {
    pub const OPAQUE_WHITE: Self = Self::new(255, 255, 255, 255);

    pub const fn new(b: u8, g: u8, r: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }

    /// Gamma-encode a linear color into 8-bit channels.
    pub fn from_linear(color: ColorRgb, alpha: u8) -> Self {
        Self {
            b: encode_gamma(color.b),
            g: encode_gamma(color.g),
            r: encode_gamma(color.r),
            a: alpha,
        }
    }

    pub fn read(reader: &mut TagReader<'_>) -> Result<Self> {
        let [b, g, r, a] = reader.read_array::<4>()?;
        Ok(Self { b, g, r, a })
    }

    pub fn write(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.b, self.g, self.r, self.a]);
    }
}

const GAMMA: f32 = 2.2;

fn encode_gamma(linear: f32) -> u8 {
    (linear.clamp(0.0, 1.0).powf(1.0 / GAMMA) * 255.0).round() as u8
}

/// Two-component point used by curve control points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn read<B: ByteOrder>(reader: &mut TagReader<'_>) -> Result<Self> {
        Ok(Self {
            x: reader.read_f32::<B>()?,
            y: reader.read_f32::<B>()?,
        })
    }

    pub fn write<B: ByteOrder>(self, out: &mut Vec<u8>) -> Result<()> {
        out.write_f32::<B>(self.x)?;
        out.write_f32::<B>(self.y)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{BigEndian, LittleEndian};

    #[test]
    fn test_fourcc_byte_order() {
        let mut le = Vec::new();
        engine_tags::BLM.write::<LittleEndian>(&mut le).unwrap();
        assert_eq!(&le, b"!MLB");

        let mut be = Vec::new();
        groups::SHADER_ENVIRONMENT.write::<BigEndian>(&mut be).unwrap();
        assert_eq!(&be, b"senv");

        let mut reader = TagReader::new(&le, "test");
        assert_eq!(FourCC::read::<LittleEndian>(&mut reader).unwrap(), engine_tags::BLM);
    }

    #[test]
    fn test_gamma_encoding() {
        assert_eq!(Bgra::from_linear(ColorRgb::WHITE, 255), Bgra::OPAQUE_WHITE);
        assert_eq!(Bgra::from_linear(ColorRgb::BLACK, 0), Bgra::default());
        let mid = Bgra::from_linear(ColorRgb::new(0.5, 2.0, -1.0), 128);
        assert_eq!(mid, Bgra::new(0, 255, 186, 128));
    }
}
