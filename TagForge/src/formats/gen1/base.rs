//! Records shared by both first-generation shader kinds

use byteorder::{BigEndian, WriteBytesExt};

use super::enums::{AnimationFunction, MaterialType};
use crate::error::Result;
use crate::formats::common::{ColorRgb, TagReader, write_padding};

type BE = BigEndian;

/// Size of the shared shader prefix in bytes
pub const SHADER_BASE_SIZE: usize = 40;

/// Prefix common to every first-generation shader.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShaderBase {
    pub radiosity_flags: u16,
    pub detail_level: u16,
    /// Emitted light power; zero when the shader does not glow
    pub power: f32,
    pub color_of_emitted_light: ColorRgb,
    pub tint_color: ColorRgb,
    pub physics_flags: u16,
    pub material_type: MaterialType,
    pub shader_type: u16,
}

impl ShaderBase {
    pub(crate) fn read(reader: &mut TagReader<'_>) -> Result<Self> {
        let base = Self {
            radiosity_flags: reader.read_u16::<BE>()?,
            detail_level: reader.read_u16::<BE>()?,
            power: reader.read_f32::<BE>()?,
            color_of_emitted_light: ColorRgb::read::<BE>(reader)?,
            tint_color: ColorRgb::read::<BE>(reader)?,
            physics_flags: reader.read_u16::<BE>()?,
            material_type: MaterialType::from_u16(reader.read_u16::<BE>()?)?,
            shader_type: reader.read_u16::<BE>()?,
        };
        reader.skip(2)?;
        Ok(base)
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        out.write_u16::<BE>(self.radiosity_flags)?;
        out.write_u16::<BE>(self.detail_level)?;
        out.write_f32::<BE>(self.power)?;
        self.color_of_emitted_light.write::<BE>(out)?;
        self.tint_color.write::<BE>(out)?;
        out.write_u16::<BE>(self.physics_flags)?;
        out.write_u16::<BE>(self.material_type.to_u16())?;
        out.write_u16::<BE>(self.shader_type)?;
        write_padding(out, 2);
        Ok(())
    }
}

/// Scrolling or rotating texture animation (16 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextureAnimation {
    pub function: AnimationFunction,
    pub period: f32,
    pub phase: f32,
    pub scale: f32,
}

impl TextureAnimation {
    /// True when the animation moves the texture at all.
    pub fn is_active(&self) -> bool {
        self.scale != 0.0 && self.period != 0.0
    }

    pub(crate) fn read(reader: &mut TagReader<'_>) -> Result<Self> {
        let function = AnimationFunction::from_u16(reader.read_u16::<BE>()?)?;
        reader.skip(2)?;
        Ok(Self {
            function,
            period: reader.read_f32::<BE>()?,
            phase: reader.read_f32::<BE>()?,
            scale: reader.read_f32::<BE>()?,
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        out.write_u16::<BE>(self.function.to_u16())?;
        write_padding(out, 2);
        out.write_f32::<BE>(self.period)?;
        out.write_f32::<BE>(self.phase)?;
        out.write_f32::<BE>(self.scale)?;
        Ok(())
    }
}

/// One of the three self-illumination channels of an environment shader.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IlluminationChannel {
    pub on_color: ColorRgb,
    pub off_color: ColorRgb,
    pub animation_function: AnimationFunction,
    pub animation_period: f32,
    pub animation_phase: f32,
}

impl IlluminationChannel {
    /// True when the channel pulses between its off and on colors.
    pub fn is_animated(&self) -> bool {
        self.animation_period > 0.0 && self.animation_function != AnimationFunction::One
    }

    pub fn is_lit(&self) -> bool {
        !self.on_color.is_black()
    }

    pub(crate) fn read(reader: &mut TagReader<'_>) -> Result<Self> {
        let on_color = ColorRgb::read::<BE>(reader)?;
        let off_color = ColorRgb::read::<BE>(reader)?;
        let animation_function = AnimationFunction::from_u16(reader.read_u16::<BE>()?)?;
        reader.skip(2)?;
        let channel = Self {
            on_color,
            off_color,
            animation_function,
            animation_period: reader.read_f32::<BE>()?,
            animation_phase: reader.read_f32::<BE>()?,
        };
        reader.skip(24)?;
        Ok(channel)
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        self.on_color.write::<BE>(out)?;
        self.off_color.write::<BE>(out)?;
        out.write_u16::<BE>(self.animation_function.to_u16())?;
        write_padding(out, 2);
        out.write_f32::<BE>(self.animation_period)?;
        out.write_f32::<BE>(self.animation_phase)?;
        write_padding(out, 24);
        Ok(())
    }
}
