//! Shader parameters and their animation properties

use byteorder::{LittleEndian, WriteBytesExt};

use super::element::{BlockElement, read_elements, write_elements};
use super::enums::{AnimationTarget, ParameterType};
use crate::error::Result;
use crate::formats::common::{
    BlockCount, ColorRgb, Reference, StringId, TagData, TagReader, groups, write_optional_path,
    write_optional_reference, write_padding, write_trailing_string,
};
use crate::formats::function::FunctionCurve;

type LE = LittleEndian;

/// Size of a parameter record in bytes
pub const PARAMETER_SIZE: usize = 52;

/// Size of an animation property record in bytes
pub const ANIMATION_PROPERTY_SIZE: usize = 36;

/// A named, typed slot in a shader template's interface.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub kind: ParameterType,
    pub bitmap: Option<Reference>,
    pub const_value: f32,
    pub const_color: ColorRgb,
    pub animation_properties: Vec<AnimationProperty>,
}

impl Parameter {
    fn new(name: impl Into<String>, kind: ParameterType) -> Self {
        Self {
            name: name.into(),
            kind,
            bitmap: None,
            const_value: 0.0,
            const_color: ColorRgb::BLACK,
            animation_properties: Vec::new(),
        }
    }

    pub fn bitmap(name: impl Into<String>, bitmap: Reference) -> Self {
        Self {
            bitmap: Some(bitmap),
            ..Self::new(name, ParameterType::Bitmap)
        }
    }

    pub fn value(name: impl Into<String>, value: f32) -> Self {
        Self {
            const_value: value,
            ..Self::new(name, ParameterType::Value)
        }
    }

    pub fn color(name: impl Into<String>, color: ColorRgb) -> Self {
        Self {
            const_color: color,
            ..Self::new(name, ParameterType::Color)
        }
    }

    /// Attach an animation property.
    #[must_use]
    pub fn with_animation(mut self, property: AnimationProperty) -> Self {
        self.animation_properties.push(property);
        self
    }
}

pub(crate) struct ParameterRecord {
    name: StringId,
    kind: ParameterType,
    bitmap: Reference,
    const_value: f32,
    const_color: ColorRgb,
    animation_properties: BlockCount,
}

impl BlockElement for Parameter {
    const STRUCTURE: &'static str = "parameter";
    const SIZE: usize = PARAMETER_SIZE;
    type Record = ParameterRecord;

    fn read_record(reader: &mut TagReader<'_>) -> Result<ParameterRecord> {
        let name = StringId::read(reader)?;
        let kind = ParameterType::from_u16(reader.read_u16::<LE>()?)?;
        reader.skip(2)?;
        Ok(ParameterRecord {
            name,
            kind,
            bitmap: Reference::read::<LE>(reader)?,
            const_value: reader.read_f32::<LE>()?,
            const_color: ColorRgb::read::<LE>(reader)?,
            animation_properties: BlockCount::read::<LE>(reader)?,
        })
    }

    fn read_trailing(record: ParameterRecord, reader: &mut TagReader<'_>) -> Result<Self> {
        let name = record.name.read_value(reader)?;
        let mut bitmap = record.bitmap;
        bitmap.read_path(reader)?;
        let animation_properties = read_elements(reader, record.animation_properties)?;
        Ok(Self {
            name,
            kind: record.kind,
            bitmap: bitmap.into_option(),
            const_value: record.const_value,
            const_color: record.const_color,
            animation_properties,
        })
    }

    fn write_record(&self, out: &mut Vec<u8>) -> Result<()> {
        StringId::for_str(&self.name)?.write(out)?;
        out.write_u16::<LE>(self.kind.to_u16())?;
        write_padding(out, 2);
        write_optional_reference::<LE>(out, self.bitmap.as_ref(), groups::BITMAP)?;
        out.write_f32::<LE>(self.const_value)?;
        self.const_color.write::<LE>(out)?;
        BlockCount::new(self.animation_properties.len())?.write::<LE>(out)
    }

    fn write_trailing(&self, out: &mut Vec<u8>) -> Result<()> {
        write_trailing_string(out, &self.name, false);
        write_optional_path(out, self.bitmap.as_ref())?;
        write_elements(out, &self.animation_properties)
    }
}

/// A curve driving one property of a parameter over time.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationProperty {
    pub target: AnimationTarget,
    /// Name of the external input scalar; empty for time
    pub input_name: String,
    pub range_name: String,
    pub time_period: f32,
    /// `None` when the tag carries no function bytes
    pub function: Option<FunctionCurve>,
}

impl AnimationProperty {
    pub fn new(target: AnimationTarget, function: FunctionCurve) -> Self {
        Self {
            target,
            input_name: String::new(),
            range_name: String::new(),
            time_period: 0.0,
            function: Some(function),
        }
    }

    #[must_use]
    pub fn with_time_period(mut self, time_period: f32) -> Self {
        self.time_period = time_period;
        self
    }
}

pub(crate) struct AnimationPropertyRecord {
    target: AnimationTarget,
    input_name: StringId,
    range_name: StringId,
    time_period: f32,
    function: TagData,
}

impl BlockElement for AnimationProperty {
    const STRUCTURE: &'static str = "animation property";
    const SIZE: usize = ANIMATION_PROPERTY_SIZE;
    type Record = AnimationPropertyRecord;

    fn read_record(reader: &mut TagReader<'_>) -> Result<AnimationPropertyRecord> {
        let target = AnimationTarget::from_u16(reader.read_u16::<LE>()?)?;
        reader.skip(2)?;
        Ok(AnimationPropertyRecord {
            target,
            input_name: StringId::read(reader)?,
            range_name: StringId::read(reader)?,
            time_period: reader.read_f32::<LE>()?,
            function: TagData::read::<LE>(reader)?,
        })
    }

    fn read_trailing(record: AnimationPropertyRecord, reader: &mut TagReader<'_>) -> Result<Self> {
        let input_name = record.input_name.read_value(reader)?;
        let range_name = record.range_name.read_value(reader)?;
        let function = if record.function.is_empty() {
            None
        } else {
            Some(FunctionCurve::decode(record.function.read_payload(reader)?)?)
        };
        Ok(Self {
            target: record.target,
            input_name,
            range_name,
            time_period: record.time_period,
            function,
        })
    }

    fn write_record(&self, out: &mut Vec<u8>) -> Result<()> {
        out.write_u16::<LE>(self.target.to_u16())?;
        write_padding(out, 2);
        StringId::for_str(&self.input_name)?.write(out)?;
        StringId::for_str(&self.range_name)?.write(out)?;
        out.write_f32::<LE>(self.time_period)?;
        let size = self.function.as_ref().map_or(0, FunctionCurve::size);
        TagData::with_size(size)?.write::<LE>(out)
    }

    fn write_trailing(&self, out: &mut Vec<u8>) -> Result<()> {
        write_trailing_string(out, &self.input_name, false);
        write_trailing_string(out, &self.range_name, false);
        if let Some(function) = &self.function {
            out.extend_from_slice(&function.encode()?);
        }
        Ok(())
    }
}
