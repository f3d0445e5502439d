//! The unified second-generation shader body

use byteorder::{LittleEndian, WriteBytesExt};

use super::element::{read_elements, write_elements};
use super::enums::{LightmapType, ShaderLodBias, SpecularType};
use super::parameter::Parameter;
use crate::error::{Error, Result};
use crate::formats::common::{
    BlockCount, FourCC, RawBlock, Reference, StringId, TagReader, engine_tags, groups,
    write_optional_path, write_optional_reference, write_padding, write_trailing_string,
};

type LE = LittleEndian;

/// Historical body layouts, selected by the header's engine tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyLayout {
    /// `LAMB`: no light response, no depth bias
    FirstBeta,
    /// `MLAB`: no depth bias
    SecondBeta,
    /// `BLM!`
    Retail,
}

impl BodyLayout {
    pub fn from_engine_tag(engine_tag: FourCC) -> Result<Self> {
        match engine_tag {
            engine_tags::LAMB => Ok(BodyLayout::FirstBeta),
            engine_tags::MLAB => Ok(BodyLayout::SecondBeta),
            engine_tags::BLM => Ok(BodyLayout::Retail),
            other => Err(Error::unknown_enum("engine_tag", other.to_u32())),
        }
    }

    pub fn engine_tag(self) -> FourCC {
        match self {
            BodyLayout::FirstBeta => engine_tags::LAMB,
            BodyLayout::SecondBeta => engine_tags::MLAB,
            BodyLayout::Retail => engine_tags::BLM,
        }
    }

    /// Fixed body size in bytes.
    pub const fn size(self) -> usize {
        match self {
            BodyLayout::FirstBeta => 92,
            BodyLayout::SecondBeta => 108,
            BodyLayout::Retail => 116,
        }
    }

    fn has_light_response(self) -> bool {
        self != BodyLayout::FirstBeta
    }

    fn has_depth_bias(self) -> bool {
        self == BodyLayout::Retail
    }
}

/// Second-generation shader (`shad`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShaderTag {
    pub template: Option<Reference>,
    pub material_name: String,
    pub runtime_properties: RawBlock,
    pub flags: u16,
    pub parameters: Vec<Parameter>,
    pub postprocess_definition: RawBlock,
    pub predicted_resources: RawBlock,
    pub light_response: Option<Reference>,
    pub shader_lod_bias: ShaderLodBias,
    pub specular_type: SpecularType,
    pub lightmap_type: LightmapType,
    pub lightmap_specular_brightness: f32,
    pub lightmap_ambient_bias: f32,
    pub added_depth_bias_offset: f32,
    pub added_depth_bias_slope_scale: f32,
}

impl ShaderTag {
    /// Find a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn parameter_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.parameters.iter_mut().find(|p| p.name == name)
    }

    pub(crate) fn read(reader: &mut TagReader<'_>, layout: BodyLayout) -> Result<Self> {
        let mut r = reader.section("shader", layout.size())?;
        let mut template = Reference::read::<LE>(&mut r)?;
        let material_name = StringId::read(&mut r)?;
        let runtime_properties = BlockCount::read::<LE>(&mut r)?;
        r.skip(2)?;
        let flags = r.read_u16::<LE>()?;
        let parameters = BlockCount::read::<LE>(&mut r)?;
        let postprocess_definition = BlockCount::read::<LE>(&mut r)?;
        r.skip(4)?;
        let predicted_resources = BlockCount::read::<LE>(&mut r)?;
        let mut light_response = if layout.has_light_response() {
            Reference::read::<LE>(&mut r)?
        } else {
            Reference::empty(groups::LIGHT_RESPONSE)
        };
        let shader_lod_bias = ShaderLodBias::from_u16(r.read_u16::<LE>()?)?;
        let specular_type = SpecularType::from_u16(r.read_u16::<LE>()?)?;
        let lightmap_type = LightmapType::from_u16(r.read_u16::<LE>()?)?;
        r.skip(2)?;
        let lightmap_specular_brightness = r.read_f32::<LE>()?;
        let lightmap_ambient_bias = r.read_f32::<LE>()?;
        let (added_depth_bias_offset, added_depth_bias_slope_scale) = if layout.has_depth_bias() {
            (r.read_f32::<LE>()?, r.read_f32::<LE>()?)
        } else {
            (0.0, 0.0)
        };
        r.finish()?;

        template.read_path(reader)?;
        let material_name = material_name.read_value(reader)?;
        let runtime_properties = RawBlock::read::<LE>(reader, "runtime_properties", runtime_properties)?;
        let parameters = read_elements(reader, parameters)?;
        let postprocess_definition =
            RawBlock::read::<LE>(reader, "postprocess_definition", postprocess_definition)?;
        let predicted_resources =
            RawBlock::read::<LE>(reader, "predicted_resources", predicted_resources)?;
        light_response.read_path(reader)?;

        Ok(Self {
            template: template.into_option(),
            material_name,
            runtime_properties,
            flags,
            parameters,
            postprocess_definition,
            predicted_resources,
            light_response: light_response.into_option(),
            shader_lod_bias,
            specular_type,
            lightmap_type,
            lightmap_specular_brightness,
            lightmap_ambient_bias,
            added_depth_bias_offset,
            added_depth_bias_slope_scale,
        })
    }

    /// Write the retail body and its trailing data.
    pub(crate) fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        let start = out.len();
        write_optional_reference::<LE>(out, self.template.as_ref(), groups::SHADER_TEMPLATE)?;
        StringId::for_str(&self.material_name)?.write(out)?;
        self.runtime_properties.count()?.write::<LE>(out)?;
        write_padding(out, 2);
        out.write_u16::<LE>(self.flags)?;
        BlockCount::new(self.parameters.len())?.write::<LE>(out)?;
        self.postprocess_definition.count()?.write::<LE>(out)?;
        write_padding(out, 4);
        self.predicted_resources.count()?.write::<LE>(out)?;
        write_optional_reference::<LE>(out, self.light_response.as_ref(), groups::LIGHT_RESPONSE)?;
        out.write_u16::<LE>(self.shader_lod_bias.to_u16())?;
        out.write_u16::<LE>(self.specular_type.to_u16())?;
        out.write_u16::<LE>(self.lightmap_type.to_u16())?;
        write_padding(out, 2);
        out.write_f32::<LE>(self.lightmap_specular_brightness)?;
        out.write_f32::<LE>(self.lightmap_ambient_bias)?;
        out.write_f32::<LE>(self.added_depth_bias_offset)?;
        out.write_f32::<LE>(self.added_depth_bias_slope_scale)?;

        let written = out.len() - start;
        if written != BodyLayout::Retail.size() {
            return Err(Error::SizeMismatch {
                structure: "shader",
                expected: BodyLayout::Retail.size(),
                found: written,
            });
        }

        write_optional_path(out, self.template.as_ref())?;
        write_trailing_string(out, &self.material_name, false);
        self.runtime_properties.write::<LE>(out)?;
        write_elements(out, &self.parameters)?;
        self.postprocess_definition.write::<LE>(out)?;
        self.predicted_resources.write::<LE>(out)?;
        write_optional_path(out, self.light_response.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_dispatch() {
        assert_eq!(BodyLayout::from_engine_tag(engine_tags::BLM).unwrap(), BodyLayout::Retail);
        assert_eq!(BodyLayout::from_engine_tag(engine_tags::MLAB).unwrap().size(), 108);
        assert_eq!(BodyLayout::from_engine_tag(engine_tags::LAMB).unwrap().size(), 92);
        assert!(matches!(
            BodyLayout::from_engine_tag(engine_tags::BLAM),
            Err(Error::UnknownEnum { field: "engine_tag", .. })
        ));
    }

    #[test]
    fn test_empty_body_is_retail_sized() {
        let mut out = Vec::new();
        ShaderTag::default().write(&mut out).unwrap();
        assert_eq!(out.len(), 116);
        // Absent references still carry their expected group
        assert_eq!(&out[..4], b"mets");
        assert_eq!(&out[76..80], b"tils");
    }

    #[test]
    fn test_first_beta_body() {
        // Retail body with the light response and depth bias removed
        let mut retail = Vec::new();
        ShaderTag {
            flags: 3,
            lightmap_ambient_bias: 0.25,
            ..ShaderTag::default()
        }
        .write(&mut retail)
        .unwrap();
        let mut beta = retail[..76].to_vec();
        beta.extend_from_slice(&retail[92..108]);
        assert_eq!(beta.len(), 92);

        let mut reader = TagReader::new(&beta, "body");
        let shader = ShaderTag::read(&mut reader, BodyLayout::FirstBeta).unwrap();
        assert!(reader.is_empty());
        assert_eq!(shader.flags, 3);
        assert_eq!(shader.lightmap_ambient_bias, 0.25);
        assert_eq!(shader.light_response, None);
    }
}
