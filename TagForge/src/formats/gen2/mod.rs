//! Second-generation shader tags
//!
//! Little-endian files of group `shad`. The body is wrapped in a root block
//! header (count 1, stride = body size) and its layout is selected by the
//! header's engine tag. Three historical layouts are read; only the retail
//! layout is written.

mod element;
mod enums;
mod parameter;
mod shader;

pub use enums::{AnimationTarget, LightmapType, ParameterType, ShaderLodBias, SpecularType};
pub use parameter::{ANIMATION_PROPERTY_SIZE, AnimationProperty, PARAMETER_SIZE, Parameter};
pub use shader::{BodyLayout, ShaderTag};

use byteorder::LittleEndian;

use super::ParsedTag;
use super::common::{
    BlockCount, TagHeader, TagReader, assemble_tag, engine_tags, groups,
    read_block_header, write_block_header,
};
use crate::error::{Diagnostic, Error, Result};

/// Header version written for shaders
pub const TAG_VERSION: u16 = 1;

/// Parse a second-generation shader file in any known layout.
pub fn read_shader(data: &[u8]) -> Result<ParsedTag<ShaderTag>> {
    let mut reader = TagReader::new(data, "tag");
    let header = TagHeader::read::<LittleEndian>(&mut reader)?;

    if header.group != groups::SHADER {
        return Err(Error::unknown_enum("group", header.group.to_u32()));
    }
    let layout = BodyLayout::from_engine_tag(header.engine_tag)?;

    read_block_header::<LittleEndian>(&mut reader, "shader", BlockCount::new(1)?, layout.size())?;
    let tag = ShaderTag::read(&mut reader, layout)?;
    tracing::debug!(
        "Read shader ({:?} layout, {} parameters)",
        layout,
        tag.parameters.len()
    );

    let mut diagnostics = Vec::new();
    if !reader.is_empty() {
        diagnostics.push(Diagnostic::TrailingBytes {
            structure: "shader",
            count: reader.remaining(),
        });
    }

    Ok(ParsedTag {
        header,
        tag,
        diagnostics,
    })
}

/// Serialize a shader in the retail layout with a fresh header.
pub fn write_shader(shader: &ShaderTag) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    write_block_header::<LittleEndian>(&mut body, 0, 1, BodyLayout::Retail.size())?;
    shader.write(&mut body)?;

    let header = TagHeader::new(groups::SHADER, TAG_VERSION, engine_tags::BLM);
    let bytes = assemble_tag::<LittleEndian>(&header, &body)?;
    tracing::debug!("Wrote shader ({} bytes)", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::common::{ColorRgb, HEADER_SIZE, RawBlock, Reference};
    use crate::formats::function::FunctionCurve;

    fn sample() -> ShaderTag {
        ShaderTag {
            template: Some(
                Reference::new(groups::SHADER_TEMPLATE, "shaders\\shader_templates\\opaque\\tex_bump")
                    .unwrap(),
            ),
            material_name: "hard_terrain_stone".to_string(),
            parameters: vec![
                Parameter::bitmap("base_map", Reference::new(groups::BITMAP, "rock").unwrap()),
                Parameter::color("specular_color", ColorRgb::WHITE),
                Parameter::value("env_brightness", 0.5).with_animation(AnimationProperty::new(
                    AnimationTarget::Value,
                    FunctionCurve::constant(0.5),
                )),
            ],
            predicted_resources: RawBlock {
                version: 0,
                stride: 8,
                elements: vec![vec![7; 8]],
            },
            lightmap_specular_brightness: 1.0,
            ..ShaderTag::default()
        }
    }

    #[test]
    fn test_file_round_trip() {
        let shader = sample();
        let bytes = write_shader(&shader).unwrap();
        assert_eq!(&bytes[36..40], b"dahs");
        assert_eq!(&bytes[60..64], b"!MLB");
        assert_eq!(&bytes[64..68], b"dfbt");

        let parsed = read_shader(&bytes).unwrap();
        assert_eq!(parsed.tag, shader);
        assert!(parsed.diagnostics.is_empty());
        assert_eq!(write_shader(&parsed.tag).unwrap(), bytes);
    }

    #[test]
    fn test_unknown_engine_tag() {
        let mut bytes = write_shader(&sample()).unwrap();
        bytes[60..64].copy_from_slice(b"XXXX");
        assert!(matches!(
            read_shader(&bytes),
            Err(Error::UnknownEnum { field: "engine_tag", .. })
        ));
    }

    #[test]
    fn test_root_stride_must_match_layout() {
        let mut bytes = write_shader(&sample()).unwrap();
        // Declare the retail body as a second-beta one
        bytes[60..64].copy_from_slice(b"BALM");
        assert!(matches!(
            read_shader(&bytes),
            Err(Error::SizeMismatch { structure: "shader", expected: 108, found: 116 })
        ));
    }

    #[test]
    fn test_trailing_bytes_are_a_diagnostic() {
        let mut bytes = write_shader(&sample()).unwrap();
        bytes.extend_from_slice(&[0xCD; 5]);
        let parsed = read_shader(&bytes).unwrap();
        assert_eq!(parsed.tag, sample());
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::TrailingBytes { structure: "shader", count: 5 }]
        );
    }

    #[test]
    fn test_truncated_parameter_block() {
        let bytes = write_shader(&sample()).unwrap();
        // Header, root block header, body, template path and material name
        let cut = HEADER_SIZE + 16 + 116 + 41 + 18 + 16 + 20;
        assert!(matches!(
            read_shader(&bytes[..cut]),
            Err(Error::Truncated { structure: "parameter", .. })
        ));
    }
}
