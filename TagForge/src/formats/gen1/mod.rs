//! First-generation shader tags
//!
//! Big-endian files with engine tag `blam`. Two shader kinds are understood:
//! environment shaders (`senv`) and model shaders (`soso`). Each file is the
//! 64-byte header, the fixed body, then the body's reference paths.

mod base;
mod enums;
mod environment;
mod model;

pub use base::{IlluminationChannel, SHADER_BASE_SIZE, ShaderBase, TextureAnimation};
pub use enums::{
    AnimationFunction, ChangeColorSource, DetailMapFunction, DetailMask, EnvironmentFlags,
    EnvironmentType, MaterialType, ModelFlags, ReflectionType, SpecularFlags,
};
pub use environment::{ENVIRONMENT_BODY_SIZE, ShaderEnvironment};
pub use model::{MODEL_BODY_SIZE, ShaderModel};

use byteorder::BigEndian;

use super::ParsedTag;
use super::common::{FourCC, TagHeader, TagReader, assemble_tag, engine_tags, groups};
use crate::error::{Diagnostic, Error, Result};

/// Header version of both first-generation shader groups
pub const TAG_VERSION: u16 = 2;

/// A decoded first-generation shader of either kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderV1 {
    Environment(ShaderEnvironment),
    Model(ShaderModel),
}

impl ShaderV1 {
    pub fn base(&self) -> &ShaderBase {
        match self {
            ShaderV1::Environment(shader) => &shader.base,
            ShaderV1::Model(shader) => &shader.base,
        }
    }

    pub fn group(&self) -> FourCC {
        match self {
            ShaderV1::Environment(_) => groups::SHADER_ENVIRONMENT,
            ShaderV1::Model(_) => groups::SHADER_MODEL,
        }
    }

    /// Short kind name used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ShaderV1::Environment(_) => "shader_environment",
            ShaderV1::Model(_) => "shader_model",
        }
    }
}

/// Parse a first-generation shader file, dispatching on the header group.
pub fn read_shader(data: &[u8]) -> Result<ParsedTag<ShaderV1>> {
    let mut reader = TagReader::new(data, "tag");
    let header = TagHeader::read::<BigEndian>(&mut reader)?;

    if header.engine_tag != engine_tags::BLAM {
        return Err(Error::unknown_enum("engine_tag", header.engine_tag.to_u32()));
    }
    if header.group != groups::SHADER_ENVIRONMENT && header.group != groups::SHADER_MODEL {
        return Err(Error::unknown_enum("group", header.group.to_u32()));
    }
    if header.version != TAG_VERSION {
        return Err(Error::unknown_enum("version", header.version));
    }

    let tag = if header.group == groups::SHADER_ENVIRONMENT {
        ShaderV1::Environment(ShaderEnvironment::read(&mut reader)?)
    } else {
        ShaderV1::Model(ShaderModel::read(&mut reader)?)
    };
    tracing::debug!("Read {} ({} bytes)", tag.kind_name(), data.len());

    let mut diagnostics = Vec::new();
    if !reader.is_empty() {
        diagnostics.push(Diagnostic::TrailingBytes {
            structure: tag.kind_name(),
            count: reader.remaining(),
        });
    }

    Ok(ParsedTag {
        header,
        tag,
        diagnostics,
    })
}

/// Serialize a first-generation shader with a fresh header.
pub fn write_shader(shader: &ShaderV1) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    match shader {
        ShaderV1::Environment(environment) => environment.write(&mut body)?,
        ShaderV1::Model(model) => model.write(&mut body)?,
    }
    let header = TagHeader::new(shader.group(), TAG_VERSION, engine_tags::BLAM);
    assemble_tag::<BigEndian>(&header, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::common::{HEADER_SIZE, Reference};

    fn environment() -> ShaderV1 {
        ShaderV1::Environment(ShaderEnvironment {
            base: ShaderBase {
                material_type: MaterialType::Stone,
                ..ShaderBase::default()
            },
            base_map: Some(Reference::new(groups::BITMAP, "levels\\rock").unwrap()),
            ..ShaderEnvironment::default()
        })
    }

    #[test]
    fn test_file_round_trip() {
        let shader = environment();
        let bytes = write_shader(&shader).unwrap();
        assert_eq!(&bytes[36..40], b"senv");
        assert_eq!(&bytes[60..64], b"blam");

        let parsed = read_shader(&bytes).unwrap();
        assert_eq!(parsed.tag, shader);
        assert_eq!(parsed.header.data_length as usize, bytes.len() - HEADER_SIZE);
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_model_dispatch() {
        let shader = ShaderV1::Model(ShaderModel::default());
        let bytes = write_shader(&shader).unwrap();
        assert_eq!(&bytes[36..40], b"soso");
        assert!(matches!(read_shader(&bytes).unwrap().tag, ShaderV1::Model(_)));
    }

    #[test]
    fn test_unknown_group() {
        let mut bytes = write_shader(&environment()).unwrap();
        bytes[36..40].copy_from_slice(b"bitm");
        assert!(matches!(
            read_shader(&bytes),
            Err(Error::UnknownEnum { field: "group", .. })
        ));
    }

    #[test]
    fn test_truncated_body() {
        let bytes = write_shader(&environment()).unwrap();
        let err = read_shader(&bytes[..HEADER_SIZE + 100]).unwrap_err();
        assert!(matches!(
            err,
            Error::Truncated { structure: "shader_environment", needed: 844, remaining: 100 }
        ));
    }

    #[test]
    fn test_trailing_bytes_are_reported() {
        let mut bytes = write_shader(&environment()).unwrap();
        bytes.extend_from_slice(&[0; 3]);
        let parsed = read_shader(&bytes).unwrap();
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::TrailingBytes { structure: "shader_environment", count: 3 }]
        );
    }
}
