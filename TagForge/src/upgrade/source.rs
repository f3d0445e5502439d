//! Normalized view of a first-generation shader
//!
//! Environment and model shaders store the same ideas in different places.
//! `SourceShader` gathers what the classifier and the parameter recipes need
//! so neither has to care which kind it came from.

use crate::formats::common::{ColorRgb, Reference};
use crate::formats::gen1::{
    EnvironmentFlags, EnvironmentType, IlluminationChannel, MaterialType, ShaderEnvironment,
    ShaderModel, ShaderV1, SpecularFlags, TextureAnimation,
};

/// Which first-generation shader kind a source came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Environment,
    Model,
}

/// A bitmap reference with its tiling scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledMap {
    pub map: Reference,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceShader {
    pub kind: SourceKind,
    pub material_type: MaterialType,
    pub power: f32,
    pub emitted_color: ColorRgb,
    pub alpha_tested: bool,
    /// Detail maps blend rather than multiply
    pub blended: bool,

    pub base_map: Option<Reference>,
    pub bump_map: Option<ScaledMap>,
    pub detail_maps: Vec<ScaledMap>,
    pub u_animation: TextureAnimation,
    pub v_animation: TextureAnimation,

    pub specular_flags: SpecularFlags,
    pub specular_brightness: f32,
    pub perpendicular_color: ColorRgb,
    pub parallel_color: ColorRgb,

    pub environment_map: Option<Reference>,
    pub perpendicular_brightness: f32,
    pub parallel_brightness: f32,

    pub illumination_map: Option<Reference>,
    /// Primary, secondary and plasma channels; empty for model shaders
    pub channels: Vec<IlluminationChannel>,
    pub tertiary_illumination: bool,
}

impl SourceShader {
    pub fn from_environment(shader: &ShaderEnvironment) -> Self {
        let scaled = |map: &Option<Reference>, scale: f32| {
            map.clone().map(|map| ScaledMap { map, scale })
        };
        let detail_maps = [
            scaled(&shader.primary_detail_map, shader.primary_detail_map_scale),
            scaled(&shader.secondary_detail_map, shader.secondary_detail_map_scale),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self {
            kind: SourceKind::Environment,
            material_type: shader.base.material_type,
            power: shader.base.power,
            emitted_color: shader.base.color_of_emitted_light,
            alpha_tested: shader.flags.contains(EnvironmentFlags::ALPHA_TESTED),
            blended: shader.environment_type != EnvironmentType::Normal,
            base_map: shader.base_map.clone(),
            bump_map: scaled(&shader.bump_map, shader.bump_map_scale),
            detail_maps,
            u_animation: shader.u_animation,
            v_animation: shader.v_animation,
            specular_flags: shader.specular_flags,
            specular_brightness: shader.brightness,
            perpendicular_color: shader.perpendicular_color,
            parallel_color: shader.parallel_color,
            environment_map: shader.reflection_cube_map.clone(),
            perpendicular_brightness: shader.perpendicular_brightness,
            parallel_brightness: shader.parallel_brightness,
            illumination_map: shader.illumination_map.clone(),
            channels: shader.illumination.to_vec(),
            tertiary_illumination: shader.illumination[2].is_lit(),
        }
    }

    /// Model shaders keep self-illumination in the multipurpose map.
    pub fn from_model(shader: &ShaderModel) -> Self {
        let detail_maps = shader
            .detail_map
            .clone()
            .map(|map| ScaledMap {
                map,
                scale: shader.detail_map_scale,
            })
            .into_iter()
            .collect();

        Self {
            kind: SourceKind::Model,
            material_type: shader.base.material_type,
            power: shader.base.power,
            emitted_color: shader.base.color_of_emitted_light,
            alpha_tested: shader.is_alpha_tested(),
            blended: false,
            base_map: shader.base_map.clone(),
            bump_map: None,
            detail_maps,
            u_animation: shader.u_animation,
            v_animation: shader.v_animation,
            specular_flags: SpecularFlags::empty(),
            specular_brightness: 1.0,
            perpendicular_color: shader.perpendicular_tint,
            parallel_color: shader.parallel_tint,
            environment_map: shader.reflection_cube_map.clone(),
            perpendicular_brightness: shader.perpendicular_brightness,
            parallel_brightness: shader.parallel_brightness,
            illumination_map: shader.multipurpose_map.clone(),
            channels: Vec::new(),
            tertiary_illumination: shader.multipurpose_map.is_some(),
        }
    }

    pub fn is_emissive(&self) -> bool {
        self.power > 0.0
    }

    /// Secondary or plasma channel carries light.
    pub fn has_three_channels(&self) -> bool {
        self.illumination_map.is_some() && self.channels.iter().skip(1).any(IlluminationChannel::is_lit)
    }

    /// Predicates the classifiers work from.
    pub fn features(&self) -> ShaderFeatures {
        ShaderFeatures {
            base_map: self.base_map.is_some(),
            bump_map: self.bump_map.is_some(),
            environment_map: self.environment_map.is_some(),
            alpha_tested: self.alpha_tested,
            emissive: self.is_emissive(),
            illumination_map: self.illumination_map.is_some(),
            tertiary_illumination: self.tertiary_illumination,
            three_channel: self.has_three_channels(),
            detail_map_count: self.detail_maps.len(),
            blended: self.blended,
        }
    }
}

impl From<&ShaderV1> for SourceShader {
    fn from(shader: &ShaderV1) -> Self {
        match shader {
            ShaderV1::Environment(environment) => Self::from_environment(environment),
            ShaderV1::Model(model) => Self::from_model(model),
        }
    }
}

/// Presence predicates extracted from a source shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShaderFeatures {
    pub base_map: bool,
    pub bump_map: bool,
    pub environment_map: bool,
    pub alpha_tested: bool,
    pub emissive: bool,
    pub illumination_map: bool,
    pub tertiary_illumination: bool,
    pub three_channel: bool,
    pub detail_map_count: usize,
    pub blended: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::common::groups;
    use crate::formats::gen1::{ModelFlags, ShaderBase};

    fn bitmap(path: &str) -> Option<Reference> {
        Some(Reference::new(groups::BITMAP, path).unwrap())
    }

    #[test]
    fn test_environment_features() {
        let mut shader = ShaderEnvironment {
            base: ShaderBase {
                power: 500.0,
                ..ShaderBase::default()
            },
            base_map: bitmap("base"),
            primary_detail_map: bitmap("detail_a"),
            secondary_detail_map: bitmap("detail_b"),
            environment_type: EnvironmentType::Blended,
            illumination_map: bitmap("illum"),
            ..ShaderEnvironment::default()
        };
        let features = SourceShader::from_environment(&shader).features();
        assert!(features.base_map && features.emissive && features.illumination_map);
        assert!(features.blended);
        assert!(!features.three_channel);
        assert_eq!(features.detail_map_count, 2);

        shader.illumination[1].on_color = ColorRgb::WHITE;
        assert!(SourceShader::from_environment(&shader).features().three_channel);
    }

    #[test]
    fn test_model_features() {
        let shader = ShaderModel {
            base_map: bitmap("base"),
            multipurpose_map: bitmap("multi"),
            flags: ModelFlags::NOT_ALPHA_TESTED,
            ..ShaderModel::default()
        };
        let source = SourceShader::from_model(&shader);
        let features = source.features();
        assert!(!features.alpha_tested);
        assert!(features.tertiary_illumination);
        assert!(features.illumination_map);
        assert!(!features.three_channel);
        assert!(source.channels.is_empty());
    }
}
