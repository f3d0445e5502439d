//! Parameter synthesis
//!
//! One recipe per parameter family. Each recipe reads the normalized source
//! and the chosen template's slots and returns finished parameters; the
//! composer concatenates them in a fixed order.

use crate::formats::common::Bgra;
use crate::formats::function::{
    ColorMode, CurveOutput, FunctionCurve, PeriodicCurve, PeriodicShape,
};
use crate::formats::gen1::{AnimationFunction, IlluminationChannel, TextureAnimation};
use crate::formats::gen2::{AnimationProperty, AnimationTarget, Parameter};

use super::source::{ScaledMap, SourceShader};
use super::templates::{ShaderTemplate, TemplateCapabilities};

/// Emissive power is stored in the first generation in these units per unit
const EMISSIVE_POWER_SCALE: f32 = 1000.0;
/// Channel templates expect a tenfold brighter power
const CHANNEL_EMISSIVE_POWER_SCALE: f32 = 100.0;

const CHANNEL_NAMES: [&str; 3] = ["channel_a", "channel_b", "channel_c"];

/// All parameters for `template`, in recipe order: bump, base, detail,
/// specular, environment, illumination, channel.
///
/// Specular is emitted ahead of environment rather than at the end so that an
/// emissive shader's parameter list closes with its illumination block.
/// Channel parameters only exist for channel templates, which never carry that
/// block, so illumination stays last whenever it is present.
pub fn synthesize_parameters(source: &SourceShader, template: ShaderTemplate) -> Vec<Parameter> {
    let caps = template.capabilities();
    let parameters: Vec<Parameter> = [
        bump_parameters(source, &caps),
        base_parameters(source, &caps),
        detail_parameters(source, &caps),
        specular_parameters(source),
        environment_parameters(source, &caps),
        illumination_parameters(source, &caps),
        channel_parameters(source, &caps),
    ]
    .into_iter()
    .flatten()
    .collect();

    tracing::debug!("Synthesized {} parameters for {template}", parameters.len());
    parameters
}

pub fn bump_parameters(source: &SourceShader, caps: &TemplateCapabilities) -> Vec<Parameter> {
    match &source.bump_map {
        Some(bump) if caps.bump_map => vec![scaled_bitmap("bump_map", bump)],
        _ => Vec::new(),
    }
}

pub fn base_parameters(source: &SourceShader, caps: &TemplateCapabilities) -> Vec<Parameter> {
    let Some(base_map) = &source.base_map else {
        return Vec::new();
    };
    if !caps.base_map {
        return Vec::new();
    }

    let mut parameter = Parameter::bitmap("base_map", base_map.clone());
    for (animation, target) in [
        (&source.u_animation, AnimationTarget::BitmapTranslationX),
        (&source.v_animation, AnimationTarget::BitmapTranslationY),
    ] {
        if animation.is_active() {
            parameter = parameter.with_animation(scroll_property(animation, target));
        }
    }
    vec![parameter]
}

pub fn detail_parameters(source: &SourceShader, caps: &TemplateCapabilities) -> Vec<Parameter> {
    if !caps.base_map {
        return Vec::new();
    }

    let names: &[&str] = if caps.detail_blend {
        &["blend_detail_map_1", "blend_detail_map_2"]
    } else if caps.two_detail {
        &["detail_map", "secondary_detail_map"]
    } else {
        &["detail_map"]
    };

    names
        .iter()
        .zip(&source.detail_maps)
        .map(|(name, detail)| scaled_bitmap(name, detail))
        .collect()
}

pub fn specular_parameters(source: &SourceShader) -> Vec<Parameter> {
    vec![
        Parameter::color("specular_color", source.perpendicular_color),
        Parameter::color("specular_glancing_color", source.parallel_color),
    ]
}

pub fn environment_parameters(source: &SourceShader, caps: &TemplateCapabilities) -> Vec<Parameter> {
    let Some(environment_map) = &source.environment_map else {
        return Vec::new();
    };
    if !caps.environment {
        return Vec::new();
    }

    vec![
        Parameter::bitmap("environment_map", environment_map.clone()),
        Parameter::color(
            "env_tint_color",
            source.perpendicular_color.scaled(source.perpendicular_brightness),
        ),
        Parameter::color(
            "env_glancing_tint_color",
            source.parallel_color.scaled(source.parallel_brightness),
        ),
        Parameter::value("env_brightness", source.specular_brightness),
    ]
}

pub fn illumination_parameters(
    source: &SourceShader,
    caps: &TemplateCapabilities,
) -> Vec<Parameter> {
    if !caps.illumination {
        return Vec::new();
    }

    let mut parameters = Vec::new();
    if let Some(illumination_map) = &source.illumination_map {
        parameters.push(Parameter::bitmap("self_illum_map", illumination_map.clone()));
        parameters.push(Parameter::bitmap("lightmap_emmisive_map", illumination_map.clone()));
    }

    if source.is_emissive() {
        let emitted = Bgra::from_linear(source.emitted_color, u8::MAX);
        let ramp = FunctionCurve::constant_color(
            ColorMode::FourColor,
            [emitted, emitted, Bgra::OPAQUE_WHITE, Bgra::OPAQUE_WHITE],
        );
        parameters.push(
            Parameter::color("emissive_color", source.emitted_color)
                .with_animation(AnimationProperty::new(AnimationTarget::Color, ramp)),
        );

        let scale = if caps.channels > 0 {
            CHANNEL_EMISSIVE_POWER_SCALE
        } else {
            EMISSIVE_POWER_SCALE
        };
        parameters.push(Parameter::value("emissive_power", source.power / scale));
    }
    parameters
}

pub fn channel_parameters(source: &SourceShader, caps: &TemplateCapabilities) -> Vec<Parameter> {
    CHANNEL_NAMES
        .iter()
        .zip(&source.channels)
        .take(caps.channels)
        .map(|(name, channel)| {
            let parameter = Parameter::color(*name, channel.on_color);
            if channel.is_animated() {
                parameter.with_animation(pulse_property(channel))
            } else {
                parameter
            }
        })
        .collect()
}

/// Bitmap parameter whose nonzero scale becomes constant x/y scale curves.
fn scaled_bitmap(name: &str, scaled: &ScaledMap) -> Parameter {
    let parameter = Parameter::bitmap(name, scaled.map.clone());
    if scaled.scale == 0.0 {
        return parameter;
    }
    parameter
        .with_animation(AnimationProperty::new(
            AnimationTarget::BitmapScaleX,
            FunctionCurve::constant(scaled.scale),
        ))
        .with_animation(AnimationProperty::new(
            AnimationTarget::BitmapScaleY,
            FunctionCurve::constant(scaled.scale),
        ))
}

fn periodic_shape(function: AnimationFunction) -> PeriodicShape {
    match function {
        AnimationFunction::One => PeriodicShape::One,
        AnimationFunction::Zero => PeriodicShape::Zero,
        AnimationFunction::Cosine => PeriodicShape::Cosine,
        AnimationFunction::CosineVariablePeriod => PeriodicShape::CosineVariablePeriod,
        AnimationFunction::DiagonalWave => PeriodicShape::DiagonalWave,
        AnimationFunction::DiagonalWaveVariablePeriod => PeriodicShape::DiagonalWaveVariablePeriod,
        AnimationFunction::Slide => PeriodicShape::Slide,
        AnimationFunction::SlideVariablePeriod => PeriodicShape::SlideVariablePeriod,
        AnimationFunction::Noise => PeriodicShape::Noise,
        AnimationFunction::Jitter => PeriodicShape::Jitter,
        AnimationFunction::Wander => PeriodicShape::Wander,
        AnimationFunction::Spark => PeriodicShape::Spark,
    }
}

fn periodic(function: AnimationFunction, period: f32, phase: f32) -> PeriodicCurve {
    let shape = periodic_shape(function);
    PeriodicCurve {
        input: shape,
        range: shape,
        frequency: if period > 0.0 { 1.0 / period } else { 0.0 },
        phase,
        input_min: 0.0,
        input_max: 1.0,
        range_min: 0.0,
        range_max: 1.0,
    }
}

/// Texture scrolling: translation over `[0, scale]` once per period.
fn scroll_property(animation: &TextureAnimation, target: AnimationTarget) -> AnimationProperty {
    let output = CurveOutput::Scalar {
        ranged: true,
        lower: 0.0,
        upper: animation.scale,
    };
    let curve = FunctionCurve::periodic(
        output,
        periodic(animation.function, animation.period, animation.phase),
    );
    AnimationProperty::new(target, curve).with_time_period(animation.period)
}

/// Channel pulse between its off and on colors.
fn pulse_property(channel: &IlluminationChannel) -> AnimationProperty {
    let output = CurveOutput::Color {
        mode: ColorMode::TwoColor,
        stops: [
            Bgra::from_linear(channel.off_color, u8::MAX),
            Bgra::from_linear(channel.on_color, u8::MAX),
            Bgra::default(),
            Bgra::default(),
        ],
    };
    let curve = FunctionCurve::periodic(
        output,
        periodic(
            channel.animation_function,
            channel.animation_period,
            channel.animation_phase,
        ),
    );
    AnimationProperty::new(AnimationTarget::Color, curve).with_time_period(channel.animation_period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::common::{ColorRgb, Reference, groups};
    use crate::formats::function::CurveShape;
    use crate::formats::gen1::{ShaderBase, ShaderEnvironment};
    use crate::formats::gen2::ParameterType;

    fn bitmap(path: &str) -> Option<Reference> {
        Some(Reference::new(groups::BITMAP, path).unwrap())
    }

    fn names(parameters: &[Parameter]) -> Vec<&str> {
        parameters.iter().map(|p| p.name.as_str()).collect()
    }

    fn source(shader: ShaderEnvironment) -> SourceShader {
        SourceShader::from_environment(&shader)
    }

    #[test]
    fn test_base_only() {
        let source = source(ShaderEnvironment {
            base_map: bitmap("rock"),
            ..ShaderEnvironment::default()
        });
        let parameters = synthesize_parameters(&source, ShaderTemplate::TexBump);
        assert_eq!(
            names(&parameters),
            ["base_map", "specular_color", "specular_glancing_color"]
        );
        assert!(parameters.iter().all(|p| p.animation_properties.is_empty()));
    }

    #[test]
    fn test_illumination_comes_last() {
        let source = source(ShaderEnvironment {
            base: ShaderBase {
                power: 500.0,
                color_of_emitted_light: ColorRgb::new(1.0, 0.5, 0.0),
                ..ShaderBase::default()
            },
            base_map: bitmap("rock"),
            illumination_map: bitmap("glow"),
            ..ShaderEnvironment::default()
        });
        let parameters = synthesize_parameters(&source, ShaderTemplate::TexBumpIllum);
        assert_eq!(
            names(&parameters),
            [
                "base_map",
                "specular_color",
                "specular_glancing_color",
                "self_illum_map",
                "lightmap_emmisive_map",
                "emissive_color",
                "emissive_power",
            ]
        );

        let power = &parameters[6];
        assert_eq!(power.kind, ParameterType::Value);
        assert_eq!(power.const_value, 0.5);

        let color = &parameters[5];
        let function = color.animation_properties[0].function.as_ref().unwrap();
        assert_eq!(function.shape, CurveShape::Constant);
        let emitted = Bgra::from_linear(ColorRgb::new(1.0, 0.5, 0.0), 255);
        assert_eq!(
            function.output,
            CurveOutput::Color {
                mode: ColorMode::FourColor,
                stops: [emitted, emitted, Bgra::OPAQUE_WHITE, Bgra::OPAQUE_WHITE],
            }
        );
    }

    #[test]
    fn test_channel_templates_scale_power_differently() {
        let mut shader = ShaderEnvironment {
            base: ShaderBase {
                power: 50.0,
                ..ShaderBase::default()
            },
            base_map: bitmap("rock"),
            illumination_map: bitmap("glow"),
            ..ShaderEnvironment::default()
        };
        shader.illumination[0].on_color = ColorRgb::new(1.0, 0.0, 0.0);
        shader.illumination[1].on_color = ColorRgb::new(0.0, 1.0, 0.0);
        shader.illumination[2].on_color = ColorRgb::new(0.0, 0.0, 1.0);
        shader.illumination[2].animation_function = AnimationFunction::Cosine;
        shader.illumination[2].animation_period = 2.0;

        let parameters = synthesize_parameters(&source(shader), ShaderTemplate::TexBumpIllum3Channel);
        let power = parameters.iter().find(|p| p.name == "emissive_power").unwrap();
        assert_eq!(power.const_value, 0.5);

        let channels: Vec<_> = parameters.iter().filter(|p| p.name.starts_with("channel_")).collect();
        assert_eq!(channels.len(), 3);
        assert!(channels[0].animation_properties.is_empty());
        let pulse = &channels[2].animation_properties[0];
        assert_eq!(pulse.time_period, 2.0);
        let function = pulse.function.as_ref().unwrap();
        assert!(matches!(function.shape, CurveShape::Periodic(PeriodicCurve { frequency, .. }) if frequency == 0.5));
        assert!(matches!(function.output, CurveOutput::Color { mode: ColorMode::TwoColor, .. }));
    }

    #[test]
    fn test_bump_scale_curves() {
        let source = source(ShaderEnvironment {
            base_map: bitmap("rock"),
            bump_map: bitmap("rock_bump"),
            bump_map_scale: 4.0,
            ..ShaderEnvironment::default()
        });
        let parameters = synthesize_parameters(&source, ShaderTemplate::TexBump);
        assert_eq!(parameters[0].name, "bump_map");
        let targets: Vec<_> = parameters[0].animation_properties.iter().map(|a| a.target).collect();
        assert_eq!(targets, [AnimationTarget::BitmapScaleX, AnimationTarget::BitmapScaleY]);
        assert_eq!(
            parameters[0].animation_properties[0].function,
            Some(FunctionCurve::constant(4.0))
        );
    }

    #[test]
    fn test_scrolling_base_map() {
        let source = source(ShaderEnvironment {
            base_map: bitmap("water"),
            u_animation: TextureAnimation {
                function: AnimationFunction::Slide,
                period: 4.0,
                phase: 0.0,
                scale: 1.0,
            },
            ..ShaderEnvironment::default()
        });
        let parameters = base_parameters(&source, &ShaderTemplate::TexBump.capabilities());
        let properties = &parameters[0].animation_properties;
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].target, AnimationTarget::BitmapTranslationX);
        assert_eq!(properties[0].time_period, 4.0);
    }

    #[test]
    fn test_detail_map_names() {
        let source = source(ShaderEnvironment {
            base_map: bitmap("rock"),
            primary_detail_map: bitmap("a"),
            secondary_detail_map: bitmap("b"),
            ..ShaderEnvironment::default()
        });
        let blend = detail_parameters(&source, &ShaderTemplate::TexBumpDetailBlend.capabilities());
        assert_eq!(names(&blend), ["blend_detail_map_1", "blend_detail_map_2"]);
        let two = detail_parameters(&source, &ShaderTemplate::TexBumpTwoDetail.capabilities());
        assert_eq!(names(&two), ["detail_map", "secondary_detail_map"]);
        let one = detail_parameters(&source, &ShaderTemplate::TexBump.capabilities());
        assert_eq!(names(&one), ["detail_map"]);
    }

    #[test]
    fn test_environment_needs_slot_and_cube_map() {
        let source = source(ShaderEnvironment {
            base_map: bitmap("metal"),
            reflection_cube_map: bitmap("sky"),
            perpendicular_brightness: 0.5,
            parallel_brightness: 1.0,
            perpendicular_color: ColorRgb::WHITE,
            brightness: 0.75,
            ..ShaderEnvironment::default()
        });
        assert!(environment_parameters(&source, &ShaderTemplate::TexBump.capabilities()).is_empty());

        let parameters = environment_parameters(&source, &ShaderTemplate::TexBumpEnv.capabilities());
        assert_eq!(
            names(&parameters),
            ["environment_map", "env_tint_color", "env_glancing_tint_color", "env_brightness"]
        );
        assert_eq!(parameters[1].const_color, ColorRgb::new(0.5, 0.5, 0.5));
        assert_eq!(parameters[3].const_value, 0.75);
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let source = source(ShaderEnvironment {
            base_map: bitmap("rock"),
            bump_map: bitmap("bump"),
            bump_map_scale: 2.0,
            ..ShaderEnvironment::default()
        });
        let first = synthesize_parameters(&source, ShaderTemplate::TexBump);
        let second = synthesize_parameters(&source, ShaderTemplate::TexBump);
        assert_eq!(first, second);
    }
}
