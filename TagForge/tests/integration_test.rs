use std::path::Path;

use byteorder::{BigEndian, LittleEndian};
use pretty_assertions::assert_eq;
use tagforge::formats::common::{
    BlockHeader, Bgra, ColorRgb, FourCC, Reference, TagHeader, TagReader, engine_tags, groups,
};
use tagforge::formats::function::{ColorMode, CurveOutput, CurveShape, FunctionCurve};
use tagforge::formats::gen1::{self, MaterialType, ShaderBase, ShaderEnvironment, ShaderV1};
use tagforge::formats::gen2::{self, ParameterType};
use tagforge::prelude::*;
use tempfile::tempdir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn bitmap(path: &str) -> Option<Reference> {
    Some(Reference::new(groups::BITMAP, path).unwrap())
}

fn rock() -> ShaderEnvironment {
    ShaderEnvironment {
        base: ShaderBase {
            material_type: MaterialType::Stone,
            ..ShaderBase::default()
        },
        base_map: bitmap("levels\\a10\\bitmaps\\rock"),
        ..ShaderEnvironment::default()
    }
}

fn to_bytes(shader: ShaderEnvironment) -> Vec<u8> {
    gen1::write_shader(&ShaderV1::Environment(shader)).unwrap()
}

fn parameter_names(shader: &ShaderTag) -> Vec<&str> {
    shader.parameters.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn test_base_map_only_environment() {
    init_tracing();
    let output = upgrade(&to_bytes(rock()), &PatchOverrides::new()).unwrap();

    assert_eq!(output.template, ShaderTemplate::TexBump);
    assert_eq!(
        parameter_names(&output.shader),
        ["base_map", "specular_color", "specular_glancing_color"]
    );
    assert_eq!(output.shader.material_name, material_name(MaterialType::Stone));
    assert!(output.diagnostics.is_empty());

    let base_map = &output.shader.parameters[0];
    assert_eq!(base_map.kind, ParameterType::Bitmap);
    assert_eq!(
        base_map.bitmap.as_ref().map(|r| r.path.as_str()),
        Some("levels\\a10\\bitmaps\\rock")
    );

    // Parameters without curves still read back with an empty animation list
    let reread = gen2::read_shader(&output.bytes).unwrap();
    assert_eq!(reread.header.engine_tag, engine_tags::BLM);
    assert_eq!(reread.header.group, groups::SHADER);
    assert!(reread.diagnostics.is_empty());
    assert!(reread.tag.parameters.iter().all(|p| p.animation_properties.is_empty()));
    assert_eq!(reread.tag, output.shader);
}

#[test]
fn test_emissive_environment_appends_illumination() {
    init_tracing();
    let shader = ShaderEnvironment {
        base: ShaderBase {
            power: 500.0,
            color_of_emitted_light: ColorRgb::new(1.0, 0.8, 0.2),
            ..rock().base
        },
        illumination_map: bitmap("levels\\a10\\bitmaps\\rock_glow"),
        ..rock()
    };
    let output = upgrade(&to_bytes(shader), &PatchOverrides::new()).unwrap();

    assert_eq!(output.template, ShaderTemplate::TexBumpIllum);
    assert_eq!(
        parameter_names(&output.shader),
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
    let power = output.shader.parameter("emissive_power").unwrap();
    assert_eq!(power.const_value, 0.5);

    let color = output.shader.parameter("emissive_color").unwrap();
    assert_eq!(color.animation_properties.len(), 1);
    let curve = color.animation_properties[0].function.as_ref().unwrap();
    assert_eq!(curve.shape, CurveShape::Constant);
    match curve.output {
        CurveOutput::Color { mode, stops } => {
            assert_eq!(mode, ColorMode::FourColor);
            assert_eq!(stops[0], stops[1]);
            assert_eq!(stops[3], Bgra::OPAQUE_WHITE);
        }
        CurveOutput::Scalar { .. } => panic!("emissive color curve must be a color ramp"),
    }

    let reread = gen2::read_shader(&output.bytes).unwrap();
    assert_eq!(reread.tag, output.shader);
}

#[test]
fn test_constant_color_curve_bytes() {
    let stops = [
        Bgra::new(1, 2, 3, 4),
        Bgra::new(5, 6, 7, 8),
        Bgra::new(9, 10, 11, 12),
        Bgra::new(13, 14, 15, 16),
    ];
    let curve = FunctionCurve::constant_color(ColorMode::FourColor, stops);
    let bytes = curve.encode().unwrap();

    assert_eq!(bytes.len(), 28);
    assert_eq!(bytes[0], 1);
    assert_eq!(bytes[1], 4);
    assert_eq!(&bytes[4..20], &(1..=16).collect::<Vec<u8>>()[..]);
    assert_eq!(FunctionCurve::decode(&bytes).unwrap(), curve);
}

#[test]
fn test_primitives_reserialize_byte_for_byte() {
    let mut header = TagHeader::new(groups::SHADER_ENVIRONMENT, 2, engine_tags::BLAM);
    header.reserved[0] = 0x7f;
    header.checksum = 0xdead_beef;
    header.data_length = 844;
    let mut original = Vec::new();
    header.write::<BigEndian>(&mut original).unwrap();
    let mut reader = TagReader::new(&original, "header");
    let mut rewritten = Vec::new();
    TagHeader::read::<BigEndian>(&mut reader)
        .unwrap()
        .write::<BigEndian>(&mut rewritten)
        .unwrap();
    assert_eq!(rewritten, original);

    let mut original = Vec::new();
    BlockHeader::new(0, 3, 52).write::<LittleEndian>(&mut original).unwrap();
    let mut reader = TagReader::new(&original, "block");
    let mut rewritten = Vec::new();
    BlockHeader::read::<LittleEndian>(&mut reader)
        .unwrap()
        .write::<LittleEndian>(&mut rewritten)
        .unwrap();
    assert_eq!(rewritten, original);

    let reference = Reference::new(FourCC::new(b"bitm"), "ui\\cursor").unwrap();
    let mut original = Vec::new();
    reference.write::<LittleEndian>(&mut original).unwrap();
    reference.write_path(&mut original).unwrap();
    let mut reader = TagReader::new(&original, "reference");
    let mut decoded = Reference::read::<LittleEndian>(&mut reader).unwrap();
    decoded.read_path(&mut reader).unwrap();
    let mut rewritten = Vec::new();
    decoded.write::<LittleEndian>(&mut rewritten).unwrap();
    decoded.write_path(&mut rewritten).unwrap();
    assert_eq!(rewritten, original);
}

#[test]
fn test_overrides_from_json() {
    init_tracing();
    let overrides = PatchOverrides::from_json_str(
        r#"{
            "material_name": "hard_metal_thin",
            "parameters.specular_color.const_color": [0.1, 0.2, 0.3]
        }"#,
    )
    .unwrap();
    let output = upgrade(&to_bytes(rock()), &overrides).unwrap();
    assert_eq!(output.shader.material_name, "hard_metal_thin");
    assert_eq!(
        output.shader.parameter("specular_color").unwrap().const_color,
        ColorRgb::new(0.1, 0.2, 0.3)
    );
}

#[test]
fn test_truncated_source_fails_in_read_stage() {
    let bytes = to_bytes(rock());
    let err = upgrade(&bytes[..bytes.len() - 4], &PatchOverrides::new()).unwrap_err();
    assert_eq!(err.stage, Stage::Read);
    assert!(matches!(err.source, Error::Truncated { .. }));
}

#[test]
fn test_non_utf8_path_fails_in_read_stage() {
    let mut bytes = to_bytes(rock());
    let at = bytes
        .windows(5)
        .position(|window| window == b"rock\0")
        .unwrap();
    bytes[at + 3] = 0xe9;

    let err = upgrade(&bytes, &PatchOverrides::new()).unwrap_err();
    assert_eq!(err.stage, Stage::Read);
    assert!(matches!(err.source, Error::InvalidUtf8 { structure: "reference path" }));
}

#[test]
fn test_batch_upgrade() {
    init_tracing();
    let source = tempdir().unwrap();
    let dest = tempdir().unwrap();
    let levels = source.path().join("levels");
    std::fs::create_dir_all(&levels).unwrap();
    std::fs::write(levels.join("rock.shader_environment"), to_bytes(rock())).unwrap();
    std::fs::write(levels.join("broken.shader_environment"), b"not a tag").unwrap();

    let files = find_source_tags(source.path());
    assert_eq!(files.len(), 2);

    let seen = std::sync::Mutex::new(Vec::new());
    let result = batch_upgrade(
        &files,
        source.path(),
        dest.path(),
        &PatchOverrides::new(),
        |progress| seen.lock().unwrap().push(progress.current),
    );

    assert_eq!(result.success_count, 1);
    assert_eq!(result.fail_count, 1);
    assert_eq!(result.results.len(), 2);
    let mut seen = seen.into_inner().unwrap();
    seen.sort_unstable();
    assert_eq!(seen, [1, 2]);

    let written = dest.path().join(Path::new("levels").join("rock.shader"));
    let reread = gen2::read_shader(&std::fs::read(written).unwrap()).unwrap();
    assert_eq!(reread.tag.material_name, material_name(MaterialType::Stone));
    assert!(!dest.path().join("levels").join("broken.shader").exists());
}
