//! Field overrides applied to a synthesized shader before it is written
//!
//! Overrides are a flat JSON object keyed by field path:
//!
//! ```json
//! {
//!     "material_name": "hard_metal_thick",
//!     "template": "tex_bump_env",
//!     "parameters.emissive_power.const_value": 2.0,
//!     "parameters.specular_color.const_color": [1.0, 0.9, 0.8]
//! }
//! ```
//!
//! Entries apply in file order, so a later entry wins over an earlier one
//! touching the same field.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::templates::ShaderTemplate;
use crate::error::{Error, Result};
use crate::formats::common::{ColorRgb, FourCC, Reference, groups};
use crate::formats::gen2::{
    LightmapType, Parameter, ParameterType, ShaderLodBias, ShaderTag, SpecularType,
};

/// Ordered field-path overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchOverrides {
    entries: IndexMap<String, Value>,
}

impl PatchOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an override, keeping its original position on replace.
    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(path.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(path, value)| (path.as_str(), value))
    }

    /// Parse overrides from a JSON object.
    ///
    /// # Errors
    /// Returns an error if the text is not a JSON object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load overrides from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a JSON object.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Apply every override to `shader`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOverride`] for an unknown field path, a value of
    /// the wrong type, or a parameter the shader does not have. The shader may
    /// be partially patched when this fails.
    pub fn apply(&self, shader: &mut ShaderTag) -> Result<()> {
        for (path, value) in &self.entries {
            apply_one(shader, path, value)?;
            tracing::debug!("Applied override {path} = {value}");
        }
        Ok(())
    }
}

fn invalid(path: &str, reason: impl Into<String>) -> Error {
    Error::InvalidOverride {
        path: path.to_string(),
        reason: reason.into(),
    }
}

fn apply_one(shader: &mut ShaderTag, path: &str, value: &Value) -> Result<()> {
    if let Some(rest) = path.strip_prefix("parameters.") {
        let (name, field) = rest
            .rsplit_once('.')
            .ok_or_else(|| invalid(path, "expected parameters.<name>.<field>"))?;
        let parameter = shader
            .parameter_mut(name)
            .ok_or_else(|| invalid(path, format!("shader has no parameter '{name}'")))?;
        return apply_parameter(parameter, path, field, value);
    }

    match path {
        "material_name" => shader.material_name = as_str(path, value)?.to_string(),
        "template" => {
            let name = as_str(path, value)?;
            let template = ShaderTemplate::from_name(name)
                .ok_or_else(|| invalid(path, format!("'{name}' is not a known template")))?;
            shader.template = Some(Reference::new(groups::SHADER_TEMPLATE, template.path())?);
        }
        "light_response" => {
            shader.light_response = optional_reference(groups::LIGHT_RESPONSE, path, value)?;
        }
        "flags" => shader.flags = as_u16(path, value)?,
        "shader_lod_bias" => {
            shader.shader_lod_bias = ShaderLodBias::from_u16(as_u16(path, value)?)
                .map_err(|e| invalid(path, e.to_string()))?;
        }
        "specular_type" => {
            shader.specular_type = SpecularType::from_u16(as_u16(path, value)?)
                .map_err(|e| invalid(path, e.to_string()))?;
        }
        "lightmap_type" => {
            shader.lightmap_type = LightmapType::from_u16(as_u16(path, value)?)
                .map_err(|e| invalid(path, e.to_string()))?;
        }
        "lightmap_specular_brightness" => {
            shader.lightmap_specular_brightness = as_f32(path, value)?;
        }
        "lightmap_ambient_bias" => shader.lightmap_ambient_bias = as_f32(path, value)?,
        "added_depth_bias_offset" => shader.added_depth_bias_offset = as_f32(path, value)?,
        "added_depth_bias_slope_scale" => {
            shader.added_depth_bias_slope_scale = as_f32(path, value)?;
        }
        _ => return Err(invalid(path, "unknown field")),
    }
    Ok(())
}

fn apply_parameter(parameter: &mut Parameter, path: &str, field: &str, value: &Value) -> Result<()> {
    match field {
        "const_value" => parameter.const_value = as_f32(path, value)?,
        "const_color" => parameter.const_color = as_color(path, value)?,
        "bitmap" => {
            if parameter.kind != ParameterType::Bitmap {
                return Err(invalid(path, "parameter is not a bitmap"));
            }
            parameter.bitmap = optional_reference(groups::BITMAP, path, value)?;
        }
        _ => return Err(invalid(path, format!("unknown parameter field '{field}'"))),
    }
    Ok(())
}

fn as_str<'a>(path: &str, value: &'a Value) -> Result<&'a str> {
    value.as_str().ok_or_else(|| invalid(path, "expected a string"))
}

fn as_f32(path: &str, value: &Value) -> Result<f32> {
    value
        .as_f64()
        .map(|v| v as f32)
        .ok_or_else(|| invalid(path, "expected a number"))
}

fn as_u16(path: &str, value: &Value) -> Result<u16> {
    value
        .as_u64()
        .and_then(|v| u16::try_from(v).ok())
        .ok_or_else(|| invalid(path, "expected an integer between 0 and 65535"))
}

fn as_color(path: &str, value: &Value) -> Result<ColorRgb> {
    let components: Vec<f32> = value
        .as_array()
        .map(|items| items.iter().filter_map(Value::as_f64).map(|v| v as f32).collect())
        .unwrap_or_default();
    match components[..] {
        [r, g, b] => Ok(ColorRgb::new(r, g, b)),
        _ => Err(invalid(path, "expected [r, g, b]")),
    }
}

/// An empty path clears the reference.
fn optional_reference(
    group: FourCC,
    path: &str,
    value: &Value,
) -> Result<Option<Reference>> {
    let tag_path = as_str(path, value)?;
    if tag_path.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Reference::new(group, tag_path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shader() -> ShaderTag {
        ShaderTag {
            parameters: vec![
                Parameter::value("emissive_power", 0.5),
                Parameter::color("specular_color", ColorRgb::WHITE),
                Parameter::bitmap("base_map", Reference::new(groups::BITMAP, "rock").unwrap()),
            ],
            ..ShaderTag::default()
        }
    }

    #[test]
    fn test_apply_top_level_fields() {
        let overrides = PatchOverrides::from_json_str(
            r#"{
                "material_name": "hard_metal_thick",
                "template": "tex_bump_env",
                "specular_type": 3,
                "lightmap_ambient_bias": -0.25
            }"#,
        )
        .unwrap();
        assert_eq!(overrides.len(), 4);

        let mut shader = shader();
        overrides.apply(&mut shader).unwrap();
        assert_eq!(shader.material_name, "hard_metal_thick");
        assert_eq!(
            shader.template.as_ref().map(|t| t.path.as_str()),
            Some("shaders\\shader_templates\\opaque\\tex_bump_env")
        );
        assert_eq!(shader.specular_type, SpecularType::Shiny);
        assert_eq!(shader.lightmap_ambient_bias, -0.25);
    }

    #[test]
    fn test_apply_parameter_fields() {
        let mut overrides = PatchOverrides::new();
        overrides.insert("parameters.emissive_power.const_value", 2.0);
        overrides.insert("parameters.specular_color.const_color", json!([0.25, 0.5, 1.0]));
        overrides.insert("parameters.base_map.bitmap", "");

        let mut shader = shader();
        overrides.apply(&mut shader).unwrap();
        assert_eq!(shader.parameter("emissive_power").unwrap().const_value, 2.0);
        assert_eq!(
            shader.parameter("specular_color").unwrap().const_color,
            ColorRgb::new(0.25, 0.5, 1.0)
        );
        assert_eq!(shader.parameter("base_map").unwrap().bitmap, None);
    }

    #[test]
    fn test_later_entries_win() {
        let overrides = PatchOverrides::from_json_str(
            r#"{"material_name": "dirt", "lightmap_ambient_bias": 1.0}"#,
        )
        .unwrap();
        let mut merged = overrides.clone();
        merged.insert("material_name", "snow");
        assert_eq!(merged.entries().next().map(|(path, _)| path), Some("material_name"));

        let mut shader = shader();
        merged.apply(&mut shader).unwrap();
        assert_eq!(shader.material_name, "snow");
    }

    #[test]
    fn test_rejects_bad_overrides() {
        let cases = [
            ("frobnicate", json!(1)),
            ("template", json!("tex_nothing")),
            ("specular_type", json!(99)),
            ("flags", json!(-1)),
            ("material_name", json!(5)),
            ("parameters.missing.const_value", json!(1.0)),
            ("parameters.emissive_power.bitmap", json!("x")),
            ("parameters.specular_color.const_color", json!([1.0, 2.0])),
            ("parameters.emissive_power", json!(1.0)),
        ];
        for (path, value) in cases {
            let mut overrides = PatchOverrides::new();
            overrides.insert(path, value);
            let err = overrides.apply(&mut shader()).unwrap_err();
            assert!(
                matches!(err, Error::InvalidOverride { path: ref p, .. } if p == path),
                "{path}: {err}"
            );
        }
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overrides.json");
        std::fs::write(&path, r#"{"flags": 3}"#).unwrap();

        let overrides = PatchOverrides::from_json_file(&path).unwrap();
        let mut shader = shader();
        overrides.apply(&mut shader).unwrap();
        assert_eq!(shader.flags, 3);

        let missing = PatchOverrides::from_json_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(Error::FileAccess { .. })));
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(matches!(
            PatchOverrides::from_json_str("[1, 2]"),
            Err(Error::JsonError(_))
        ));
    }
}
