//! First-to-second generation shader upgrade
//!
//! A conversion moves through three states, each consuming the last:
//!
//! 1. [`Initialized`]: the source shader is read and normalized, and an empty
//!    target shader is prepared.
//! 2. [`Classified`]: a template has been chosen for the source.
//! 3. [`Synthesized`]: the parameter table is built and the remaining target
//!    fields are filled in. Overrides may then be applied before writing.
//!
//! [`upgrade`] runs the whole pipeline on raw bytes.
//!
//! # Example
//!
//! ```no_run
//! use tagforge::upgrade::{PatchOverrides, upgrade};
//!
//! let source = std::fs::read("rock.shader_environment")?;
//! let output = upgrade(&source, &PatchOverrides::new())?;
//! std::fs::write("rock.shader", &output.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod classify;
pub mod patch;
pub mod source;
pub mod synthesis;
pub mod templates;

pub use classify::{
    FilterNarrowingClassifier, FixedTableClassifier, TemplateClassifier, classify_shader,
};
pub use patch::PatchOverrides;
pub use source::{ScaledMap, ShaderFeatures, SourceKind, SourceShader};
pub use synthesis::synthesize_parameters;
pub use templates::{ShaderTemplate, TemplateCapabilities};

use crate::error::{ConversionError, Diagnostic, Result, Stage};
use crate::formats::ParsedTag;
use crate::formats::common::{RawBlock, Reference, groups};
use crate::formats::gen1::{self, ShaderV1, SpecularFlags};
use crate::formats::gen2::{self, BodyLayout, LightmapType, ShaderTag, SpecularType};
use crate::remap::material_name;

/// Source read, target skeleton prepared
#[derive(Debug)]
pub struct Initialized;

/// Template chosen
#[derive(Debug)]
pub struct Classified {
    template: ShaderTemplate,
}

/// Parameters synthesized and target finalized
#[derive(Debug)]
pub struct Synthesized {
    template: ShaderTemplate,
}

/// One conversion in progress.
#[derive(Debug)]
pub struct Upgrade<S> {
    source: SourceShader,
    kind_name: &'static str,
    target: ShaderTag,
    diagnostics: Vec<Diagnostic>,
    state: S,
}

impl<S> Upgrade<S> {
    pub fn source(&self) -> &SourceShader {
        &self.source
    }

    /// Non-fatal findings from reading the source.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Layout the target will be written in.
    pub fn target_layout(&self) -> BodyLayout {
        BodyLayout::Retail
    }
}

impl Upgrade<Initialized> {
    pub fn new(parsed: ParsedTag<ShaderV1>) -> Self {
        for diagnostic in &parsed.diagnostics {
            tracing::warn!("{diagnostic}");
        }
        Self {
            source: SourceShader::from(&parsed.tag),
            kind_name: parsed.tag.kind_name(),
            target: ShaderTag::default(),
            diagnostics: parsed.diagnostics,
            state: Initialized,
        }
    }

    /// Read a first-generation shader file.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self::new(gen1::read_shader(data)?))
    }

    pub fn classify(self) -> Upgrade<Classified> {
        let template = classify_shader(&self.source);
        Upgrade {
            source: self.source,
            kind_name: self.kind_name,
            target: self.target,
            diagnostics: self.diagnostics,
            state: Classified { template },
        }
    }
}

impl Upgrade<Classified> {
    pub fn template(&self) -> ShaderTemplate {
        self.state.template
    }

    /// Build the parameter table and fill in the rest of the target.
    pub fn synthesize(self) -> Result<Upgrade<Synthesized>> {
        let template = self.state.template;
        let source = &self.source;
        let extra_shiny = source.specular_flags.contains(SpecularFlags::EXTRA_SHINY);

        let target = ShaderTag {
            template: Some(Reference::new(groups::SHADER_TEMPLATE, template.path())?),
            material_name: material_name(source.material_type).to_string(),
            runtime_properties: RawBlock::default(),
            parameters: synthesize_parameters(source, template),
            postprocess_definition: RawBlock::default(),
            predicted_resources: RawBlock::default(),
            specular_type: if extra_shiny {
                SpecularType::Shiny
            } else {
                SpecularType::Default
            },
            lightmap_type: match (
                source.specular_flags.contains(SpecularFlags::LIGHTMAP_IS_SPECULAR),
                extra_shiny,
            ) {
                (false, _) => LightmapType::Diffuse,
                (true, true) => LightmapType::ShinySpecular,
                (true, false) => LightmapType::DefaultSpecular,
            },
            lightmap_specular_brightness: source.specular_brightness,
            ..self.target
        };

        Ok(Upgrade {
            source: self.source,
            kind_name: self.kind_name,
            target,
            diagnostics: self.diagnostics,
            state: Synthesized { template },
        })
    }
}

impl Upgrade<Synthesized> {
    pub fn shader(&self) -> &ShaderTag {
        &self.target
    }

    /// Template named by the target's template reference.
    ///
    /// Overrides may repoint the reference; the classified template is kept
    /// when the path is not in the catalog.
    pub fn template(&self) -> ShaderTemplate {
        self.target
            .template
            .as_ref()
            .and_then(|reference| ShaderTemplate::from_name(&reference.path))
            .unwrap_or(self.state.template)
    }

    pub fn patch(mut self, overrides: &PatchOverrides) -> Result<Self> {
        if !overrides.is_empty() {
            overrides.apply(&mut self.target)?;
            tracing::debug!("Applied {} overrides", overrides.len());
        }
        Ok(self)
    }

    /// Serialize the target and hand back everything the conversion produced.
    pub fn finish(self) -> Result<UpgradeOutput> {
        let bytes = gen2::write_shader(&self.target)?;
        let template = self.template();
        tracing::info!(
            "Upgraded {} to {template} ({} parameters, {} bytes)",
            self.kind_name,
            self.target.parameters.len(),
            bytes.len()
        );
        Ok(UpgradeOutput {
            bytes,
            shader: self.target,
            template,
            diagnostics: self.diagnostics,
        })
    }
}

/// A finished conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeOutput {
    /// The encoded second-generation shader file
    pub bytes: Vec<u8>,
    pub shader: ShaderTag,
    pub template: ShaderTemplate,
    /// Findings from reading the source
    pub diagnostics: Vec<Diagnostic>,
}

/// Convert a first-generation shader file into a second-generation one.
///
/// # Errors
/// Returns a [`ConversionError`] naming the stage that failed. No output is
/// produced on failure.
pub fn upgrade(
    source_bytes: &[u8],
    overrides: &PatchOverrides,
) -> std::result::Result<UpgradeOutput, ConversionError> {
    let classified = Upgrade::from_bytes(source_bytes)
        .map_err(ConversionError::at(Stage::Read))?
        .classify();
    classified
        .synthesize()
        .map_err(ConversionError::at(Stage::Synthesize))?
        .patch(overrides)
        .map_err(ConversionError::at(Stage::Patch))?
        .finish()
        .map_err(ConversionError::at(Stage::Write))
}
