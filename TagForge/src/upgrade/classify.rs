//! Template classification
//!
//! Two strategies pick a template from a shader's feature predicates. Model
//! shaders use a fixed eight-entry table. Environment shaders narrow the
//! whole catalog by template-name substrings.

use super::source::{ShaderFeatures, SourceKind, SourceShader};
use super::templates::ShaderTemplate;

/// Picks a template for a set of shader features.
///
/// Implementations are pure: the same features always give the same template.
pub trait TemplateClassifier {
    fn classify(&self, features: &ShaderFeatures) -> ShaderTemplate;
}

/// Decision table over the first eight catalog entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTableClassifier;

impl FixedTableClassifier {
    pub const TABLE: [ShaderTemplate; 8] = [
        ShaderTemplate::TexBump,
        ShaderTemplate::TexBumpEnv,
        ShaderTemplate::TexBumpAlphaTest,
        ShaderTemplate::TexBumpEnvAlphaTest,
        ShaderTemplate::TexBumpIllum,
        ShaderTemplate::TexBumpIllum3Channel,
        ShaderTemplate::TexBumpEnvIllum,
        ShaderTemplate::TexBumpEnvIllum3Channel,
    ];

    /// Index into [`FixedTableClassifier::TABLE`].
    pub fn index(features: &ShaderFeatures) -> usize {
        if !features.base_map {
            return 0;
        }
        match (features.environment_map, features.emissive) {
            (true, _) if features.alpha_tested => 3,
            (true, true) if features.tertiary_illumination => 7,
            (true, true) => 6,
            (true, false) => 1,
            (false, true) if features.tertiary_illumination => 5,
            (false, true) => 4,
            (false, false) if features.alpha_tested => 2,
            (false, false) => 0,
        }
    }
}

impl TemplateClassifier for FixedTableClassifier {
    fn classify(&self, features: &ShaderFeatures) -> ShaderTemplate {
        Self::TABLE[Self::index(features)]
    }
}

/// Narrows the catalog by name substrings, one present feature at a time.
///
/// Matching is by substring, so unrelated templates that share a fragment
/// survive a step: `channel` also keeps `tex_bump_plasma_one_channel_illum`.
/// That behavior is kept as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterNarrowingClassifier;

impl FilterNarrowingClassifier {
    /// Substrings to narrow by, in order, for the present features.
    pub fn filters(features: &ShaderFeatures) -> Vec<&'static str> {
        let detail = if features.detail_map_count >= 2 {
            Some(if features.blended { "detail_blend" } else { "two_detail" })
        } else {
            None
        };

        [
            (features.base_map, "tex"),
            (features.bump_map, "bump"),
            (features.alpha_tested, "alpha"),
            (features.illumination_map || features.emissive, "illum"),
            (features.three_channel, "channel"),
            (features.environment_map, "env"),
        ]
        .into_iter()
        .filter_map(|(present, filter)| present.then_some(filter))
        .chain(detail)
        .collect()
    }

    /// Surviving templates after narrowing, in catalog order.
    ///
    /// A filter that would leave nothing is skipped and narrowing stops.
    pub fn candidates(features: &ShaderFeatures) -> Vec<ShaderTemplate> {
        let mut candidates = ShaderTemplate::ALL.to_vec();
        for filter in Self::filters(features) {
            let narrowed: Vec<_> = candidates
                .iter()
                .copied()
                .filter(|template| template.name().contains(filter))
                .collect();
            if narrowed.is_empty() {
                tracing::debug!("Narrowing by '{filter}' left no templates, stopping");
                break;
            }
            candidates = narrowed;
        }
        candidates
    }
}

impl TemplateClassifier for FilterNarrowingClassifier {
    fn classify(&self, features: &ShaderFeatures) -> ShaderTemplate {
        Self::candidates(features)
            .first()
            .copied()
            .unwrap_or(ShaderTemplate::ALL[0])
    }
}

/// Classify a source shader with the strategy for its kind.
pub fn classify_shader(source: &SourceShader) -> ShaderTemplate {
    let features = source.features();
    let template = match source.kind {
        SourceKind::Model => FixedTableClassifier.classify(&features),
        SourceKind::Environment => FilterNarrowingClassifier.classify(&features),
    };
    tracing::debug!("Classified {:?} shader as {template}", source.kind);
    template
}
