//! Catalog of opaque shader templates

use std::fmt;

/// Directory holding every template in the catalog
pub const TEMPLATE_DIRECTORY: &str = "shaders\\shader_templates\\opaque\\";

/// A second-generation shader template identity.
///
/// Declaration order matters: the filter-narrowing classifier returns the
/// first surviving entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderTemplate {
    TexBump,
    TexBumpEnv,
    TexBumpAlphaTest,
    TexBumpEnvAlphaTest,
    TexBumpIllum,
    TexBumpIllum3Channel,
    TexBumpEnvIllum,
    TexBumpEnvIllum3Channel,
    TexBumpDetailBlend,
    TexBumpTwoDetail,
    TexBumpEnvTwoDetail,
    TexBumpAlphaTestSinglePass,
    TexDetailBlend,
    TexBumpDetailBlendDetail,
    TexBumpActiveCamo,
    Illum,
    Illum3Channel,
    Overlay,
    TexBumpDetailOverlay,
    TexBumpTerrain,
    TexBumpEnvAlphaTestIndexed,
    TexBumpShiny,
    TexBumpPlasmaOneChannelIllum,
    TexBumpIllumDetail,
    TexBumpIllumTrans,
    TexBumpIllumAlphaTest,
    TexBumpMeterIllum,
    TexBumpFoliage,
    TexBumpEnvDblmult,
}

impl ShaderTemplate {
    /// The whole catalog in declaration order.
    pub const ALL: [ShaderTemplate; 29] = [
        ShaderTemplate::TexBump,
        ShaderTemplate::TexBumpEnv,
        ShaderTemplate::TexBumpAlphaTest,
        ShaderTemplate::TexBumpEnvAlphaTest,
        ShaderTemplate::TexBumpIllum,
        ShaderTemplate::TexBumpIllum3Channel,
        ShaderTemplate::TexBumpEnvIllum,
        ShaderTemplate::TexBumpEnvIllum3Channel,
        ShaderTemplate::TexBumpDetailBlend,
        ShaderTemplate::TexBumpTwoDetail,
        ShaderTemplate::TexBumpEnvTwoDetail,
        ShaderTemplate::TexBumpAlphaTestSinglePass,
        ShaderTemplate::TexDetailBlend,
        ShaderTemplate::TexBumpDetailBlendDetail,
        ShaderTemplate::TexBumpActiveCamo,
        ShaderTemplate::Illum,
        ShaderTemplate::Illum3Channel,
        ShaderTemplate::Overlay,
        ShaderTemplate::TexBumpDetailOverlay,
        ShaderTemplate::TexBumpTerrain,
        ShaderTemplate::TexBumpEnvAlphaTestIndexed,
        ShaderTemplate::TexBumpShiny,
        ShaderTemplate::TexBumpPlasmaOneChannelIllum,
        ShaderTemplate::TexBumpIllumDetail,
        ShaderTemplate::TexBumpIllumTrans,
        ShaderTemplate::TexBumpIllumAlphaTest,
        ShaderTemplate::TexBumpMeterIllum,
        ShaderTemplate::TexBumpFoliage,
        ShaderTemplate::TexBumpEnvDblmult,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShaderTemplate::TexBump => "tex_bump",
            ShaderTemplate::TexBumpEnv => "tex_bump_env",
            ShaderTemplate::TexBumpAlphaTest => "tex_bump_alpha_test",
            ShaderTemplate::TexBumpEnvAlphaTest => "tex_bump_env_alpha_test",
            ShaderTemplate::TexBumpIllum => "tex_bump_illum",
            ShaderTemplate::TexBumpIllum3Channel => "tex_bump_illum_3_channel",
            ShaderTemplate::TexBumpEnvIllum => "tex_bump_env_illum",
            ShaderTemplate::TexBumpEnvIllum3Channel => "tex_bump_env_illum_3_channel",
            ShaderTemplate::TexBumpDetailBlend => "tex_bump_detail_blend",
            ShaderTemplate::TexBumpTwoDetail => "tex_bump_two_detail",
            ShaderTemplate::TexBumpEnvTwoDetail => "tex_bump_env_two_detail",
            ShaderTemplate::TexBumpAlphaTestSinglePass => "tex_bump_alpha_test_single_pass",
            ShaderTemplate::TexDetailBlend => "tex_detail_blend",
            ShaderTemplate::TexBumpDetailBlendDetail => "tex_bump_detail_blend_detail",
            ShaderTemplate::TexBumpActiveCamo => "tex_bump_active_camo",
            ShaderTemplate::Illum => "illum",
            ShaderTemplate::Illum3Channel => "illum_3_channel",
            ShaderTemplate::Overlay => "overlay",
            ShaderTemplate::TexBumpDetailOverlay => "tex_bump_detail_overlay",
            ShaderTemplate::TexBumpTerrain => "tex_bump_terrain",
            ShaderTemplate::TexBumpEnvAlphaTestIndexed => "tex_bump_env_alpha_test_indexed",
            ShaderTemplate::TexBumpShiny => "tex_bump_shiny",
            ShaderTemplate::TexBumpPlasmaOneChannelIllum => "tex_bump_plasma_one_channel_illum",
            ShaderTemplate::TexBumpIllumDetail => "tex_bump_illum_detail",
            ShaderTemplate::TexBumpIllumTrans => "tex_bump_illum_trans",
            ShaderTemplate::TexBumpIllumAlphaTest => "tex_bump_illum_alpha_test",
            ShaderTemplate::TexBumpMeterIllum => "tex_bump_meter_illum",
            ShaderTemplate::TexBumpFoliage => "tex_bump_foliage",
            ShaderTemplate::TexBumpEnvDblmult => "tex_bump_env_dblmult",
        }
    }

    /// Tag path of the template, without extension.
    pub fn path(self) -> String {
        format!("{TEMPLATE_DIRECTORY}{}", self.name())
    }

    /// Look up a template by bare name or full tag path.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix(TEMPLATE_DIRECTORY).unwrap_or(name);
        Self::ALL.into_iter().find(|template| template.name() == name)
    }

    /// Slots the template exposes, derived from its name.
    pub fn capabilities(self) -> TemplateCapabilities {
        let name = self.name();
        let channels = if name.contains("3_channel") {
            3
        } else if name.contains("one_channel") {
            1
        } else {
            0
        };
        TemplateCapabilities {
            base_map: name.starts_with("tex"),
            bump_map: name.contains("bump"),
            environment: name.contains("env"),
            illumination: name.contains("illum"),
            channels,
            two_detail: name.contains("two_detail"),
            detail_blend: name.contains("detail_blend"),
        }
    }
}

impl fmt::Display for ShaderTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameter slots a template accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateCapabilities {
    pub base_map: bool,
    pub bump_map: bool,
    pub environment: bool,
    pub illumination: bool,
    /// Number of colored illumination channels (0, 1 or 3)
    pub channels: usize,
    pub two_detail: bool,
    pub detail_blend: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = ShaderTemplate::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), ShaderTemplate::ALL.len());
    }

    #[test]
    fn test_lookup_by_name_or_path() {
        assert_eq!(ShaderTemplate::from_name("tex_bump_env"), Some(ShaderTemplate::TexBumpEnv));
        assert_eq!(
            ShaderTemplate::from_name(&ShaderTemplate::Illum3Channel.path()),
            Some(ShaderTemplate::Illum3Channel)
        );
        assert_eq!(ShaderTemplate::from_name("tex_bump_nope"), None);
        assert_eq!(
            ShaderTemplate::TexBump.path(),
            "shaders\\shader_templates\\opaque\\tex_bump"
        );
    }

    #[test]
    fn test_capabilities() {
        let caps = ShaderTemplate::TexBumpEnvIllum3Channel.capabilities();
        assert!(caps.base_map && caps.bump_map && caps.environment && caps.illumination);
        assert_eq!(caps.channels, 3);

        let caps = ShaderTemplate::TexBumpPlasmaOneChannelIllum.capabilities();
        assert_eq!(caps.channels, 1);

        let caps = ShaderTemplate::Overlay.capabilities();
        assert!(!caps.base_map && !caps.bump_map);

        assert!(ShaderTemplate::TexBumpDetailBlendDetail.capabilities().detail_blend);
        assert!(ShaderTemplate::TexBumpEnvTwoDetail.capabilities().two_detail);
    }
}
