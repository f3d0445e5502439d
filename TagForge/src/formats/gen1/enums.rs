//! Enumerations and flag words of first-generation shaders

use bitflags::bitflags;

use crate::macros::tag_enum;

tag_enum! {
    /// Surface material used for impact effects and physics
    pub enum MaterialType as "material_type" {
        Dirt = 0,
        Sand = 1,
        Stone = 2,
        Snow = 3,
        Wood = 4,
        MetalHollow = 5,
        MetalThin = 6,
        MetalThick = 7,
        Rubber = 8,
        Glass = 9,
        ForceField = 10,
        Grunt = 11,
        HunterArmor = 12,
        HunterSkin = 13,
        Elite = 14,
        Jackal = 15,
        JackalEnergyShield = 16,
        EngineerSkin = 17,
        EngineerForceField = 18,
        FloodCombatForm = 19,
        FloodCarrierForm = 20,
        CyborgArmor = 21,
        CyborgEnergyShield = 22,
        HumanArmor = 23,
        HumanSkin = 24,
        Sentinel = 25,
        Monitor = 26,
        Plastic = 27,
        Water = 28,
        Leaves = 29,
        EliteEnergyShield = 30,
        Ice = 31,
        HunterShield = 32,
    }
}

tag_enum! {
    pub enum EnvironmentType as "environment_type" {
        Normal = 0,
        Blended = 1,
        BlendedBaseSpecular = 2,
    }
}

tag_enum! {
    /// How detail maps combine with the base map
    pub enum DetailMapFunction as "detail_map_function" {
        DoubleBiasedMultiply = 0,
        Multiply = 1,
        DoubleBiasedAdd = 2,
    }
}

tag_enum! {
    /// Wave driving texture scrolling and illumination channels
    pub enum AnimationFunction as "animation_function" {
        One = 0,
        Zero = 1,
        Cosine = 2,
        CosineVariablePeriod = 3,
        DiagonalWave = 4,
        DiagonalWaveVariablePeriod = 5,
        Slide = 6,
        SlideVariablePeriod = 7,
        Noise = 8,
        Jitter = 9,
        Wander = 10,
        Spark = 11,
    }
}

tag_enum! {
    pub enum ReflectionType as "reflection_type" {
        BumpedCubeMap = 0,
        FlatCubeMap = 1,
        BumpedRadiosity = 2,
    }
}

tag_enum! {
    pub enum ChangeColorSource as "change_color_source" {
        None = 0,
        A = 1,
        B = 2,
        C = 3,
        D = 4,
    }
}

tag_enum! {
    /// Channel of the multipurpose map masking the detail map
    pub enum DetailMask as "detail_mask" {
        None = 0,
        ReflectionMaskInverse = 1,
        ReflectionMask = 2,
        SelfIlluminationMaskInverse = 3,
        SelfIlluminationMask = 4,
        ChangeColorMaskInverse = 5,
        ChangeColorMask = 6,
        MultipurposeAlphaInverse = 7,
        MultipurposeAlpha = 8,
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EnvironmentFlags: u16 {
        const ALPHA_TESTED = 1 << 0;
        const BUMP_MAP_IS_SPECULAR_MASK = 1 << 1;
        const TRUE_ATMOSPHERIC_FOG = 1 << 2;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SpecularFlags: u16 {
        const OVERBRIGHT = 1 << 0;
        const EXTRA_SHINY = 1 << 1;
        const LIGHTMAP_IS_SPECULAR = 1 << 2;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModelFlags: u16 {
        const DETAIL_AFTER_REFLECTION = 1 << 0;
        const TWO_SIDED = 1 << 1;
        const NOT_ALPHA_TESTED = 1 << 2;
        const ALPHA_BLENDED_DECAL = 1 << 3;
        const TRUE_ATMOSPHERIC_FOG = 1 << 4;
        const DISABLE_TWO_SIDED_CULLING = 1 << 5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_strict_decoding() {
        assert_eq!(MaterialType::from_u16(32).unwrap(), MaterialType::HunterShield);
        assert!(matches!(
            MaterialType::from_u16(33),
            Err(Error::UnknownEnum { field: "material_type", value: 33 })
        ));
        assert!(matches!(
            DetailMask::from_u16(9),
            Err(Error::UnknownEnum { field: "detail_mask", .. })
        ));
    }

    #[test]
    fn test_declaration_order_matches_values() {
        for (index, material) in MaterialType::ALL.iter().enumerate() {
            assert_eq!(material.to_u16() as usize, index);
        }
        assert_eq!(AnimationFunction::ALL.len(), 12);
        assert_eq!(MaterialType::default(), MaterialType::Dirt);
    }

    #[test]
    fn test_unknown_flag_bits_survive() {
        let flags = EnvironmentFlags::from_bits_retain(0x8001);
        assert!(flags.contains(EnvironmentFlags::ALPHA_TESTED));
        assert_eq!(flags.bits(), 0x8001);
    }
}
