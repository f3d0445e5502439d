//! Enumerations of second-generation shaders

use crate::macros::tag_enum;

tag_enum! {
    pub enum ParameterType as "parameter type" {
        Bitmap = 0,
        Value = 1,
        Color = 2,
        Switch = 3,
    }
}

tag_enum! {
    /// Property of a parameter driven by an animation curve
    pub enum AnimationTarget as "animation target" {
        BitmapScaleUniform = 0,
        BitmapScaleX = 1,
        BitmapScaleY = 2,
        BitmapScaleZ = 3,
        BitmapTranslationX = 4,
        BitmapTranslationY = 5,
        BitmapTranslationZ = 6,
        BitmapRotationAngle = 7,
        BitmapRotationAxisX = 8,
        BitmapRotationAxisY = 9,
        BitmapRotationAxisZ = 10,
        Value = 11,
        Color = 12,
        BitmapIndex = 13,
    }
}

tag_enum! {
    pub enum ShaderLodBias as "shader_lod_bias" {
        None = 0,
        FourTimesSize = 1,
        TwiceSize = 2,
        HalfSize = 3,
        QuarterSize = 4,
        Never = 5,
        Cinematic = 6,
    }
}

tag_enum! {
    pub enum SpecularType as "specular_type" {
        None = 0,
        Default = 1,
        Dull = 2,
        Shiny = 3,
    }
}

tag_enum! {
    pub enum LightmapType as "lightmap_type" {
        Diffuse = 0,
        DefaultSpecular = 1,
        DullSpecular = 2,
        ShinySpecular = 3,
    }
}
