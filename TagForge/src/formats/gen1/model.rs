//! Model shaders (`soso`): objects, weapons and characters

use byteorder::{BigEndian, WriteBytesExt};

use super::base::{ShaderBase, TextureAnimation};
use super::enums::{ChangeColorSource, DetailMapFunction, DetailMask, ModelFlags};
use crate::error::Result;
use crate::formats::common::{
    ColorRgb, Point2, Reference, TagReader, groups, write_optional_path, write_optional_reference,
    write_padding,
};

type BE = BigEndian;

/// Size of the fixed model shader body, shared prefix included
pub const MODEL_BODY_SIZE: usize = 332;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShaderModel {
    pub base: ShaderBase,

    pub flags: ModelFlags,
    pub translucency: f32,
    pub change_color_source: ChangeColorSource,

    pub base_map: Option<Reference>,
    /// Packed auxiliary mask (specular, self-illumination, change color)
    pub multipurpose_map: Option<Reference>,

    pub detail_function: DetailMapFunction,
    pub detail_mask: DetailMask,
    pub detail_map_scale: f32,
    pub detail_map: Option<Reference>,
    pub detail_map_v_scale: f32,

    pub u_animation: TextureAnimation,
    pub v_animation: TextureAnimation,
    pub rotation_animation: TextureAnimation,
    pub rotation_center: Point2,

    pub reflection_falloff_distance: f32,
    pub reflection_cutoff_distance: f32,
    pub perpendicular_brightness: f32,
    pub perpendicular_tint: ColorRgb,
    pub parallel_brightness: f32,
    pub parallel_tint: ColorRgb,
    pub reflection_cube_map: Option<Reference>,
}

impl ShaderModel {
    pub fn is_alpha_tested(&self) -> bool {
        !self.flags.contains(ModelFlags::NOT_ALPHA_TESTED)
    }

    fn references(&self) -> [Option<&Reference>; 4] {
        [
            self.base_map.as_ref(),
            self.multipurpose_map.as_ref(),
            self.detail_map.as_ref(),
            self.reflection_cube_map.as_ref(),
        ]
    }

    pub(crate) fn read(reader: &mut TagReader<'_>) -> Result<Self> {
        let mut r = reader.section("shader_model", MODEL_BODY_SIZE)?;
        let base = ShaderBase::read(&mut r)?;

        let flags = ModelFlags::from_bits_retain(r.read_u16::<BE>()?);
        r.skip(14)?;
        let translucency = r.read_f32::<BE>()?;
        r.skip(16)?;
        let change_color_source = ChangeColorSource::from_u16(r.read_u16::<BE>()?)?;
        r.skip(30)?;

        let mut base_map = Reference::read::<BE>(&mut r)?;
        r.skip(8)?;
        let mut multipurpose_map = Reference::read::<BE>(&mut r)?;
        r.skip(8)?;

        let detail_function = DetailMapFunction::from_u16(r.read_u16::<BE>()?)?;
        let detail_mask = DetailMask::from_u16(r.read_u16::<BE>()?)?;
        let detail_map_scale = r.read_f32::<BE>()?;
        let mut detail_map = Reference::read::<BE>(&mut r)?;
        let detail_map_v_scale = r.read_f32::<BE>()?;
        r.skip(12)?;

        let u_animation = TextureAnimation::read(&mut r)?;
        let v_animation = TextureAnimation::read(&mut r)?;
        let rotation_animation = TextureAnimation::read(&mut r)?;
        let rotation_center = Point2::read::<BE>(&mut r)?;
        r.skip(8)?;

        let reflection_falloff_distance = r.read_f32::<BE>()?;
        let reflection_cutoff_distance = r.read_f32::<BE>()?;
        let perpendicular_brightness = r.read_f32::<BE>()?;
        let perpendicular_tint = ColorRgb::read::<BE>(&mut r)?;
        let parallel_brightness = r.read_f32::<BE>()?;
        let parallel_tint = ColorRgb::read::<BE>(&mut r)?;
        let mut reflection_cube_map = Reference::read::<BE>(&mut r)?;
        r.skip(16)?;
        r.finish()?;

        for reference in [
            &mut base_map,
            &mut multipurpose_map,
            &mut detail_map,
            &mut reflection_cube_map,
        ] {
            reference.read_path(reader)?;
        }

        Ok(Self {
            base,
            flags,
            translucency,
            change_color_source,
            base_map: base_map.into_option(),
            multipurpose_map: multipurpose_map.into_option(),
            detail_function,
            detail_mask,
            detail_map_scale,
            detail_map: detail_map.into_option(),
            detail_map_v_scale,
            u_animation,
            v_animation,
            rotation_animation,
            rotation_center,
            reflection_falloff_distance,
            reflection_cutoff_distance,
            perpendicular_brightness,
            perpendicular_tint,
            parallel_brightness,
            parallel_tint,
            reflection_cube_map: reflection_cube_map.into_option(),
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        self.base.write(out)?;

        out.write_u16::<BE>(self.flags.bits())?;
        write_padding(out, 14);
        out.write_f32::<BE>(self.translucency)?;
        write_padding(out, 16);
        out.write_u16::<BE>(self.change_color_source.to_u16())?;
        write_padding(out, 30);

        write_optional_reference::<BE>(out, self.base_map.as_ref(), groups::BITMAP)?;
        write_padding(out, 8);
        write_optional_reference::<BE>(out, self.multipurpose_map.as_ref(), groups::BITMAP)?;
        write_padding(out, 8);

        out.write_u16::<BE>(self.detail_function.to_u16())?;
        out.write_u16::<BE>(self.detail_mask.to_u16())?;
        out.write_f32::<BE>(self.detail_map_scale)?;
        write_optional_reference::<BE>(out, self.detail_map.as_ref(), groups::BITMAP)?;
        out.write_f32::<BE>(self.detail_map_v_scale)?;
        write_padding(out, 12);

        self.u_animation.write(out)?;
        self.v_animation.write(out)?;
        self.rotation_animation.write(out)?;
        self.rotation_center.write::<BE>(out)?;
        write_padding(out, 8);

        out.write_f32::<BE>(self.reflection_falloff_distance)?;
        out.write_f32::<BE>(self.reflection_cutoff_distance)?;
        out.write_f32::<BE>(self.perpendicular_brightness)?;
        self.perpendicular_tint.write::<BE>(out)?;
        out.write_f32::<BE>(self.parallel_brightness)?;
        self.parallel_tint.write::<BE>(out)?;
        write_optional_reference::<BE>(out, self.reflection_cube_map.as_ref(), groups::BITMAP)?;
        write_padding(out, 16);

        for reference in self.references() {
            write_optional_path(out, reference)?;
        }
        Ok(())
    }
}
