//! Environment shaders (`senv`): level geometry surfaces

use byteorder::{BigEndian, WriteBytesExt};

use super::base::{IlluminationChannel, ShaderBase, TextureAnimation};
use super::enums::{
    DetailMapFunction, EnvironmentFlags, EnvironmentType, ReflectionType, SpecularFlags,
};
use crate::error::Result;
use crate::formats::common::{
    ColorRgb, Reference, TagReader, groups, write_optional_path, write_optional_reference,
    write_padding,
};

type BE = BigEndian;

/// Size of the fixed environment shader body, shared prefix included
pub const ENVIRONMENT_BODY_SIZE: usize = 844;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShaderEnvironment {
    pub base: ShaderBase,

    pub flags: EnvironmentFlags,
    pub environment_type: EnvironmentType,
    pub lens_flare_spacing: f32,
    pub lens_flare: Option<Reference>,

    pub diffuse_flags: u16,
    pub base_map: Option<Reference>,

    pub detail_map_function: DetailMapFunction,
    pub primary_detail_map_scale: f32,
    pub primary_detail_map: Option<Reference>,
    pub secondary_detail_map_scale: f32,
    pub secondary_detail_map: Option<Reference>,

    pub micro_detail_map_function: DetailMapFunction,
    pub micro_detail_map_scale: f32,
    pub micro_detail_map: Option<Reference>,
    pub material_color: ColorRgb,

    pub bump_map_scale: f32,
    pub bump_map: Option<Reference>,

    pub self_illumination_flags: u16,
    /// Primary, secondary and plasma channels
    pub illumination: [IlluminationChannel; 3],
    pub illumination_map_scale: f32,
    pub illumination_map: Option<Reference>,

    pub u_animation: TextureAnimation,
    pub v_animation: TextureAnimation,

    pub specular_flags: SpecularFlags,
    pub brightness: f32,
    pub perpendicular_color: ColorRgb,
    pub parallel_color: ColorRgb,

    pub reflection_flags: u16,
    pub reflection_type: ReflectionType,
    pub lightmap_brightness_scale: f32,
    pub perpendicular_brightness: f32,
    pub parallel_brightness: f32,
    pub reflection_cube_map: Option<Reference>,
}

impl ShaderEnvironment {
    /// Detail maps that are present, primary first.
    pub fn detail_maps(&self) -> Vec<(&Reference, f32)> {
        [
            (self.primary_detail_map.as_ref(), self.primary_detail_map_scale),
            (self.secondary_detail_map.as_ref(), self.secondary_detail_map_scale),
        ]
        .into_iter()
        .filter_map(|(map, scale)| map.map(|map| (map, scale)))
        .collect()
    }

    /// Reference fields in the order their paths trail the body.
    fn references(&self) -> [Option<&Reference>; 8] {
        [
            self.lens_flare.as_ref(),
            self.base_map.as_ref(),
            self.primary_detail_map.as_ref(),
            self.secondary_detail_map.as_ref(),
            self.micro_detail_map.as_ref(),
            self.bump_map.as_ref(),
            self.illumination_map.as_ref(),
            self.reflection_cube_map.as_ref(),
        ]
    }

    pub(crate) fn read(reader: &mut TagReader<'_>) -> Result<Self> {
        let mut r = reader.section("shader_environment", ENVIRONMENT_BODY_SIZE)?;
        let base = ShaderBase::read(&mut r)?;

        let flags = EnvironmentFlags::from_bits_retain(r.read_u16::<BE>()?);
        let environment_type = EnvironmentType::from_u16(r.read_u16::<BE>()?)?;
        let lens_flare_spacing = r.read_f32::<BE>()?;
        let mut lens_flare = Reference::read::<BE>(&mut r)?;
        r.skip(44)?;

        let diffuse_flags = r.read_u16::<BE>()?;
        r.skip(26)?;
        let mut base_map = Reference::read::<BE>(&mut r)?;
        r.skip(24)?;

        let detail_map_function = DetailMapFunction::from_u16(r.read_u16::<BE>()?)?;
        r.skip(2)?;
        let primary_detail_map_scale = r.read_f32::<BE>()?;
        let mut primary_detail_map = Reference::read::<BE>(&mut r)?;
        let secondary_detail_map_scale = r.read_f32::<BE>()?;
        let mut secondary_detail_map = Reference::read::<BE>(&mut r)?;
        r.skip(24)?;

        let micro_detail_map_function = DetailMapFunction::from_u16(r.read_u16::<BE>()?)?;
        r.skip(2)?;
        let micro_detail_map_scale = r.read_f32::<BE>()?;
        let mut micro_detail_map = Reference::read::<BE>(&mut r)?;
        let material_color = ColorRgb::read::<BE>(&mut r)?;
        r.skip(12)?;

        let bump_map_scale = r.read_f32::<BE>()?;
        let mut bump_map = Reference::read::<BE>(&mut r)?;
        r.skip(24)?;

        let self_illumination_flags = r.read_u16::<BE>()?;
        r.skip(26)?;
        let illumination = [
            IlluminationChannel::read(&mut r)?,
            IlluminationChannel::read(&mut r)?,
            IlluminationChannel::read(&mut r)?,
        ];
        let illumination_map_scale = r.read_f32::<BE>()?;
        let mut illumination_map = Reference::read::<BE>(&mut r)?;
        r.skip(24)?;

        let u_animation = TextureAnimation::read(&mut r)?;
        let v_animation = TextureAnimation::read(&mut r)?;
        r.skip(24)?;

        let specular_flags = SpecularFlags::from_bits_retain(r.read_u16::<BE>()?);
        r.skip(18)?;
        let brightness = r.read_f32::<BE>()?;
        r.skip(20)?;
        let perpendicular_color = ColorRgb::read::<BE>(&mut r)?;
        let parallel_color = ColorRgb::read::<BE>(&mut r)?;
        r.skip(16)?;

        let reflection_flags = r.read_u16::<BE>()?;
        let reflection_type = ReflectionType::from_u16(r.read_u16::<BE>()?)?;
        let lightmap_brightness_scale = r.read_f32::<BE>()?;
        r.skip(28)?;
        let perpendicular_brightness = r.read_f32::<BE>()?;
        let parallel_brightness = r.read_f32::<BE>()?;
        r.skip(40)?;
        let mut reflection_cube_map = Reference::read::<BE>(&mut r)?;
        r.skip(16)?;
        r.finish()?;

        for reference in [
            &mut lens_flare,
            &mut base_map,
            &mut primary_detail_map,
            &mut secondary_detail_map,
            &mut micro_detail_map,
            &mut bump_map,
            &mut illumination_map,
            &mut reflection_cube_map,
        ] {
            reference.read_path(reader)?;
        }

        Ok(Self {
            base,
            flags,
            environment_type,
            lens_flare_spacing,
            lens_flare: lens_flare.into_option(),
            diffuse_flags,
            base_map: base_map.into_option(),
            detail_map_function,
            primary_detail_map_scale,
            primary_detail_map: primary_detail_map.into_option(),
            secondary_detail_map_scale,
            secondary_detail_map: secondary_detail_map.into_option(),
            micro_detail_map_function,
            micro_detail_map_scale,
            micro_detail_map: micro_detail_map.into_option(),
            material_color,
            bump_map_scale,
            bump_map: bump_map.into_option(),
            self_illumination_flags,
            illumination,
            illumination_map_scale,
            illumination_map: illumination_map.into_option(),
            u_animation,
            v_animation,
            specular_flags,
            brightness,
            perpendicular_color,
            parallel_color,
            reflection_flags,
            reflection_type,
            lightmap_brightness_scale,
            perpendicular_brightness,
            parallel_brightness,
            reflection_cube_map: reflection_cube_map.into_option(),
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        self.base.write(out)?;

        out.write_u16::<BE>(self.flags.bits())?;
        out.write_u16::<BE>(self.environment_type.to_u16())?;
        out.write_f32::<BE>(self.lens_flare_spacing)?;
        write_optional_reference::<BE>(out, self.lens_flare.as_ref(), groups::LENS_FLARE)?;
        write_padding(out, 44);

        out.write_u16::<BE>(self.diffuse_flags)?;
        write_padding(out, 26);
        write_optional_reference::<BE>(out, self.base_map.as_ref(), groups::BITMAP)?;
        write_padding(out, 24);

        out.write_u16::<BE>(self.detail_map_function.to_u16())?;
        write_padding(out, 2);
        out.write_f32::<BE>(self.primary_detail_map_scale)?;
        write_optional_reference::<BE>(out, self.primary_detail_map.as_ref(), groups::BITMAP)?;
        out.write_f32::<BE>(self.secondary_detail_map_scale)?;
        write_optional_reference::<BE>(out, self.secondary_detail_map.as_ref(), groups::BITMAP)?;
        write_padding(out, 24);

        out.write_u16::<BE>(self.micro_detail_map_function.to_u16())?;
        write_padding(out, 2);
        out.write_f32::<BE>(self.micro_detail_map_scale)?;
        write_optional_reference::<BE>(out, self.micro_detail_map.as_ref(), groups::BITMAP)?;
        self.material_color.write::<BE>(out)?;
        write_padding(out, 12);

        out.write_f32::<BE>(self.bump_map_scale)?;
        write_optional_reference::<BE>(out, self.bump_map.as_ref(), groups::BITMAP)?;
        write_padding(out, 24);

        out.write_u16::<BE>(self.self_illumination_flags)?;
        write_padding(out, 26);
        for channel in &self.illumination {
            channel.write(out)?;
        }
        out.write_f32::<BE>(self.illumination_map_scale)?;
        write_optional_reference::<BE>(out, self.illumination_map.as_ref(), groups::BITMAP)?;
        write_padding(out, 24);

        self.u_animation.write(out)?;
        self.v_animation.write(out)?;
        write_padding(out, 24);

        out.write_u16::<BE>(self.specular_flags.bits())?;
        write_padding(out, 18);
        out.write_f32::<BE>(self.brightness)?;
        write_padding(out, 20);
        self.perpendicular_color.write::<BE>(out)?;
        self.parallel_color.write::<BE>(out)?;
        write_padding(out, 16);

        out.write_u16::<BE>(self.reflection_flags)?;
        out.write_u16::<BE>(self.reflection_type.to_u16())?;
        out.write_f32::<BE>(self.lightmap_brightness_scale)?;
        write_padding(out, 28);
        out.write_f32::<BE>(self.perpendicular_brightness)?;
        out.write_f32::<BE>(self.parallel_brightness)?;
        write_padding(out, 40);
        write_optional_reference::<BE>(out, self.reflection_cube_map.as_ref(), groups::BITMAP)?;
        write_padding(out, 16);

        for reference in self.references() {
            write_optional_path(out, reference)?;
        }
        Ok(())
    }
}
