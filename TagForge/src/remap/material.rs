//! Material type to global material name

use crate::formats::gen1::MaterialType;

/// Second-generation global material name for a first-generation material.
///
/// Every material maps to a distinct name.
pub fn material_name(material: MaterialType) -> &'static str {
    match material {
        MaterialType::Dirt => "soft_terrain_dirt",
        MaterialType::Sand => "soft_terrain_sand",
        MaterialType::Stone => "hard_terrain_stone",
        MaterialType::Snow => "soft_terrain_snow",
        MaterialType::Wood => "hard_wood",
        MaterialType::MetalHollow => "hard_metal_hollow",
        MaterialType::MetalThin => "hard_metal_thin",
        MaterialType::MetalThick => "hard_metal_thick",
        MaterialType::Rubber => "soft_rubber",
        MaterialType::Glass => "hard_glass",
        MaterialType::ForceField => "energy_forcefield",
        MaterialType::Grunt => "flesh_grunt",
        MaterialType::HunterArmor => "hard_metal_thick_cov_hunter",
        MaterialType::HunterSkin => "flesh_hunter",
        MaterialType::Elite => "flesh_elite",
        MaterialType::Jackal => "flesh_jackal",
        MaterialType::JackalEnergyShield => "energy_shield_jackal",
        MaterialType::EngineerSkin => "flesh_engineer",
        MaterialType::EngineerForceField => "energy_forcefield_engineer",
        MaterialType::FloodCombatForm => "flesh_flood_combat",
        MaterialType::FloodCarrierForm => "flesh_flood_carrier",
        MaterialType::CyborgArmor => "hard_metal_thin_hum_masterchief",
        MaterialType::CyborgEnergyShield => "energy_shield_masterchief",
        MaterialType::HumanArmor => "hard_metal_thin_hum_marine",
        MaterialType::HumanSkin => "flesh_human",
        MaterialType::Sentinel => "hard_metal_thin_for_sentinel",
        MaterialType::Monitor => "hard_metal_thick_for_monitor",
        MaterialType::Plastic => "hard_plastic",
        MaterialType::Water => "liquid_water",
        MaterialType::Leaves => "soft_organic_plant",
        MaterialType::EliteEnergyShield => "energy_shield_elite",
        MaterialType::Ice => "hard_terrain_ice",
        MaterialType::HunterShield => "hard_metal_thick_cov_hunter_shield",
    }
}
