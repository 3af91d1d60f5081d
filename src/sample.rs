//! Built-in Dyson Sphere Program recipe catalog

use crate::catalog::{Catalog, CatalogBuilder};
use crate::error::CalcError;
use crate::models::bundle;

/// Item computed when no target is given on the command line.
pub const DEFAULT_TARGET: &str = "Small carrier rocket";

/// Build the recipe catalog for the Dyson Sphere Program production chain
pub fn dyson_sphere_catalog() -> Result<Catalog, CalcError> {
    let mut b = CatalogBuilder::new();

    let iron_ore = b.resource("Iron ore")?;
    let copper_ore = b.resource("Copper ore")?;
    let coal = b.resource("Coal")?;
    let silicon_ore = b.resource("Silicon ore")?;
    let stone = b.resource("Stone")?;
    let crude_oil = b.resource("Crude oil")?;
    let water = b.resource("Water")?;
    let titanium_ore = b.resource("Titanium ore")?;
    let hydrogen = b.resource("Hydrogen")?;

    // Smelting
    let iron_ingot = b.recipe("Iron ingot", 1, 60.0, vec![bundle(1.0, iron_ore)])?;
    let copper_ingot = b.recipe("Copper ingot", 1, 60.0, vec![bundle(1.0, copper_ore)])?;
    let energetic_graphite = b.recipe("Energetic graphite", 1, 30.0, vec![bundle(2.0, coal)])?;
    let silicon_ingot = b.recipe("Silicon ingot", 1, 30.0, vec![bundle(2.0, silicon_ore)])?;
    let glass = b.recipe("Glass", 1, 30.0, vec![bundle(2.0, stone)])?;
    let refined_oil = b.recipe("Refined oil", 2, 15.0, vec![bundle(2.0, crude_oil)])?;
    let titanium_ingot = b.recipe("Titanium ingot", 1, 30.0, vec![bundle(2.0, titanium_ore)])?;
    let deuterium = b.recipe("Deuterium", 5, 24.0, vec![bundle(10.0, hydrogen)])?;

    // Components
    let microcrystalline = b.recipe(
        "Microcrystalline component",
        1,
        30.0,
        vec![bundle(2.0, silicon_ingot), bundle(1.0, copper_ingot)],
    )?;
    let circuit_board = b.recipe(
        "Circuit board",
        2,
        60.0,
        vec![bundle(2.0, iron_ingot), bundle(1.0, copper_ingot)],
    )?;
    let processor = b.recipe(
        "Processor",
        1,
        20.0,
        vec![bundle(2.0, circuit_board), bundle(2.0, microcrystalline)],
    )?;
    let prism = b.recipe("Prism", 2, 30.0, vec![bundle(3.0, glass)])?;
    let photon_combiner = b.recipe(
        "Photon combiner",
        1,
        20.0,
        vec![bundle(2.0, prism), bundle(1.0, circuit_board)],
    )?;
    let steel = b.recipe("Steel", 1, 20.0, vec![bundle(3.0, iron_ingot)])?;
    let acid = b.recipe(
        "Acid",
        4,
        10.0,
        vec![bundle(6.0, refined_oil), bundle(8.0, stone), bundle(4.0, water)],
    )?;
    let graphene = b.recipe(
        "Graphene",
        2,
        20.0,
        vec![bundle(3.0, energetic_graphite), bundle(1.0, acid)],
    )?;
    let solar_sail = b.recipe(
        "Solar sail",
        2,
        15.0,
        vec![bundle(1.0, graphene), bundle(1.0, photon_combiner)],
    )?;
    let titanium_alloy = b.recipe(
        "Titanium alloy",
        4,
        5.0,
        vec![bundle(4.0, titanium_ingot), bundle(4.0, steel), bundle(8.0, acid)],
    )?;
    let carbon_nanotube = b.recipe(
        "Carbon nanotube",
        2,
        15.0,
        vec![bundle(3.0, graphene), bundle(1.0, titanium_ingot)],
    )?;
    let frame_material = b.recipe(
        "Frame material",
        1,
        10.0,
        vec![
            bundle(4.0, carbon_nanotube),
            bundle(1.0, titanium_alloy),
            bundle(1.0, silicon_ingot),
        ],
    )?;
    let dyson_sphere_component = b.recipe(
        "Dyson sphere component",
        1,
        7.5,
        vec![
            bundle(3.0, frame_material),
            bundle(3.0, solar_sail),
            bundle(3.0, processor),
        ],
    )?;

    // Electromagnetism
    let gear = b.recipe("Gear", 1, 60.0, vec![bundle(1.0, iron_ingot)])?;
    let magnet = b.recipe("Magnet", 1, 40.0, vec![bundle(1.0, iron_ore)])?;
    let magnetic_coil = b.recipe(
        "Magnetic coil",
        2,
        60.0,
        vec![bundle(2.0, magnet), bundle(1.0, copper_ingot)],
    )?;
    let electric_motor = b.recipe(
        "Electric motor",
        1,
        30.0,
        vec![
            bundle(2.0, iron_ingot),
            bundle(1.0, gear),
            bundle(1.0, magnetic_coil),
        ],
    )?;
    let turbine = b.recipe(
        "Electromagnetic turbine",
        1,
        30.0,
        vec![bundle(2.0, electric_motor), bundle(2.0, magnetic_coil)],
    )?;
    let supermagnetic_ring = b.recipe(
        "Super-magnetic ring",
        1,
        20.0,
        vec![
            bundle(2.0, turbine),
            bundle(3.0, magnet),
            bundle(1.0, energetic_graphite),
        ],
    )?;
    let deuteron_fuel_rod = b.recipe(
        "Deuteron fuel rod",
        2,
        5.0,
        vec![
            bundle(1.0, titanium_alloy),
            bundle(20.0, deuterium),
            bundle(1.0, supermagnetic_ring),
        ],
    )?;

    // Chemistry and quantum
    let plastic = b.recipe(
        "Plastic",
        1,
        20.0,
        vec![bundle(2.0, refined_oil), bundle(1.0, energetic_graphite)],
    )?;
    let organic_crystal = b.recipe(
        "Organic crystal",
        1,
        10.0,
        vec![
            bundle(2.0, plastic),
            bundle(1.0, refined_oil),
            bundle(1.0, water),
        ],
    )?;
    let titanium_crystal = b.recipe(
        "Titanium crystal",
        1,
        15.0,
        vec![bundle(1.0, organic_crystal), bundle(3.0, titanium_ingot)],
    )?;
    let casimir_crystal = b.recipe(
        "Casimir crystal",
        1,
        15.0,
        vec![
            bundle(1.0, titanium_crystal),
            bundle(2.0, graphene),
            bundle(12.0, hydrogen),
        ],
    )?;
    let titanium_glass = b.recipe(
        "Titanium glass",
        2,
        12.0,
        vec![
            bundle(2.0, glass),
            bundle(2.0, titanium_ingot),
            bundle(2.0, water),
        ],
    )?;
    let plane_filter = b.recipe(
        "Plane filter",
        1,
        5.0,
        vec![bundle(1.0, casimir_crystal), bundle(2.0, titanium_glass)],
    )?;
    let quantum_chip = b.recipe(
        "Quantum chip",
        1,
        10.0,
        vec![bundle(2.0, processor), bundle(2.0, plane_filter)],
    )?;
    b.recipe(
        DEFAULT_TARGET,
        1,
        10.0,
        vec![
            bundle(2.0, dyson_sphere_component),
            bundle(4.0, deuteron_fuel_rod),
            bundle(2.0, quantum_chip),
        ],
    )?;

    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute_demand;
    use crate::loader::parse_catalog;
    use std::path::Path;

    #[test]
    fn builds_full_catalog() {
        let catalog = dyson_sphere_catalog().unwrap();
        assert_eq!(catalog.resources().count(), 9);
        assert_eq!(catalog.recipes().count(), 36);
    }

    #[test]
    fn default_target_reaches_every_resource() {
        let catalog = dyson_sphere_catalog().unwrap();
        let rocket = catalog.recipe_named(DEFAULT_TARGET).unwrap();
        let summary = compute_demand(&catalog, rocket.id, rocket.output_per_minute()).unwrap();

        assert_eq!(summary.raw_resources().count(), 9);
        assert!(summary.get(rocket.id).is_none());
        for entry in summary.entries() {
            assert!(entry.amount > 0.0);
        }
    }

    #[test]
    fn gear_needs_ingots_and_ore() {
        let catalog = dyson_sphere_catalog().unwrap();
        let gear = catalog.find("Gear").unwrap();
        let summary = compute_demand(&catalog, gear, 60.0).unwrap();

        let ingot = catalog.find("Iron ingot").unwrap();
        let ore = catalog.find("Iron ore").unwrap();
        assert_eq!(summary.amount_of(ingot), Some(60.0));
        assert_eq!(summary.get(ingot).unwrap().factories, Some(1));
        assert_eq!(summary.amount_of(ore), Some(60.0));
    }

    #[test]
    fn shipped_data_file_matches_builtin_catalog() {
        let (from_file, _) = parse_catalog(
            include_str!("../data/dyson_sphere.recipes"),
            Path::new("dyson_sphere.recipes"),
        )
        .unwrap();
        let builtin = dyson_sphere_catalog().unwrap();

        assert_eq!(from_file.len(), builtin.len());
        for recipe in builtin.recipes() {
            let other = from_file.recipe_named(&recipe.name).unwrap();
            assert_eq!(other.items_per_recipe, recipe.items_per_recipe);
            assert_eq!(other.recipes_per_minute, recipe.recipes_per_minute);
            let inputs = |r: &crate::models::Recipe, c: &Catalog| -> Vec<(String, f64)> {
                r.required
                    .iter()
                    .map(|b| (c.name_of(b.item).to_string(), b.amount))
                    .collect()
            };
            assert_eq!(inputs(other, &from_file), inputs(recipe, &builtin));
        }
    }
}
