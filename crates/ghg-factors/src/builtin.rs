//! # Built-in Factor Set
//!
//! Conversion factors from the UK DEFRA/DESNZ 2024 greenhouse-gas reporting
//! publication, national grid averages (EPA eGRID for the US) and EEIO
//! spend intensities (EXIOBASE-derived, kgCO2e per USD).
//!
//! Air-travel factors include the radiative-forcing uplift. Flight bands:
//! short < 500 km, medium 500–3700 km, long > 3700 km.
//!
//! Deployments that need a different publication year load a factor pack
//! instead of editing this table.

use ghg_core::{ActivityId, EmissionScope};

use crate::currency::CurrencyTable;
use crate::definition::{ActivityDefinition, FactorSpec};
use crate::registry::{FactorRegistry, FactorSetInfo};

/// Name of the built-in factor set.
pub const BUILTIN_NAME: &str = "defra-2024";

/// Revision of the built-in factor set.
pub const BUILTIN_VERSION: &str = "2024.1";

/// Attribution of the built-in factor set.
pub const BUILTIN_SOURCE: &str = "DEFRA 2024, EPA, EEIO";

/// Build the built-in registry.
pub fn builtin_registry() -> FactorRegistry {
    FactorRegistry::new(
        FactorSetInfo {
            name: BUILTIN_NAME.to_owned(),
            version: BUILTIN_VERSION.to_owned(),
            source: BUILTIN_SOURCE.to_owned(),
        },
        builtin_definitions()
            .into_iter()
            .map(|(id, def)| (ActivityId::from(id), def)),
        builtin_currencies(),
    )
}

/// Static conversion rates into USD.
pub fn builtin_currencies() -> CurrencyTable {
    CurrencyTable::from_rates([("USD", 1.0), ("EUR", 1.08), ("GBP", 1.27), ("AED", 0.27)])
}

/// Every built-in activity definition, in publication order.
pub fn builtin_definitions() -> Vec<(&'static str, ActivityDefinition)> {
    use EmissionScope::{Scope1, Scope2Location, Scope3};

    vec![
        // -- Purchased electricity (kgCO2e per kWh), location-based grid averages --
        (
            "electricity",
            ActivityDefinition::new(
                "kWh",
                Scope2Location,
                FactorSpec::keyed(
                    0.300,
                    [
                        ("UK", 0.20707),
                        ("DE", 0.364),
                        ("FR", 0.052),
                        ("IT", 0.316),
                        ("ES", 0.190),
                        ("NL", 0.328),
                        ("BE", 0.163),
                        ("AT", 0.088),
                        ("PL", 0.658),
                        ("AE", 0.405),
                        ("US", 0.390),
                    ],
                ),
            ),
        ),
        // -- Stationary combustion --
        (
            "natural_gas",
            ActivityDefinition::new("kWh", Scope1, FactorSpec::single(0.18293)),
        ),
        // -- Liquid fuels (kgCO2e per litre) --
        (
            "diesel",
            ActivityDefinition::new("litre", Scope1, FactorSpec::single(2.70564)),
        ),
        (
            "petrol",
            ActivityDefinition::new("litre", Scope1, FactorSpec::single(2.31486)),
        ),
        (
            "lpg",
            ActivityDefinition::new("litre", Scope1, FactorSpec::single(1.55364)),
        ),
        // -- Road transport (kgCO2e per km), company-owned vehicles --
        (
            "car_petrol",
            ActivityDefinition::new(
                "km",
                Scope1,
                FactorSpec::with_variants(
                    0.17048,
                    [("small", 0.14289), ("medium", 0.16982), ("large", 0.22223)],
                ),
            ),
        ),
        (
            "car_diesel",
            ActivityDefinition::new(
                "km",
                Scope1,
                FactorSpec::with_variants(
                    0.16844,
                    [("small", 0.13826), ("medium", 0.16437), ("large", 0.20914)],
                ),
            ),
        ),
        (
            "car_electric",
            ActivityDefinition::new("km", Scope2Location, FactorSpec::single(0.04645)),
        ),
        // -- Air travel (kgCO2e per passenger-km) --
        (
            "flight_short",
            ActivityDefinition::new("passenger-km", Scope3, FactorSpec::single(0.25493)),
        ),
        (
            "flight_medium",
            ActivityDefinition::new("passenger-km", Scope3, FactorSpec::single(0.15573)),
        ),
        (
            "flight_long",
            ActivityDefinition::new(
                "passenger-km",
                Scope3,
                FactorSpec::with_variants(
                    0.19309,
                    [
                        ("economy", 0.14615),
                        ("premium_economy", 0.23384),
                        ("business", 0.42385),
                        ("first", 0.58462),
                    ],
                ),
            ),
        ),
        // -- Surface passenger transport --
        (
            "rail",
            ActivityDefinition::new("passenger-km", Scope3, FactorSpec::single(0.03549)),
        ),
        (
            "bus",
            ActivityDefinition::new("passenger-km", Scope3, FactorSpec::single(0.10231)),
        ),
        // -- Water (kgCO2e per m3) --
        (
            "water_supply",
            ActivityDefinition::new("m3", Scope3, FactorSpec::single(0.149)),
        ),
        (
            "water_treatment",
            ActivityDefinition::new("m3", Scope3, FactorSpec::single(0.272)),
        ),
        // -- Waste (kgCO2e per tonne) --
        (
            "waste_landfill",
            ActivityDefinition::new("tonne", Scope3, FactorSpec::single(446.242)),
        ),
        (
            "waste_recycled",
            ActivityDefinition::new("tonne", Scope3, FactorSpec::single(21.317)),
        ),
        // -- Spend-based EEIO (kgCO2e per USD), keyed by industry --
        (
            "spend_purchased_goods",
            ActivityDefinition::new(
                "USD",
                Scope3,
                FactorSpec::keyed(
                    0.35,
                    [
                        ("manufacturing", 0.42),
                        ("electronics", 0.35),
                        ("chemicals", 0.68),
                        ("textiles", 0.45),
                        ("food_products", 0.55),
                        ("paper_products", 0.38),
                        ("metals", 0.72),
                        ("plastics", 0.58),
                        ("office_supplies", 0.28),
                        ("software_services", 0.08),
                        ("professional_services", 0.12),
                    ],
                ),
            )
            .with_category("Category 1: Purchased Goods & Services"),
        ),
        (
            "spend_capital_goods",
            ActivityDefinition::new(
                "USD",
                Scope3,
                FactorSpec::keyed(
                    0.45,
                    [
                        ("machinery", 0.55),
                        ("vehicles", 0.48),
                        ("buildings", 0.65),
                        ("it_equipment", 0.32),
                        ("furniture", 0.38),
                    ],
                ),
            )
            .with_category("Category 2: Capital Goods"),
        ),
        (
            "spend_services",
            ActivityDefinition::new(
                "USD",
                Scope3,
                FactorSpec::keyed(
                    0.12,
                    [
                        ("legal_accounting", 0.10),
                        ("consulting", 0.12),
                        ("marketing", 0.15),
                        ("it_services", 0.08),
                        ("cleaning", 0.18),
                        ("security", 0.14),
                    ],
                ),
            )
            .with_category("Category 1: Purchased Services"),
        ),
        (
            "spend_transport",
            ActivityDefinition::new(
                "USD",
                Scope3,
                FactorSpec::keyed(
                    0.35,
                    [
                        ("air_freight", 0.85),
                        ("road_freight", 0.45),
                        ("sea_freight", 0.12),
                        ("rail_freight", 0.08),
                        ("courier", 0.35),
                    ],
                ),
            )
            .with_category("Category 4/9: Transport & Distribution"),
        ),
    ]
}
