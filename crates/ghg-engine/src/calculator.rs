//! # Emission Calculator
//!
//! `kg = quantity × factor`, `tonnes = kg / 1000`. Kilograms are reported
//! to [`KG_DECIMALS`] places, tonnes to [`TONNE_DECIMALS`]. Tonnes derive
//! from the unrounded kilogram figure, divided on its decimal digits so the
//! conversion adds no binary noise before rounding.
//!
//! Negative quantities pass through unclamped (a credit or correction
//! yields negative emissions). Non-finite quantities are rejected.

use ghg_core::{
    round_decimal, round_decimal_scaled, ActivityId, EmissionScope, GhgError, RoundingMode,
    DEFAULT_SELECTOR, KG_DECIMALS, TONNE_DECIMALS,
};
use ghg_factors::FactorRegistry;
use serde::{Deserialize, Serialize};

use crate::resolver::{resolve_factor, FactorBasis, Selectors};

/// The standardized output of every calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionResult {
    pub activity_id: ActivityId,
    pub quantity: f64,
    /// Activity unit, copied from the definition.
    pub unit: String,
    /// Resolved factor in kgCO2e per unit.
    pub emission_factor: f64,
    /// `kgCO2e/<unit>`.
    pub emission_factor_unit: String,
    /// Precedence branch that produced `emission_factor`.
    pub factor_basis: FactorBasis,
    pub scope: EmissionScope,
    pub emissions_kg_co2e: f64,
    pub emissions_tonnes_co2e: f64,
    /// Region as supplied, `"default"` when none was given.
    pub region: String,
    pub variant: Option<String>,
    pub sub_category: Option<String>,
}

/// Calculate emissions for one activity against `registry`.
///
/// Errors: [`GhgError::InvalidInput`] for a non-finite quantity,
/// [`GhgError::UnknownActivity`] and [`GhgError::FactorNotFound`] from the
/// registry and resolver, unchanged.
pub fn calculate(
    registry: &FactorRegistry,
    rounding: RoundingMode,
    activity_id: &str,
    quantity: f64,
    selectors: &Selectors<'_>,
) -> Result<EmissionResult, GhgError> {
    if !quantity.is_finite() {
        return Err(GhgError::InvalidInput(format!(
            "quantity for {activity_id} must be a finite number, got {quantity}"
        )));
    }

    let definition = registry.get_definition(activity_id)?;
    let resolved = resolve_factor(activity_id, definition, selectors)?;

    let raw_kg = quantity * resolved.factor;
    let emissions_kg_co2e = round_decimal(raw_kg, KG_DECIMALS, rounding);
    let emissions_tonnes_co2e = round_decimal_scaled(raw_kg, 3, TONNE_DECIMALS, rounding);

    tracing::debug!(
        activity = activity_id,
        quantity,
        factor = resolved.factor,
        basis = %resolved.basis,
        kg = emissions_kg_co2e,
        "calculated emissions"
    );

    Ok(EmissionResult {
        activity_id: ActivityId::new(activity_id),
        quantity,
        unit: definition.unit().to_owned(),
        emission_factor: resolved.factor,
        emission_factor_unit: definition.factor_unit(),
        factor_basis: resolved.basis,
        scope: definition.scope(),
        emissions_kg_co2e,
        emissions_tonnes_co2e,
        region: selectors.region.unwrap_or(DEFAULT_SELECTOR).to_owned(),
        variant: selectors.variant.map(str::to_owned),
        sub_category: selectors.sub_category.map(str::to_owned),
    })
}
