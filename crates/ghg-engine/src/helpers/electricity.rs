//! Purchased electricity with a renewable share.
//!
//! Only the non-renewable portion is charged at the grid factor; the
//! renewable portion contributes zero.

use ghg_core::{GhgError, RoundingMode};
use ghg_factors::FactorRegistry;
use serde::{Deserialize, Serialize};

use crate::calculator::{calculate, EmissionResult};
use crate::resolver::Selectors;

/// Activity id the grid factor is resolved under.
pub const ELECTRICITY_ACTIVITY: &str = "electricity";

/// Electricity result: the standard result for the non-renewable kWh plus
/// the split that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricityResult {
    #[serde(flatten)]
    pub emission: EmissionResult,
    pub total_kwh: f64,
    pub renewable_percentage: f64,
    pub renewable_kwh: f64,
    pub non_renewable_kwh: f64,
}

pub fn calculate_electricity(
    registry: &FactorRegistry,
    rounding: RoundingMode,
    kwh: f64,
    region: Option<&str>,
    renewable_percentage: f64,
) -> Result<ElectricityResult, GhgError> {
    if !kwh.is_finite() {
        return Err(GhgError::InvalidInput(format!(
            "kwh must be a finite number, got {kwh}"
        )));
    }
    if !(0.0..=100.0).contains(&renewable_percentage) {
        return Err(GhgError::InvalidInput(format!(
            "renewable_percentage must be between 0 and 100, got {renewable_percentage}"
        )));
    }

    let non_renewable_kwh = kwh * (1.0 - renewable_percentage / 100.0);
    let selectors = Selectors {
        region,
        ..Selectors::default()
    };
    let emission = calculate(
        registry,
        rounding,
        ELECTRICITY_ACTIVITY,
        non_renewable_kwh,
        &selectors,
    )?;

    Ok(ElectricityResult {
        emission,
        total_kwh: kwh,
        renewable_percentage,
        renewable_kwh: kwh - non_renewable_kwh,
        non_renewable_kwh,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn electricity(kwh: f64, region: Option<&str>, pct: f64) -> Result<ElectricityResult, GhgError> {
        calculate_electricity(&FactorRegistry::builtin(), RoundingMode::default(), kwh, region, pct)
    }

    #[test]
    fn half_renewable_uk() {
        let r = electricity(1000.0, Some("UK"), 50.0).unwrap();
        assert_eq!(r.non_renewable_kwh, 500.0);
        assert_eq!(r.renewable_kwh, 500.0);
        assert_eq!(r.total_kwh, 1000.0);
        assert_eq!(r.emission.quantity, 500.0);
        assert_eq!(r.emission.emission_factor, 0.20707);
        assert_eq!(r.emission.emissions_kg_co2e, 103.54);
        assert_eq!(r.emission.emissions_tonnes_co2e, 0.1035);
    }

    #[test]
    fn fully_renewable_is_zero() {
        let r = electricity(1000.0, Some("DE"), 100.0).unwrap();
        assert_eq!(r.non_renewable_kwh, 0.0);
        assert_eq!(r.emission.emissions_kg_co2e, 0.0);
        assert_eq!(r.renewable_kwh, 1000.0);
    }

    #[test]
    fn no_region_uses_default_grid() {
        let r = electricity(100.0, None, 0.0).unwrap();
        assert_eq!(r.emission.emission_factor, 0.300);
        assert_eq!(r.emission.region, "default");
        assert_eq!(r.emission.emissions_kg_co2e, 30.0);
    }

    #[test]
    fn percentage_out_of_range_rejected() {
        for pct in [-1.0, 100.5, f64::NAN] {
            let err = electricity(1000.0, Some("UK"), pct).unwrap_err();
            assert_eq!(err.kind(), "invalid_input", "{pct}");
        }
    }

    #[test]
    fn flattened_json_shape() {
        let r = electricity(1000.0, Some("UK"), 50.0).unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["activity_id"], "electricity");
        assert_eq!(json["emissions_kg_co2e"], 103.54);
        assert_eq!(json["renewable_kwh"], 500.0);
        assert!(json.get("emission").is_none());
    }
}
