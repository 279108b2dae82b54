//! # Engine Behaviour Tests
//!
//! Published reference calculations and algebraic properties of the
//! engine over the built-in factor set.

use ghg_core::{EmissionScope, GhgError, RoundingMode};
use ghg_engine::{
    CalculationRequest, EmissionEngine, EngineConfig, FactorBasis, Selectors,
    UnknownCurrencyPolicy,
};
use proptest::prelude::*;

fn engine() -> EmissionEngine {
    EmissionEngine::builtin()
}

// ---------------------------------------------------------------------------
// Reference calculations
// ---------------------------------------------------------------------------

#[test]
fn electricity_uk_half_renewable() {
    let r = engine()
        .calculate_electricity(1000.0, Some("UK"), 50.0)
        .unwrap();
    assert_eq!(r.non_renewable_kwh, 500.0);
    assert_eq!(r.emission.emission_factor, 0.20707);
    assert_eq!(r.emission.emissions_kg_co2e, 103.54);
    assert_eq!(r.renewable_kwh, 500.0);
}

#[test]
fn spend_eur_services_consulting() {
    let r = engine()
        .calculate_spend(1000.0, "services", Some("consulting"), Some("EUR"))
        .unwrap();
    assert_eq!(r.usd_amount, 1080.0);
    assert_eq!(r.emission.emission_factor, 0.12);
    assert_eq!(r.emission.emissions_kg_co2e, 129.6);
}

#[test]
fn travel_long_haul_business() {
    let r = engine()
        .calculate_travel(100.0, "flight_long_haul", Some("business"))
        .unwrap();
    assert_eq!(r.emission_factor, 0.42385);
    assert_eq!(r.emissions_kg_co2e, 42.39);
    assert_eq!(r.scope, EmissionScope::Scope3);
}

#[test]
fn resolve_france_electricity() {
    let resolved = engine()
        .resolve("electricity", &Selectors::none().with_region("FR"))
        .unwrap();
    assert_eq!(resolved.factor, 0.052);
    assert_eq!(resolved.basis, FactorBasis::Region);
}

#[test]
fn unknown_activity_is_reported() {
    let err = engine()
        .calculate("unknown_xyz", 1.0, &Selectors::none())
        .unwrap_err();
    assert_eq!(err, GhgError::unknown_activity("unknown_xyz"));
    assert!(err.is_caller_error());
}

#[test]
fn every_activity_resolves_with_default_region() {
    let engine = engine();
    let selectors = Selectors::none().with_region("default");
    for id in engine.registry().activity_ids() {
        let resolved = engine.resolve(id.as_str(), &selectors).unwrap();
        assert!(
            resolved.factor.is_finite() && resolved.factor > 0.0,
            "{id} resolved to {}",
            resolved.factor
        );
    }
}

#[test]
fn every_activity_has_zero_emissions_for_zero_quantity() {
    let engine = engine();
    for id in engine.registry().activity_ids() {
        let r = engine.calculate(id.as_str(), 0.0, &Selectors::none()).unwrap();
        assert_eq!(r.emissions_kg_co2e, 0.0, "{id}");
        assert_eq!(r.emissions_tonnes_co2e, 0.0, "{id}");
    }
}

#[test]
fn catalog_covers_registry() {
    let engine = engine();
    let catalog = engine.catalog();
    assert_eq!(catalog.activities.len(), engine.registry().len());
    for entry in &catalog.activities {
        assert_eq!(
            entry.scope,
            engine.registry().get_definition(entry.activity_id.as_str()).unwrap().scope()
        );
    }
}

#[test]
fn rounding_mode_comes_from_config() {
    let even = engine().with_config(EngineConfig::default().with_rounding(RoundingMode::HalfEven));
    let r = even
        .calculate_electricity(1000.0, Some("UK"), 50.0)
        .unwrap();
    assert_eq!(r.emission.emissions_kg_co2e, 103.54);

    let r = even
        .calculate_travel(100.0, "flight_long_haul", Some("business"))
        .unwrap();
    assert_eq!(r.emissions_kg_co2e, 42.38);
}

#[test]
fn reject_policy_applies_through_evaluate() {
    let strict = engine()
        .with_config(EngineConfig::default().with_unknown_currency(UnknownCurrencyPolicy::Reject));
    let request = CalculationRequest::Spend {
        spend_amount: 10.0,
        category: "services".into(),
        sub_category: None,
        currency: Some("XYZ".into()),
    };
    assert_eq!(strict.evaluate(&request).unwrap_err().kind(), "invalid_input");
    assert!(engine().evaluate(&request).is_ok());
}

#[test]
fn engine_shared_across_threads() {
    let engine = std::sync::Arc::new(engine());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = std::sync::Arc::clone(&engine);
            std::thread::spawn(move || {
                engine
                    .calculate("diesel", f64::from(i) * 10.0, &Selectors::none())
                    .map(|r| r.emissions_kg_co2e)
            })
        })
        .collect();
    let results: Vec<f64> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    assert_eq!(results, vec![0.0, 27.06, 54.11, 81.17]);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn activity_id() -> impl Strategy<Value = String> {
    let ids: Vec<String> = EmissionEngine::builtin()
        .registry()
        .activity_ids()
        .map(|id| id.as_str().to_owned())
        .collect();
    proptest::sample::select(ids)
}

proptest! {
    #[test]
    fn linear_in_quantity(id in activity_id(), q in 0.0f64..1.0e6, k in 1u32..20) {
        let engine = EmissionEngine::builtin();
        let once = engine.calculate(&id, q, &Selectors::none()).unwrap();
        let scaled = engine.calculate(&id, q * f64::from(k), &Selectors::none()).unwrap();
        // Each figure carries at most half a cent of rounding error.
        let tolerance = 0.005 * f64::from(k + 1) + 1e-9 * scaled.emissions_kg_co2e.abs();
        let diff = (scaled.emissions_kg_co2e - once.emissions_kg_co2e * f64::from(k)).abs();
        prop_assert!(diff <= tolerance, "{id}: {} vs {} × {k}", scaled.emissions_kg_co2e, once.emissions_kg_co2e);
    }

    #[test]
    fn negation_is_symmetric(id in activity_id(), q in 0.0f64..1.0e6) {
        let engine = EmissionEngine::builtin();
        let pos = engine.calculate(&id, q, &Selectors::none()).unwrap();
        let neg = engine.calculate(&id, -q, &Selectors::none()).unwrap();
        prop_assert_eq!(neg.emissions_kg_co2e, -pos.emissions_kg_co2e);
    }

    #[test]
    fn tonnes_track_kilograms(id in activity_id(), q in 0.0f64..1.0e7) {
        let r = EmissionEngine::builtin().calculate(&id, q, &Selectors::none()).unwrap();
        prop_assert!((r.emissions_tonnes_co2e * 1000.0 - r.emissions_kg_co2e).abs() <= 0.06);
    }

    #[test]
    fn calculation_is_deterministic(id in activity_id(), q in -1.0e6f64..1.0e6) {
        let engine = EmissionEngine::builtin();
        let a = engine.calculate(&id, q, &Selectors::none()).unwrap();
        let b = engine.calculate(&id, q, &Selectors::none()).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn renewable_share_never_increases_emissions(kwh in 0.0f64..1.0e6, pct in 0.0f64..=100.0) {
        let engine = EmissionEngine::builtin();
        let full = engine.calculate_electricity(kwh, Some("UK"), 0.0).unwrap();
        let partial = engine.calculate_electricity(kwh, Some("UK"), pct).unwrap();
        prop_assert!(partial.emission.emissions_kg_co2e <= full.emission.emissions_kg_co2e);
        prop_assert!((partial.renewable_kwh + partial.non_renewable_kwh - kwh).abs() <= 1e-6 * kwh.max(1.0));
    }
}
