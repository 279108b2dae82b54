//! # Emission Engine
//!
//! [`EmissionEngine`] binds an immutable [`FactorRegistry`] to an
//! [`EngineConfig`] and exposes every calculation as a method. The
//! registry is held behind an `Arc`, so several engines (for example with
//! different rounding) can share one factor set, and an engine can be
//! shared across threads by reference.

use std::sync::Arc;

use ghg_core::{ActivityId, EmissionScope, GhgError, DEFAULT_SELECTOR};
use ghg_factors::{FactorCatalog, FactorRegistry};
use serde::{Deserialize, Serialize};

use crate::calculator::{self, EmissionResult};
use crate::config::EngineConfig;
use crate::helpers::electricity::{self, ElectricityResult};
use crate::helpers::spend::{self, SpendResult};
use crate::helpers::travel;
use crate::request::{CalculationOutcome, CalculationRequest};
use crate::resolver::{resolve_factor, FactorBasis, ResolvedFactor, Selectors};

#[derive(Debug, Clone)]
pub struct EmissionEngine {
    registry: Arc<FactorRegistry>,
    config: EngineConfig,
}

/// The resolved factor for one activity, as served to factor look-ups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorDetail {
    pub activity_id: ActivityId,
    /// Region as requested, `"default"` when none was given.
    pub region: String,
    pub factor_kgco2e_per_unit: f64,
    pub factor_basis: FactorBasis,
    pub unit: String,
    pub factor_unit: String,
    pub scope: EmissionScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl EmissionEngine {
    pub fn new(registry: impl Into<Arc<FactorRegistry>>, config: EngineConfig) -> Self {
        Self {
            registry: registry.into(),
            config,
        }
    }

    /// Engine over the built-in factor set with default configuration.
    pub fn builtin() -> Self {
        Self::new(FactorRegistry::builtin(), EngineConfig::default())
    }

    /// A copy of this engine sharing the registry under another config.
    pub fn with_config(&self, config: EngineConfig) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            config,
        }
    }

    pub fn registry(&self) -> &FactorRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve the factor for `activity_id` without calculating.
    pub fn resolve(
        &self,
        activity_id: &str,
        selectors: &Selectors<'_>,
    ) -> Result<ResolvedFactor, GhgError> {
        let definition = self.registry.get_definition(activity_id)?;
        resolve_factor(activity_id, definition, selectors)
    }

    pub fn calculate(
        &self,
        activity_id: &str,
        quantity: f64,
        selectors: &Selectors<'_>,
    ) -> Result<EmissionResult, GhgError> {
        calculator::calculate(
            &self.registry,
            self.config.rounding,
            activity_id,
            quantity,
            selectors,
        )
    }

    pub fn calculate_electricity(
        &self,
        kwh: f64,
        region: Option<&str>,
        renewable_percentage: f64,
    ) -> Result<ElectricityResult, GhgError> {
        electricity::calculate_electricity(
            &self.registry,
            self.config.rounding,
            kwh,
            region,
            renewable_percentage,
        )
    }

    pub fn calculate_travel(
        &self,
        distance_km: f64,
        travel_type: &str,
        travel_class: Option<&str>,
    ) -> Result<EmissionResult, GhgError> {
        travel::calculate_travel(
            &self.registry,
            self.config.rounding,
            distance_km,
            travel_type,
            travel_class,
        )
    }

    pub fn calculate_spend(
        &self,
        spend_amount: f64,
        category: &str,
        sub_category: Option<&str>,
        currency: Option<&str>,
    ) -> Result<SpendResult, GhgError> {
        spend::calculate_spend(
            &self.registry,
            &self.config,
            spend_amount,
            category,
            sub_category,
            currency,
        )
    }

    pub fn catalog(&self) -> FactorCatalog {
        self.registry.catalog()
    }

    /// Resolved factor, unit, and scope for one activity in one region.
    pub fn factor_detail(
        &self,
        activity_id: &str,
        region: Option<&str>,
    ) -> Result<FactorDetail, GhgError> {
        let definition = self.registry.get_definition(activity_id)?;
        let selectors = Selectors {
            region,
            ..Selectors::default()
        };
        let resolved = resolve_factor(activity_id, definition, &selectors)?;
        Ok(FactorDetail {
            activity_id: ActivityId::new(activity_id),
            region: region.unwrap_or(DEFAULT_SELECTOR).to_owned(),
            factor_kgco2e_per_unit: resolved.factor,
            factor_basis: resolved.basis,
            unit: definition.unit().to_owned(),
            factor_unit: definition.factor_unit(),
            scope: definition.scope(),
            category: definition.category().map(str::to_owned),
        })
    }

    /// Dispatch a tagged request to the matching calculation.
    pub fn evaluate(&self, request: &CalculationRequest) -> Result<CalculationOutcome, GhgError> {
        match request {
            CalculationRequest::Activity {
                activity_id,
                quantity,
                region,
                variant,
                sub_category,
            } => {
                let selectors = Selectors {
                    region: region.as_deref(),
                    variant: variant.as_deref(),
                    sub_category: sub_category.as_deref(),
                };
                self.calculate(activity_id, *quantity, &selectors)
                    .map(CalculationOutcome::Activity)
            }
            CalculationRequest::Electricity {
                kwh,
                region,
                renewable_percentage,
            } => self
                .calculate_electricity(*kwh, region.as_deref(), *renewable_percentage)
                .map(CalculationOutcome::Electricity),
            CalculationRequest::Travel {
                distance_km,
                travel_type,
                travel_class,
            } => self
                .calculate_travel(*distance_km, travel_type, travel_class.as_deref())
                .map(CalculationOutcome::Travel),
            CalculationRequest::Spend {
                spend_amount,
                category,
                sub_category,
                currency,
            } => self
                .calculate_spend(
                    *spend_amount,
                    category,
                    sub_category.as_deref(),
                    currency.as_deref(),
                )
                .map(CalculationOutcome::Spend),
        }
    }
}

impl Default for EmissionEngine {
    fn default() -> Self {
        Self::builtin()
    }
}
