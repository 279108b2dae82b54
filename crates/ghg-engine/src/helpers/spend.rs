//! Spend-based Scope 3 emissions.
//!
//! The amount is converted into USD through the factor set's currency
//! table, the category label picks one of the EEIO spend activities, and
//! the sub-category narrows the keyed factor.

use ghg_core::{round_decimal, GhgError};
use ghg_factors::{FactorRegistry, BASE_CURRENCY};
use serde::{Deserialize, Serialize};

use crate::calculator::{calculate, EmissionResult};
use crate::config::{EngineConfig, UnknownCurrencyPolicy};
use crate::resolver::Selectors;

const USD_DECIMALS: u32 = 2;

/// Spend categories with a dedicated EEIO activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendCategory {
    PurchasedGoods,
    CapitalGoods,
    Services,
    Transport,
}

impl SpendCategory {
    /// Every mapped category.
    pub fn all() -> &'static [SpendCategory] {
        &[
            Self::PurchasedGoods,
            Self::CapitalGoods,
            Self::Services,
            Self::Transport,
        ]
    }

    /// The snake_case label; matches the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PurchasedGoods => "purchased_goods",
            Self::CapitalGoods => "capital_goods",
            Self::Services => "services",
            Self::Transport => "transport",
        }
    }

    /// EEIO activity the category resolves to.
    pub fn activity_id(&self) -> &'static str {
        match self {
            Self::PurchasedGoods => "spend_purchased_goods",
            Self::CapitalGoods => "spend_capital_goods",
            Self::Services => "spend_services",
            Self::Transport => "spend_transport",
        }
    }

    /// Parse an exact label, `None` when unmapped.
    ///
    /// ```
    /// use ghg_engine::SpendCategory;
    ///
    /// assert!(SpendCategory::all()
    ///     .iter()
    ///     .all(|c| SpendCategory::from_label(c.as_str()) == Some(*c)));
    /// assert_eq!(SpendCategory::Services.activity_id(), "spend_services");
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.as_str() == label)
    }
}

impl std::fmt::Display for SpendCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spend result: the standard result computed on the USD amount plus the
/// original amount and currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendResult {
    #[serde(flatten)]
    pub emission: EmissionResult,
    pub original_amount: f64,
    pub original_currency: String,
    /// Converted amount, rounded to cents for display. Emissions are
    /// computed from the unrounded figure.
    pub usd_amount: f64,
}

/// Calculate spend-based emissions. `currency` defaults to USD.
pub fn calculate_spend(
    registry: &FactorRegistry,
    config: &EngineConfig,
    spend_amount: f64,
    category: &str,
    sub_category: Option<&str>,
    currency: Option<&str>,
) -> Result<SpendResult, GhgError> {
    if !spend_amount.is_finite() {
        return Err(GhgError::InvalidInput(format!(
            "spend_amount must be a finite number, got {spend_amount}"
        )));
    }

    let currency = currency.unwrap_or(BASE_CURRENCY);
    let rate = conversion_rate(registry, config.unknown_currency, currency)?;
    let usd_amount = spend_amount * rate;

    let spend_category = SpendCategory::from_label(category).unwrap_or_else(|| {
        tracing::debug!(
            category,
            fallback = %config.default_spend_category,
            "unmapped spend category"
        );
        config.default_spend_category
    });

    let selectors = Selectors {
        sub_category,
        ..Selectors::default()
    };
    let emission = calculate(
        registry,
        config.rounding,
        spend_category.activity_id(),
        usd_amount,
        &selectors,
    )?;

    Ok(SpendResult {
        emission,
        original_amount: spend_amount,
        original_currency: currency.to_owned(),
        usd_amount: round_decimal(usd_amount, USD_DECIMALS, config.rounding),
    })
}

fn conversion_rate(
    registry: &FactorRegistry,
    policy: UnknownCurrencyPolicy,
    currency: &str,
) -> Result<f64, GhgError> {
    if let Some(rate) = registry.currencies().rate(currency) {
        return Ok(rate);
    }
    match policy {
        UnknownCurrencyPolicy::TreatAsBase => {
            tracing::warn!(
                currency,
                factor_set = %registry.info().name,
                "no conversion rate for currency, treating amount as USD"
            );
            Ok(1.0)
        }
        UnknownCurrencyPolicy::Reject => Err(GhgError::InvalidInput(format!(
            "no conversion rate for currency {currency} in factor set {}",
            registry.info().name
        ))),
    }
}
