//! # Activity Definitions
//!
//! An activity definition carries exactly one of two factor shapes:
//!
//! - [`FactorSpec::Single`] — one kgCO2e-per-unit factor, optionally
//!   overridden by named variants (vehicle size, cabin class).
//! - [`FactorSpec::Keyed`] — a map from selector key (region code or
//!   industry sub-category) to factor, plus the `"default"` fallback.
//!
//! In factor-pack files the two shapes are distinguished by which field is
//! present (`factor` or `factors`); deserialization rejects definitions that
//! carry both or neither.

use std::collections::BTreeMap;

use ghg_core::{EmissionScope, DEFAULT_SELECTOR};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A definition whose serialized form does not describe a valid factor shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// Both `factor` and `factors` were supplied.
    #[error("definition has both `factor` and `factors`; exactly one is allowed")]
    AmbiguousFactor,
    /// Neither `factor` nor `factors` was supplied.
    #[error("definition has neither `factor` nor `factors`")]
    MissingFactor,
    /// `variants` only refine a single base factor.
    #[error("`variants` may only accompany a single `factor`")]
    VariantsOnKeyed,
}

/// Selector-keyed factors with an optional `"default"` fallback.
///
/// The fallback is an `Option` so a map without one stays representable;
/// the resolver turns that case into `FactorNotFound` and pack validation
/// rejects it at load time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyedFactors {
    default: Option<f64>,
    selectors: BTreeMap<String, f64>,
}

impl KeyedFactors {
    /// Create a map with the given fallback and no selector entries.
    pub fn new(default: Option<f64>) -> Self {
        Self {
            default,
            selectors: BTreeMap::new(),
        }
    }

    /// Builder: add a selector entry. A key of `"default"` sets the fallback.
    pub fn with(mut self, key: impl Into<String>, factor: f64) -> Self {
        self.insert(key.into(), factor);
        self
    }

    fn insert(&mut self, key: String, factor: f64) {
        if key == DEFAULT_SELECTOR {
            self.default = Some(factor);
        } else {
            self.selectors.insert(key, factor);
        }
    }

    /// The `"default"` fallback factor, if present.
    pub fn default_factor(&self) -> Option<f64> {
        self.default
    }

    /// The factor registered under a non-default selector key.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.selectors.get(key).copied()
    }

    /// Non-default selector entries in key order.
    pub fn selectors(&self) -> &BTreeMap<String, f64> {
        &self.selectors
    }

    /// All entries including `"default"`, as they appear in a factor pack.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        let mut map = self.selectors.clone();
        if let Some(default) = self.default {
            map.insert(DEFAULT_SELECTOR.to_owned(), default);
        }
        map
    }
}

impl FromIterator<(String, f64)> for KeyedFactors {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut keyed = KeyedFactors::default();
        for (key, factor) in iter {
            keyed.insert(key, factor);
        }
        keyed
    }
}

/// The factor shape of an activity.
#[derive(Debug, Clone, PartialEq)]
pub enum FactorSpec {
    /// One base factor, refined by optional named variants.
    Single {
        /// Base kgCO2e per unit.
        factor: f64,
        /// Variant name → overriding kgCO2e per unit.
        variants: BTreeMap<String, f64>,
    },
    /// Selector key → kgCO2e per unit, with a `"default"` fallback.
    Keyed(KeyedFactors),
}

impl FactorSpec {
    /// A single factor without variants.
    pub fn single(factor: f64) -> Self {
        Self::Single {
            factor,
            variants: BTreeMap::new(),
        }
    }

    /// A single base factor with named variant overrides.
    pub fn with_variants<'a>(
        factor: f64,
        variants: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Self {
        Self::Single {
            factor,
            variants: variants
                .into_iter()
                .map(|(name, f)| (name.to_owned(), f))
                .collect(),
        }
    }

    /// A keyed factor map with the given `"default"` fallback.
    pub fn keyed<'a>(default: f64, entries: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self::Keyed(
            entries
                .into_iter()
                .fold(KeyedFactors::new(Some(default)), |acc, (k, f)| acc.with(k, f)),
        )
    }

    /// Every numeric factor in this spec, labelled by where it lives.
    pub fn labelled_factors(&self) -> Vec<(String, f64)> {
        match self {
            Self::Single { factor, variants } => std::iter::once(("factor".to_owned(), *factor))
                .chain(
                    variants
                        .iter()
                        .map(|(name, f)| (format!("variants.{name}"), *f)),
                )
                .collect(),
            Self::Keyed(keyed) => keyed
                .to_map()
                .into_iter()
                .map(|(key, f)| (format!("factors.{key}"), f))
                .collect(),
        }
    }
}

/// Immutable definition of one activity in the factor registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawActivityDefinition",
    into = "RawActivityDefinition"
)]
pub struct ActivityDefinition {
    unit: String,
    scope: EmissionScope,
    category: Option<String>,
    spec: FactorSpec,
}

impl ActivityDefinition {
    /// Create a definition.
    pub fn new(unit: impl Into<String>, scope: EmissionScope, spec: FactorSpec) -> Self {
        Self {
            unit: unit.into(),
            scope,
            category: None,
            spec,
        }
    }

    /// Builder: attach a GHG Protocol category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Display unit of the activity quantity (`"kWh"`, `"litre"`, `"USD"`).
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Unit of the resolved factor, `kgCO2e/<unit>`.
    pub fn factor_unit(&self) -> String {
        format!("kgCO2e/{}", self.unit)
    }

    /// GHG Protocol scope the activity reports under.
    pub fn scope(&self) -> EmissionScope {
        self.scope
    }

    /// GHG Protocol category label, when one is recorded.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// The factor shape.
    pub fn spec(&self) -> &FactorSpec {
        &self.spec
    }
}

/// Serialized form of [`ActivityDefinition`] in factor packs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawActivityDefinition {
    unit: String,
    scope: EmissionScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variants: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    factors: Option<BTreeMap<String, f64>>,
}

impl TryFrom<RawActivityDefinition> for ActivityDefinition {
    type Error = DefinitionError;

    fn try_from(raw: RawActivityDefinition) -> Result<Self, Self::Error> {
        let spec = match (raw.factor, raw.factors, raw.variants) {
            (Some(_), Some(_), _) => return Err(DefinitionError::AmbiguousFactor),
            (None, None, _) => return Err(DefinitionError::MissingFactor),
            (None, Some(_), Some(_)) => return Err(DefinitionError::VariantsOnKeyed),
            (Some(factor), None, variants) => FactorSpec::Single {
                factor,
                variants: variants.unwrap_or_default(),
            },
            (None, Some(factors), None) => FactorSpec::Keyed(factors.into_iter().collect()),
        };
        Ok(Self {
            unit: raw.unit,
            scope: raw.scope,
            category: raw.category,
            spec,
        })
    }
}

impl From<ActivityDefinition> for RawActivityDefinition {
    fn from(def: ActivityDefinition) -> Self {
        let (factor, variants, factors) = match def.spec {
            FactorSpec::Single { factor, variants } => {
                let variants = (!variants.is_empty()).then_some(variants);
                (Some(factor), variants, None)
            }
            FactorSpec::Keyed(keyed) => (None, None, Some(keyed.to_map())),
        };
        Self {
            unit: def.unit,
            scope: def.scope,
            category: def.category,
            factor,
            variants,
            factors,
        }
    }
}
