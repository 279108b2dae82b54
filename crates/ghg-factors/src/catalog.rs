//! # Factor Catalog
//!
//! Read-only enumeration of a registry for discovery: every activity with
//! its unit, scope, and either its single factor (plus variants) or its
//! selector-keyed factor map.

use std::collections::BTreeMap;

use ghg_core::{ActivityId, EmissionScope};
use serde::{Deserialize, Serialize};

use crate::definition::{ActivityDefinition, FactorSpec};

/// Catalog of a whole factor set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorCatalog {
    pub name: String,
    pub version: String,
    pub source: String,
    /// [`FactorRegistry::fingerprint`](crate::FactorRegistry::fingerprint) of the set.
    pub fingerprint: String,
    pub activities: Vec<CatalogEntry>,
    pub currencies: BTreeMap<String, f64>,
}

impl FactorCatalog {
    /// Find the entry for `activity_id`.
    pub fn entry(&self, activity_id: &str) -> Option<&CatalogEntry> {
        self.activities
            .iter()
            .find(|e| e.activity_id.as_str() == activity_id)
    }
}

/// One activity as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub activity_id: ActivityId,
    pub unit: String,
    pub scope: EmissionScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Base factor of a single-factor activity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor_kgco2e: Option<f64>,
    /// Selector → factor map of a keyed activity, including `"default"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors_by_selector: Option<BTreeMap<String, f64>>,
    /// Variant overrides of a single-factor activity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<BTreeMap<String, f64>>,
}

impl CatalogEntry {
    pub(crate) fn from_definition(id: &ActivityId, def: &ActivityDefinition) -> Self {
        let (factor_kgco2e, factors_by_selector, variants) = match def.spec() {
            FactorSpec::Single { factor, variants } => (
                Some(*factor),
                None,
                (!variants.is_empty()).then(|| variants.clone()),
            ),
            FactorSpec::Keyed(keyed) => (None, Some(keyed.to_map()), None),
        };
        Self {
            activity_id: id.clone(),
            unit: def.unit().to_owned(),
            scope: def.scope(),
            category: def.category().map(str::to_owned),
            factor_kgco2e,
            factors_by_selector,
            variants,
        }
    }
}
