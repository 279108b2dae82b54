//! # Factor Registry
//!
//! An immutable map from activity identifier to [`ActivityDefinition`],
//! together with the currency table and the metadata of the factor set it
//! was built from. Construct one at startup (built-in or from a pack) and
//! share it by reference; it is `Send + Sync` and never mutated.

use std::collections::BTreeMap;

use ghg_core::{ActivityId, GhgError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::catalog::{CatalogEntry, FactorCatalog};
use crate::currency::{CurrencyTable, BASE_CURRENCY};
use crate::definition::{ActivityDefinition, FactorSpec};
use crate::pack::FactorPack;

/// Identity of a factor set: which publication and revision it encodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorSetInfo {
    /// Short machine name (`"defra-2024"`).
    pub name: String,
    /// Revision of the factor set.
    pub version: String,
    /// Human-readable attribution of the factor sources.
    #[serde(default)]
    pub source: String,
}

/// A single defect found by [`FactorRegistry::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// What the issue is about: an activity id or `currency <CODE>`.
    pub subject: String,
    /// Description of the defect.
    pub problem: String,
}

impl ValidationIssue {
    /// Create an issue.
    pub fn new(subject: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            problem: problem.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.subject, self.problem)
    }
}

/// Immutable emission factor registry.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorRegistry {
    info: FactorSetInfo,
    definitions: BTreeMap<ActivityId, ActivityDefinition>,
    currencies: CurrencyTable,
}

impl FactorRegistry {
    /// Assemble a registry from its parts without validation.
    ///
    /// Use this to build alternate factor sets in tests; packs loaded from
    /// files go through [`FactorPack::into_registry`], which validates.
    pub fn new(
        info: FactorSetInfo,
        definitions: impl IntoIterator<Item = (ActivityId, ActivityDefinition)>,
        currencies: CurrencyTable,
    ) -> Self {
        Self {
            info,
            definitions: definitions.into_iter().collect(),
            currencies,
        }
    }

    /// The built-in DEFRA 2024 / EPA / EEIO factor set.
    pub fn builtin() -> Self {
        crate::builtin::builtin_registry()
    }

    /// Look up the definition of `activity_id`.
    ///
    /// Fails with [`GhgError::UnknownActivity`] when the id is absent.
    pub fn get_definition(&self, activity_id: &str) -> Result<&ActivityDefinition, GhgError> {
        self.definitions
            .get(activity_id)
            .ok_or_else(|| GhgError::unknown_activity(activity_id))
    }

    /// Whether `activity_id` is defined.
    pub fn contains(&self, activity_id: &str) -> bool {
        self.definitions.contains_key(activity_id)
    }

    /// Iterate definitions in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&ActivityId, &ActivityDefinition)> {
        self.definitions.iter()
    }

    /// All activity identifiers in order.
    pub fn activity_ids(&self) -> impl Iterator<Item = &ActivityId> {
        self.definitions.keys()
    }

    /// Number of activity definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry defines no activities.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Metadata of the factor set.
    pub fn info(&self) -> &FactorSetInfo {
        &self.info
    }

    /// Currency conversion table shipped with the factor set.
    pub fn currencies(&self) -> &CurrencyTable {
        &self.currencies
    }

    /// Check every definition and currency rate, returning all defects.
    ///
    /// A registry with an empty result satisfies the completeness invariant:
    /// every activity resolves to a finite, positive factor with no
    /// selectors at all. Variant and selector entries may be zero.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.definitions.is_empty() {
            issues.push(ValidationIssue::new(
                self.info.name.clone(),
                "factor set defines no activities",
            ));
        }

        for (id, def) in self.iter() {
            if def.unit().trim().is_empty() {
                issues.push(ValidationIssue::new(id.as_str(), "unit is empty"));
            }
            // Negative and non-finite values are reported with the other labelled factors below.
            match def.spec() {
                FactorSpec::Single { factor, .. } if *factor == 0.0 => {
                    issues.push(ValidationIssue::new(
                        id.as_str(),
                        format!("factor must be positive: {factor}"),
                    ));
                }
                FactorSpec::Keyed(keyed) => match keyed.default_factor() {
                    None => issues.push(ValidationIssue::new(
                        id.as_str(),
                        "keyed factors have no \"default\" entry",
                    )),
                    Some(default) if default == 0.0 => {
                        issues.push(ValidationIssue::new(
                            id.as_str(),
                            format!("factors.default must be positive: {default}"),
                        ));
                    }
                    Some(_) => {}
                },
                _ => {}
            }
            for (label, factor) in def.spec().labelled_factors() {
                if !factor.is_finite() {
                    issues.push(ValidationIssue::new(
                        id.as_str(),
                        format!("{label} is not finite: {factor}"),
                    ));
                } else if factor < 0.0 {
                    issues.push(ValidationIssue::new(
                        id.as_str(),
                        format!("{label} is negative: {factor}"),
                    ));
                }
            }
        }

        for (code, rate) in self.currencies.rates() {
            let subject = format!("currency {code}");
            if !rate.is_finite() || *rate <= 0.0 {
                issues.push(ValidationIssue::new(
                    subject,
                    format!("rate must be finite and positive: {rate}"),
                ));
            } else if code == BASE_CURRENCY && *rate != 1.0 {
                issues.push(ValidationIssue::new(
                    subject,
                    format!("base currency rate must be 1.0, got {rate}"),
                ));
            }
        }

        issues
    }

    /// SHA-256 hex digest of the factor set's serialized form.
    ///
    /// Two registries with identical metadata, definitions and rates always
    /// share a fingerprint. Inventory reports echo it so their totals can be
    /// traced to the exact factors used.
    pub fn fingerprint(&self) -> String {
        // Maps are ordered and floats print in shortest round-trip form,
        // so the serialized bytes are stable.
        let bytes = serde_json::to_vec(&self.to_pack()).unwrap_or_default();
        Sha256::digest(&bytes)
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }

    /// Read-only enumeration of every definition, for discovery endpoints.
    pub fn catalog(&self) -> FactorCatalog {
        FactorCatalog {
            name: self.info.name.clone(),
            version: self.info.version.clone(),
            source: self.info.source.clone(),
            fingerprint: self.fingerprint(),
            activities: self
                .iter()
                .map(|(id, def)| CatalogEntry::from_definition(id, def))
                .collect(),
            currencies: self.currencies.rates().clone(),
        }
    }

    /// Export the registry as a factor pack.
    pub fn to_pack(&self) -> FactorPack {
        FactorPack {
            name: self.info.name.clone(),
            version: self.info.version.clone(),
            source: self.info.source.clone(),
            currencies: Some(self.currencies.clone()),
            activities: self.definitions.clone(),
        }
    }
}
