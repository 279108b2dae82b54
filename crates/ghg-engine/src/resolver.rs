//! # Factor Resolver
//!
//! Given an activity definition and optional selectors, returns the single
//! applicable factor. Precedence, checked in order:
//!
//! | Definition | 1st | 2nd | 3rd |
//! |------------|-----|-----|-----|
//! | keyed | region key | sub-category key | `"default"` |
//! | single | variant key | base factor | — |
//!
//! A region exact match always wins, even when the sub-category names the
//! same key. A region of `"default"` is treated as no region, so a supplied
//! sub-category still outranks the fallback. A keyed definition with no
//! match and no fallback yields [`GhgError::FactorNotFound`].

use ghg_core::{is_default_selector, GhgError};
use ghg_factors::{ActivityDefinition, FactorSpec};
use serde::{Deserialize, Serialize};

/// Optional values that narrow factor resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selectors<'a> {
    /// Region code (ISO 3166 alpha-2, `"UK"` for the United Kingdom).
    pub region: Option<&'a str>,
    /// Variant name (vehicle size, cabin class).
    pub variant: Option<&'a str>,
    /// Industry sub-category for spend-based activities.
    pub sub_category: Option<&'a str>,
}

impl<'a> Selectors<'a> {
    /// No selectors: resolves to the default or base factor.
    pub fn none() -> Self {
        Self::default()
    }

    /// Builder: set the region.
    pub fn with_region(mut self, region: &'a str) -> Self {
        self.region = Some(region);
        self
    }

    /// Builder: set the variant.
    pub fn with_variant(mut self, variant: &'a str) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Builder: set the sub-category.
    pub fn with_sub_category(mut self, sub_category: &'a str) -> Self {
        self.sub_category = Some(sub_category);
        self
    }

    /// The region, unless absent or the literal `"default"`.
    pub fn effective_region(&self) -> Option<&'a str> {
        self.region.filter(|r| !is_default_selector(Some(*r)))
    }
}

/// Which precedence branch produced a factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorBasis {
    /// Keyed factor matched on the region.
    Region,
    /// Keyed factor matched on the sub-category.
    SubCategory,
    /// Keyed `"default"` fallback.
    Default,
    /// Variant override of a single factor.
    Variant,
    /// Base single factor.
    Base,
}

impl FactorBasis {
    /// The snake_case identifier; matches the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Region => "region",
            Self::SubCategory => "sub_category",
            Self::Default => "default",
            Self::Variant => "variant",
            Self::Base => "base",
        }
    }
}

impl std::fmt::Display for FactorBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved factor and the branch that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFactor {
    /// kgCO2e per activity unit.
    pub factor: f64,
    pub basis: FactorBasis,
}

/// Resolve the factor of `definition` for the given selectors.
///
/// `activity_id` is only used to label a [`GhgError::FactorNotFound`].
pub fn resolve_factor(
    activity_id: &str,
    definition: &ActivityDefinition,
    selectors: &Selectors<'_>,
) -> Result<ResolvedFactor, GhgError> {
    let resolved = match definition.spec() {
        FactorSpec::Keyed(keyed) => {
            if let Some(factor) = selectors.effective_region().and_then(|r| keyed.get(r)) {
                ResolvedFactor {
                    factor,
                    basis: FactorBasis::Region,
                }
            } else if let Some(factor) = selectors.sub_category.and_then(|s| keyed.get(s)) {
                ResolvedFactor {
                    factor,
                    basis: FactorBasis::SubCategory,
                }
            } else if let Some(factor) = keyed.default_factor() {
                ResolvedFactor {
                    factor,
                    basis: FactorBasis::Default,
                }
            } else {
                return Err(GhgError::FactorNotFound {
                    activity_id: activity_id.to_owned(),
                    region: selectors.region.map(str::to_owned),
                    sub_category: selectors.sub_category.map(str::to_owned),
                });
            }
        }
        FactorSpec::Single { factor, variants } => {
            match selectors.variant.and_then(|v| variants.get(v)) {
                Some(&factor) => ResolvedFactor {
                    factor,
                    basis: FactorBasis::Variant,
                },
                None => ResolvedFactor {
                    factor: *factor,
                    basis: FactorBasis::Base,
                },
            }
        }
    };

    tracing::debug!(
        activity = activity_id,
        basis = %resolved.basis,
        factor = resolved.factor,
        "resolved emission factor"
    );
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghg_core::EmissionScope;
    use ghg_factors::KeyedFactors;

    fn keyed() -> ActivityDefinition {
        ActivityDefinition::new(
            "USD",
            EmissionScope::Scope3,
            FactorSpec::keyed(0.35, [("UK", 0.5), ("metals", 0.72), ("shared", 0.9)]),
        )
    }

    fn single() -> ActivityDefinition {
        ActivityDefinition::new(
            "km",
            EmissionScope::Scope1,
            FactorSpec::with_variants(0.17048, [("small", 0.14289)]),
        )
    }

    fn resolve(def: &ActivityDefinition, selectors: Selectors<'_>) -> ResolvedFactor {
        resolve_factor("test", def, &selectors).unwrap()
    }

    #[test]
    fn region_match_wins() {
        let r = resolve(&keyed(), Selectors::none().with_region("UK").with_sub_category("metals"));
        assert_eq!(r.factor, 0.5);
        assert_eq!(r.basis, FactorBasis::Region);
    }

    #[test]
    fn sub_category_outranks_default() {
        let r = resolve(&keyed(), Selectors::none().with_region("JP").with_sub_category("metals"));
        assert_eq!(r.factor, 0.72);
        assert_eq!(r.basis, FactorBasis::SubCategory);
    }

    #[test]
    fn default_region_literal_does_not_shadow_sub_category() {
        let r = resolve(
            &keyed(),
            Selectors::none().with_region("default").with_sub_category("metals"),
        );
        assert_eq!(r.factor, 0.72);
        assert_eq!(r.basis, FactorBasis::SubCategory);
    }

    #[test]
    fn region_and_sub_category_on_same_key_resolve_as_region() {
        let r = resolve(
            &keyed(),
            Selectors::none().with_region("shared").with_sub_category("shared"),
        );
        assert_eq!(r.factor, 0.9);
        assert_eq!(r.basis, FactorBasis::Region);
    }

    #[test]
    fn falls_back_to_default() {
        let r = resolve(&keyed(), Selectors::none().with_region("JP").with_sub_category("toys"));
        assert_eq!(r.factor, 0.35);
        assert_eq!(r.basis, FactorBasis::Default);

        let r = resolve(&keyed(), Selectors::none().with_sub_category("default"));
        assert_eq!(r.basis, FactorBasis::Default);
    }

    #[test]
    fn keyed_ignores_variant() {
        let r = resolve(&keyed(), Selectors::none().with_variant("UK"));
        assert_eq!(r.basis, FactorBasis::Default);
    }

    #[test]
    fn missing_default_is_factor_not_found() {
        let def = ActivityDefinition::new(
            "USD",
            EmissionScope::Scope3,
            FactorSpec::Keyed(KeyedFactors::new(None).with("metals", 0.72)),
        );
        let err = resolve_factor("spend_misc", &def, &Selectors::none().with_region("UK"))
            .unwrap_err();
        assert_eq!(
            err,
            GhgError::FactorNotFound {
                activity_id: "spend_misc".into(),
                region: Some("UK".into()),
                sub_category: None,
            }
        );

        let ok = resolve(&def, Selectors::none().with_sub_category("metals"));
        assert_eq!(ok.factor, 0.72);
    }

    #[test]
    fn variant_overrides_base() {
        let r = resolve(&single(), Selectors::none().with_variant("small"));
        assert_eq!(r.factor, 0.14289);
        assert_eq!(r.basis, FactorBasis::Variant);
    }

    #[test]
    fn unknown_variant_uses_base() {
        let r = resolve(&single(), Selectors::none().with_variant("huge"));
        assert_eq!(r.factor, 0.17048);
        assert_eq!(r.basis, FactorBasis::Base);
    }

    #[test]
    fn single_ignores_region_and_sub_category() {
        let r = resolve(
            &single(),
            Selectors::none().with_region("small").with_sub_category("small"),
        );
        assert_eq!(r.basis, FactorBasis::Base);
    }

    #[test]
    fn effective_region() {
        assert_eq!(Selectors::none().effective_region(), None);
        assert_eq!(Selectors::none().with_region("default").effective_region(), None);
        assert_eq!(Selectors::none().with_region("FR").effective_region(), Some("FR"));
    }

    #[test]
    fn effective_region_follows_default_selector_rule() {
        for region in [None, Some("default"), Some("Default"), Some("UK"), Some("")] {
            let selectors = Selectors {
                region,
                ..Selectors::none()
            };
            assert_eq!(
                selectors.effective_region().is_none(),
                is_default_selector(region),
                "{region:?}"
            );
        }
        assert_eq!(
            Selectors::none().with_region("Default").effective_region(),
            Some("Default")
        );
    }
}
