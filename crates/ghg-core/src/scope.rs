//! # Emission Scope — GHG Protocol Classification
//!
//! Defines the `EmissionScope` enum used by every activity definition and
//! every emission result. Scope 2 is split into location-based and
//! market-based accounting as the GHG Protocol Scope 2 Guidance requires.
//!
//! | Scope | Meaning |
//! |-------|---------|
//! | `scope_1` | Direct emissions from owned or controlled sources |
//! | `scope_2_location` | Purchased energy, grid-average intensity |
//! | `scope_2_market` | Purchased energy, contractual instruments |
//! | `scope_3` | Value-chain emissions |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::GhgError;

/// GHG Protocol scope of an emission source.
///
/// Serialized as the snake_case identifiers used in factor packs and in
/// emission results (`"scope_1"`, `"scope_2_location"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EmissionScope {
    /// Direct emissions (fuel combustion, company vehicles).
    #[serde(rename = "scope_1")]
    Scope1,
    /// Indirect emissions from purchased energy, location-based.
    #[serde(rename = "scope_2_location")]
    Scope2Location,
    /// Indirect emissions from purchased energy, market-based.
    #[serde(rename = "scope_2_market")]
    Scope2Market,
    /// Value-chain emissions (travel, water, waste, purchased goods).
    #[serde(rename = "scope_3")]
    Scope3,
}

impl EmissionScope {
    /// All scopes in reporting order.
    pub fn all() -> &'static [EmissionScope] {
        &[
            Self::Scope1,
            Self::Scope2Location,
            Self::Scope2Market,
            Self::Scope3,
        ]
    }

    /// The snake_case identifier; matches the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scope1 => "scope_1",
            Self::Scope2Location => "scope_2_location",
            Self::Scope2Market => "scope_2_market",
            Self::Scope3 => "scope_3",
        }
    }
}

impl std::fmt::Display for EmissionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmissionScope {
    type Err = GhgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scope_1" => Ok(Self::Scope1),
            "scope_2_location" => Ok(Self::Scope2Location),
            "scope_2_market" => Ok(Self::Scope2Market),
            "scope_3" => Ok(Self::Scope3),
            other => Err(GhgError::InvalidInput(format!(
                "unknown emission scope: {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_parses_back() {
        for scope in EmissionScope::all() {
            let parsed: EmissionScope = scope.as_str().parse().unwrap();
            assert_eq!(*scope, parsed);
        }
    }

    #[test]
    fn serde_form_matches_as_str() {
        for scope in EmissionScope::all() {
            let json = serde_json::to_string(scope).unwrap();
            assert_eq!(json, format!("\"{}\"", scope.as_str()));
        }
    }

    #[test]
    fn from_str_rejects_unknown_and_wrong_case() {
        assert!("scope_4".parse::<EmissionScope>().is_err());
        assert!("SCOPE_1".parse::<EmissionScope>().is_err());
        assert!("".parse::<EmissionScope>().is_err());
    }

    #[test]
    fn ordering_follows_reporting_order() {
        let mut scopes = vec![
            EmissionScope::Scope3,
            EmissionScope::Scope1,
            EmissionScope::Scope2Market,
            EmissionScope::Scope2Location,
        ];
        scopes.sort();
        assert_eq!(scopes, EmissionScope::all());
    }
}
