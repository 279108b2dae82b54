//! # Engine Configuration
//!
//! Behavioural knobs that vary by deployment. Every field has a default,
//! and [`EngineConfig::default`] reproduces the published behaviour: half
//! away from zero rounding, unknown currencies treated as USD, unmapped
//! spend categories charged as purchased goods.
//!
//! Configuration files are YAML; JSON is accepted as a YAML subset.

use std::path::{Path, PathBuf};

use ghg_core::RoundingMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::helpers::spend::SpendCategory;

/// What to do with a currency missing from the factor set's rate table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCurrencyPolicy {
    /// Convert at 1.0 and log a warning.
    #[default]
    TreatAsBase,
    /// Fail with `InvalidInput`.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub rounding: RoundingMode,
    pub unknown_currency: UnknownCurrencyPolicy,
    /// Category used for spend whose category label is not recognized.
    pub default_spend_category: SpendCategory,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingMode::HalfAwayFromZero,
            unknown_currency: UnknownCurrencyPolicy::TreatAsBase,
            default_spend_category: SpendCategory::PurchasedGoods,
        }
    }
}

/// Errors loading an [`EngineConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("engine config not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to parse engine config {origin}: {source}")]
    Parse {
        origin: String,
        source: serde_yaml::Error,
    },

    #[error("I/O error reading engine config: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineConfig {
    /// Load from a YAML or JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io(e)
            }
        })?;
        let config = Self::parse(&content, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            origin: origin.to_owned(),
            source,
        })
    }

    /// Builder: override the rounding mode.
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Builder: override the unknown-currency policy.
    pub fn with_unknown_currency(mut self, policy: UnknownCurrencyPolicy) -> Self {
        self.unknown_currency = policy;
        self
    }
}
