//! # Command Context
//!
//! Global options shared by every subcommand. The engine is built on
//! demand so that `factors validate` can inspect a pack that would fail
//! to load.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ghg_engine::{EmissionEngine, EngineConfig};
use ghg_factors::FactorRegistry;

#[derive(Debug, Clone, Default)]
pub struct CliContext {
    /// Factor pack to use instead of the built-in set.
    pub factor_pack: Option<PathBuf>,
    /// Engine configuration file.
    pub engine_config: Option<PathBuf>,
}

impl CliContext {
    pub fn new(factor_pack: Option<PathBuf>, engine_config: Option<PathBuf>) -> Self {
        Self {
            factor_pack,
            engine_config,
        }
    }

    /// Load the active registry: the factor pack when given, else built-in.
    pub fn registry(&self) -> Result<FactorRegistry> {
        match &self.factor_pack {
            Some(path) => load_registry(path),
            None => {
                tracing::debug!("using built-in factor set");
                Ok(FactorRegistry::builtin())
            }
        }
    }

    pub fn config(&self) -> Result<EngineConfig> {
        match &self.engine_config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("failed to load engine config {}", path.display())),
            None => Ok(EngineConfig::default()),
        }
    }

    pub fn engine(&self) -> Result<EmissionEngine> {
        Ok(EmissionEngine::new(self.registry()?, self.config()?))
    }
}

fn load_registry(path: &Path) -> Result<FactorRegistry> {
    FactorRegistry::load(path)
        .with_context(|| format!("failed to load factor pack {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghg_core::RoundingMode;

    #[test]
    fn default_context_is_builtin() {
        let engine = CliContext::default().engine().unwrap();
        assert_eq!(engine.registry().info().name, "defra-2024");
        assert_eq!(engine.config(), &EngineConfig::default());
    }

    #[test]
    fn config_file_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.yaml");
        std::fs::write(&path, "rounding: half_even\n").unwrap();
        let engine = CliContext::new(None, Some(path)).engine().unwrap();
        assert_eq!(engine.config().rounding, RoundingMode::HalfEven);
    }

    #[test]
    fn missing_pack_error_names_path() {
        let ctx = CliContext::new(Some(PathBuf::from("/nonexistent/pack.yaml")), None);
        let err = ctx.engine().unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/pack.yaml"));
    }
}
