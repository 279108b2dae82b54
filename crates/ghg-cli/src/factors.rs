//! # Factors Subcommand
//!
//! Discovery and tooling for factor sets: list the catalog, show one
//! resolved factor, export the active set as a pack, validate a pack.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use ghg_factors::{FactorPack, FactorPackError, ValidationIssue};
use serde::Serialize;

use crate::context::CliContext;
use crate::{emit, write_json, EXIT_FAILURE, EXIT_OK};

/// Arguments for `ghg factors`.
#[derive(Args, Debug)]
pub struct FactorsArgs {
    #[command(subcommand)]
    pub command: FactorsCommand,
}

#[derive(Subcommand, Debug)]
pub enum FactorsCommand {
    /// Print the full factor catalog.
    List,

    /// Print the resolved factor of one activity.
    Show {
        activity: String,
        #[arg(long)]
        region: Option<String>,
    },

    /// Write the active factor set as a factor pack.
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Yaml)]
        format: ExportFormat,
    },

    /// Validate a factor pack (the active one when PATH is omitted).
    Validate {
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Yaml,
    Json,
}

/// Outcome of `ghg factors validate`.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub pack: String,
    pub name: String,
    pub version: String,
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

pub fn run_factors(args: &FactorsArgs, ctx: &CliContext, out: &mut dyn Write) -> Result<u8> {
    match &args.command {
        FactorsCommand::List => {
            let catalog = ctx.registry()?.catalog();
            write_json(out, &catalog)?;
            Ok(EXIT_OK)
        }
        FactorsCommand::Show { activity, region } => {
            let engine = ctx.engine()?;
            emit(out, engine.factor_detail(activity, region.as_deref()))
        }
        FactorsCommand::Export { format } => {
            let pack = ctx.registry()?.to_pack();
            let text = match format {
                ExportFormat::Yaml => pack.to_yaml_string(),
                ExportFormat::Json => pack.to_json_string(),
            }
            .context("failed to export factor pack")?;
            out.write_all(text.as_bytes())
                .context("failed to write factor pack")?;
            if !text.ends_with('\n') {
                writeln!(out).context("failed to write factor pack")?;
            }
            Ok(EXIT_OK)
        }
        FactorsCommand::Validate { path } => {
            let report = match path.as_deref().or(ctx.factor_pack.as_deref()) {
                Some(path) => validate_pack_file(path)?,
                None => {
                    let registry = ctx.registry()?;
                    let issues = registry.validate();
                    ValidationReport {
                        pack: "builtin".into(),
                        name: registry.info().name.clone(),
                        version: registry.info().version.clone(),
                        valid: issues.is_empty(),
                        issues,
                    }
                }
            };
            write_json(out, &report)?;
            Ok(if report.valid { EXIT_OK } else { EXIT_FAILURE })
        }
    }
}

fn validate_pack_file(path: &Path) -> Result<ValidationReport> {
    let pack = FactorPack::load(path)
        .with_context(|| format!("failed to read factor pack {}", path.display()))?;
    let (name, version) = (pack.name.clone(), pack.version.clone());
    let issues = match pack.into_registry() {
        Ok(_) => Vec::new(),
        Err(FactorPackError::Invalid { issues, .. }) => issues,
        Err(e) => return Err(e).context("failed to build factor registry"),
    };
    Ok(ValidationReport {
        pack: path.display().to_string(),
        name,
        version,
        valid: issues.is_empty(),
        issues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(command: FactorsCommand, ctx: &CliContext) -> (u8, Vec<u8>) {
        let mut out = Vec::new();
        let code = run_factors(&FactorsArgs { command }, ctx, &mut out).unwrap();
        (code, out)
    }

    #[test]
    fn list_prints_catalog() {
        let (code, out) = run(FactorsCommand::List, &CliContext::default());
        assert_eq!(code, EXIT_OK);
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["name"], "defra-2024");
        assert_eq!(json["activities"].as_array().unwrap().len(), 21);
    }

    #[test]
    fn show_resolves_region() {
        let (code, out) = run(
            FactorsCommand::Show {
                activity: "electricity".into(),
                region: Some("PL".into()),
            },
            &CliContext::default(),
        );
        assert_eq!(code, EXIT_OK);
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["factor_kgco2e_per_unit"], 0.658);
        assert_eq!(json["factor_basis"], "region");
    }

    #[test]
    fn export_yaml_parses_as_pack() {
        let (code, out) = run(
            FactorsCommand::Export {
                format: ExportFormat::Yaml,
            },
            &CliContext::default(),
        );
        assert_eq!(code, EXIT_OK);
        let pack = FactorPack::from_yaml_str(std::str::from_utf8(&out).unwrap()).unwrap();
        assert_eq!(pack.activities.len(), 21);
    }

    #[test]
    fn validate_builtin_is_clean() {
        let (code, out) = run(FactorsCommand::Validate { path: None }, &CliContext::default());
        assert_eq!(code, EXIT_OK);
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["pack"], "builtin");
    }
}
