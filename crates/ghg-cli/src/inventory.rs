//! # Inventory Subcommand
//!
//! Compiles a yearly inventory from a records file. The file is a YAML
//! (or, with a `.json` extension, JSON) list of activity records:
//!
//! ```yaml
//! - id: INV-2024-0113
//!   period_end: 2024-01-31
//!   request: { kind: electricity, kwh: 12000, region: UK }
//! - id: FUEL-07
//!   request: { kind: activity, activity_id: diesel, quantity: 420 }
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use ghg_engine::{ActivityRecord, EmissionInventory};

use crate::context::CliContext;
use crate::{write_json, EXIT_FAILURE, EXIT_OK};

/// Arguments for `ghg inventory`.
#[derive(Args, Debug)]
pub struct InventoryArgs {
    /// Records file (YAML, or JSON with a .json extension).
    #[arg(value_name = "RECORDS_FILE")]
    pub records: PathBuf,

    /// Reporting year.
    #[arg(long)]
    pub year: i32,
}

/// Exit code 1 when any record failed; the report is printed regardless.
pub fn run_inventory(args: &InventoryArgs, ctx: &CliContext, out: &mut dyn Write) -> Result<u8> {
    let engine = ctx.engine()?;
    let records = load_records(&args.records)?;
    tracing::info!(
        path = %args.records.display(),
        records = records.len(),
        year = args.year,
        "compiling inventory"
    );

    let report = EmissionInventory::compile(&engine, args.year, &records);
    write_json(out, &report)?;

    if report.is_complete() {
        Ok(EXIT_OK)
    } else {
        tracing::warn!(
            failures = report.failures.len(),
            "some records could not be calculated"
        );
        Ok(EXIT_FAILURE)
    }
}

pub fn load_records(path: &Path) -> Result<Vec<ActivityRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read records file {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse records file {}", path.display()))
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse records file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_records_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(
            &path,
            r#"[{"id": "a", "request": {"kind": "travel", "distance_km": 12, "travel_type": "train"}}]"#,
        )
        .unwrap();
        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_deref(), Some("a"));
    }

    #[test]
    fn unreadable_file_is_operational_error() {
        let err = load_records(Path::new("/nonexistent/records.yaml")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read records file"));
    }
}
