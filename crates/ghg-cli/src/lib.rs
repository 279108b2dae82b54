//! # ghg-cli — Command-Line Interface for the Emission Engine
//!
//! Provides the `ghg` binary. Every command writes a single JSON document
//! to stdout; diagnostics go to stderr through `tracing`.
//!
//! ## Subcommands
//!
//! - `ghg calc` — one activity calculation.
//! - `ghg electricity` / `ghg travel` / `ghg spend` — domain helpers.
//! - `ghg factors` — catalog listing, single factor look-up, pack export
//!   and validation.
//! - `ghg inventory` — yearly inventory from a records file.
//!
//! ```bash
//! ghg electricity 1000 --region UK --renewable-percentage 50
//! ghg --factors acme-2025.yaml factors validate
//! ghg inventory records.yaml --year 2024
//! ```
//!
//! ## Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | calculation or validation failure (reported as JSON on stdout) |
//! | 2 | operational error (unreadable file, bad configuration) |

pub mod calculate;
pub mod context;
pub mod factors;
pub mod inventory;

use std::io::Write;

use anyhow::{Context, Result};
use ghg_core::GhgError;
use serde::Serialize;

/// Environment variable naming a factor pack file.
pub const FACTOR_PACK_ENV: &str = "GHG_FACTOR_PACK";

/// Environment variable naming an engine config file.
pub const ENGINE_CONFIG_ENV: &str = "GHG_ENGINE_CONFIG";

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_OPERATIONAL: u8 = 2;

/// JSON body printed when a calculation fails.
#[derive(Debug, Serialize)]
struct ErrorReport<'a> {
    error: &'a str,
    message: String,
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to serialize output")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}

/// Print a calculation result, or the error as JSON with exit code 1.
pub fn emit<T: Serialize>(out: &mut dyn Write, result: Result<T, GhgError>) -> Result<u8> {
    match result {
        Ok(value) => {
            write_json(out, &value)?;
            Ok(EXIT_OK)
        }
        Err(e) => {
            write_json(
                out,
                &ErrorReport {
                    error: e.kind(),
                    message: e.to_string(),
                },
            )?;
            Ok(EXIT_FAILURE)
        }
    }
}
