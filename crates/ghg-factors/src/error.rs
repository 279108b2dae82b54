//! Factor-pack error types.
//!
//! Every error carries the origin of the pack (file path or `<inline>`)
//! so a rejected deployment points straight at the offending file.

use std::path::PathBuf;

use thiserror::Error;

use crate::registry::ValidationIssue;

/// Errors that can occur while loading, validating or exporting a factor pack.
#[derive(Debug, Error)]
pub enum FactorPackError {
    /// YAML parsing failed.
    #[error("failed to parse YAML factor pack at {origin}: {source}")]
    YamlParse {
        origin: String,
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON factor pack at {origin}: {source}")]
    JsonParse {
        origin: String,
        source: serde_json::Error,
    },

    /// The pack file does not exist.
    #[error("factor pack not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The pack parsed but its factor set is defective.
    #[error("factor pack {name:?} failed validation with {} issue(s): {}", issues.len(), summarize(issues))]
    Invalid {
        name: String,
        issues: Vec<ValidationIssue>,
    },

    /// Serializing a pack for export failed.
    #[error("failed to serialize factor pack: {0}")]
    Serialize(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for factor-pack operations.
pub type PackResult<T> = Result<T, FactorPackError>;

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
