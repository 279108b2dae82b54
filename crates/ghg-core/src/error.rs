//! # Error Types
//!
//! The engine has no transient failure mode: no network, no I/O on the
//! calculation path. Every error here is local, deterministic and must not
//! be retried.
//!
//! - `UnknownActivity` and `InvalidInput` are caller errors.
//! - `FactorNotFound` is a factor-data defect: the activity exists but the
//!   registry holds no factor for the supplied selectors.

use thiserror::Error;

/// Top-level error type for emission calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GhgError {
    /// The activity identifier is not present in the registry.
    #[error("unknown activity type: {activity_id}")]
    UnknownActivity {
        /// The identifier that was looked up.
        activity_id: String,
    },

    /// The activity exists but no factor applies to the given selectors.
    #[error(
        "could not find emission factor for {activity_id} \
         (region: {region:?}, sub_category: {sub_category:?})"
    )]
    FactorNotFound {
        /// The activity whose definition had no applicable factor.
        activity_id: String,
        /// Region selector supplied by the caller, if any.
        region: Option<String>,
        /// Sub-category selector supplied by the caller, if any.
        sub_category: Option<String>,
    },

    /// A numeric or code input was outside the accepted domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl GhgError {
    /// Build an [`GhgError::UnknownActivity`] for `activity_id`.
    pub fn unknown_activity(activity_id: impl Into<String>) -> Self {
        Self::UnknownActivity {
            activity_id: activity_id.into(),
        }
    }

    /// Stable snake_case tag for this error, suitable for machine-readable
    /// responses and inventory failure listings.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownActivity { .. } => "unknown_activity",
            Self::FactorNotFound { .. } => "factor_not_found",
            Self::InvalidInput(_) => "invalid_input",
        }
    }

    /// Whether the error was caused by the caller's input rather than by the
    /// factor data. Caller errors map to "bad request"; the rest indicate a
    /// registry gap that operators need to fix.
    pub fn is_caller_error(&self) -> bool {
        match self {
            Self::UnknownActivity { .. } | Self::InvalidInput(_) => true,
            Self::FactorNotFound { .. } => false,
        }
    }
}
