//! # Activity Identifiers and Selectors
//!
//! Registry keys are plain snake_case strings (`"electricity"`,
//! `"flight_long"`). [`ActivityId`] wraps them so that an activity key
//! cannot be passed where a region or currency code is expected.

use serde::{Deserialize, Serialize};

/// The literal selector key that names the fallback factor of a keyed
/// factor map. A region selector equal to this value means "no region".
pub const DEFAULT_SELECTOR: &str = "default";

/// Whether a selector value is absent or the literal `"default"`.
pub fn is_default_selector(selector: Option<&str>) -> bool {
    matches!(selector, None | Some(DEFAULT_SELECTOR))
}

/// Identifier of an activity definition in the factor registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(String);

impl ActivityId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActivityId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ActivityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ActivityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ActivityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
