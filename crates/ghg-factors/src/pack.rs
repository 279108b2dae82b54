//! # Factor Packs
//!
//! A factor pack is a versioned YAML or JSON file holding a complete factor
//! set:
//!
//! ```yaml
//! name: defra-2024
//! version: "2024.1"
//! source: DEFRA 2024, EPA, EEIO
//! currencies:          # optional; base-only table when omitted
//!   USD: 1.0
//!   EUR: 1.08
//! activities:
//!   electricity:
//!     unit: kWh
//!     scope: scope_2_location
//!     factors: { UK: 0.20707, default: 0.300 }
//!   car_petrol:
//!     unit: km
//!     scope: scope_1
//!     factor: 0.17048
//!     variants: { small: 0.14289 }
//! ```
//!
//! Loading is two-step: parse into [`FactorPack`], then
//! [`FactorPack::into_registry`] validates and builds the immutable
//! [`FactorRegistry`]. A pack with any validation issue is rejected whole.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use ghg_core::ActivityId;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::currency::CurrencyTable;
use crate::definition::ActivityDefinition;
use crate::error::{FactorPackError, PackResult};
use crate::registry::{FactorRegistry, FactorSetInfo};

const INLINE_ORIGIN: &str = "<inline>";

/// Serialized form of a complete factor set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactorPack {
    /// Short machine name of the factor set.
    pub name: String,
    /// Revision of the factor set.
    pub version: String,
    /// Attribution of the factor sources.
    #[serde(default)]
    pub source: String,
    /// Currency → base-currency multipliers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currencies: Option<CurrencyTable>,
    /// Activity definitions keyed by identifier. A repeated id is a
    /// parse error.
    #[serde(deserialize_with = "unique_activities")]
    pub activities: BTreeMap<ActivityId, ActivityDefinition>,
}

impl FactorPack {
    /// Load a pack from disk. Files ending in `.json` are parsed as JSON,
    /// everything else as YAML.
    pub fn load(path: &Path) -> PackResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FactorPackError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                FactorPackError::Io(e)
            }
        })?;
        let origin = path.display().to_string();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        tracing::debug!(path = %origin, json = is_json, "loading factor pack");

        if is_json {
            parse_json(&content, origin)
        } else {
            parse_yaml(&content, origin)
        }
    }

    /// Parse a pack from a YAML string.
    pub fn from_yaml_str(content: &str) -> PackResult<Self> {
        parse_yaml(content, INLINE_ORIGIN.to_owned())
    }

    /// Parse a pack from a JSON string.
    pub fn from_json_str(content: &str) -> PackResult<Self> {
        parse_json(content, INLINE_ORIGIN.to_owned())
    }

    /// Validate the pack and build a registry from it.
    ///
    /// Fails with [`FactorPackError::Invalid`] listing every defect found.
    pub fn into_registry(self) -> PackResult<FactorRegistry> {
        let info = FactorSetInfo {
            name: self.name,
            version: self.version,
            source: self.source,
        };
        let registry = FactorRegistry::new(
            info,
            self.activities,
            self.currencies.unwrap_or_default(),
        );

        let issues = registry.validate();
        if !issues.is_empty() {
            return Err(FactorPackError::Invalid {
                name: registry.info().name.clone(),
                issues,
            });
        }

        tracing::info!(
            name = %registry.info().name,
            version = %registry.info().version,
            activities = registry.len(),
            currencies = registry.currencies().len(),
            "factor pack accepted"
        );
        Ok(registry)
    }

    /// Serialize to YAML.
    pub fn to_yaml_string(&self) -> PackResult<String> {
        serde_yaml::to_string(self).map_err(|e| FactorPackError::Serialize(e.to_string()))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> PackResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| FactorPackError::Serialize(e.to_string()))
    }
}

impl FactorRegistry {
    /// Load and validate a factor pack file.
    pub fn load(path: &Path) -> PackResult<Self> {
        FactorPack::load(path)?.into_registry()
    }
}

fn parse_yaml(content: &str, origin: String) -> PackResult<FactorPack> {
    serde_yaml::from_str(content).map_err(|source| FactorPackError::YamlParse { origin, source })
}

fn parse_json(content: &str, origin: String) -> PackResult<FactorPack> {
    serde_json::from_str(content).map_err(|source| FactorPackError::JsonParse { origin, source })
}

fn unique_activities<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<ActivityId, ActivityDefinition>, D::Error>
where
    D: Deserializer<'de>,
{
    struct UniqueActivities;

    impl<'de> Visitor<'de> for UniqueActivities {
        type Value = BTreeMap<ActivityId, ActivityDefinition>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of activity id to activity definition")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut activities = BTreeMap::new();
            while let Some((id, definition)) = map.next_entry::<ActivityId, ActivityDefinition>()? {
                if activities.contains_key(&id) {
                    return Err(de::Error::custom(format!("duplicate activity id: {id}")));
                }
                activities.insert(id, definition);
            }
            Ok(activities)
        }
    }

    deserializer.deserialize_map(UniqueActivities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghg_core::EmissionScope;

    const MINIMAL: &str = r#"
name: minimal
version: "0.1"
activities:
  diesel:
    unit: litre
    scope: scope_1
    factor: 2.70564
"#;

    #[test]
    fn minimal_pack_defaults_currencies_to_base_only() {
        let registry = FactorPack::from_yaml_str(MINIMAL)
            .unwrap()
            .into_registry()
            .unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.info().source, "");
        assert_eq!(registry.currencies(), &CurrencyTable::base_only());
        assert_eq!(
            registry.get_definition("diesel").unwrap().scope(),
            EmissionScope::Scope1
        );
    }

    #[test]
    fn missing_default_rejected_at_load() {
        let yaml = r#"
name: gappy
version: "1"
activities:
  spend_misc:
    unit: USD
    scope: scope_3
    factors:
      metals: 0.72
"#;
        let err = FactorPack::from_yaml_str(yaml)
            .unwrap()
            .into_registry()
            .unwrap_err();
        match err {
            FactorPackError::Invalid { name, issues } => {
                assert_eq!(name, "gappy");
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].subject, "spend_misc");
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn malformed_yaml_names_origin() {
        let err = FactorPack::from_yaml_str("name: [unterminated").unwrap_err();
        assert!(err.to_string().contains(INLINE_ORIGIN), "{err}");
    }

    #[test]
    fn unknown_top_level_field_rejected() {
        let yaml = format!("{MINIMAL}extra: true\n");
        assert!(FactorPack::from_yaml_str(&yaml).is_err());
    }

    #[test]
    fn duplicate_activity_id_rejected() {
        let json = r#"{"name": "dup", "version": "1", "activities": {
            "diesel": {"unit": "litre", "scope": "scope_1", "factor": 2.7},
            "diesel": {"unit": "litre", "scope": "scope_1", "factor": 2.8}
        }}"#;
        let err = FactorPack::from_json_str(json).unwrap_err();
        assert!(matches!(err, FactorPackError::JsonParse { .. }));
        assert!(err.to_string().contains("duplicate activity id: diesel"), "{err}");
    }

    #[test]
    fn json_and_yaml_exports_parse_back() {
        let pack = FactorRegistry::builtin().to_pack();

        let yaml = pack.to_yaml_string().unwrap();
        assert_eq!(FactorPack::from_yaml_str(&yaml).unwrap(), pack);

        let json = pack.to_json_string().unwrap();
        assert_eq!(FactorPack::from_json_str(&json).unwrap(), pack);
    }
}
