//! # Calculation Requests
//!
//! A single serde-tagged request type covering every calculation the
//! engine offers, and the matching outcome. Collaborators that receive
//! work as data (an HTTP layer, a batch importer, the CLI) deserialize a
//! [`CalculationRequest`] and hand it to
//! [`EmissionEngine::evaluate`](crate::EmissionEngine::evaluate).
//!
//! ```json
//! {"kind": "spend", "spend_amount": 1000, "category": "services",
//!  "sub_category": "consulting", "currency": "EUR"}
//! ```

use serde::{Deserialize, Serialize};

use crate::calculator::EmissionResult;
use crate::helpers::electricity::ElectricityResult;
use crate::helpers::spend::SpendResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum CalculationRequest {
    /// Direct calculation against a registry activity.
    Activity {
        activity_id: String,
        quantity: f64,
        #[serde(default)]
        region: Option<String>,
        #[serde(default)]
        variant: Option<String>,
        #[serde(default)]
        sub_category: Option<String>,
    },
    Electricity {
        kwh: f64,
        #[serde(default)]
        region: Option<String>,
        #[serde(default)]
        renewable_percentage: f64,
    },
    Travel {
        distance_km: f64,
        travel_type: String,
        #[serde(default)]
        travel_class: Option<String>,
    },
    Spend {
        spend_amount: f64,
        category: String,
        #[serde(default)]
        sub_category: Option<String>,
        #[serde(default)]
        currency: Option<String>,
    },
}

impl CalculationRequest {
    /// The request's tag as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Activity { .. } => "activity",
            Self::Electricity { .. } => "electricity",
            Self::Travel { .. } => "travel",
            Self::Spend { .. } => "spend",
        }
    }
}

/// Outcome of a [`CalculationRequest`], tagged the same way.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationOutcome {
    Activity(EmissionResult),
    Electricity(ElectricityResult),
    Travel(EmissionResult),
    Spend(SpendResult),
}

impl CalculationOutcome {
    /// The common result every outcome carries.
    pub fn emission(&self) -> &EmissionResult {
        match self {
            Self::Activity(r) | Self::Travel(r) => r,
            Self::Electricity(r) => &r.emission,
            Self::Spend(r) => &r.emission,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Activity(_) => "activity",
            Self::Electricity(_) => "electricity",
            Self::Travel(_) => "travel",
            Self::Spend(_) => "spend",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_request_from_json() {
        let req: CalculationRequest = serde_json::from_str(
            r#"{"kind": "spend", "spend_amount": 1000, "category": "services",
                "sub_category": "consulting", "currency": "EUR"}"#,
        )
        .unwrap();
        assert_eq!(
            req,
            CalculationRequest::Spend {
                spend_amount: 1000.0,
                category: "services".into(),
                sub_category: Some("consulting".into()),
                currency: Some("EUR".into()),
            }
        );
        assert_eq!(req.kind(), "spend");
    }

    #[test]
    fn optional_fields_default() {
        let req: CalculationRequest =
            serde_json::from_str(r#"{"kind": "electricity", "kwh": 250.5}"#).unwrap();
        assert_eq!(
            req,
            CalculationRequest::Electricity {
                kwh: 250.5,
                region: None,
                renewable_percentage: 0.0,
            }
        );
    }

    #[test]
    fn yaml_activity_request() {
        let req: CalculationRequest = serde_yaml::from_str(
            "kind: activity\nactivity_id: car_diesel\nquantity: 120\nvariant: large\n",
        )
        .unwrap();
        assert!(matches!(
            req,
            CalculationRequest::Activity { ref activity_id, quantity, .. }
                if activity_id == "car_diesel" && quantity == 120.0
        ));
    }

    #[test]
    fn unknown_kind_rejected() {
        let err = serde_json::from_str::<CalculationRequest>(r#"{"kind": "teleport"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn missing_required_field_rejected() {
        let err = serde_json::from_str::<CalculationRequest>(r#"{"kind": "travel", "distance_km": 5}"#);
        assert!(err.is_err());
    }
}
