//! Business travel by distance.
//!
//! Travel labels used by expense and booking systems map onto registry
//! activity ids. A label outside the table is used as an activity id
//! directly, so `flight_long` works as well as `flight_long_haul`.

use ghg_core::{GhgError, RoundingMode};
use ghg_factors::FactorRegistry;
use serde::{Deserialize, Serialize};

use crate::calculator::{calculate, EmissionResult};
use crate::resolver::Selectors;

/// Recognized travel labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelType {
    CarPetrol,
    CarDiesel,
    CarElectric,
    FlightDomestic,
    FlightShortHaul,
    FlightLongHaul,
    Train,
    Bus,
}

impl TravelType {
    /// Every travel label, in catalog order.
    pub fn all() -> &'static [TravelType] {
        &[
            Self::CarPetrol,
            Self::CarDiesel,
            Self::CarElectric,
            Self::FlightDomestic,
            Self::FlightShortHaul,
            Self::FlightLongHaul,
            Self::Train,
            Self::Bus,
        ]
    }

    /// The label as callers supply it; matches the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CarPetrol => "car_petrol",
            Self::CarDiesel => "car_diesel",
            Self::CarElectric => "car_electric",
            Self::FlightDomestic => "flight_domestic",
            Self::FlightShortHaul => "flight_short_haul",
            Self::FlightLongHaul => "flight_long_haul",
            Self::Train => "train",
            Self::Bus => "bus",
        }
    }

    /// Registry activity the label resolves to.
    pub fn activity_id(&self) -> &'static str {
        match self {
            Self::CarPetrol => "car_petrol",
            Self::CarDiesel => "car_diesel",
            Self::CarElectric => "car_electric",
            Self::FlightDomestic => "flight_short",
            Self::FlightShortHaul => "flight_medium",
            Self::FlightLongHaul => "flight_long",
            Self::Train => "rail",
            Self::Bus => "bus",
        }
    }

    /// Parse an exact label, `None` when unknown.
    ///
    /// ```
    /// use ghg_engine::TravelType;
    ///
    /// let long_haul = TravelType::from_label("flight_long_haul").unwrap();
    /// assert_eq!(long_haul.activity_id(), "flight_long");
    /// assert!(TravelType::from_label("Flight_Long_Haul").is_none());
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.as_str() == label)
    }
}

impl std::fmt::Display for TravelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a travel label to its activity id; unknown labels pass through.
pub fn travel_activity_id(travel_type: &str) -> &str {
    TravelType::from_label(travel_type).map_or(travel_type, |t| t.activity_id())
}

/// `travel_class` selects a variant (cabin class, vehicle size).
pub fn calculate_travel(
    registry: &FactorRegistry,
    rounding: RoundingMode,
    distance_km: f64,
    travel_type: &str,
    travel_class: Option<&str>,
) -> Result<EmissionResult, GhgError> {
    let selectors = Selectors {
        variant: travel_class,
        ..Selectors::default()
    };
    calculate(
        registry,
        rounding,
        travel_activity_id(travel_type),
        distance_km,
        &selectors,
    )
}
