//! # Yearly Emission Inventory
//!
//! Aggregates many activity records into a reporting-year inventory with
//! per-scope and overall totals.
//!
//! ## Period assignment
//!
//! A record belongs to the year of its `period_end`, or of its
//! `period_start` when only that is set. Records without dates are
//! always included. Records dated outside the reporting year are skipped
//! and counted.
//!
//! ## Totals
//!
//! Totals sum the already-rounded per-record kilograms, so a reader can
//! reproduce them from the listed entries. Each total is rounded again to
//! kilogram precision; tonnes derive from the rounded kilogram total.
//!
//! A failing record does not abort the inventory. It is listed with its
//! error kind and message, and contributes nothing to the totals.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use ghg_core::{
    round_decimal, round_decimal_scaled, EmissionScope, RoundingMode, KG_DECIMALS, TONNE_DECIMALS,
};
use serde::{Deserialize, Serialize};

use crate::engine::EmissionEngine;
use crate::request::{CalculationOutcome, CalculationRequest};

/// One dated activity to include in an inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActivityRecord {
    /// Caller reference (invoice number, meter id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<NaiveDate>,
    pub request: CalculationRequest,
}

impl ActivityRecord {
    pub fn new(request: CalculationRequest) -> Self {
        Self {
            id: None,
            period_start: None,
            period_end: None,
            request,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_period(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.period_start = start;
        self.period_end = end;
        self
    }

    /// The date that assigns the record to a year.
    pub fn reporting_date(&self) -> Option<NaiveDate> {
        self.period_end.or(self.period_start)
    }

    pub fn falls_in_year(&self, year: i32) -> bool {
        self.reporting_date().map_or(true, |d| d.year() == year)
    }
}

/// A calculated record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Position of the record in the input.
    pub index: usize,
    pub outcome: CalculationOutcome,
}

/// A record that could not be calculated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryFailure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub index: usize,
    /// [`GhgError::kind`](ghg_core::GhgError::kind) tag.
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeTotal {
    pub emissions_kg_co2e: f64,
    pub emissions_tonnes_co2e: f64,
    pub entries: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorSetReference {
    pub name: String,
    pub version: String,
    pub fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryReport {
    pub reporting_year: i32,
    pub factor_set: FactorSetReference,
    pub rounding: RoundingMode,
    pub entries: Vec<InventoryEntry>,
    pub failures: Vec<InventoryFailure>,
    pub skipped_out_of_period: usize,
    pub scope_totals: BTreeMap<EmissionScope, ScopeTotal>,
    pub total_emissions_kg_co2e: f64,
    pub total_emissions_tonnes_co2e: f64,
}

impl InventoryReport {
    /// Kilogram total for one scope, zero when the scope has no entries.
    pub fn scope_kg(&self, scope: EmissionScope) -> f64 {
        self.scope_totals
            .get(&scope)
            .map_or(0.0, |t| t.emissions_kg_co2e)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Accumulates outcomes for one reporting year.
#[derive(Debug)]
pub struct EmissionInventory {
    reporting_year: i32,
    rounding: RoundingMode,
    entries: Vec<InventoryEntry>,
    failures: Vec<InventoryFailure>,
    skipped_out_of_period: usize,
}

impl EmissionInventory {
    pub fn new(reporting_year: i32, rounding: RoundingMode) -> Self {
        Self {
            reporting_year,
            rounding,
            entries: Vec::new(),
            failures: Vec::new(),
            skipped_out_of_period: 0,
        }
    }

    /// Evaluate every record with `engine` and build the report.
    pub fn compile(
        engine: &EmissionEngine,
        reporting_year: i32,
        records: &[ActivityRecord],
    ) -> InventoryReport {
        let mut inventory = Self::new(reporting_year, engine.config().rounding);
        for (index, record) in records.iter().enumerate() {
            inventory.add(engine, index, record);
        }
        let report = inventory.finish(engine);
        tracing::info!(
            year = reporting_year,
            entries = report.entries.len(),
            failures = report.failures.len(),
            skipped = report.skipped_out_of_period,
            total_kg = report.total_emissions_kg_co2e,
            "compiled emission inventory"
        );
        report
    }

    /// Evaluate one record into the inventory.
    pub fn add(&mut self, engine: &EmissionEngine, index: usize, record: &ActivityRecord) {
        if !record.falls_in_year(self.reporting_year) {
            tracing::debug!(
                index,
                id = record.id.as_deref().unwrap_or(""),
                year = self.reporting_year,
                "record outside reporting year"
            );
            self.skipped_out_of_period += 1;
            return;
        }
        match engine.evaluate(&record.request) {
            Ok(outcome) => self.entries.push(InventoryEntry {
                id: record.id.clone(),
                index,
                outcome,
            }),
            Err(e) => {
                tracing::debug!(index, kind = e.kind(), "record failed: {e}");
                self.failures.push(InventoryFailure {
                    id: record.id.clone(),
                    index,
                    kind: e.kind().to_owned(),
                    message: e.to_string(),
                });
            }
        }
    }

    pub fn finish(self, engine: &EmissionEngine) -> InventoryReport {
        let mut sums: BTreeMap<EmissionScope, (f64, usize)> = BTreeMap::new();
        for entry in &self.entries {
            let emission = entry.outcome.emission();
            let slot = sums.entry(emission.scope).or_insert((0.0, 0));
            slot.0 += emission.emissions_kg_co2e;
            slot.1 += 1;
        }

        let mut scope_totals = BTreeMap::new();
        let mut overall = 0.0;
        for (scope, (kg, entries)) in sums {
            overall += kg;
            let (kg, tonnes) = self.kg_and_tonnes(kg);
            scope_totals.insert(
                scope,
                ScopeTotal {
                    emissions_kg_co2e: kg,
                    emissions_tonnes_co2e: tonnes,
                    entries,
                },
            );
        }
        let (total_kg, total_tonnes) = self.kg_and_tonnes(overall);

        let registry = engine.registry();
        InventoryReport {
            reporting_year: self.reporting_year,
            factor_set: FactorSetReference {
                name: registry.info().name.clone(),
                version: registry.info().version.clone(),
                fingerprint: registry.fingerprint(),
            },
            rounding: self.rounding,
            entries: self.entries,
            failures: self.failures,
            skipped_out_of_period: self.skipped_out_of_period,
            scope_totals,
            total_emissions_kg_co2e: total_kg,
            total_emissions_tonnes_co2e: total_tonnes,
        }
    }

    fn kg_and_tonnes(&self, kg: f64) -> (f64, f64) {
        let kg = round_decimal(kg, KG_DECIMALS, self.rounding);
        (kg, round_decimal_scaled(kg, 3, TONNE_DECIMALS, self.rounding))
    }
}
