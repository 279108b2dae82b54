//! # ghg-engine — Emission Calculation Engine
//!
//! Turns an activity description (type, quantity, region, variant,
//! sub-category) into a standardized CO2e result with full provenance.
//!
//! ## Components
//!
//! 1. **Resolver** ([`resolver`]) — picks the single applicable factor from
//!    an activity definition using a fixed precedence: region, then
//!    sub-category, then `"default"` for keyed definitions; variant, then
//!    base factor for single-factor definitions.
//!
//! 2. **Calculator** ([`calculator`]) — `quantity × factor`, kilograms and
//!    tonnes, rounded under the configured [`RoundingMode`](ghg_core::RoundingMode).
//!
//! 3. **Helpers** ([`helpers`]) — electricity with renewable share, travel
//!    label normalization, spend with currency conversion.
//!
//! 4. **Requests** ([`request`]) — a tagged request/outcome pair so callers
//!    can hand any calculation to [`EmissionEngine::evaluate`].
//!
//! 5. **Inventory** ([`inventory`]) — yearly aggregation of many records
//!    into per-scope totals, tolerant of individual record failures.
//!
//! ## Determinism
//!
//! The engine holds no mutable state. Identical inputs against the same
//! factor set and configuration always produce identical results, and an
//! [`EmissionEngine`] may be shared across threads without locks.

pub mod calculator;
pub mod config;
pub mod engine;
pub mod helpers;
pub mod inventory;
pub mod request;
pub mod resolver;

pub use calculator::EmissionResult;
pub use config::{ConfigError, EngineConfig, UnknownCurrencyPolicy};
pub use engine::{EmissionEngine, FactorDetail};
pub use helpers::electricity::ElectricityResult;
pub use helpers::spend::{SpendCategory, SpendResult};
pub use helpers::travel::TravelType;
pub use inventory::{
    ActivityRecord, EmissionInventory, FactorSetReference, InventoryEntry, InventoryFailure,
    InventoryReport, ScopeTotal,
};
pub use request::{CalculationOutcome, CalculationRequest};
pub use resolver::{FactorBasis, ResolvedFactor, Selectors};
