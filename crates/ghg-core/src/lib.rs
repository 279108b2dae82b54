//! # ghg-core — Foundational Types for the Emission Engine
//!
//! Every other crate in the workspace depends on `ghg-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One error taxonomy.** [`GhgError`] distinguishes caller faults
//!    (`UnknownActivity`, `InvalidInput`) from factor-data defects
//!    (`FactorNotFound`) so the layer above can surface them differently.
//!
//! 2. **Single `EmissionScope` enum.** GHG Protocol scope classification is
//!    defined once, with exhaustive `match` everywhere it is consumed.
//!
//! 3. **Newtype for activity identifiers.** [`ActivityId`] keeps registry
//!    keys from being confused with region codes or currency codes.
//!
//! 4. **Fixed decimal rounding.** Reported figures go through
//!    [`round_decimal`], which rounds the shortest decimal form of a value
//!    under an explicit [`RoundingMode`]. Totals built from rounded figures
//!    are therefore reproducible across implementations.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ghg-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod rounding;
pub mod scope;

pub use error::GhgError;
pub use identity::{is_default_selector, ActivityId, DEFAULT_SELECTOR};
pub use rounding::{round_decimal, round_decimal_scaled, RoundingMode, KG_DECIMALS, TONNE_DECIMALS};
pub use scope::EmissionScope;
