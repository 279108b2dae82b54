//! # ghg-factors — Emission Factor Registry
//!
//! The registry is the single source of truth for every activity's unit,
//! GHG Protocol scope and emission factors. Callers never hard-code those.
//!
//! - **Definitions** ([`definition`]): [`ActivityDefinition`] with a tagged
//!   [`FactorSpec`], either a single factor with optional variants or a
//!   selector-keyed factor map.
//!
//! - **Registry** ([`registry`]): [`FactorRegistry`], an immutable value
//!   built once and passed by reference into the engine. There is no global
//!   table; tests substitute alternate factor sets freely.
//!
//! - **Built-in set** ([`builtin`]): DEFRA UK 2024 conversion factors, EPA
//!   grid averages and EEIO spend intensities.
//!
//! - **Factor packs** ([`pack`]): versioned YAML/JSON files holding a full
//!   factor set. Loading validates the set and rejects it on any defect.
//!
//! - **Catalog** ([`catalog`]): read-only enumeration for discovery.
//!
//! ## Crate Policy
//!
//! - Depends only on `ghg-core` internally.
//! - A registry never changes after construction.

pub mod builtin;
pub mod catalog;
pub mod currency;
pub mod definition;
pub mod error;
pub mod pack;
pub mod registry;

pub use catalog::{CatalogEntry, FactorCatalog};
pub use currency::{CurrencyTable, BASE_CURRENCY};
pub use definition::{ActivityDefinition, DefinitionError, FactorSpec, KeyedFactors};
pub use error::{FactorPackError, PackResult};
pub use pack::FactorPack;
pub use registry::{FactorRegistry, FactorSetInfo, ValidationIssue};
