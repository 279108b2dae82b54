//! # Domain Helpers
//!
//! Thin wrappers that translate common business inputs into calculator
//! calls. Each helper resolves through the same registry and rounding as
//! [`calculate`](crate::calculator::calculate) and adds its own echo fields
//! to the standard [`EmissionResult`](crate::EmissionResult).

pub mod electricity;
pub mod spend;
pub mod travel;
