#![deny(missing_docs)]

//! # credstore-core: Foundational Types for the Credential Store
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies, only `serde`, `serde_json`,
//! and `thiserror` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **One normalization path for scalar-or-list inputs.** Query and index
//!    fields that accept either a single value or an array are modelled as
//!    [`OneOrMany`] and flattened with [`OneOrMany::into_vec`]. No ad hoc
//!    per-field `is_array()` checks.
//!
//! 2. **Issuer derivation is pure.** [`derive_issuer_id`] inspects a
//!    credential payload and returns its canonical issuer identifier or a
//!    [`ValidationError`]. It performs no I/O.

pub mod error;
pub mod issuer;
pub mod one_or_many;

// Re-export primary types at crate root for ergonomic imports.
pub use error::ValidationError;
pub use issuer::derive_issuer_id;
pub use one_or_many::OneOrMany;
