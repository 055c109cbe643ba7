//! Redacted copies of person names and family records.
//!
//! # Responsibility
//! - Build detached copies of names and families with living people's
//!   identifying data replaced or removed.
//!
//! # Invariants
//! - Inputs are never mutated; every result is a fresh value.
//! - Redaction is closed: redacting an already redacted value again
//!   yields the same value.

pub mod family;
pub mod name;

pub use family::FamilyRedactor;
pub use name::{NameRedactor, RestrictMode};
