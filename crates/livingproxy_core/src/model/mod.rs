//! Genealogical domain model.
//!
//! # Responsibility
//! - Define the records owned by the underlying store.
//! - Provide the detached-copy builders used by redaction.
//!
//! # Invariants
//! - Every primary record is identified by a stable `Handle`.
//! - Redacted copies are new values; nothing here writes back to a store.

pub mod date;
pub mod event;
pub mod family;
pub mod handle;
pub mod name;
pub mod person;
pub mod record;
pub mod secondary;
