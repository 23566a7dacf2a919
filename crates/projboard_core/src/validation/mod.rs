//! Declarative field validation.
//!
//! # Responsibility
//! - Evaluate one field's constraint set against a candidate value.
//! - Stay pure: no logging, no side effects, no error propagation.
//!
//! # Invariants
//! - A constraint whose target type differs from the value type is skipped.
//! - The result is the logical AND of all applicable checks.

pub mod constraint;

pub use constraint::{validate, violations, ConstraintDescriptor, ConstraintViolation, FieldValue};
