//! Onboarding schema validation.
//!
//! [`rules`] holds the per-field checks and the [`ErrorMap`](rules::ErrorMap)
//! they report into; [`evaluator`] runs every check against a raw form
//! submission and assembles the normalized record. Pure logic, no I/O.

pub mod evaluator;
pub mod rules;
