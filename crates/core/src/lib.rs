//! Onboarding domain logic.
//!
//! Pure building blocks shared by the submission client and the CLI:
//!
//! - [`onboarding`] — field names, the service catalogue and the normalized
//!   [`OnboardingInput`] record.
//! - [`validation`] — the schema validator mapping raw field values to a
//!   normalized record or an [`ErrorMap`].
//! - [`forwarding`] — the query-string payload handed to the confirmation
//!   view, and its defensive decoder.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod forwarding;
pub mod onboarding;
pub mod validation;

pub use forwarding::{ConfirmationView, ForwardingPayload};
pub use onboarding::{OnboardingField, OnboardingInput, RawInput, Service};
pub use validation::evaluator::{validate, validate_on};
pub use validation::rules::ErrorMap;
