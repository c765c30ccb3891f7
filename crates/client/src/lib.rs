//! Onboarding submission client.
//!
//! Drives a filled-in onboarding form from "idle" to "success":
//!
//! - [`SubmissionController`] — the form's lifecycle state machine.
//! - [`OnboardingTransport`] — the seam to the remote endpoint, with
//!   [`HttpTransport`] as the production implementation.
//! - [`ClientConfig`] — endpoint and confirmation-view settings read from
//!   the environment.

pub mod config;
pub mod controller;
pub mod delivery;
pub mod error;

pub use config::ClientConfig;
pub use controller::{FormPhase, RejectReason, SubmissionController, SubmitOutcome};
pub use delivery::{HttpTransport, OnboardingTransport};
pub use error::{ConfigError, SubmissionError, GENERIC_SUBMISSION_MESSAGE};
