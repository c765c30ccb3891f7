//! Submission lifecycle of one onboarding form.
//!
//! ```text
//! Idle ──submit──▶ Validating ──fail──▶ IdleWithError ──submit──▶ Validating …
//!                      │
//!                      └─pass─▶ Submitting ──non-2xx / transport error──▶ IdleWithError
//!                                    │
//!                                    └─2xx─▶ Success (terminal)
//! ```
//!
//! Methods take `&self` so the presentation layer can keep reading state
//! while a submission is in flight. The state lock is never held across the
//! network call; a submit arriving while another is validating or in flight
//! is rejected, not queued. Dropping a `submit` future before it resolves
//! returns the form to `IdleWithError` with its values intact.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{Local, NaiveDate};
use onboard_core::{validate_on, ErrorMap, ForwardingPayload, RawInput};

use crate::delivery::OnboardingTransport;
use crate::error::GENERIC_SUBMISSION_MESSAGE;

/// Source of "today" for the start-date check.
pub type Clock = Box<dyn Fn() -> NaiveDate + Send + Sync>;

// ---------------------------------------------------------------------------
// Phase and outcome
// ---------------------------------------------------------------------------

/// Where the form is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Submitting,
    IdleWithError,
    Success,
}

impl FormPhase {
    /// Whether the submit action is enabled in this phase.
    pub fn accepts_submit(self) -> bool {
        matches!(self, Self::Idle | Self::IdleWithError)
    }
}

/// Why a submit call was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Another submission is validating or awaiting the endpoint.
    InFlight,
    /// The form was already submitted successfully.
    Completed,
}

/// Result of one call to [`SubmissionController::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The endpoint accepted the record; navigate with this payload.
    Submitted(ForwardingPayload),
    /// Validation failed; nothing was sent.
    Invalid(ErrorMap),
    /// The endpoint rejected the record or could not be reached.
    Failed(String),
    /// The call was ignored.
    Rejected(RejectReason),
}

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct FormState {
    phase: FormPhase,
    values: RawInput,
    field_errors: ErrorMap,
    server_error: Option<String>,
    payload: Option<ForwardingPayload>,
}

impl FormState {
    fn new() -> Self {
        Self {
            phase: FormPhase::Idle,
            values: RawInput::new(),
            field_errors: ErrorMap::new(),
            server_error: None,
            payload: None,
        }
    }
}

// ---------------------------------------------------------------------------
// SubmissionController
// ---------------------------------------------------------------------------

/// Owns the lifecycle phase and error state of one onboarding form.
pub struct SubmissionController<T> {
    transport: T,
    clock: Clock,
    state: Mutex<FormState>,
}

impl<T: OnboardingTransport> SubmissionController<T> {
    /// Create a controller that judges start dates against the local date.
    pub fn new(transport: T) -> Self {
        Self::with_clock(transport, Box::new(|| Local::now().date_naive()))
    }

    /// Create a controller with an explicit source of "today".
    pub fn with_clock(transport: T, clock: Clock) -> Self {
        Self {
            transport,
            clock,
            state: Mutex::new(FormState::new()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate `raw` and, if it passes, send it to the endpoint.
    ///
    /// `raw` becomes the form's current values and is kept unchanged when
    /// validation or delivery fails, so the user can correct and retry.
    pub async fn submit(&self, raw: RawInput) -> SubmitOutcome {
        {
            let mut state = self.state();
            match state.phase {
                FormPhase::Validating | FormPhase::Submitting => {
                    tracing::debug!("Submit ignored, submission already in progress");
                    return SubmitOutcome::Rejected(RejectReason::InFlight);
                }
                FormPhase::Success => {
                    tracing::debug!("Submit ignored, form already submitted");
                    return SubmitOutcome::Rejected(RejectReason::Completed);
                }
                FormPhase::Idle | FormPhase::IdleWithError => {}
            }
            state.phase = FormPhase::Validating;
            state.values = raw.clone();
            state.field_errors = ErrorMap::new();
            state.server_error = None;
        }
        let attempt = AttemptGuard::new(&self.state);

        let input = match validate_on(&raw, (self.clock)()) {
            Ok(input) => input,
            Err(errors) => {
                tracing::info!(
                    invalid_fields = errors.len(),
                    "Onboarding form failed validation"
                );
                attempt.disarm();
                let mut state = self.state();
                state.phase = FormPhase::IdleWithError;
                state.field_errors = errors.clone();
                return SubmitOutcome::Invalid(errors);
            }
        };

        self.state().phase = FormPhase::Submitting;
        tracing::info!(company = %input.company_name, "Submitting onboarding form");

        let sent = self.transport.send(&input).await;
        attempt.disarm();

        match sent {
            Ok(()) => {
                let payload = ForwardingPayload::from(&input);
                let mut state = self.state();
                state.phase = FormPhase::Success;
                state.values = RawInput::new();
                state.payload = Some(payload.clone());
                tracing::info!(company = %input.company_name, "Onboarding form submitted");
                SubmitOutcome::Submitted(payload)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Onboarding submission failed");
                let mut state = self.state();
                state.phase = FormPhase::IdleWithError;
                state.server_error = Some(GENERIC_SUBMISSION_MESSAGE.to_string());
                SubmitOutcome::Failed(GENERIC_SUBMISSION_MESSAGE.to_string())
            }
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.state().phase
    }

    /// Whether the submit action should be enabled.
    pub fn can_submit(&self) -> bool {
        self.phase().accepts_submit()
    }

    /// Values of the most recent attempt; empty once submitted successfully.
    pub fn values(&self) -> RawInput {
        self.state().values.clone()
    }

    pub fn field_errors(&self) -> ErrorMap {
        self.state().field_errors.clone()
    }

    /// The single top-level error message, if the last delivery failed.
    pub fn server_error(&self) -> Option<String> {
        self.state().server_error.clone()
    }

    /// Payload for the confirmation view, once in [`FormPhase::Success`].
    pub fn forwarding_payload(&self) -> Option<ForwardingPayload> {
        self.state().payload.clone()
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        lock(&self.state)
    }
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// AttemptGuard
// ---------------------------------------------------------------------------

/// Releases the in-flight phase if a submission is abandoned mid-way.
///
/// Armed once a submit leaves `Idle`; if dropped while still armed (the
/// caller dropped the future), the form falls back to `IdleWithError`.
struct AttemptGuard<'a> {
    state: &'a Mutex<FormState>,
    armed: bool,
}

impl<'a> AttemptGuard<'a> {
    fn new(state: &'a Mutex<FormState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = lock(self.state);
        if matches!(state.phase, FormPhase::Validating | FormPhase::Submitting) {
            tracing::warn!("Onboarding submission abandoned before completion");
            state.phase = FormPhase::IdleWithError;
            state.server_error = Some(GENERIC_SUBMISSION_MESSAGE.to_string());
        }
    }
}
