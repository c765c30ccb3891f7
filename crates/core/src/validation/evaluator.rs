//! Schema evaluator — runs every field check, collecting all failures.

use chrono::{Local, NaiveDate};
use serde_json::Value;

use super::rules::{self, Check, ErrorMap};
use crate::onboarding::{OnboardingField, OnboardingInput, RawInput};

/// Validate a raw submission against today's local calendar date.
pub fn validate(raw: &RawInput) -> Result<OnboardingInput, ErrorMap> {
    validate_on(raw, Local::now().date_naive())
}

/// Validate a raw submission, treating `today` as the earliest allowed
/// project start date.
///
/// Every field is checked; the error map holds one message for each field
/// that failed. Unknown keys in `raw` are ignored.
pub fn validate_on(raw: &RawInput, today: NaiveDate) -> Result<OnboardingInput, ErrorMap> {
    let mut errors = ErrorMap::new();

    let full_name = collect(
        &mut errors,
        OnboardingField::FullName,
        rules::check_full_name(get(raw, OnboardingField::FullName)),
    );
    let email = collect(
        &mut errors,
        OnboardingField::Email,
        rules::check_email(get(raw, OnboardingField::Email)),
    );
    let company_name = collect(
        &mut errors,
        OnboardingField::CompanyName,
        rules::check_company_name(get(raw, OnboardingField::CompanyName)),
    );
    let services = collect(
        &mut errors,
        OnboardingField::Services,
        rules::check_services(get(raw, OnboardingField::Services)),
    );
    let budget_usd = collect(
        &mut errors,
        OnboardingField::BudgetUsd,
        rules::check_budget(get(raw, OnboardingField::BudgetUsd)),
    );
    let project_start_date = collect(
        &mut errors,
        OnboardingField::ProjectStartDate,
        rules::check_start_date(get(raw, OnboardingField::ProjectStartDate), today),
    );
    let accept_terms = collect(
        &mut errors,
        OnboardingField::AcceptTerms,
        rules::check_accept_terms(get(raw, OnboardingField::AcceptTerms)),
    );

    match (
        full_name,
        email,
        company_name,
        services,
        budget_usd,
        project_start_date,
        accept_terms,
    ) {
        (
            Some(full_name),
            Some(email),
            Some(company_name),
            Some(services),
            Some(budget_usd),
            Some(project_start_date),
            Some(accept_terms),
        ) if errors.is_empty() => Ok(OnboardingInput {
            full_name,
            email,
            company_name,
            services,
            budget_usd,
            project_start_date,
            accept_terms,
        }),
        _ => Err(errors),
    }
}

fn get(raw: &RawInput, field: OnboardingField) -> Option<&Value> {
    raw.get(field.as_str())
}

/// Record a failed check under `field`, passing successful values through.
fn collect<T>(errors: &mut ErrorMap, field: OnboardingField, check: Check<T>) -> Option<T> {
    match check {
        Ok(value) => Some(value),
        Err(message) => {
            errors.insert(field, message);
            None
        }
    }
}
