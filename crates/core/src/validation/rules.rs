//! Per-field validation checks and the error map they report into.
//!
//! Each `check_*` function inspects one raw value and returns either the
//! normalized value or the single message describing the first constraint
//! it violates.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use validator::ValidateEmail;

use crate::onboarding::{OnboardingField, Service};

/// Outcome of a single field check.
pub type Check<T> = Result<T, String>;

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

pub const FULL_NAME_MIN_CHARS: usize = 2;
pub const FULL_NAME_MAX_CHARS: usize = 80;
pub const COMPANY_NAME_MIN_CHARS: usize = 2;
pub const COMPANY_NAME_MAX_CHARS: usize = 100;
pub const BUDGET_MIN_USD: i64 = 100;
pub const BUDGET_MAX_USD: i64 = 1_000_000;

/// Date format accepted for `projectStartDate`.
pub const START_DATE_FORMAT: &str = "%Y-%m-%d";

static FULL_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z '\-]+$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const MSG_FULL_NAME_REQUIRED: &str = "Full name is required";
pub const MSG_FULL_NAME_PATTERN: &str = "Only letters, spaces, ' and - allowed";
pub const MSG_EMAIL_INVALID: &str = "Invalid email";
pub const MSG_COMPANY_NAME_REQUIRED: &str = "Company name is required";
pub const MSG_SERVICES_EMPTY: &str = "Select at least one service";
pub const MSG_SERVICES_NOT_A_LIST: &str = "Services must be a list of service names";
pub const MSG_BUDGET_NOT_A_NUMBER: &str = "Budget must be a number";
pub const MSG_BUDGET_NOT_WHOLE: &str = "Budget must be a whole number";
pub const MSG_START_DATE_INVALID: &str = "Start date must be a valid date (YYYY-MM-DD)";
pub const MSG_START_DATE_PAST: &str = "Start date must be today or later";
pub const MSG_ACCEPT_TERMS: &str = "You must accept terms";

// ---------------------------------------------------------------------------
// ErrorMap
// ---------------------------------------------------------------------------

/// Field name to human-readable failure message, one message per field.
///
/// A non-empty map is the only way an invalid submission is reported, so
/// every offending field is present at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("Validation failed for {} field(s)", .0.len())]
pub struct ErrorMap(BTreeMap<OnboardingField, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`. The first message recorded wins.
    pub fn insert(&mut self, field: OnboardingField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: OnboardingField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: OnboardingField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Offending fields in form order.
    pub fn fields(&self) -> impl Iterator<Item = OnboardingField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OnboardingField, &str)> + '_ {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trimmed text of a string value; `None` for anything else.
fn text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).map(str::trim)
}

/// Enforce an inclusive character-count range with the form's wording.
fn check_length(value: &str, label: &str, min: usize, max: usize) -> Check<()> {
    let chars = value.chars().count();
    if chars < min {
        return Err(format!("{label} must be at least {min} characters"));
    }
    if chars > max {
        return Err(format!("{label} must be at most {max} characters"));
    }
    Ok(())
}

/// Validate a whole-dollar amount given as a float.
fn whole_dollars(amount: f64) -> Check<i64> {
    if !amount.is_finite() {
        return Err(MSG_BUDGET_NOT_A_NUMBER.to_string());
    }
    if amount.fract() != 0.0 {
        return Err(MSG_BUDGET_NOT_WHOLE.to_string());
    }
    if amount < BUDGET_MIN_USD as f64 || amount > BUDGET_MAX_USD as f64 {
        return Err(budget_range_message());
    }
    Ok(amount as i64)
}

fn budget_range_message() -> String {
    format!("Budget must be between {BUDGET_MIN_USD} and {BUDGET_MAX_USD} USD")
}

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

/// 2–80 characters of ASCII letters, spaces, apostrophes and hyphens.
pub fn check_full_name(value: Option<&Value>) -> Check<String> {
    let name = text(value).ok_or_else(|| MSG_FULL_NAME_REQUIRED.to_string())?;
    check_length(name, "Full name", FULL_NAME_MIN_CHARS, FULL_NAME_MAX_CHARS)?;
    if !FULL_NAME_RE.is_match(name) {
        return Err(MSG_FULL_NAME_PATTERN.to_string());
    }
    Ok(name.to_string())
}

pub fn check_email(value: Option<&Value>) -> Check<String> {
    let email = text(value)
        .map(str::to_string)
        .ok_or_else(|| MSG_EMAIL_INVALID.to_string())?;
    if !email.validate_email() || !has_public_domain(&email) {
        return Err(MSG_EMAIL_INVALID.to_string());
    }
    Ok(email)
}

/// Domain must be dotted and end in a TLD of two or more ASCII letters.
/// Address literals (`[127.0.0.1]`) are rejected.
fn has_public_domain(email: &str) -> bool {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if domain.starts_with('[') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && host.split('.').all(|label| !label.is_empty())
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

pub fn check_company_name(value: Option<&Value>) -> Check<String> {
    let company = text(value).ok_or_else(|| MSG_COMPANY_NAME_REQUIRED.to_string())?;
    check_length(
        company,
        "Company name",
        COMPANY_NAME_MIN_CHARS,
        COMPANY_NAME_MAX_CHARS,
    )?;
    Ok(company.to_string())
}

/// Accepts the shapes a checkbox group produces: a list of labels, a single
/// label, or nothing at all (`null`, `false`, absent).
pub fn check_services(value: Option<&Value>) -> Check<BTreeSet<Service>> {
    let labels: Vec<&Value> = match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Vec::new(),
        Some(single @ Value::String(_)) => vec![single],
        Some(Value::Array(items)) => items.iter().collect(),
        Some(_) => return Err(MSG_SERVICES_NOT_A_LIST.to_string()),
    };

    let mut services = BTreeSet::new();
    for label in labels {
        let label = label
            .as_str()
            .ok_or_else(|| MSG_SERVICES_NOT_A_LIST.to_string())?;
        let label = label.trim();
        let service = label.parse::<Service>().map_err(|_| {
            format!(
                "Unknown service '{label}'. Must be one of: {}",
                Service::valid_labels()
            )
        })?;
        services.insert(service);
    }

    if services.is_empty() {
        return Err(MSG_SERVICES_EMPTY.to_string());
    }
    Ok(services)
}

/// Optional; blank or `null` means no budget was given.
pub fn check_budget(value: Option<&Value>) -> Check<Option<u32>> {
    let dollars = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(whole) => whole,
            None => whole_dollars(n.as_f64().unwrap_or(f64::NAN))?,
        },
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            match trimmed.parse::<i64>() {
                Ok(whole) => whole,
                Err(_) => {
                    let amount = trimmed
                        .parse::<f64>()
                        .map_err(|_| MSG_BUDGET_NOT_A_NUMBER.to_string())?;
                    whole_dollars(amount)?
                }
            }
        }
        Some(_) => return Err(MSG_BUDGET_NOT_A_NUMBER.to_string()),
    };

    if !(BUDGET_MIN_USD..=BUDGET_MAX_USD).contains(&dollars) {
        return Err(budget_range_message());
    }
    u32::try_from(dollars)
        .map(Some)
        .map_err(|_| budget_range_message())
}

/// Compares calendar dates only; `today` is supplied by the caller.
pub fn check_start_date(value: Option<&Value>, today: NaiveDate) -> Check<NaiveDate> {
    let date = text(value)
        .and_then(|s| NaiveDate::parse_from_str(s, START_DATE_FORMAT).ok())
        .ok_or_else(|| MSG_START_DATE_INVALID.to_string())?;
    if date < today {
        return Err(MSG_START_DATE_PAST.to_string());
    }
    Ok(date)
}

/// Only a literal JSON `true` is acceptance.
pub fn check_accept_terms(value: Option<&Value>) -> Check<bool> {
    match value {
        Some(Value::Bool(true)) => Ok(true),
        _ => Err(MSG_ACCEPT_TERMS.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
