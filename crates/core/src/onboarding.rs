//! Onboarding form fields, service catalogue and the normalized record.
//!
//! Defines the camelCase field names used on the wire and in the
//! forwarding payload, the closed set of services a client can pick, and
//! [`OnboardingInput`], the record produced by a successful validation.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Unvalidated form values keyed by camelCase field name.
pub type RawInput = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

/// The seven fields of the onboarding form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OnboardingField {
    FullName,
    Email,
    CompanyName,
    Services,
    BudgetUsd,
    ProjectStartDate,
    AcceptTerms,
}

impl OnboardingField {
    /// All fields in form order.
    pub const ALL: [OnboardingField; 7] = [
        Self::FullName,
        Self::Email,
        Self::CompanyName,
        Self::Services,
        Self::BudgetUsd,
        Self::ProjectStartDate,
        Self::AcceptTerms,
    ];

    /// Wire name of the field (JSON key and query parameter).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::CompanyName => "companyName",
            Self::Services => "services",
            Self::BudgetUsd => "budgetUsd",
            Self::ProjectStartDate => "projectStartDate",
            Self::AcceptTerms => "acceptTerms",
        }
    }

    /// Human-readable label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::CompanyName => "Company Name",
            Self::Services => "Services Interested In",
            Self::BudgetUsd => "Budget (USD)",
            Self::ProjectStartDate => "Project Start Date",
            Self::AcceptTerms => "Accept Terms",
        }
    }
}

impl fmt::Display for OnboardingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnboardingField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown onboarding field '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// Services a prospective client can be interested in.
///
/// Ordering follows declaration order, so a `BTreeSet<Service>` always
/// lists services the way the form does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Service {
    #[serde(rename = "UI/UX")]
    UiUx,
    #[serde(rename = "Branding")]
    Branding,
    #[serde(rename = "Web Dev")]
    WebDev,
    #[serde(rename = "Mobile App")]
    MobileApp,
}

impl Service {
    /// Every selectable service, in form order.
    pub const ALL: [Service; 4] = [Self::UiUx, Self::Branding, Self::WebDev, Self::MobileApp];

    /// Display label, which is also the submitted value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UiUx => "UI/UX",
            Self::Branding => "Branding",
            Self::WebDev => "Web Dev",
            Self::MobileApp => "Mobile App",
        }
    }

    /// Comma-separated list of valid labels, for error messages.
    pub fn valid_labels() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown service '{s}'. Must be one of: {}",
                    Self::valid_labels()
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Normalized record
// ---------------------------------------------------------------------------

/// An onboarding record that satisfied every constraint.
///
/// Only [`crate::validate`] constructs one from raw input; it is the JSON
/// body sent to the remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingInput {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub services: BTreeSet<Service>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_usd: Option<u32>,
    pub project_start_date: NaiveDate,
    pub accept_terms: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
