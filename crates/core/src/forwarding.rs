//! Forwarding payload handed to the confirmation view.
//!
//! After a successful submission the normalized record travels to the
//! confirmation view as URL query parameters, so no server-side session is
//! needed. [`ConfirmationView`] is the reading side and never fails: absent
//! or malformed parameters render as empty values.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::onboarding::{OnboardingField, OnboardingInput};

/// Separator used to flatten `services` into one parameter.
pub const SERVICES_SEPARATOR: &str = ",";

// ---------------------------------------------------------------------------
// ForwardingPayload
// ---------------------------------------------------------------------------

/// The submitted record, flattened to string parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardingPayload {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub services: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_usd: Option<String>,
    pub project_start_date: String,
}

impl From<&OnboardingInput> for ForwardingPayload {
    fn from(input: &OnboardingInput) -> Self {
        let services = input
            .services
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(SERVICES_SEPARATOR);

        Self {
            full_name: input.full_name.clone(),
            email: input.email.clone(),
            company_name: input.company_name.clone(),
            services,
            budget_usd: input.budget_usd.map(|b| b.to_string()),
            project_start_date: input.project_start_date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl ForwardingPayload {
    /// Encode as `application/x-www-form-urlencoded` query parameters.
    ///
    /// Parameters appear in form order. `budgetUsd` is left out entirely
    /// when no budget was given.
    pub fn to_query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair(OnboardingField::FullName.as_str(), &self.full_name);
        query.append_pair(OnboardingField::Email.as_str(), &self.email);
        query.append_pair(OnboardingField::CompanyName.as_str(), &self.company_name);
        query.append_pair(OnboardingField::Services.as_str(), &self.services);
        if let Some(budget) = &self.budget_usd {
            query.append_pair(OnboardingField::BudgetUsd.as_str(), budget);
        }
        query.append_pair(
            OnboardingField::ProjectStartDate.as_str(),
            &self.project_start_date,
        );
        query.finish()
    }

    /// Location of the confirmation view carrying this payload.
    pub fn confirmation_url(&self, confirmation_path: &str) -> String {
        format!("{confirmation_path}?{}", self.to_query_string())
    }
}

// ---------------------------------------------------------------------------
// ConfirmationView
// ---------------------------------------------------------------------------

/// What the confirmation view displays, decoded from its query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmationView {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub services: Vec<String>,
    pub budget_usd: String,
    pub project_start_date: String,
}

impl ConfirmationView {
    /// Decode a query string, or a whole URL / path with one.
    ///
    /// Unknown parameters are ignored; repeated parameters keep the last
    /// value.
    pub fn from_query(query: &str) -> Self {
        let query = query.split_once('?').map_or(query, |(_, q)| q);
        let mut view = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let Ok(field) = key.parse::<OnboardingField>() else {
                continue;
            };
            let value = value.into_owned();
            match field {
                OnboardingField::FullName => view.full_name = value,
                OnboardingField::Email => view.email = value,
                OnboardingField::CompanyName => view.company_name = value,
                OnboardingField::Services => {
                    view.services = value
                        .split(SERVICES_SEPARATOR)
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                OnboardingField::BudgetUsd => view.budget_usd = value,
                OnboardingField::ProjectStartDate => view.project_start_date = value,
                OnboardingField::AcceptTerms => {}
            }
        }

        view
    }

    /// Label / value rows in form order, for rendering.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            (OnboardingField::FullName.label(), self.full_name.clone()),
            (OnboardingField::Email.label(), self.email.clone()),
            (OnboardingField::CompanyName.label(), self.company_name.clone()),
            (OnboardingField::Services.label(), self.services.join(", ")),
            (OnboardingField::BudgetUsd.label(), self.budget_usd.clone()),
            (
                OnboardingField::ProjectStartDate.label(),
                self.project_start_date.clone(),
            ),
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::Service;
    use chrono::NaiveDate;

    fn ada() -> OnboardingInput {
        OnboardingInput {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            company_name: "Engines Ltd".to_string(),
            services: [Service::WebDev].into_iter().collect(),
            budget_usd: None,
            project_start_date: NaiveDate::from_ymd_opt(2030, 7, 1).unwrap(),
            accept_terms: true,
        }
    }

    #[test]
    fn query_string_matches_form_encoding() {
        let payload = ForwardingPayload::from(&ada());
        assert_eq!(
            payload.to_query_string(),
            "fullName=Ada+Lovelace&email=ada%40example.com&companyName=Engines+Ltd\
             &services=Web+Dev&projectStartDate=2030-07-01"
        );
    }

    #[test]
    fn budget_and_multiple_services_are_encoded() {
        let mut input = ada();
        input.services = [Service::MobileApp, Service::UiUx].into_iter().collect();
        input.budget_usd = Some(2500);

        let query = ForwardingPayload::from(&input).to_query_string();
        assert!(query.contains("&services=UI%2FUX%2CMobile+App&"));
        assert!(query.contains("&budgetUsd=2500&"));
    }

    #[test]
    fn confirmation_url_prefixes_path() {
        let url = ForwardingPayload::from(&ada()).confirmation_url("/success");
        assert!(url.starts_with("/success?fullName=Ada+Lovelace&"));
    }

    #[test]
    fn view_reads_what_the_payload_wrote() {
        let mut input = ada();
        input.services = [Service::UiUx, Service::Branding].into_iter().collect();
        input.budget_usd = Some(750);
        let url = ForwardingPayload::from(&input).confirmation_url("/success");

        let view = ConfirmationView::from_query(&url);
        assert_eq!(view.full_name, "Ada Lovelace");
        assert_eq!(view.email, "ada@example.com");
        assert_eq!(view.services, vec!["UI/UX", "Branding"]);
        assert_eq!(view.budget_usd, "750");
        assert_eq!(view.project_start_date, "2030-07-01");
    }

    #[test]
    fn view_renders_absent_parameters_as_empty() {
        let view = ConfirmationView::from_query("fullName=Grace&bogus=1");
        assert_eq!(view.full_name, "Grace");
        assert_eq!(view.email, "");
        assert!(view.services.is_empty());
        assert_eq!(view.budget_usd, "");
    }

    #[test]
    fn view_tolerates_garbage() {
        assert_eq!(ConfirmationView::from_query(""), ConfirmationView::default());
        let view = ConfirmationView::from_query("&&=&services=,,&email=%ZZ");
        assert!(view.services.is_empty());
        assert_eq!(view.email, "%ZZ");
    }

    #[test]
    fn rows_follow_form_order() {
        let view = ConfirmationView::from_query("services=Branding%2CWeb+Dev");
        let rows = view.rows();
        assert_eq!(rows[0].0, "Full Name");
        assert_eq!(rows[3], ("Services Interested In", "Branding, Web Dev".to_string()));
    }
}
