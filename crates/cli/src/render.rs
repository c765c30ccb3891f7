//! Plain-text rendering of form errors and the confirmation view.

use anyhow::{bail, Context};
use onboard_core::{ConfirmationView, ErrorMap, RawInput};
use serde_json::Value;

/// Parse a JSON document into raw form values.
pub fn parse_raw_input(text: &str) -> anyhow::Result<RawInput> {
    let value: Value = serde_json::from_str(text).context("Form input is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("Form input must be a JSON object, got {}", json_kind(&other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One `Label: message` line per offending field, in form order.
pub fn render_field_errors(errors: &ErrorMap) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {message}\n", field.label()))
        .collect()
}

/// The confirmation view; empty values render as blank.
pub fn render_confirmation(view: &ConfirmationView) -> String {
    let mut out = String::from("Thanks for submitting! Here is what we received:\n");
    for (label, value) in view.rows() {
        out.push_str(&format!("  {label}: {value}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use onboard_core::OnboardingField;

    use super::*;

    #[test]
    fn parses_object() {
        let raw = parse_raw_input(r#"{"fullName": "Ada", "acceptTerms": true}"#).unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw["acceptTerms"], true);
    }

    #[test]
    fn rejects_non_objects() {
        let err = parse_raw_input("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("an array"));
        assert!(parse_raw_input("{not json").is_err());
    }

    #[test]
    fn field_errors_render_in_form_order() {
        let mut errors = ErrorMap::new();
        errors.insert(OnboardingField::AcceptTerms, "You must accept terms");
        errors.insert(OnboardingField::FullName, "Full name is required");

        assert_eq!(
            render_field_errors(&errors),
            "Full Name: Full name is required\nAccept Terms: You must accept terms\n"
        );
    }

    #[test]
    fn confirmation_renders_blank_for_missing_values() {
        let view = ConfirmationView::from_query("fullName=Ada+Lovelace&services=Web+Dev");
        let text = render_confirmation(&view);
        assert!(text.contains("  Full Name: Ada Lovelace\n"));
        assert!(text.contains("  Services Interested In: Web Dev\n"));
        assert!(text.contains("  Email: \n"));
    }
}
