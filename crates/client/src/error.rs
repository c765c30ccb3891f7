/// The only message a user sees when submission fails, whatever the cause.
pub const GENERIC_SUBMISSION_MESSAGE: &str = "Failed to submit form";

/// Failure talking to the onboarding endpoint.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// The underlying HTTP request failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status code.
    #[error("Onboarding endpoint returned HTTP {0}")]
    HttpStatus(u16),
}

/// Missing or malformed client configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} is not a valid http(s) URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
}
