//! Delivery of a validated onboarding record to the remote endpoint.
//!
//! [`HttpTransport`] sends the normalized [`OnboardingInput`] as a JSON body
//! via HTTP POST. Exactly one attempt is made per call; a non-2xx status and
//! a transport failure are both reported as a [`SubmissionError`].

use async_trait::async_trait;
use onboard_core::OnboardingInput;
use url::Url;

use crate::error::SubmissionError;

// ---------------------------------------------------------------------------
// Transport seam
// ---------------------------------------------------------------------------

/// Sends a validated record to wherever onboarding submissions go.
#[async_trait]
pub trait OnboardingTransport: Send + Sync {
    /// Deliver one record. `Ok(())` means the endpoint accepted it.
    async fn send(&self, input: &OnboardingInput) -> Result<(), SubmissionError>;
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// Posts onboarding records to an HTTP endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Create a transport with a default HTTP client.
    ///
    /// No request timeout is configured; a stalled endpoint is bounded only
    /// by the client's own defaults.
    pub fn new(endpoint: Url) -> Result<Self, SubmissionError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Create a transport around an existing client.
    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl OnboardingTransport for HttpTransport {
    async fn send(&self, input: &OnboardingInput) -> Result<(), SubmissionError> {
        tracing::debug!(endpoint = %self.endpoint, "Posting onboarding submission");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(input)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::HttpStatus(status.as_u16()));
        }

        tracing::debug!(status = status.as_u16(), "Onboarding endpoint accepted submission");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_endpoint() {
        let url = Url::parse("http://localhost:9/onboard").unwrap();
        let transport = HttpTransport::new(url.clone()).unwrap();
        assert_eq!(transport.endpoint(), &url);
    }

    #[test]
    fn submission_error_display_http_status() {
        let err = SubmissionError::HttpStatus(502);
        assert_eq!(err.to_string(), "Onboarding endpoint returned HTTP 502");
    }

    #[test]
    fn submission_error_display_request() {
        // Build a reqwest error from an invalid URL.
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = SubmissionError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
