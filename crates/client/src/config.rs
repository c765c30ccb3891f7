use url::Url;

use crate::error::ConfigError;

/// Env var holding the onboarding endpoint URL.
pub const ENV_ONBOARD_URL: &str = "ONBOARD_URL";
/// Env var holding the confirmation view path.
pub const ENV_CONFIRMATION_PATH: &str = "ONBOARD_CONFIRMATION_PATH";

/// Default path of the confirmation view.
pub const DEFAULT_CONFIRMATION_PATH: &str = "/success";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint that receives the onboarding POST.
    pub endpoint_url: Url,
    /// Path (or absolute URL) of the confirmation view.
    pub confirmation_path: String,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                     | Default    |
    /// |-----------------------------|------------|
    /// | `ONBOARD_URL`               | (required) |
    /// | `ONBOARD_CONFIRMATION_PATH` | `/success` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup(ENV_ONBOARD_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(ENV_ONBOARD_URL))?;
        let endpoint_url = parse_endpoint(&raw_url)?;

        let confirmation_path = lookup(ENV_CONFIRMATION_PATH)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIRMATION_PATH.into());

        Ok(Self {
            endpoint_url,
            confirmation_path,
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        var: ENV_ONBOARD_URL,
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            var: ENV_ONBOARD_URL,
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}
