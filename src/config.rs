//! Client configuration.
//!
//! Everything here has a sensible default except the base URL. Values can be
//! set programmatically through [`ApiClientBuilder`](crate::ApiClientBuilder)
//! or read from the environment with [`ClientConfig::from_env`].

use crate::client::policy::SuccessPolicy;
use crate::{Error, Result};
use std::time::Duration;

/// Storage key the bearer token lives under.
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Extra storage key purged alongside the token when authentication expires.
pub const DEFAULT_USER_KEY: &str = "user";

/// Route the client navigates to after authentication expires.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

const DEFAULT_LOGIN_REDIRECT_DELAY_MS: u64 = 1500;

/// Configuration for an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Host + path prefix prepended to relative request paths.
    pub base_url: String,
    /// Storage key holding the bearer token. Absence of the key means
    /// unauthenticated.
    pub token_key: String,
    /// Additional storage keys purged together with the token on auth expiry.
    pub session_keys: Vec<String>,
    /// Route passed to the navigator when authentication expires.
    pub login_path: String,
    /// Pause between the expiry notice and the login redirect, so the notice
    /// has time to render.
    pub login_redirect_delay: Duration,
    /// Per-request timeout. `None` leaves the HTTP layer's default in place.
    pub timeout: Option<Duration>,
    /// Success policy applied when a call doesn't pick one explicitly.
    pub default_policy: SuccessPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            session_keys: vec![DEFAULT_USER_KEY.to_string()],
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            login_redirect_delay: Duration::from_millis(DEFAULT_LOGIN_REDIRECT_DELAY_MS),
            timeout: None,
            default_policy: SuccessPolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Build a configuration from the environment.
    ///
    /// - `LETTINGS_BASE_URL` (required)
    /// - `LETTINGS_HTTP_TIMEOUT_SECS` (optional)
    /// - `LETTINGS_LOGIN_PATH` (optional)
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("LETTINGS_BASE_URL")
            .map_err(|_| Error::configuration("LETTINGS_BASE_URL is not set"))?;
        let mut config = Self::new(base_url);

        if let Some(secs) = std::env::var("LETTINGS_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Ok(path) = std::env::var("LETTINGS_LOGIN_PATH") {
            config.login_path = path;
        }

        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::configuration("base URL is required"));
        }
        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            Error::configuration(format!("invalid base URL `{}`: {}", self.base_url, e))
        })?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::configuration(format!(
                    "unsupported base URL scheme `{other}`"
                )))
            }
        }
        if self.token_key.is_empty() {
            return Err(Error::configuration("token storage key must be non-empty"));
        }
        Ok(())
    }
}
