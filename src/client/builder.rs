use crate::client::core::ApiClient;
use crate::client::policy::SuccessPolicy;
use crate::client::state::ClientState;
use crate::config::ClientConfig;
use crate::platform::{Navigator, NoopNavigator, NoopNotifier, Notifier};
use crate::storage::{MemoryStorage, Storage};
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`ApiClient`].
///
/// Only the base URL is mandatory; collaborators default to in-memory
/// storage and no-op platform hooks so the client works headless.
pub struct ApiClientBuilder {
    config: ClientConfig,
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            storage: Arc::new(MemoryStorage::new()),
            notifier: Arc::new(NoopNotifier),
            navigator: Arc::new(NoopNavigator),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Replace the whole configuration, e.g. one from [`ClientConfig::from_env`].
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Storage key the bearer token lives under.
    pub fn token_key(mut self, key: impl Into<String>) -> Self {
        self.config.token_key = key.into();
        self
    }

    /// Extra storage keys purged when authentication expires.
    pub fn session_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.session_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Route navigated to after authentication expires.
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.config.login_path = path.into();
        self
    }

    /// Pause between the expiry notice and the login redirect.
    pub fn login_redirect_delay(mut self, delay: Duration) -> Self {
        self.config.login_redirect_delay = delay;
        self
    }

    /// Per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Success policy applied when a call doesn't pick one explicitly.
    pub fn default_policy(mut self, policy: SuccessPolicy) -> Self {
        self.config.default_policy = policy;
        self
    }

    /// Inject a storage backend. Default is in-memory.
    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = storage;
        self
    }

    /// Inject a notifier. Default swallows notices.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Inject a navigator. Default ignores navigation.
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Validate the configuration and build the client.
    pub fn build(self) -> Result<ApiClient> {
        self.config.validate()?;

        let mut http = reqwest::Client::builder();
        if let Some(timeout) = self.config.timeout {
            http = http.timeout(timeout);
        }
        let http = http.build()?;

        Ok(ApiClient {
            http,
            config: self.config,
            storage: self.storage,
            notifier: self.notifier,
            navigator: self.navigator,
            state: Arc::new(ClientState::new()),
        })
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_base_url() {
        let err = ApiClientBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("base URL is required"));
    }

    #[test]
    fn setters_thread_into_config() {
        let client = ApiClient::builder()
            .base_url("https://api.lettings.example/api")
            .token_key("session-token")
            .session_keys(["user", "tenancy"])
            .login_path("/account/login")
            .login_redirect_delay(Duration::from_millis(200))
            .timeout(Duration::from_secs(5))
            .default_policy(SuccessPolicy::SuccessFlag)
            .build()
            .unwrap();

        let config = client.config();
        assert_eq!(config.token_key, "session-token");
        assert_eq!(config.session_keys, vec!["user", "tenancy"]);
        assert_eq!(config.login_path, "/account/login");
        assert_eq!(config.login_redirect_delay, Duration::from_millis(200));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.default_policy, SuccessPolicy::SuccessFlag);
    }

    #[test]
    fn fresh_client_is_idle() {
        let client = ApiClient::new("https://api.lettings.example").unwrap();
        assert!(!client.is_loading());
        assert_eq!(client.last_error(), None);
    }
}
