//! Core request dispatch.
//!
//! Every call funnels through [`ApiClient::request`]: resolve the URL,
//! attach the stored bearer token, send, then classify the response. 2xx
//! responses are interpreted under the call's [`SuccessPolicy`]; a 401
//! clears the session and schedules the login redirect; any other status
//! becomes [`Error::RequestFailed`] carrying the server's `message` when it
//! sent one. Transport failures surface as [`Error::Network`]. The client's
//! [`ClientState`] is updated along the way so hosts can observe loading
//! and the latest failure without threading callbacks through every call.

use crate::client::builder::ApiClientBuilder;
use crate::client::policy::{envelope_accepts, envelope_failure_message, SuccessPolicy};
use crate::client::state::{ClientState, LoadingGuard, StateSnapshot};
use crate::config::ClientConfig;
use crate::platform::{Navigator, Notifier};
use crate::query;
use crate::storage::Storage;
use crate::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Notice shown when a request comes back 401.
pub(crate) const SIGN_IN_EXPIRED_NOTICE: &str = "Session expired, please sign in again.";

/// Per-call options for [`ApiClient::request`].
///
/// The verb helpers cover the common cases; reach for this when a call needs
/// extra headers or its own success policy.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    /// JSON body. On GET requests an object body is flattened into the query
    /// string instead of being sent on the wire.
    pub body: Option<Value>,
    /// Extra headers, overriding the defaults on collision.
    pub headers: HashMap<String, String>,
    /// Success policy for this call. `None` uses the client default.
    pub policy: Option<SuccessPolicy>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn policy(mut self, policy: SuccessPolicy) -> Self {
        self.policy = Some(policy);
        self
    }
}

/// Asynchronous client for the Lettings REST API.
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ClientConfig,
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) navigator: Arc<dyn Navigator>,
    pub(crate) state: Arc<ClientState>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Client with default configuration against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Point-in-time copy of the request state.
    pub fn state(&self) -> StateSnapshot {
        self.state.snapshot()
    }

    /// Handle to the live request state, for hosts that poll it.
    pub fn shared_state(&self) -> Arc<ClientState> {
        Arc::clone(&self.state)
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.last_error()
    }

    /// The stored bearer token, if any.
    pub async fn token(&self) -> Result<Option<String>> {
        self.storage.get(&self.config.token_key).await
    }

    pub async fn store_token(&self, token: &str) -> Result<()> {
        self.storage.set(&self.config.token_key, token).await
    }

    pub async fn clear_token(&self) -> Result<()> {
        self.storage.remove(&self.config.token_key).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(path, RequestOptions::new(Method::GET)).await
    }

    /// GET with query parameters appended to the path.
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let path = query::append_query(path, params.iter().copied());
        self.request(&path, RequestOptions::new(Method::GET)).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
        let options = RequestOptions::new(Method::POST).body(serde_json::to_value(body)?);
        self.request(path, options).await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
        let options = RequestOptions::new(Method::PUT).body(serde_json::to_value(body)?);
        self.request(path, options).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(path, RequestOptions::new(Method::DELETE)).await
    }

    /// Send a request and decode the successful payload as `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let _guard = LoadingGuard::enter(&self.state);
        self.dispatch(path, options).await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let RequestOptions {
            method,
            body,
            headers: extra_headers,
            policy: call_policy,
        } = options;
        let policy = call_policy.unwrap_or(self.config.default_policy);
        let request_id = Uuid::new_v4().to_string();

        let (target, body) = prepare_target(path, &method, body);
        let url = self.resolve_url(&target);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.storage.get(&self.config.token_key).await? {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                Error::configuration("stored token contains invalid header characters")
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        for (name, value) in &extra_headers {
            let header = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::configuration(format!("invalid header name `{name}`: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::configuration(format!("invalid value for header `{name}`: {e}")))?;
            headers.insert(header, value);
        }

        debug!(method = %method, url = %url, request_id = %request_id, "dispatching request");

        let mut request = self
            .http
            .request(method, url.as_str())
            .headers(headers)
            .header("x-request-id", request_id.as_str());
        if let Some(body) = &body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.network_error(&url, &request_id, e)),
        };

        let status = response.status();
        if status.is_success() {
            return self.interpret_success(response, policy, &request_id).await;
        }
        if status.as_u16() == 401 {
            return Err(self.auth_expired(&request_id).await);
        }

        let code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| format!("request failed: {code}"));
        self.state.record_error(message.clone());
        warn!(http_status = code, request_id = %request_id, error = %message, "request failed");
        Err(Error::request_failed(code, message))
    }

    async fn interpret_success<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        policy: SuccessPolicy,
        request_id: &str,
    ) -> Result<T> {
        let code = response.status().as_u16();
        let url = response.url().to_string();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return Err(self.network_error(&url, request_id, e)),
        };

        match policy {
            SuccessPolicy::HttpStatus => {
                // An empty 2xx body decodes as JSON null so unit-typed calls work.
                let payload = if text.trim().is_empty() { "null" } else { text.as_str() };
                Ok(serde_json::from_str(payload)?)
            }
            SuccessPolicy::SuccessFlag => {
                let envelope: Value = if text.trim().is_empty() {
                    Value::Null
                } else {
                    serde_json::from_str(&text)?
                };
                if envelope_accepts(&envelope) {
                    return Ok(serde_json::from_value(envelope)?);
                }
                let message = envelope_failure_message(&envelope);
                self.state.record_error(message.clone());
                self.notifier.toast(&message).await;
                warn!(http_status = code, request_id = %request_id, error = %message, "server rejected request");
                Err(Error::request_failed(code, message))
            }
        }
    }

    /// Purge the session, notify the user, schedule the login redirect.
    ///
    /// Purge failures are logged but never override the expiry itself, and
    /// the redirect is delayed so the notice has time to render.
    async fn auth_expired(&self, request_id: &str) -> Error {
        info!(request_id = %request_id, "authentication expired, clearing session");

        if let Err(e) = self.storage.remove(&self.config.token_key).await {
            warn!(key = %self.config.token_key, error = %e, "failed to purge session key");
        }
        for key in &self.config.session_keys {
            if let Err(e) = self.storage.remove(key).await {
                warn!(key = %key, error = %e, "failed to purge session key");
            }
        }

        self.notifier.toast(SIGN_IN_EXPIRED_NOTICE).await;

        let navigator = Arc::clone(&self.navigator);
        let login_path = self.config.login_path.clone();
        let delay = self.config.login_redirect_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate_to(&login_path).await;
        });

        Error::AuthExpired
    }

    pub(crate) fn network_error(&self, url: &str, request_id: &str, source: reqwest::Error) -> Error {
        warn!(url = %url, request_id = %request_id, error = %source, "network request failed");
        self.state.record_error(format!("network request failed: {source}"));
        Error::Network(source)
    }

    pub(crate) fn resolve_url(&self, target: &str) -> String {
        if target.starts_with("http://") || target.starts_with("https://") {
            return target.to_string();
        }
        let base = self.config.base_url.trim_end_matches('/');
        if target.starts_with('/') {
            format!("{base}{target}")
        } else {
            format!("{base}/{target}")
        }
    }
}

/// On GET, fold an object body into the query string; otherwise pass through.
fn prepare_target(path: &str, method: &Method, body: Option<Value>) -> (String, Option<Value>) {
    match body {
        Some(params) if *method == Method::GET => {
            let pairs = query::pairs_from_object(&params);
            (query::append_query(path, pairs), None)
        }
        body => (path.to_string(), body),
    }
}
