//! Host platform hooks.
//!
//! The client needs two things from the application embedding it: a way to
//! surface short notices to the user and a way to change the current route.
//! Both are traits so the crate stays free of UI concerns. Hosts wire in
//! their own implementations; the no-op defaults keep headless use (scripts,
//! tests) working without ceremony.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Surfaces short, transient notices to the user.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn toast(&self, message: &str);
}

/// Route control plus access to page parameters, when the host has any.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate_to(&self, path: &str);

    /// Query parameters of the page currently on screen.
    async fn current_params(&self) -> Option<HashMap<String, String>> {
        None
    }

    /// Query parameters the application was launched with.
    async fn launch_params(&self) -> Option<HashMap<String, String>> {
        None
    }
}

/// Notifier that swallows every notice.
#[derive(Debug, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn toast(&self, _message: &str) {}
}

/// Navigator that ignores every navigation request.
#[derive(Debug, Default)]
pub struct NoopNavigator;

#[async_trait]
impl Navigator for NoopNavigator {
    async fn navigate_to(&self, _path: &str) {}
}

/// Notifier that emits notices through `tracing`.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn toast(&self, message: &str) {
        tracing::info!(toast = message, "user notice");
    }
}

/// Recording notifier for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RwLock<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.read().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn toast(&self, message: &str) {
        self.messages.write().unwrap().push(message.to_string());
    }
}

/// Recording navigator for tests.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: RwLock<Vec<String>>,
    current: RwLock<Option<HashMap<String, String>>>,
    launch: RwLock<Option<HashMap<String, String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.read().unwrap().clone()
    }

    pub fn set_current_params(&self, params: HashMap<String, String>) {
        *self.current.write().unwrap() = Some(params);
    }

    pub fn set_launch_params(&self, params: HashMap<String, String>) {
        *self.launch.write().unwrap() = Some(params);
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn navigate_to(&self, path: &str) {
        self.visited.write().unwrap().push(path.to_string());
    }

    async fn current_params(&self) -> Option<HashMap<String, String>> {
        self.current.read().unwrap().clone()
    }

    async fn launch_params(&self) -> Option<HashMap<String, String>> {
        self.launch.read().unwrap().clone()
    }
}

/// Best-effort page parameters: the current page's if available, otherwise
/// the launch parameters, otherwise empty.
pub async fn page_params(navigator: &dyn Navigator) -> HashMap<String, String> {
    if let Some(params) = navigator.current_params().await {
        return params;
    }
    if let Some(params) = navigator.launch_params().await {
        return params;
    }
    HashMap::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn page_params_prefers_current_page() {
        let navigator = RecordingNavigator::new();
        navigator.set_launch_params(HashMap::from([(
            "from".to_string(),
            "launch".to_string(),
        )]));
        navigator.set_current_params(HashMap::from([("from".to_string(), "page".to_string())]));

        let params = page_params(&navigator).await;
        assert_eq!(params.get("from"), Some(&"page".to_string()));
    }

    #[tokio::test]
    async fn page_params_falls_back_to_launch() {
        let navigator = RecordingNavigator::new();
        navigator.set_launch_params(HashMap::from([("id".to_string(), "42".to_string())]));

        let params = page_params(&navigator).await;
        assert_eq!(params.get("id"), Some(&"42".to_string()));
    }

    #[tokio::test]
    async fn page_params_empty_when_host_has_none() {
        let navigator = NoopNavigator;
        assert!(page_params(&navigator).await.is_empty());
    }

    #[tokio::test]
    async fn recording_navigator_tracks_visits() {
        let navigator = RecordingNavigator::new();
        navigator.navigate_to("/login").await;
        navigator.navigate_to("/home").await;
        assert_eq!(navigator.visited(), vec!["/login", "/home"]);
    }
}
