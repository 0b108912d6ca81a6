//! Shared mock-server fixture for integration tests.

#![allow(dead_code)]

use lettings_client::platform::{RecordingNavigator, RecordingNotifier};
use lettings_client::storage::MemoryStorage;
use lettings_client::{ApiClient, SuccessPolicy};
use mockito::{Server, ServerGuard};
use std::sync::Arc;
use std::time::Duration;

/// A client wired to a mock server with recording collaborators.
pub struct TestHarness {
    pub server: ServerGuard,
    pub client: Arc<ApiClient>,
    pub storage: Arc<MemoryStorage>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
}

impl TestHarness {
    pub async fn new() -> Self {
        Self::with_policy(SuccessPolicy::HttpStatus).await
    }

    pub async fn with_policy(policy: SuccessPolicy) -> Self {
        let server = Server::new_async().await;
        let storage = Arc::new(MemoryStorage::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let navigator = Arc::new(RecordingNavigator::new());

        let client = ApiClient::builder()
            .base_url(server.url())
            .default_policy(policy)
            .login_redirect_delay(Duration::from_millis(10))
            .storage(storage.clone())
            .notifier(notifier.clone())
            .navigator(navigator.clone())
            .build()
            .expect("client should build against the mock server");

        Self {
            server,
            client: Arc::new(client),
            storage,
            notifier,
            navigator,
        }
    }

    pub async fn seed_token(&self, token: &str) {
        self.client
            .store_token(token)
            .await
            .expect("token should store");
    }
}
