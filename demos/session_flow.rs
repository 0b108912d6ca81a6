//! Session lifecycle: file-backed token storage, auth expiry, and the
//! delayed login redirect.
//!
//! Runs against a live backend. The session lives in a JSON file under the
//! system temp directory, so a second run reuses the stored token until the
//! server rejects it.
//!
//! Usage:
//!   LETTINGS_BASE_URL=http://localhost:3000/api cargo run --example session_flow

use async_trait::async_trait;
use lettings_client::platform::{LogNotifier, Navigator};
use lettings_client::storage::FileStorage;
use lettings_client::{ApiClient, Error};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

struct PrintingNavigator;

#[async_trait]
impl Navigator for PrintingNavigator {
    async fn navigate_to(&self, path: &str) {
        println!("(navigate to {path})");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("lettings_client=debug")
        .init();

    let base_url = std::env::var("LETTINGS_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000/api".to_string());
    let session_path = std::env::temp_dir().join("lettings-session.json");

    let client = ApiClient::builder()
        .base_url(base_url)
        .storage(Arc::new(FileStorage::new(&session_path)))
        .notifier(Arc::new(LogNotifier))
        .navigator(Arc::new(PrintingNavigator))
        .build()?;

    match client.token().await? {
        Some(_) => println!("reusing session from {}", session_path.display()),
        None => {
            println!("no stored session, signing in...");
            let login: Value = client
                .post(
                    "/auth/login/password",
                    &json!({"phone": "07700900000", "password": "example-only"}),
                )
                .await?;
            if let Some(token) = login["data"]["token"].as_str() {
                client.store_token(token).await?;
                println!("session stored in {}", session_path.display());
            }
        }
    }

    match client.get::<Value>("/profile").await {
        Ok(profile) => println!("profile:\n{profile:#}"),
        Err(Error::AuthExpired) => {
            println!("session expired; stored token was cleared");
            // Give the delayed redirect a moment to fire before the process exits.
            let wait = client.config().login_redirect_delay + Duration::from_millis(100);
            tokio::time::sleep(wait).await;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
