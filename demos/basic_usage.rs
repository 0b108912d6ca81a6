//! Basic usage: build a client from the environment and browse listings.
//!
//! Configuration comes from environment variables:
//! - LETTINGS_BASE_URL (required), e.g. http://localhost:3000/api
//! - LETTINGS_HTTP_TIMEOUT_SECS (optional)
//!
//! Usage:
//!   LETTINGS_BASE_URL=http://localhost:3000/api cargo run --example basic_usage

use lettings_client::{ApiClient, ClientConfig};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = ClientConfig::from_env()?;
    let client = ApiClient::builder().config(config).build()?;

    let listings: Value = client
        .get_with("/properties", &[("status", "listed"), ("page", "1")])
        .await?;
    println!("listings:\n{listings:#}");

    let overview: Value = client.get("/stats/overview").await?;
    println!("\noverview stats:\n{overview:#}");

    Ok(())
}
