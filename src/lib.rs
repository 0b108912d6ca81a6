//! # lettings-client
//!
//! Async Rust client for the Lettings rental platform's REST API.
//!
//! ## Overview
//!
//! The crate wraps an HTTP transport with the request conventions the
//! platform's services expect: a stored bearer token attached to every
//! call, uniform classification of responses, session teardown plus a
//! login redirect when authentication expires, and observable loading and
//! error state. Hosts plug in their own storage and UI hooks through
//! small traits; everything defaults to headless-safe implementations.
//!
//! ## Response classification
//!
//! - **2xx** decodes the body into the caller's type, subject to the call's
//!   [`SuccessPolicy`]: plain status-based success, or the envelope contract
//!   where the body must also carry `success: true`.
//! - **401** purges the stored session, shows a notice, and schedules a
//!   delayed redirect to the login route before failing with
//!   [`Error::AuthExpired`].
//! - **Any other status** fails with [`Error::RequestFailed`], preferring
//!   the server's `message` field for the error text.
//! - **Transport failures** surface as [`Error::Network`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lettings_client::ApiClient;
//! use serde_json::Value;
//!
//! #[tokio::main]
//! async fn main() -> lettings_client::Result<()> {
//!     let client = ApiClient::builder()
//!         .base_url("https://api.lettings.example/api")
//!         .build()?;
//!
//!     client.store_token("token-from-login").await?;
//!
//!     let listings: Value = client
//!         .get_with("/properties", &[("status", "listed"), ("page", "1")])
//!         .await?;
//!     println!("{listings:#}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | The request client, its builder, and success policies |
//! | [`endpoints`] | Typed routes for the platform's REST services |
//! | [`config`] | Client configuration and environment loading |
//! | [`storage`] | Pluggable session storage backends |
//! | [`platform`] | Host hooks for notices and navigation |
//! | [`query`] | Query-string encoding helpers |
//! | [`error`] | Error types |

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod platform;
pub mod query;
pub mod storage;

pub use client::{ApiClient, ApiClientBuilder, ClientState, RequestOptions, StateSnapshot, SuccessPolicy};
pub use config::ClientConfig;
pub use endpoints::ApiService;
pub use error::Error;
pub use platform::{page_params, Navigator, Notifier};
pub use storage::Storage;

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, Error>;
