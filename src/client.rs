//! The request client.
//!
//! The public surface is intentionally small: build an [`ApiClient`], issue
//! verb calls, observe its [`ClientState`]. Implementation details are split
//! into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod policy;
pub mod state;
mod upload;

pub use builder::ApiClientBuilder;
pub use core::{ApiClient, RequestOptions};
pub use policy::SuccessPolicy;
pub use state::{ClientState, StateSnapshot};
