//! HTTP client for the Sequin execution backend.
//!
//! [`HttpBackend`] implements
//! [`ExecutionBackend`](sequin_interface::ExecutionBackend) over the
//! backend's REST endpoints. [`BackendConfig`] is loaded from the
//! environment or a TOML file.

mod client;
mod config;

pub use client::HttpBackend;
pub use config::{
    BackendConfig, DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT_SECS, ENV_API_TOKEN, ENV_BACKEND_URL,
    ENV_REQUEST_TIMEOUT,
};
