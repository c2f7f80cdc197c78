//! HTTP client for xvsync.
//!
//! Fetches and patches job templates on the orchestration server. Every
//! request carries Basic credentials, and redirects are followed by hand so
//! the credentials are attached to each hop.

pub mod client;
pub mod config;
pub mod error;
pub mod redirect;
pub mod store;

pub use client::TowerClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_REDIRECTS};
pub use error::{ClientError, ClientResult};
pub use store::JobTemplateStore;
