//! HTTP service handle for the Apps Script execution API.
//!
//! Blocking reqwest client (no Tokio runtime required). The caller supplies an
//! already-acquired OAuth2 access token; obtaining and refreshing it is left to
//! the application.

mod client;
mod credentials;

pub use client::{HttpConfig, HttpScriptService, DEFAULT_API_BASE};
pub use credentials::Credentials;
