//! Profile integration: HTTP client for the profile and paste endpoints.

pub mod client;

pub use client::HttpProfileClient;

/// Returns the profile module name for smoke checks.
pub fn module_name() -> &'static str {
    "profile"
}
