//! Client configuration.
//!
//! Base URL cascade: `TEMP_MAIL_API_BASE` > `VITE_API_BASE` (shared with the
//! web frontend's `.env`) > value baked in at build time > empty.

use std::time::Duration;

/// Fixed timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime and build-time variable holding the API base URL.
pub const API_BASE_ENV: &str = "TEMP_MAIL_API_BASE";

/// Variable the web frontend reads its base URL from.
pub const FRONTEND_API_BASE_ENV: &str = "VITE_API_BASE";

const BUILD_API_BASE: Option<&str> = option_env!("TEMP_MAIL_API_BASE");

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Prefix for every request path, without a trailing `/`.
    /// Empty means paths are used as given.
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Resolve the base URL from the environment.
    pub fn from_env() -> Self {
        Self::new(&resolve_base_url(|key| std::env::var(key).ok()))
    }
}

fn resolve_base_url(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup(API_BASE_ENV)
        .or_else(|| lookup(FRONTEND_API_BASE_ENV))
        .or_else(|| BUILD_API_BASE.map(str::to_string))
        .unwrap_or_default()
}
