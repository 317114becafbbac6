//! Client configuration resolved once at bootstrap.

use crate::{Error, ErrorContext, Result};
use std::time::Duration;

/// Environment variable overriding the backend address.
pub const BASE_URL_ENV: &str = "CALL_HELPER_API_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: validate_base_url(base_url.into())?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Read the base URL from `CALL_HELPER_API_URL`, else use the local default.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn validate_base_url(raw: String) -> Result<String> {
    let parsed = url::Url::parse(&raw).map_err(|e| {
        Error::configuration_with_context(
            format!("invalid base URL: {}", e),
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(raw.clone())
                .with_source("client_config"),
        )
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::configuration_with_context(
            format!("unsupported scheme '{}'", parsed.scheme()),
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(raw)
                .with_source("client_config"),
        ));
    }
    Ok(raw.trim_end_matches('/').to_string())
}
