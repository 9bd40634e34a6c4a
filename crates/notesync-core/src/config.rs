//! Client configuration.
//!
//! The API base URL comes from the `NOTES_API_URL` environment variable or an
//! explicit value, falling back to the local development server.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{first_non_blank, has_http_scheme};

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "NOTES_API_URL";

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Per-request timeout applied to every API call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Settings for [`HttpNotesClient`](crate::transport::HttpNotesClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    /// Config for an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(&base_url.into())?,
        })
    }

    /// Config for the running process: `override_url` when given, then
    /// `NOTES_API_URL`, then the default URL. Blank values are skipped.
    pub fn from_env(override_url: Option<String>) -> Result<Self> {
        Self::resolve(override_url, std::env::var(API_URL_ENV).ok())
    }

    /// Pick the first configured URL: explicit override, then environment.
    pub fn resolve(explicit: Option<String>, env_value: Option<String>) -> Result<Self> {
        let url = first_non_blank([explicit, env_value])
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout(&self) -> Duration {
        REQUEST_TIMEOUT
    }

    /// Absolute URL for an API path such as `/notes`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let base = raw.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(Error::Config("API base URL must not be empty".to_string()));
    }
    if !has_http_scheme(base) {
        return Err(Error::Config(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(base.to_string())
}
