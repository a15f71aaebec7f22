//! Process configuration for the API client
//!
//! Immutable configuration built once at startup and passed explicitly to
//! [`NotesApi`](crate::NotesApi). Never a mutable global.

use crate::error::ConfigError;
use std::env;
use tracing::debug;

/// Default service endpoint
pub const DEFAULT_BASE_URL: &str = "https://notehub-public.goit.study/api";

/// Default page size for list requests
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Environment variable holding the bearer credential
pub const TOKEN_VAR: &str = "NOTEHUB_TOKEN";

/// Environment variable overriding the base URL
pub const BASE_URL_VAR: &str = "NOTEHUB_BASE_URL";

/// Environment variable overriding the page size
pub const PER_PAGE_VAR: &str = "NOTEHUB_PER_PAGE";

/// Immutable client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL, no trailing slash
    pub base_url: String,
    /// Bearer credential attached to every request
    pub token: String,
    /// Page size for list requests
    pub per_page: u32,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the credential
    #[inline]
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// With base URL (trailing slash stripped)
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let url = base_url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// With page size
    #[inline]
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Build from the process environment
    ///
    /// # Errors
    /// - `ConfigError::Missing` when `NOTEHUB_TOKEN` is not set
    /// - `ConfigError::Invalid` when `NOTEHUB_PER_PAGE` is not a number
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = env::var(TOKEN_VAR).map_err(|_| ConfigError::Missing { name: TOKEN_VAR })?;

        let mut config = Self::new(token);

        if let Ok(base_url) = env::var(BASE_URL_VAR) {
            debug!("overriding base URL: {base_url}");
            config = config.with_base_url(base_url);
        }

        if let Ok(per_page) = env::var(PER_PAGE_VAR) {
            let parsed = per_page.parse().map_err(|_| ConfigError::Invalid {
                name: PER_PAGE_VAR,
                value: per_page,
            })?;
            config = config.with_per_page(parsed);
        }

        Ok(config)
    }
}
