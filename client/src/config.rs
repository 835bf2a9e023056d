//! Catalog service location, resolved at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser bundle talks to the catalog service directly (cross-origin,
//! cookies included), so the base URL is baked in when the WASM is built.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Base URL of the remote catalog service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Build a config from a base URL. Trailing slashes are trimmed; a blank
    /// value falls back to [`DEFAULT_API_BASE_URL`].
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() { DEFAULT_API_BASE_URL } else { trimmed };
        Self { base_url: base_url.to_owned() }
    }

    /// Read `CATALOG_API_URL` from the build environment.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(option_env!("CATALOG_API_URL").unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Absolute URL for an API path such as `/products/42`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Absolute URL for a file the service hosts (product images are stored
    /// as relative paths like `uploads/abc.png`). Already-absolute URLs pass through.
    #[must_use]
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        self.endpoint(path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
