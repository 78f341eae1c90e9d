//! Backend API connection settings.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// The `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Connect timeout in seconds (valid range: 1-60).
    pub connect_timeout: u32,
    /// Whole-request timeout in seconds (valid range: 1-600).
    pub request_timeout: u32,
    /// Tenant API key used to pull settings from `/widget/config`.
    /// Empty disables the lookup.
    pub widget_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
            connect_timeout: 10,
            request_timeout: 120,
            widget_key: String::new(),
        }
    }
}
