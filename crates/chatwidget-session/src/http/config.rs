//! HTTP client configuration.

use std::time::Duration;

use chatwidget_config::schema::{ApiConfig, DEFAULT_API_URL};

#[derive(Debug, Clone)]
pub struct HttpApiConfig {
    /// Base URL including the API prefix, e.g. `http://localhost:8000/api/v1`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl HttpApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }

    pub fn from_api_config(api: &ApiConfig) -> Self {
        Self::new(api.base_url.clone())
            .with_connect_timeout(Duration::from_secs(u64::from(api.connect_timeout)))
            .with_request_timeout(Duration::from_secs(u64::from(api.request_timeout)))
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for HttpApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
