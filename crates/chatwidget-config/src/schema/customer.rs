//! Host cookie settings.

use serde::{Deserialize, Serialize};

/// The `[customer]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerConfig {
    pub cookie_name: String,
    /// Host cookie string in `document.cookie` form: `a=1; customer_id=abc`.
    pub cookies: String,
}

impl Default for CustomerConfig {
    fn default() -> Self {
        Self {
            cookie_name: "customer_id".into(),
            cookies: String::new(),
        }
    }
}
