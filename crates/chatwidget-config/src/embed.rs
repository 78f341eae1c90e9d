//! Host embedding object.
//!
//! A host page configures the widget with a small camelCase object,
//! `{tenantId, position?, themeColor?}`. When present the widget
//! self-initializes from it.

use serde::{Deserialize, Serialize};

use crate::schema::{Position, WidgetConfig};
use chatwidget_common::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedConfig {
    pub tenant_id: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub theme_color: Option<String>,
}

impl EmbedConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json)
            .map_err(|e| ConfigError::ParseError(format!("invalid embed object: {e}")))
    }

    /// Overlay onto a loaded config. Only fields the host set are applied.
    pub fn apply_to(&self, config: &mut WidgetConfig) {
        config.widget.tenant_id = self.tenant_id.clone();
        if let Some(ref position) = self.position {
            config.widget.position = Position::from_host_value(position);
        }
        if let Some(color) = self.theme_color.as_deref().filter(|c| !c.trim().is_empty()) {
            config.widget.theme_color = color.to_string();
        }
    }
}
