//! Settings served by the backend's `/widget/config` endpoint.

use serde::{Deserialize, Serialize};

use crate::schema::{Position, WidgetConfig};

/// Response body of `GET /widget/config?api_key=...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteWidgetSettings {
    pub tenant_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub theme_color: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub welcome_message: Option<String>,
}

impl RemoteWidgetSettings {
    /// Overlay onto a config. The tenant's dashboard settings win over
    /// local values.
    pub fn apply_to(&self, config: &mut WidgetConfig) {
        config.widget.tenant_id = self.tenant_id.clone();
        if let Some(ref name) = self.name {
            config.widget.title = name.clone();
        }
        if let Some(color) = self.theme_color.as_deref().filter(|c| !c.trim().is_empty()) {
            config.widget.theme_color = color.to_string();
        }
        if let Some(ref position) = self.position {
            config.widget.position = Position::from_host_value(position);
        }
        if let Some(ref welcome) = self.welcome_message {
            config.widget.welcome_message = welcome.clone();
        }
    }
}
