//! Widget identity and presentation settings.

use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME_COLOR: &str = "#2e294e";
pub const DEFAULT_WELCOME_MESSAGE: &str = "Hello! How can I help you today?";

/// Which edge of the host surface the widget docks to. Layout only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    #[default]
    Right,
}

impl Position {
    /// Lenient parse used for host-supplied values; anything but `left`
    /// docks right.
    pub fn from_host_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("left") {
            Position::Left
        } else {
            Position::Right
        }
    }
}

/// The `[widget]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSection {
    /// Opaque tenant key. Required before a session can start.
    pub tenant_id: String,
    pub position: Position,
    /// Display-only; see `colors::parse_color` for accepted formats.
    pub theme_color: String,
    pub title: String,
    /// Seeded as the first assistant entry on mount.
    pub welcome_message: String,
}

impl Default for WidgetSection {
    fn default() -> Self {
        Self {
            tenant_id: String::new(),
            position: Position::Right,
            theme_color: DEFAULT_THEME_COLOR.into(),
            title: "LocalVoiceAI".into(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.into(),
        }
    }
}
