//! Core TOML config loading: read from path or platform default.

use crate::schema::WidgetConfig;
use chatwidget_common::ConfigError;
use std::path::Path;
use tracing::info;

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take serde defaults. The result is not validated here:
/// the tenant id usually arrives later from the embed object or the CLI,
/// so callers validate once every layer has been applied.
pub fn load_from_path(path: &Path) -> Result<WidgetConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config = load_from_str(&content)?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Parse config from TOML text.
pub fn load_from_str(content: &str) -> Result<WidgetConfig, ConfigError> {
    toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/chatwidget/config.toml`
/// On Linux: `~/.config/chatwidget/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<WidgetConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(WidgetConfig::default())
        }
        Err(e) => Err(e),
    }
}
