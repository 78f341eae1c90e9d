//! Chat widget configuration system.
//!
//! TOML-based configuration with validation. All sections use defaults so
//! partial configs work out of the box. Two overlays can be applied on
//! top of a loaded file: the host's embed object ([`EmbedConfig`]) and the
//! tenant's dashboard settings ([`RemoteWidgetSettings`]).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chatwidget_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod colors;
pub mod embed;
pub mod remote;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use embed::EmbedConfig;
pub use remote::RemoteWidgetSettings;
pub use schema::{Position, WidgetConfig, CONFIG_SCHEMA_VERSION};

use chatwidget_common::ConfigError;

/// Load config from the platform default path and validate it.
///
/// Creates a commented default file if none exists. Hosts that layer
/// CLI or embed values on top should use [`toml_loader`] directly and call
/// [`validation::validate`] afterwards.
pub fn load_config() -> Result<WidgetConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &WidgetConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
