//! Config resolution: file, then embed object, then CLI/env, then the
//! tenant's remote settings, then validation.

use std::path::Path;

use chatwidget_common::ConfigError;
use chatwidget_config::schema::{LogLevel, WidgetConfig};
use chatwidget_config::{toml_loader, validation, EmbedConfig, Position};
use chatwidget_session::{HttpApiConfig, HttpChatApi};

use crate::cli::Args;

/// Load the file layer: `--config` if given, else the default path.
pub fn load_file(args: &Args) -> Result<WidgetConfig, ConfigError> {
    match args.config {
        Some(ref path) => toml_loader::load_from_path(Path::new(path)),
        None => toml_loader::load_default(),
    }
}

/// Overlay the embed object, then explicit CLI flags and env vars.
pub fn apply_overrides(config: &mut WidgetConfig, args: &Args) -> Result<(), ConfigError> {
    if let Some(ref json) = args.embed {
        EmbedConfig::from_json(json)?.apply_to(config);
    }

    if let Some(ref tenant) = args.tenant_id {
        config.widget.tenant_id = tenant.clone();
    }
    if let Some(ref url) = args.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(ref position) = args.position {
        config.widget.position = Position::from_host_value(position);
    }
    if let Some(ref color) = args.theme_color {
        config.widget.theme_color = color.clone();
    }
    if let Some(ref cookies) = args.cookies {
        config.customer.cookies = cookies.clone();
    }
    if let Some(ref key) = args.widget_key {
        config.api.widget_key = key.clone();
    }
    if let Some(ref level) = args.log_level {
        config.logging.level = parse_log_level(level)?;
    }
    Ok(())
}

/// Pull dashboard settings when a widget key is configured.
///
/// A failed lookup is logged and the local values stand.
pub async fn apply_remote(config: &mut WidgetConfig) {
    let key = config.api.widget_key.trim().to_string();
    if key.is_empty() {
        return;
    }

    let api = match HttpChatApi::new(HttpApiConfig::from_api_config(&config.api)) {
        Ok(api) => api,
        Err(e) => {
            tracing::warn!("skipping remote widget settings: {e}");
            return;
        }
    };

    match api.fetch_widget_settings(&key).await {
        Ok(settings) => {
            tracing::info!(tenant_id = %settings.tenant_id, "applied remote widget settings");
            settings.apply_to(config);
        }
        Err(e) => tracing::warn!("remote widget settings unavailable: {e}"),
    }
}

/// Apply the remaining layers to a loaded file config, then validate.
pub async fn resolve(mut config: WidgetConfig, args: &Args) -> Result<WidgetConfig, ConfigError> {
    apply_overrides(&mut config, args)?;
    apply_remote(&mut config).await;
    validation::validate(&config)?;
    Ok(config)
}

fn parse_log_level(value: &str) -> Result<LogLevel, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "debug" => Ok(LogLevel::Debug),
        "info" => Ok(LogLevel::Info),
        "warn" | "warning" => Ok(LogLevel::Warn),
        "error" => Ok(LogLevel::Error),
        other => Err(ConfigError::ValidationError(format!(
            "unknown log level: {other}"
        ))),
    }
}
