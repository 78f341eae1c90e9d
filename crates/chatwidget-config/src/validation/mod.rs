//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod api;
mod helpers;
mod misc;
mod widget;


use crate::schema::WidgetConfig;
use chatwidget_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WidgetConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    widget::validate_widget(&mut errors, config);
    api::validate_api(&mut errors, config);
    misc::validate_customer(&mut errors, config);
    misc::validate_events(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
