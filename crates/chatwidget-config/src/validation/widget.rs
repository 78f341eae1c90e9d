//! `[widget]` validation.

use tracing::warn;

use crate::colors::validate_color;
use crate::schema::WidgetConfig;

use super::helpers::validate_required;

pub(crate) fn validate_widget(errors: &mut Vec<String>, config: &WidgetConfig) {
    validate_required(errors, "widget.tenant_id", &config.widget.tenant_id);

    // Display only: an unparseable color falls back to the default theme.
    if !validate_color(&config.widget.theme_color) {
        warn!(
            "widget.theme_color = {:?} is not a recognized color, using the default",
            config.widget.theme_color
        );
    }
}
