//! `[api]` validation.

use crate::schema::WidgetConfig;

use super::helpers::validate_range;

pub(crate) fn validate_api(errors: &mut Vec<String>, config: &WidgetConfig) {
    let url = config.api.base_url.trim();
    let scheme_ok = url.starts_with("http://") || url.starts_with("https://");
    let host_ok = url
        .split_once("://")
        .map(|(_, rest)| !rest.is_empty() && !rest.starts_with('/'))
        .unwrap_or(false);
    if !scheme_ok || !host_ok {
        errors.push(format!(
            "api.base_url = {:?} must be an http(s) URL",
            config.api.base_url
        ));
    }

    validate_range(errors, "api.connect_timeout", config.api.connect_timeout, 1, 60);
    validate_range(errors, "api.request_timeout", config.api.request_timeout, 1, 600);
}
