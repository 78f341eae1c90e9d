//! Validation for the smaller sections: customer cookie and events.

use regex::Regex;
use std::sync::LazyLock;

use crate::schema::WidgetConfig;

use super::helpers::validate_range;

/// RFC 6265 cookie-name token characters.
static COOKIE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[!#$%&'*+\-.^_`|~0-9A-Za-z]+$").unwrap());

pub(crate) fn validate_customer(errors: &mut Vec<String>, config: &WidgetConfig) {
    if !COOKIE_NAME_RE.is_match(&config.customer.cookie_name) {
        errors.push(format!(
            "customer.cookie_name = {:?} is not a valid cookie name",
            config.customer.cookie_name
        ));
    }
}

pub(crate) fn validate_events(errors: &mut Vec<String>, config: &WidgetConfig) {
    validate_range(errors, "events.capacity", config.events.capacity, 16, 4096);
}
