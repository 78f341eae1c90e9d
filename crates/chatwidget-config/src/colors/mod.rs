//! Theme color parsing and validation.
//!
//! The widget only uses `theme_color` for display, but a bad value should
//! be caught at load time rather than rendered as garbage. Accepts the CSS
//! forms a host page would pass: `#RGB`, `#RRGGBB`, `#RRGGBBAA`,
//! `rgb(r,g,b)` and `rgba(r,g,b,a)`.

mod parse;


use chatwidget_common::{Color, ConfigError};

use parse::{parse_functional, parse_hex, FUNCTIONAL_RE, HEX_RE};

/// Parse a theme color string into a [`Color`].
pub fn parse_color(s: &str) -> Result<Color, ConfigError> {
    let s = s.trim();

    if s.starts_with('#') {
        return parse_hex(s)
            .ok_or_else(|| ConfigError::ParseError(format!("invalid hex color: {s}")));
    }

    if s.starts_with("rgb") {
        return parse_functional(s)
            .ok_or_else(|| ConfigError::ParseError(format!("invalid rgb color: {s}")));
    }

    Err(ConfigError::ParseError(format!(
        "unrecognized color format: {s}"
    )))
}

/// Validate that a string is a recognized color format.
pub fn validate_color(s: &str) -> bool {
    let s = s.trim();
    if s.starts_with('#') {
        return HEX_RE.is_match(s);
    }
    if s.starts_with("rgb") {
        return FUNCTIONAL_RE.is_match(s) && parse_functional(s).is_some();
    }
    false
}
