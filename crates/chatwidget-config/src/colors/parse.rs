//! Low-level hex and `rgb()`/`rgba()` parsing. Not part of the public API.

use chatwidget_common::Color;
use regex::Regex;
use std::sync::LazyLock;

/// #RGB, #RRGGBB, or #RRGGBBAA.
pub(crate) static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());

/// rgb(r,g,b) or rgba(r,g,b,a); alpha may be a 0.0-1.0 float or 0-255 int.
pub(crate) static FUNCTIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([0-9]*\.?[0-9]+)\s*)?\)$",
    )
    .unwrap()
});

pub(super) fn parse_hex(s: &str) -> Option<Color> {
    if !HEX_RE.is_match(s) {
        return None;
    }
    let hex = &s[1..];
    if hex.len() == 3 {
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
        return Some(Color::from_rgba(nibble(0)?, nibble(1)?, nibble(2)?, 255));
    }
    Color::from_hex(s)
}

pub(super) fn parse_functional(s: &str) -> Option<Color> {
    let caps = FUNCTIONAL_RE.captures(s)?;
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;

    let a = match caps.get(4).map(|m| m.as_str()) {
        None => 255,
        Some(a) if a.contains('.') => {
            let a: f64 = a.parse().ok()?;
            if !(0.0..=1.0).contains(&a) {
                return None;
            }
            (a * 255.0).round() as u8
        }
        Some(a) => a.parse::<u8>().ok()?,
    };

    Some(Color::from_rgba(r, g, b, a))
}
