//! Host cookie lookup.
//!
//! The host hands over its cookie jar in `document.cookie` form
//! (`a=1; customer_id=abc`). A name matches only at the start of the
//! string or after a space, so `xcustomer_id=...` never matches
//! `customer_id`.

use regex::Regex;

/// Value of cookie `name`, or `None` if absent or empty.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    let pattern = format!(r"(?:^| ){}=([^;]+)", regex::escape(name));
    let re = Regex::new(&pattern).ok()?;
    re.captures(cookies).map(|caps| caps[1].to_string())
}
