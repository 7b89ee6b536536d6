//! Custom instruction recognition
//!
//! Riders can override the displayed instruction by starting a description with a
//! bracketed tag: `[L/QR] Left on Foo St., quick right on Bar St.` shows `L/QR` in the
//! "Go" column. The tag must be the first non-whitespace text and must not be empty.

use once_cell::sync::Lazy;
use regex::Regex;

static CUSTOM_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\[([^\]]+)\]").unwrap());

/// Returns the custom instruction embedded at the start of `raw`, if any.
pub fn parse_custom(raw: &str) -> Option<String> {
    CUSTOM_TAG
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map(|tag| tag.as_str().to_string())
}
