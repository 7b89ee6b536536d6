//! Plain-text route listing
//!
//! One bracketed line per entry, using the entry's `Display` form:
//! `[<modifier><code> | <at> | <for> | <description> | <note> | <color>]`.

use super::registry::{FormatError, Formatter};
use crate::cue::model::Route;

/// Render every entry on its own line.
pub fn render(route: &Route) -> String {
    route
        .entries
        .iter()
        .map(|entry| format!("{entry}\n"))
        .collect()
}

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn serialize(&self, route: &Route) -> Result<String, FormatError> {
        Ok(render(route))
    }

    fn description(&self) -> &str {
        "One line per cue entry, for terminal inspection"
    }
}
