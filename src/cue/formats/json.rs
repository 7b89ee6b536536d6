//! JSON dump of the normalized route model
//!
//! Useful for feeding cue data to other tools. Enum values use their snake_case names,
//! e.g. `"route_start"`, and custom instructions appear as `{"custom": "<text>"}`.

use super::registry::{FormatError, Formatter};
use crate::cue::model::Route;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, route: &Route) -> Result<String, FormatError> {
        serde_json::to_string_pretty(route)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Normalized route as pretty-printed JSON"
    }
}
