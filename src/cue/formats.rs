//! Output formats for normalized routes
//!
//! - `latex`: the printable cue sheet document
//! - `text`: one bracketed line per entry, for terminal inspection
//! - `json`: the normalized route model

pub mod json;
pub mod latex;
pub mod registry;
pub mod text;

pub use json::JsonFormatter;
pub use latex::{entry_to_latex, escape, render, LatexFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use text::TextFormatter;
