//! # cuesheet
//!
//! Turns a bicycle route's turn-by-turn records into a printable cue sheet: a compact
//! table of directions with distances, rendered as a LaTeX document.
//!
//! The pipeline lives in the [cue] module; [cue::transforms::standard] has ready-made
//! pipelines from raw records to a finished document.

pub mod cue;
