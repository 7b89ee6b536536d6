//! Canonical cue sheet model
//!
//!     A [Route] is an ordered, non-empty list of [Entry] rows plus metadata. Once a route
//!     has been normalized it satisfies the adjacency invariant: every entry except the last
//!     knows the distance to the next one, and that distance equals the difference of their
//!     absolute distances. [Route::validate] checks the whole set of invariants.

use super::vocabulary::{Color, Instruction, Modifier};
use serde::Serialize;
use std::fmt;

/// Tolerance used when comparing derived distances.
pub const DISTANCE_EPSILON: f64 = 1e-9;

/// One cue sheet row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub instruction: Instruction,
    /// The "On" column: a place or street name.
    pub description: String,
    pub note: String,
    /// Miles from the route start.
    pub absolute_distance: f64,
    /// Miles to the next entry. `None` only for the final entry.
    pub for_distance: Option<f64>,
    pub modifier: Modifier,
    pub color: Color,
}

impl Entry {
    pub fn new(
        instruction: Instruction,
        description: impl Into<String>,
        absolute_distance: f64,
    ) -> Self {
        Self {
            instruction,
            description: description.into(),
            note: String::new(),
            absolute_distance,
            for_distance: None,
            modifier: Modifier::None,
            color: Color::None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_for_distance(mut self, for_distance: f64) -> Self {
        self.for_distance = Some(for_distance);
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// The user-authored instruction text, present iff the instruction is custom.
    pub fn custom_instruction(&self) -> Option<&str> {
        self.instruction.custom_text()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let for_str = match self.for_distance {
            Some(distance) => format!("{:5.2}", distance),
            None => " ".repeat(5),
        };
        write!(
            f,
            "[{}{} | {:5.2} | {} | {} | {} | {}]",
            self.modifier,
            self.instruction,
            self.absolute_distance,
            for_str,
            self.description,
            self.note,
            self.color
        )
    }
}

/// A full route: entries plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Opaque route identifier (e.g. the route service's route number).
    pub id: String,
    pub name: Option<String>,
    pub length_mi: f64,
    pub elevation_gain_ft: Option<f64>,
    pub entries: Vec<Entry>,
}

impl Route {
    pub fn new(id: impl Into<String>, entries: Vec<Entry>, length_mi: f64) -> Self {
        Self {
            id: id.into(),
            name: None,
            length_mi,
            elevation_gain_ft: None,
            entries,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_elevation_gain(mut self, elevation_gain_ft: f64) -> Self {
        self.elevation_gain_ft = Some(elevation_gain_ft);
        self
    }

    /// Check every model invariant, reporting the first violation.
    pub fn validate(&self) -> Result<(), RouteError> {
        let first = self.entries.first().ok_or(RouteError::Empty)?;
        if first.absolute_distance != 0.0 {
            return Err(RouteError::StartNotAtZero(first.absolute_distance));
        }

        for (index, pair) in self.entries.windows(2).enumerate() {
            let (current, next) = (&pair[0], &pair[1]);
            if next.absolute_distance < current.absolute_distance {
                return Err(RouteError::DecreasingDistance {
                    index: index + 1,
                    previous: current.absolute_distance,
                    current: next.absolute_distance,
                });
            }
            let expected = next.absolute_distance - current.absolute_distance;
            match current.for_distance {
                None => return Err(RouteError::MissingForDistance { index }),
                Some(actual) if (actual - expected).abs() > DISTANCE_EPSILON => {
                    return Err(RouteError::ForDistanceMismatch {
                        index,
                        expected,
                        actual,
                    })
                }
                Some(_) => {}
            }
        }

        let last_index = self.entries.len() - 1;
        if self.entries[last_index].for_distance.is_some() {
            return Err(RouteError::TrailingForDistance { index: last_index });
        }
        Ok(())
    }
}

/// Recompute every `for_distance` from the absolute distances.
///
/// The final entry's `for_distance` is cleared.
pub fn relink_distances(entries: &mut [Entry]) {
    let next_distances: Vec<Option<f64>> = entries
        .iter()
        .skip(1)
        .map(|entry| Some(entry.absolute_distance))
        .chain(std::iter::once(None))
        .collect();
    for (entry, next) in entries.iter_mut().zip(next_distances) {
        entry.for_distance = next.map(|distance| distance - entry.absolute_distance);
    }
}

/// Violations of the route invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteError {
    Empty,
    StartNotAtZero(f64),
    DecreasingDistance {
        index: usize,
        previous: f64,
        current: f64,
    },
    MissingForDistance {
        index: usize,
    },
    ForDistanceMismatch {
        index: usize,
        expected: f64,
        actual: f64,
    },
    TrailingForDistance {
        index: usize,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::Empty => write!(f, "Route has no entries"),
            RouteError::StartNotAtZero(distance) => {
                write!(f, "Route must start at 0.0 mi, first entry is at {distance} mi")
            }
            RouteError::DecreasingDistance {
                index,
                previous,
                current,
            } => write!(
                f,
                "Entry {index} goes backwards: {current} mi after {previous} mi"
            ),
            RouteError::MissingForDistance { index } => {
                write!(f, "Entry {index} is not the last entry but has no 'for' distance")
            }
            RouteError::ForDistanceMismatch {
                index,
                expected,
                actual,
            } => write!(
                f,
                "Entry {index} has 'for' distance {actual} mi, expected {expected} mi"
            ),
            RouteError::TrailingForDistance { index } => {
                write!(f, "Final entry {index} must not have a 'for' distance")
            }
        }
    }
}

impl std::error::Error for RouteError {}
