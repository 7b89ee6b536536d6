//! Ingestion: raw records to normalized cue entries
//!
//!     Each raw record is looked at together with its neighbours' distances, because the
//!     "quick" modifier depends on the gap to the previous cue and the "for" distance on the
//!     gap to the next one. The steps per record are:
//!
//!     1. Map the type string to an [Instruction] (unknown strings become custom).
//!     2. Derive the [Color] from that instruction, before any user override, so a
//!        custom-labelled right turn is still shaded.
//!     3. Derive the [Modifier]: slight wins over quick.
//!     4. Apply a bracketed custom instruction from the turn text, if present.
//!     5. Clean the turn text into the description.
//!
//!     The resulting route is validated before it is handed on; a route that breaks the
//!     model invariants is rejected here rather than reaching the renderer.

use super::cleaning::clean;
use super::custom::parse_custom;
use super::model::{relink_distances, Entry, Route, RouteError};
use super::records::{RawRecord, RouteMetadata};
use super::vocabulary::{Color, Instruction, Modifier};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Default gap, in miles, under which a turn is marked quick.
pub const DEFAULT_QUICK_THRESHOLD_MI: f64 = 0.1;

static SLIGHT_TURN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(Keep|Bear|Slight) ").unwrap());

/// Errors rejecting a record sequence at the pipeline boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestError {
    /// No records at all.
    Empty,
    /// A distance that is not a finite number.
    InvalidDistance { index: usize, value: String },
    NegativeDistance { index: usize, distance: f64 },
    /// The normalized route breaks a model invariant.
    InvalidRoute(RouteError),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::Empty => write!(f, "Route has no cue records"),
            IngestError::InvalidDistance { index, value } => {
                write!(f, "Record {index} has an invalid distance: {value}")
            }
            IngestError::NegativeDistance { index, distance } => {
                write!(f, "Record {index} has a negative distance: {distance} mi")
            }
            IngestError::InvalidRoute(e) => write!(f, "Invalid route: {e}"),
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IngestError::InvalidRoute(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RouteError> for IngestError {
    fn from(e: RouteError) -> Self {
        IngestError::InvalidRoute(e)
    }
}

/// Turns raw records into a validated [Route].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalizer {
    quick_threshold_mi: f64,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            quick_threshold_mi: DEFAULT_QUICK_THRESHOLD_MI,
        }
    }

    /// Use a different gap for marking turns quick.
    pub fn with_quick_threshold(mut self, quick_threshold_mi: f64) -> Self {
        self.quick_threshold_mi = quick_threshold_mi;
        self
    }

    /// Normalize records into a route and validate it.
    pub fn normalize(
        &self,
        records: &[RawRecord],
        metadata: &RouteMetadata,
    ) -> Result<Route, IngestError> {
        let entries = self.normalize_entries(records)?;
        // normalize_entries never returns an empty list
        let final_distance = entries
            .last()
            .map(|entry| entry.absolute_distance)
            .unwrap_or(0.0);

        let route = Route {
            id: metadata.id.clone(),
            name: metadata.name.clone(),
            length_mi: metadata.length_mi.unwrap_or(final_distance),
            elevation_gain_ft: metadata.elevation_gain_ft,
            entries,
        };
        route.validate()?;
        log::debug!(
            "Normalized route {} into {} entries",
            route.id,
            route.entries.len()
        );
        Ok(route)
    }

    /// Normalize records into entries, without route-level validation.
    pub fn normalize_entries(&self, records: &[RawRecord]) -> Result<Vec<Entry>, IngestError> {
        if records.is_empty() {
            return Err(IngestError::Empty);
        }

        let distances = parse_distances(records)?;
        let mut entries: Vec<Entry> = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let previous = index.checked_sub(1).map(|i| distances[i]);
                self.normalize_record(record, distances[index], previous)
            })
            .collect();
        relink_distances(&mut entries);
        Ok(entries)
    }

    fn normalize_record(&self, record: &RawRecord, distance: f64, previous: Option<f64>) -> Entry {
        let mut instruction = Instruction::from_service_type(&record.kind);
        if instruction.is_custom() {
            log::warn!(
                "Unknown cue type {:?}, keeping it as a custom instruction",
                record.kind
            );
        }

        let color = Color::from_instruction(&instruction);
        let mut modifier = self.modifier_for(&instruction, &record.note, distance, previous);

        if let Some(tag) = parse_custom(&record.note) {
            log::trace!("Custom instruction {tag:?} overrides {instruction:?}");
            instruction = Instruction::Custom(tag);
            modifier = Modifier::None;
        }

        Entry {
            instruction,
            description: clean(&record.note),
            note: record.description.clone(),
            absolute_distance: distance,
            for_distance: None,
            modifier,
            color,
        }
    }

    fn modifier_for(
        &self,
        instruction: &Instruction,
        turn_text: &str,
        distance: f64,
        previous: Option<f64>,
    ) -> Modifier {
        if !instruction.is_turn() {
            return Modifier::None;
        }
        // The service words slight turns as "Keep left", "Bear right", etc.
        if SLIGHT_TURN.is_match(turn_text) {
            return Modifier::Slight;
        }
        match previous {
            Some(previous) if distance - previous < self.quick_threshold_mi => Modifier::Quick,
            _ => Modifier::None,
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize records into a validated route with the default settings.
pub fn ingest(records: &[RawRecord], metadata: &RouteMetadata) -> Result<Route, IngestError> {
    Normalizer::new().normalize(records, metadata)
}

fn parse_distances(records: &[RawRecord]) -> Result<Vec<f64>, IngestError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let distance = record
                .absolute_distance
                .miles()
                .filter(|miles| miles.is_finite())
                .ok_or_else(|| IngestError::InvalidDistance {
                    index,
                    value: record.absolute_distance.to_string(),
                })?;
            if distance < 0.0 {
                return Err(IngestError::NegativeDistance { index, distance });
            }
            Ok(distance)
        })
        .collect()
}
