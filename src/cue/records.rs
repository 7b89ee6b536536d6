//! Raw route-service records
//!
//!     These are the loosely-structured rows a route service exports, before any
//!     normalization: a type string, the turn text, a distance that may arrive either as a
//!     number or as a numeric string, and a secondary annotation.
//!
//!     Note the column naming inherited from the service export: the `note` column holds
//!     the turn text ("Turn right onto Foo St.") and the `description` column holds the
//!     rider's annotation. Ingestion maps them onto the cue model's `description` and `note`
//!     respectively.
//!
//!     Three readers are provided:
//!
//!     - JSON and YAML: either a bare array of records, or an object carrying route metadata
//!       and a `records` array.
//!     - CSV: the service's CSV export, columns `type, note, absolute_distance, elevation,
//!       description`, with one header row.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// One raw row from the route service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "type")]
    pub kind: String,
    /// Turn text, e.g. "Turn right onto Foo St.".
    #[serde(default)]
    pub note: String,
    pub absolute_distance: RawDistance,
    /// Rider annotation.
    #[serde(default)]
    pub description: String,
}

impl RawRecord {
    pub fn new(
        kind: impl Into<String>,
        note: impl Into<String>,
        absolute_distance: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            note: note.into(),
            absolute_distance: RawDistance::Miles(absolute_distance),
            description: description.into(),
        }
    }
}

/// A distance in miles as delivered upstream: a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDistance {
    Miles(f64),
    Text(String),
}

impl RawDistance {
    /// The distance in miles, if it parses.
    pub fn miles(&self) -> Option<f64> {
        match self {
            RawDistance::Miles(miles) => Some(*miles),
            RawDistance::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for RawDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawDistance::Miles(miles) => write!(f, "{miles}"),
            RawDistance::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// Route-level facts supplied alongside the records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteMetadata {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Total length; when absent the final record's distance is used.
    #[serde(default)]
    pub length_mi: Option<f64>,
    #[serde(default)]
    pub elevation_gain_ft: Option<f64>,
}

impl RouteMetadata {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// Records plus their metadata, as read from a file.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSource {
    pub metadata: RouteMetadata,
    pub records: Vec<RawRecord>,
}

/// Supported input encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
    Csv,
}

impl InputFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(InputFormat::Json),
            "yaml" | "yml" => Some(InputFormat::Yaml),
            "csv" => Some(InputFormat::Csv),
            _ => None,
        }
    }
}

impl FromStr for InputFormat {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(InputFormat::Json),
            "yaml" | "yml" => Ok(InputFormat::Yaml),
            "csv" => Ok(InputFormat::Csv),
            other => Err(RecordError::UnknownFormat(other.to_string())),
        }
    }
}

/// Errors reading or decoding raw records.
#[derive(Debug)]
pub enum RecordError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
    Csv(csv::Error),
    UnknownFormat(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Io(e) => write!(f, "Failed to read route data: {e}"),
            RecordError::Json(e) => write!(f, "Invalid JSON route data: {e}"),
            RecordError::Yaml(e) => write!(f, "Invalid YAML route data: {e}"),
            RecordError::Csv(e) => write!(f, "Invalid CSV route data: {e}"),
            RecordError::UnknownFormat(name) => write!(f, "Unknown input format '{name}'"),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::Io(e) => Some(e),
            RecordError::Json(e) => Some(e),
            RecordError::Yaml(e) => Some(e),
            RecordError::Csv(e) => Some(e),
            RecordError::UnknownFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for RecordError {
    fn from(e: std::io::Error) -> Self {
        RecordError::Io(e)
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        RecordError::Json(e)
    }
}

impl From<serde_yaml::Error> for RecordError {
    fn from(e: serde_yaml::Error) -> Self {
        RecordError::Yaml(e)
    }
}

impl From<csv::Error> for RecordError {
    fn from(e: csv::Error) -> Self {
        RecordError::Csv(e)
    }
}

/// Route identifiers show up both as numbers and as strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RouteId {
    Number(i64),
    Text(String),
}

impl From<RouteId> for String {
    fn from(id: RouteId) -> Self {
        match id {
            RouteId::Number(n) => n.to_string(),
            RouteId::Text(text) => text,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RouteFile {
    #[serde(default)]
    id: Option<RouteId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    length_mi: Option<f64>,
    #[serde(default)]
    elevation_gain_ft: Option<f64>,
    records: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RouteDocument {
    Records(Vec<RawRecord>),
    Route(RouteFile),
}

impl RouteDocument {
    fn into_source(self, default_id: &str) -> RouteSource {
        match self {
            RouteDocument::Records(records) => RouteSource {
                metadata: RouteMetadata::new(default_id),
                records,
            },
            RouteDocument::Route(file) => RouteSource {
                metadata: RouteMetadata {
                    id: file.id.map(String::from).unwrap_or_else(|| default_id.to_string()),
                    name: file.name,
                    length_mi: file.length_mi,
                    elevation_gain_ft: file.elevation_gain_ft,
                },
                records: file.records,
            },
        }
    }
}

/// Parse JSON route data. `default_id` is used when the document names no id.
pub fn from_json_str(source: &str, default_id: &str) -> Result<RouteSource, RecordError> {
    let document: RouteDocument = serde_json::from_str(source)?;
    Ok(document.into_source(default_id))
}

/// Parse YAML route data. `default_id` is used when the document names no id.
pub fn from_yaml_str(source: &str, default_id: &str) -> Result<RouteSource, RecordError> {
    let document: RouteDocument = serde_yaml::from_str(source)?;
    Ok(document.into_source(default_id))
}

/// Parse the route service's CSV export. The first row is a header and is skipped.
pub fn from_csv_reader<R: Read>(reader: R, default_id: &str) -> Result<RouteSource, RecordError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.records().skip(1) {
        let row = row?;
        let column = |index: usize| row.get(index).unwrap_or("").to_string();
        records.push(RawRecord {
            kind: column(0),
            note: column(1),
            absolute_distance: RawDistance::Text(column(2)),
            // Column 3 is elevation, which the cue sheet does not use
            description: column(4),
        });
    }

    Ok(RouteSource {
        metadata: RouteMetadata::new(default_id),
        records,
    })
}

/// Read route data from a file, guessing the format from the extension when not given.
///
/// The file stem doubles as the route id unless the document carries one.
pub fn read_route_file(
    path: impl AsRef<Path>,
    format: Option<InputFormat>,
) -> Result<RouteSource, RecordError> {
    let path = path.as_ref();
    let format = match format.or_else(|| InputFormat::from_path(path)) {
        Some(format) => format,
        None => {
            return Err(RecordError::UnknownFormat(
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .unwrap_or("")
                    .to_string(),
            ))
        }
    };
    let default_id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("route");

    log::debug!("Reading {:?} route data from {}", format, path.display());
    match format {
        InputFormat::Json => from_json_str(&fs::read_to_string(path)?, default_id),
        InputFormat::Yaml => from_yaml_str(&fs::read_to_string(path)?, default_id),
        InputFormat::Csv => from_csv_reader(fs::File::open(path)?, default_id),
    }
}
