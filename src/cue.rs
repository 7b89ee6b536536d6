//! Cue sheet pipeline
//!
//! Raw route-service records flow one way through these modules:
//!
//! - [`records`]: raw records and the JSON/YAML/CSV readers
//! - [`ingest`]: normalization into a validated [`model::Route`], using [`cleaning`],
//!   [`custom`] and the [`vocabulary`] enums
//! - [`splicing`]: `[start]`/`[end]` tag relocation
//! - [`formats`]: LaTeX and text output, with [`inlines`] resolving emphasis markup
//! - [`transforms`]: the stages above as composable pipelines
//! - [`config`]: layered settings for ingestion and rendering

pub mod cleaning;
pub mod config;
pub mod custom;
pub mod formats;
pub mod ingest;
pub mod inlines;
pub mod model;
pub mod records;
pub mod splicing;
pub mod transforms;
pub mod vocabulary;

pub use ingest::{ingest, IngestError, Normalizer};
pub use model::{Entry, Route, RouteError};
pub use records::{RawRecord, RecordError, RouteMetadata, RouteSource};
pub use splicing::{adjust, splice};
pub use vocabulary::{Color, Instruction, Modifier};
