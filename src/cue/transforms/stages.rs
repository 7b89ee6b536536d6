//! Individual pipeline stages
//!
//! Each stage implements [`Runnable`] and reports failures as
//! [`TransformError::StageFailed`] carrying the stage name.

use crate::cue::formats::{Formatter, LatexFormatter};
use crate::cue::ingest::Normalizer;
use crate::cue::model::Route;
use crate::cue::records::RouteSource;
use crate::cue::splicing;
use crate::cue::transforms::{Runnable, TransformError};

/// Raw records + metadata → validated [Route].
#[derive(Debug, Clone, Default)]
pub struct Ingest {
    normalizer: Normalizer,
}

impl Ingest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_normalizer(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }
}

impl Runnable<RouteSource, Route> for Ingest {
    fn run(&self, input: RouteSource) -> Result<Route, TransformError> {
        Ok(self.normalizer.normalize(&input.records, &input.metadata)?)
    }
}

/// Moves `[start]`/`[end]` tagged entries onto the route boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpliceStartEnd;

impl Runnable<Route, Route> for SpliceStartEnd {
    fn run(&self, mut input: Route) -> Result<Route, TransformError> {
        splicing::adjust(&mut input);
        Ok(input)
    }
}

/// Route → document text, using any [Formatter].
pub struct Render {
    formatter: Box<dyn Formatter>,
}

impl Render {
    pub fn new<F: Formatter + 'static>(formatter: F) -> Self {
        Self {
            formatter: Box::new(formatter),
        }
    }

    /// Render LaTeX with the default settings.
    pub fn latex() -> Self {
        Self::new(LatexFormatter::default())
    }
}

impl Runnable<Route, String> for Render {
    fn run(&self, input: Route) -> Result<String, TransformError> {
        self.formatter
            .serialize(&input)
            .map_err(|e| TransformError::StageFailed {
                stage: format!("Render({})", self.formatter.name()),
                message: e.to_string(),
            })
    }
}
