//! Standard transform definitions
//!
//! Pre-built pipelines for the common paths, as `once_cell::sync::Lazy` statics, plus
//! [`build`] for pipelines driven by a loaded configuration.

use crate::cue::config::CueConfig;
use crate::cue::formats::{Formatter, LatexFormatter, TextFormatter};
use crate::cue::ingest::Normalizer;
use crate::cue::model::Route;
use crate::cue::records::RouteSource;
use crate::cue::transforms::stages::{Ingest, Render, SpliceStartEnd};
use crate::cue::transforms::Transform;
use once_cell::sync::Lazy;

/// Type alias for the source → route transform
pub type RouteTransform = Transform<RouteSource, Route>;

/// Type alias for the source → document transform
pub type DocumentTransform = Transform<RouteSource, String>;

/// Records → validated route, with start/end tags spliced.
pub static SOURCE_TO_ROUTE: Lazy<RouteTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then(Ingest::new())
        .then(SpliceStartEnd)
});

/// Records → LaTeX document with the default settings.
pub static SOURCE_TO_LATEX: Lazy<DocumentTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then_transform(&*SOURCE_TO_ROUTE)
        .then(Render::latex())
});

/// Records → plain-text listing.
pub static SOURCE_TO_TEXT: Lazy<DocumentTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then_transform(&*SOURCE_TO_ROUTE)
        .then(Render::new(TextFormatter))
});

/// Records → route, using the configured ingestion settings.
pub fn build_route_transform(config: &CueConfig, splice: bool) -> RouteTransform {
    let normalizer = Normalizer::new().with_quick_threshold(config.ingest.quick_threshold_mi);
    let transform = Transform::from_fn(Ok).then(Ingest::with_normalizer(normalizer));
    if splice {
        transform.then(SpliceStartEnd)
    } else {
        transform
    }
}

/// Records → document through `formatter`, using the configured ingestion settings.
pub fn build<F: Formatter + 'static>(
    config: &CueConfig,
    splice: bool,
    formatter: F,
) -> DocumentTransform {
    build_route_transform(config, splice).then(Render::new(formatter))
}

/// Records → LaTeX, fully driven by `config`.
pub fn build_latex(config: &CueConfig, splice: bool) -> DocumentTransform {
    build(config, splice, LatexFormatter::new(config.render.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::config::load_defaults;
    use crate::cue::records::{RawRecord, RouteMetadata};

    fn source() -> RouteSource {
        RouteSource {
            metadata: RouteMetadata::new("7"),
            records: vec![
                RawRecord::new("Start", "Start of route", 0.0, ""),
                RawRecord::new("Right", "Turn right onto Foo St.", 1.0, ""),
                RawRecord::new("Generic", "[end] Finish at the park", 1.5, ""),
                RawRecord::new("End", "End of route", 2.0, ""),
            ],
        }
    }

    #[test]
    fn test_source_to_route_splices() {
        let route = SOURCE_TO_ROUTE.run(source()).unwrap();
        assert_eq!(route.entries.len(), 3);
        assert_eq!(route.entries[2].description, "Finish at the park");
        assert_eq!(route.entries[2].absolute_distance, 2.0);
    }

    #[test]
    fn test_build_without_splicing() {
        let config = load_defaults().unwrap();
        let route = build_route_transform(&config, false).run(source()).unwrap();
        assert_eq!(route.entries.len(), 4);
    }

    #[test]
    fn test_source_to_latex() {
        let latex = SOURCE_TO_LATEX.run(source()).unwrap();
        assert!(latex.starts_with(r"\documentclass[11pt]{article}"));
        let row = r"\rowcolor[gray]{0.7} \textbf{R} &   1.0 & Foo St. &   1.0 \\ \hline";
        assert!(latex.contains(row));
    }

    #[test]
    fn test_source_to_text() {
        let text = SOURCE_TO_TEXT.run(source()).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_build_latex_uses_render_config() {
        let mut config = load_defaults().unwrap();
        config.render.gray_level = 0.5;
        let latex = build_latex(&config, true).run(source()).unwrap();
        assert!(latex.contains(r"\rowcolor[gray]{0.5}"));
    }
}
