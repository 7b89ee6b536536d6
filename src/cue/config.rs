//! Configuration loading
//!
//! `defaults/cuesheet.default.toml` is embedded into the binary so the documented
//! defaults and runtime behavior stay in sync. Callers layer user files and single-key
//! overrides on top via [`Loader`] before deserializing into [`CueConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/cuesheet.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CueConfig {
    pub ingest: IngestConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IngestConfig {
    pub quick_threshold_mi: f64,
}

/// LaTeX rendering knobs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderConfig {
    pub gray_level: f64,
    pub font_size: String,
    pub two_column: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            gray_level: 0.7,
            font_size: "11pt".to_string(),
            two_column: true,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `render.two_column`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<CueConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CueConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.ingest.quick_threshold_mi, 0.1);
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("render.two_column", false)
            .expect("override to apply")
            .set_override("ingest.quick_threshold_mi", 0.25)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(!config.render.two_column);
        assert_eq!(config.ingest.quick_threshold_mi, 0.25);
        assert_eq!(config.render.gray_level, 0.7);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[render]\ngray_level = 0.85\nfont_size = \"10pt\"").expect("write");

        let config = Loader::new().with_file(file.path()).build().expect("config to build");
        assert_eq!(config.render.gray_level, 0.85);
        assert_eq!(config.render.font_size, "10pt");
        assert!(config.render.two_column);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/cuesheet.toml")
            .build()
            .expect("config to build");
        assert_eq!(config, load_defaults().expect("defaults"));
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new()
            .with_file("/nonexistent/cuesheet.toml")
            .build()
            .is_err());
    }
}
