//! Configuration for the argdown preprocessor.
//!
//! The preprocessor has two knobs: the prefix of generated titles and whether
//! the relation summary is logged after each document. Their defaults live in
//! `defaults/argdown.default.toml`, compiled into the crate; a [`Loader`] stacks
//! project files or single values over them and yields an [`ArgdownConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/argdown.default.toml");

/// Top-level configuration consumed by the preprocessor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArgdownConfig {
    pub titles: TitlesConfig,
    pub relations: RelationsConfig,
}

/// Naming of statements and arguments that carry no explicit title.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TitlesConfig {
    pub untitled_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelationsConfig {
    /// Log every relation once the document has been processed.
    pub log_summary: bool,
}

impl Default for ArgdownConfig {
    /// Same values as the embedded defaults file, without going through the loader.
    fn default() -> Self {
        Self {
            titles: TitlesConfig {
                untitled_prefix: "Untitled".to_string(),
            },
            relations: RelationsConfig { log_summary: false },
        }
    }
}

/// Stack of configuration sources, later sources overriding earlier ones.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A stack holding only the compiled-in defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Adds a TOML file; `build` fails if it does not exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.toml_file(path.as_ref(), true)
    }

    /// Adds a TOML file that is skipped when absent, e.g. a per-project
    /// `argdown.toml`.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.toml_file(path.as_ref(), false)
    }

    fn toml_file(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Adds inline TOML text.
    pub fn with_toml(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Pins one dotted key, such as `titles.untitled_prefix`, above every
    /// source added so far or later.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merges the stack and reads it into an [`ArgdownConfig`].
    pub fn build(self) -> Result<ArgdownConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The compiled-in defaults, read through the same path as user files.
pub fn load_defaults() -> Result<ArgdownConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.titles.untitled_prefix, "Untitled");
        assert!(!config.relations.log_summary);
    }

    #[test]
    fn embedded_defaults_match_default_impl() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config, ArgdownConfig::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("titles.untitled_prefix", "Anonymous")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.titles.untitled_prefix, "Anonymous");
    }

    #[test]
    fn overrides_beat_sources_added_afterwards() {
        let config = Loader::new()
            .set_override("titles.untitled_prefix", "Pinned")
            .expect("override to apply")
            .with_toml("[titles]\nuntitled_prefix = \"FromToml\"\n")
            .build()
            .expect("config to build");
        assert_eq!(config.titles.untitled_prefix, "Pinned");
    }

    #[test]
    fn later_sources_win() {
        let config = Loader::new()
            .with_toml("[relations]\nlog_summary = true\n")
            .build()
            .expect("config to build");
        assert!(config.relations.log_summary);
        assert_eq!(config.titles.untitled_prefix, "Untitled");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new()
            .with_file("/nonexistent/argdown.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/argdown.toml")
            .build()
            .expect("optional file to be skipped");
        assert_eq!(config, load_defaults().expect("defaults"));
    }
}
