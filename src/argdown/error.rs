//! Error types for the fallible edges of the preprocessor
//!
//! The traversal itself never fails: missing titles are generated and missing
//! optional children are skipped. Only reading input trees and loading
//! configuration can go wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The parse tree handed over as JSON could not be read.
    #[error("invalid parse tree: {0}")]
    Json(#[from] serde_json::Error),
    /// Configuration files could not be loaded or deserialized.
    #[error("invalid configuration: {0}")]
    Config(#[from] argdown_config::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
