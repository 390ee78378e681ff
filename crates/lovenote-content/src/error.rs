//! Content error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a narrative script.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The script file could not be read.
    #[error("failed to read script {path}: {source}")]
    Read {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The script is not valid YAML for the script schema.
    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The script could not be encoded for hashing.
    #[error("failed to encode script: {0}")]
    Encode(#[from] serde_json::Error),

    /// The script parsed but does not describe the story's pages.
    #[error("invalid script: {0}")]
    Validation(String),
}
