//! Error types for loading task-duration payloads.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading a task-duration payload.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The payload file could not be read.
    #[error("Read error: {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload is not valid task-duration JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
