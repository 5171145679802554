//! Error types for artifact storage

use thiserror::Error;

/// Errors that can occur while persisting or listing artifacts
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Underlying storage I/O failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A filename did not match the artifact naming scheme
    #[error("Not an artifact filename: {0}")]
    InvalidFilename(String),
}

/// Result type for artifact storage operations
pub type Result<T> = std::result::Result<T, ArtifactError>;
