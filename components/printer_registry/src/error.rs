//! Error types for printing

use artifact_store::ArtifactError;
use thiserror::Error;

/// Errors that can occur while rendering and persisting one artifact
///
/// Printing is an auxiliary instrumentation path: callers isolate these
/// per-entry and never let them reach the client-visible response.
#[derive(Error, Debug)]
pub enum PrinterError {
    /// The configured format identifier has no registered renderer
    #[error("Unsupported printer kind: {0}")]
    UnsupportedKind(String),

    /// Persisting the rendered bytes failed
    #[error("Storage error: {0}")]
    Storage(#[from] ArtifactError),
}

/// Result type for printing operations
pub type Result<T> = std::result::Result<T, PrinterError>;
