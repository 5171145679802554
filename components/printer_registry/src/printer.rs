//! Multi-format printing of one profiling result
//!
//! The printer walks the session's configured format identifiers in order
//! and produces one persisted artifact per successful render. Entries are
//! isolated from each other: an unknown identifier or a failed write is
//! logged and skipped, and the remaining formats still render.

use crate::error::{PrinterError, Result};
use crate::registry::PrinterRegistry;
use artifact_store::{ArtifactStore, ProfileArtifact};
use profiling_types::{PrinterSelection, ProfilingResult};
use std::sync::Arc;
use tracing::{debug, warn};

/// Renders a profiling result through the configured formats and persists
/// each rendering as an artifact
pub struct Printer {
    kinds: Vec<String>,
    registry: Arc<PrinterRegistry>,
    store: Arc<dyn ArtifactStore>,
}

impl Printer {
    /// Create a printer bound to a session's format selection
    ///
    /// The selection's order is kept and duplicates are not collapsed:
    /// printing the same result twice with the same format yields two
    /// distinct artifacts.
    pub fn new(
        selection: &PrinterSelection,
        registry: Arc<PrinterRegistry>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            kinds: selection.kinds().iter().map(|s| s.to_string()).collect(),
            registry,
            store,
        }
    }

    /// The format identifiers this printer will render, in order
    pub fn kinds(&self) -> &[String] {
        &self.kinds
    }

    /// Render and persist `result` through every configured format
    ///
    /// Returns the successfully persisted artifacts in configuration order.
    /// Failed entries are logged and skipped; they never abort the rest of
    /// the fan-out.
    pub fn print(&self, result: &ProfilingResult) -> Vec<ProfileArtifact> {
        let mut artifacts = Vec::with_capacity(self.kinds.len());
        for kind in &self.kinds {
            match self.print_one(kind, result) {
                Ok(artifact) => artifacts.push(artifact),
                Err(err) => warn!("printer {} skipped: {}", kind, err),
            }
        }
        artifacts
    }

    /// Render and persist `result` through a single format
    pub fn print_one(&self, kind: &str, result: &ProfilingResult) -> Result<ProfileArtifact> {
        let entry = self
            .registry
            .lookup(kind)
            .ok_or_else(|| PrinterError::UnsupportedKind(kind.to_string()))?;

        let bytes = entry.renderer().render(result);
        let artifact = ProfileArtifact::allocate(entry.extension());
        self.store.write(artifact.filename(), &bytes)?;
        debug!(
            "printed {} as {} ({} bytes)",
            kind,
            artifact.filename(),
            bytes.len()
        );
        Ok(artifact)
    }
}
