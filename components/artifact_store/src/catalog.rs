//! Catalog of persisted artifacts
//!
//! The catalog is a view over the storage root: it holds no cache and every
//! query reflects the storage state at the moment of the call.

use crate::artifact::ProfileArtifact;
use crate::error::Result;
use crate::store::ArtifactStore;
use std::sync::Arc;

/// Enumerates and queries the artifacts currently present in storage
#[derive(Clone)]
pub struct ArtifactCatalog {
    store: Arc<dyn ArtifactStore>,
}

impl ArtifactCatalog {
    /// Create a catalog over `store`
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self { store }
    }

    /// All artifacts currently present, most-recent-first
    ///
    /// Filenames that do not match the artifact naming scheme are ignored.
    /// Ordering is descending by decoded creation time, ties broken by
    /// descending filename, so repeated calls over unchanged storage return
    /// the same sequence.
    pub fn list(&self) -> Result<Vec<ProfileArtifact>> {
        let mut artifacts: Vec<ProfileArtifact> = self
            .store
            .list()?
            .iter()
            .filter_map(|name| ProfileArtifact::from_filename(name))
            .collect();
        artifacts.sort_by(|a, b| {
            b.time()
                .cmp(&a.time())
                .then_with(|| b.filename().cmp(a.filename()))
        });
        Ok(artifacts)
    }

    /// Find one artifact by its id
    pub fn find(&self, id: &str) -> Result<Option<ProfileArtifact>> {
        Ok(self
            .list()?
            .into_iter()
            .find(|artifact| artifact.id() == id))
    }

    /// The underlying storage capability
    pub fn store(&self) -> &Arc<dyn ArtifactStore> {
        &self.store
    }
}
