//! Byte storage capability
//!
//! The core treats persistence as a file-like write/read/list capability so
//! hosts can substitute their own backend. The filesystem implementation is
//! the default.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Flat byte storage under a single root
///
/// All operations are blocking. Filenames are plain names without path
/// separators; the store owns the mapping onto its root.
pub trait ArtifactStore: Send + Sync {
    /// Persist `bytes` under `filename`, replacing any previous content
    fn write(&self, filename: &str, bytes: &[u8]) -> Result<()>;

    /// Whether `filename` is currently present
    fn exists(&self, filename: &str) -> bool;

    /// All filenames currently present, in unspecified order
    fn list(&self) -> Result<Vec<String>>;
}

/// Filesystem-backed artifact storage
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        debug!("artifact store rooted at {}", root.display());
        Ok(Self { root })
    }

    /// The storage root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }
}

impl ArtifactStore for FsArtifactStore {
    fn write(&self, filename: &str, bytes: &[u8]) -> Result<()> {
        fs::write(self.path_for(filename), bytes)?;
        debug!("wrote artifact {} ({} bytes)", filename, bytes.len());
        Ok(())
    }

    fn exists(&self, filename: &str) -> bool {
        self.path_for(filename).is_file()
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }
}
