//! One persisted profiling output
//!
//! Filenames follow `<PREFIX>-<id>.<extension>` where the id is
//! `<unix-seconds>-<uuid>`. The random component keeps concurrent writers
//! from ever allocating the same filename; the leading seconds let the
//! creation time be recovered from the name alone.

use crate::store::ArtifactStore;
use profiling_types::ARTIFACT_PREFIX;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

/// Identity mapping used for artifact equality and display
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactIdentity {
    /// The core-wide artifact prefix
    pub prefix: String,
    /// Per-artifact unique token
    pub id: String,
    /// Creation time, RFC 3339
    pub time: String,
    /// Full artifact filename
    pub filename: String,
}

/// One persisted, format-specific rendering of a profiling result
#[derive(Debug, Clone)]
pub struct ProfileArtifact {
    filename: String,
    id: String,
    extension: String,
}

impl ProfileArtifact {
    /// Allocate a new artifact with a fresh unique id and the given extension
    pub fn allocate(extension: &str) -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let id = format!("{}-{}", seconds, Uuid::new_v4().simple());
        let filename = format!("{}-{}.{}", ARTIFACT_PREFIX, id, extension);
        debug!("allocated artifact {}", filename);
        Self {
            filename,
            id,
            extension: extension.to_string(),
        }
    }

    /// Reconstruct an artifact from a stored filename
    ///
    /// Returns `None` unless the name matches `<PREFIX>-<id>.<extension>`.
    pub fn from_filename(name: &str) -> Option<Self> {
        let rest = name.strip_prefix(ARTIFACT_PREFIX)?.strip_prefix('-')?;
        let (id, extension) = rest.rsplit_once('.')?;
        if id.is_empty() || extension.is_empty() {
            return None;
        }
        Some(Self {
            filename: name.to_string(),
            id: id.to_string(),
            extension: extension.to_string(),
        })
    }

    /// Full filename, `<PREFIX>-<id>.<extension>`
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Per-artifact unique token
    pub fn id(&self) -> &str {
        &self.id
    }

    /// File extension determined by the printer format
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Creation time decoded from the leading seconds of the id
    ///
    /// Falls back to the epoch when the id carries no decodable timestamp.
    pub fn time(&self) -> OffsetDateTime {
        self.id
            .split('-')
            .next()
            .and_then(|seconds| seconds.parse::<i64>().ok())
            .and_then(|seconds| OffsetDateTime::from_unix_timestamp(seconds).ok())
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }

    /// Whether the artifact file is currently present in `store`
    pub fn exists(&self, store: &dyn ArtifactStore) -> bool {
        store.exists(&self.filename)
    }

    /// Human-readable label, formatted creation time plus format extension
    pub fn friendly_filename(&self) -> String {
        let timestamp = self
            .time()
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.id.clone());
        format!("{} ({})", timestamp, self.extension)
    }

    /// The identity mapping `{prefix, id, time, filename}`
    pub fn identity(&self) -> ArtifactIdentity {
        ArtifactIdentity {
            prefix: ARTIFACT_PREFIX.to_string(),
            id: self.id.clone(),
            time: self
                .time()
                .format(&Rfc3339)
                .unwrap_or_else(|_| self.id.clone()),
            filename: self.filename.clone(),
        }
    }
}

impl PartialEq for ProfileArtifact {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for ProfileArtifact {}
