//! Configuration for the profiling middleware

use profiling_types::CONFIG_ENDPOINT_PATH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for assembling the profiling middleware
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Directory artifacts are persisted into
    storage_root: PathBuf,

    /// Reserved path of the configuration endpoint; requests to it are
    /// never instrumented
    config_endpoint: String,
}

impl RunnerConfig {
    /// Create a new builder for RunnerConfig
    pub fn builder() -> RunnerConfigBuilder {
        RunnerConfigBuilder::default()
    }

    /// The artifact storage root
    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    /// The reserved configuration endpoint path
    pub fn config_endpoint(&self) -> &str {
        &self.config_endpoint
    }
}

impl Default for RunnerConfig {
    /// Default values:
    /// - storage_root: `./profile_artifacts`
    /// - config_endpoint: the core-wide constant path
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from("./profile_artifacts"),
            config_endpoint: CONFIG_ENDPOINT_PATH.to_string(),
        }
    }
}

/// Builder for RunnerConfig
#[derive(Debug, Clone, Default)]
pub struct RunnerConfigBuilder {
    storage_root: Option<PathBuf>,
    config_endpoint: Option<String>,
}

impl RunnerConfigBuilder {
    /// Set the artifact storage root
    pub fn storage_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.storage_root = Some(root.into());
        self
    }

    /// Set the reserved configuration endpoint path
    pub fn config_endpoint(mut self, path: impl Into<String>) -> Self {
        self.config_endpoint = Some(path.into());
        self
    }

    /// Build the RunnerConfig, using defaults for unset options
    pub fn build(self) -> RunnerConfig {
        let default = RunnerConfig::default();
        RunnerConfig {
            storage_root: self.storage_root.unwrap_or(default.storage_root),
            config_endpoint: self.config_endpoint.unwrap_or(default.config_endpoint),
        }
    }
}
