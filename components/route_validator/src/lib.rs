//! Request eligibility via route resolution
//!
//! Decides whether a request URI maps to a real, non-excluded application
//! route. Resolution is attempted against an ordered list of routing scopes
//! (the host application plus any mounted sub-applications); the first scope
//! that recognizes the path wins. Paths no scope recognizes are not real
//! routes and are never profiled.

use profiling_types::{ExcludeFormats, RouteInfo, CONFIG_ENDPOINT_PATH};
use std::sync::Arc;
use tracing::debug;

/// Trait implemented by each routing scope the validator consults
///
/// A scope is typically backed by the host framework's route table. Scopes
/// are consulted in registration order; returning `None` passes the path to
/// the next scope.
pub trait RouteRecognizer: Send + Sync {
    /// Resolve a request path to routing metadata, or `None` if this scope
    /// does not recognize it
    fn recognize(&self, path: &str) -> Option<RouteInfo>;
}

/// A fixed, ordered route table with exact-path matching
///
/// Serves hosts without a dynamic router, and tests. Entries are matched in
/// insertion order.
#[derive(Default)]
pub struct StaticRouteTable {
    entries: Vec<(String, RouteInfo)>,
}

impl StaticRouteTable {
    /// Create an empty route table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route entry
    pub fn route(mut self, path: impl Into<String>, info: RouteInfo) -> Self {
        self.entries.push((path.into(), info));
        self
    }
}

impl RouteRecognizer for StaticRouteTable {
    fn recognize(&self, path: &str) -> Option<RouteInfo> {
        self.entries
            .iter()
            .find(|(entry_path, _)| entry_path == path)
            .map(|(_, info)| info.clone())
    }
}

/// Per-request eligibility gate over route resolution and format exclusion
#[derive(Clone)]
pub struct RouteValidator {
    scopes: Vec<Arc<dyn RouteRecognizer>>,
    config_endpoint: String,
}

impl RouteValidator {
    /// Create a validator over an ordered list of routing scopes
    ///
    /// An empty list means no path ever resolves, so every request is
    /// treated as invalid for profiling.
    pub fn new(scopes: Vec<Arc<dyn RouteRecognizer>>) -> Self {
        Self {
            scopes,
            config_endpoint: CONFIG_ENDPOINT_PATH.to_string(),
        }
    }

    /// Override the configuration endpoint path guarded by this validator
    pub fn with_config_endpoint(mut self, path: impl Into<String>) -> Self {
        self.config_endpoint = path.into();
        self
    }

    /// Whether `path` is a real, non-excluded route
    ///
    /// True iff the path is not the configuration endpoint and some scope
    /// resolves it to a route whose format passes [`Self::valid_format`].
    pub fn valid(&self, path: &str, excludes: &ExcludeFormats) -> bool {
        if self.config_path(path) {
            debug!("skipping configuration endpoint: {}", path);
            return false;
        }

        let info = self.resolve(path);
        Self::valid_format(info.as_ref(), excludes)
    }

    /// Whether `path` is exactly the configuration endpoint path
    pub fn config_path(&self, path: &str) -> bool {
        path == self.config_endpoint
    }

    /// Whether resolved route metadata carries a usable, non-excluded format
    ///
    /// A missing route, a missing format, and an empty format are all
    /// invalid: a route that cannot be classified cannot be filtered.
    pub fn valid_format(info: Option<&RouteInfo>, excludes: &ExcludeFormats) -> bool {
        match info.and_then(|info| info.format.as_deref()) {
            Some(format) if !format.is_empty() => !excludes.contains(format),
            _ => false,
        }
    }

    /// Resolve `path` against the scopes in order; first match wins
    fn resolve(&self, path: &str) -> Option<RouteInfo> {
        for scope in &self.scopes {
            if let Some(info) = scope.recognize(path) {
                return Some(info);
            }
        }
        debug!("no routing scope recognized path: {}", path);
        None
    }
}
