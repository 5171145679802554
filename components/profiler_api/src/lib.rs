//! Public API for request-scoped profiling instrumentation
//!
//! This crate assembles the lower-level components into a single entry
//! point. A [`RequestProfiler`] holds the shared capabilities (storage,
//! printer registry, session store, profiler engine, routing scopes) and
//! wraps downstream handlers into profiling middleware.
//!
//! # Example
//!
//! ```no_run
//! use profiler_api::{RequestProfiler, RunnerConfig};
//! use std::sync::Arc;
//!
//! # fn app() -> Arc<dyn profiler_api::RequestHandler> { unimplemented!() }
//! # fn main() -> anyhow::Result<()> {
//! let profiler = RequestProfiler::new(
//!     RunnerConfig::builder()
//!         .storage_root("/var/tmp/profiles")
//!         .build(),
//! )?;
//!
//! let middleware = profiler.wrap(app());
//! // hand `middleware` to the server's middleware chain
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

use std::sync::Arc;
use tracing::debug;

// Re-export the public surface of the underlying components
pub use artifact_store::{
    ArtifactCatalog, ArtifactError, ArtifactIdentity, ArtifactStore, FsArtifactStore,
    ProfileArtifact,
};
pub use printer_registry::{Printer, PrinterError, PrinterRegistry, ResultRenderer};
pub use profiler_runner::{
    HttpRequest, HttpResponse, InMemorySessionStore, Profiler, RequestHandler, Runner,
    RunnerConfig, RunnerConfigBuilder, SessionStore, WallClockProfiler, SESSION_NAMESPACE,
};
pub use profiling_types::{
    CallNode, ExcludeFormats, PrinterSelection, ProfilingResult, RouteInfo, SessionId,
    SessionProfilingConfig, ARTIFACT_PREFIX, CONFIG_ENDPOINT_PATH,
};
pub use route_validator::{RouteRecognizer, RouteValidator, StaticRouteTable};

/// Assembled profiling instrumentation for a web application
///
/// Holds the capabilities shared by all requests and produces [`Runner`]
/// middlewares bound to them. The default assembly persists artifacts to
/// the filesystem, ships the built-in printer formats, keeps session
/// configuration in process memory and measures wall-clock time; each piece
/// can be swapped through the `with_*` methods.
pub struct RequestProfiler {
    config: RunnerConfig,
    profiler: Arc<dyn Profiler>,
    sessions: Arc<dyn SessionStore>,
    recognizers: Vec<Arc<dyn RouteRecognizer>>,
    registry: Arc<PrinterRegistry>,
    store: Arc<dyn ArtifactStore>,
}

impl RequestProfiler {
    /// Assemble the default stack for `config`
    ///
    /// Creates the artifact storage root eagerly; fails if it cannot be
    /// created.
    pub fn new(config: RunnerConfig) -> anyhow::Result<Self> {
        let store = FsArtifactStore::new(config.storage_root())?;
        debug!(
            "request profiler assembled, storage root {}",
            config.storage_root().display()
        );
        Ok(Self {
            config,
            profiler: Arc::new(WallClockProfiler::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
            recognizers: Vec::new(),
            registry: Arc::new(PrinterRegistry::with_default_printers()),
            store: Arc::new(store),
        })
    }

    /// Append a routing scope; scopes are consulted in registration order
    pub fn with_recognizer(mut self, recognizer: Arc<dyn RouteRecognizer>) -> Self {
        self.recognizers.push(recognizer);
        self
    }

    /// Replace the profiler engine
    pub fn with_profiler(mut self, profiler: Arc<dyn Profiler>) -> Self {
        self.profiler = profiler;
        self
    }

    /// Replace the session store
    pub fn with_session_store(mut self, sessions: Arc<dyn SessionStore>) -> Self {
        self.sessions = sessions;
        self
    }

    /// Replace the artifact storage backend
    pub fn with_store(mut self, store: Arc<dyn ArtifactStore>) -> Self {
        self.store = store;
        self
    }

    /// Replace the printer registry
    pub fn with_registry(mut self, registry: Arc<PrinterRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Wrap a downstream handler into profiling middleware
    pub fn wrap(&self, app: Arc<dyn RequestHandler>) -> Runner {
        let validator = RouteValidator::new(self.recognizers.clone())
            .with_config_endpoint(self.config.config_endpoint());
        Runner::new(
            app,
            self.profiler.clone(),
            validator,
            self.sessions.clone(),
            self.registry.clone(),
            self.store.clone(),
        )
    }

    /// A catalog over the artifact storage this profiler writes into
    pub fn catalog(&self) -> ArtifactCatalog {
        ArtifactCatalog::new(self.store.clone())
    }

    /// The session store read by the middleware
    ///
    /// The administrative configuration endpoint writes sessions through
    /// this handle.
    pub fn sessions(&self) -> Arc<dyn SessionStore> {
        self.sessions.clone()
    }

    /// The configuration this profiler was assembled with
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }
}
