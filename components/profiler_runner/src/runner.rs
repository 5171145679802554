//! The middleware runner
//!
//! One `Runner::call` corresponds to one in-flight request. Everything the
//! profiled request produces (the result, the printer, the artifacts) is
//! request-local; the shared pieces (validator, registry, stores) are only
//! read.

use crate::handler::{HttpRequest, HttpResponse, RequestHandler};
use crate::profiler::Profiler;
use crate::session::SessionStore;
use artifact_store::ArtifactStore;
use async_trait::async_trait;
use printer_registry::{Printer, PrinterRegistry};
use profiling_types::{SessionId, SessionProfilingConfig};
use route_validator::RouteValidator;
use std::sync::Arc;
use tracing::debug;

/// Profiling middleware wrapping a downstream request handler
///
/// For every request the runner reads the session's profiling
/// configuration and asks the route validator whether the request is
/// eligible. Eligible requests get the downstream call bracketed with a
/// symmetric profiler start/stop, and the captured result fans out to the
/// configured printers. Profiling is a pure side channel: the downstream
/// response (or failure) always reaches the caller unchanged.
pub struct Runner {
    app: Arc<dyn RequestHandler>,
    profiler: Arc<dyn Profiler>,
    validator: RouteValidator,
    sessions: Arc<dyn SessionStore>,
    registry: Arc<PrinterRegistry>,
    store: Arc<dyn ArtifactStore>,
}

impl Runner {
    /// Create a runner around the downstream handler `app`
    pub fn new(
        app: Arc<dyn RequestHandler>,
        profiler: Arc<dyn Profiler>,
        validator: RouteValidator,
        sessions: Arc<dyn SessionStore>,
        registry: Arc<PrinterRegistry>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            app,
            profiler,
            validator,
            sessions,
            registry,
            store,
        }
    }

    /// Whether profiling is enabled for this session configuration
    pub fn enabled(&self, config: &SessionProfilingConfig) -> bool {
        config.enabled
    }

    /// Whether profiling is disabled for this session configuration
    pub fn disabled(&self, config: &SessionProfilingConfig) -> bool {
        !self.enabled(config)
    }

    /// Whether this request must pass through uninstrumented
    ///
    /// True if the path is the configuration endpoint, profiling is
    /// disabled for the session, or the path is not a valid non-excluded
    /// route.
    pub fn skip(&self, path: &str, config: &SessionProfilingConfig) -> bool {
        if self.validator.config_path(path) {
            return true;
        }
        if self.disabled(config) {
            return true;
        }
        !self.validator.valid(path, &config.excludes())
    }

    /// Handle one request, profiling it when eligible
    pub async fn call(&self, request: HttpRequest) -> anyhow::Result<HttpResponse> {
        let path = request.uri().path().to_string();
        let config = self.session_config(&request);

        if self.skip(&path, &config) {
            debug!("passing through uninstrumented: {}", path);
            return self.app.call(request).await;
        }

        self.profiler.start();
        let outcome = self.app.call(request).await;
        // Stop symmetrically before looking at the outcome, so a failing
        // downstream handler cannot leave the profiler running.
        let result = self.profiler.stop();

        let response = outcome?;

        let printer = Printer::new(&config.printers, self.registry.clone(), self.store.clone());
        let artifacts = printer.print(&result);
        debug!("profiled {}: {} artifact(s)", path, artifacts.len());

        Ok(response)
    }

    /// Read the session's configuration, falling back to the default
    ///
    /// A request without a session extension, or a session without a stored
    /// entry, profiles with the default configuration (enabled).
    fn session_config(&self, request: &HttpRequest) -> SessionProfilingConfig {
        request
            .extensions()
            .get::<SessionId>()
            .and_then(|session| self.sessions.load(session))
            .unwrap_or_default()
    }
}

#[async_trait]
impl RequestHandler for Runner {
    async fn call(&self, request: HttpRequest) -> anyhow::Result<HttpResponse> {
        Runner::call(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InMemorySessionStore;
    use anyhow::anyhow;
    use artifact_store::{ArtifactCatalog, FsArtifactStore};
    use http::Request;
    use profiling_types::{
        CallNode, PrinterSelection, ProfilingResult, RouteInfo, CONFIG_ENDPOINT_PATH,
    };
    use route_validator::StaticRouteTable;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct EchoHandler;

    #[async_trait]
    impl RequestHandler for EchoHandler {
        async fn call(&self, request: HttpRequest) -> anyhow::Result<HttpResponse> {
            let body = format!("echo {}", request.uri().path()).into_bytes();
            Ok(http::Response::builder().status(200).body(body).unwrap())
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl RequestHandler for FailingHandler {
        async fn call(&self, _request: HttpRequest) -> anyhow::Result<HttpResponse> {
            Err(anyhow!("downstream exploded"))
        }
    }

    /// Profiler double tracking start/stop symmetry
    struct RecordingProfiler {
        active: AtomicBool,
        starts: AtomicUsize,
        stops: AtomicUsize,
    }

    impl RecordingProfiler {
        fn new() -> Self {
            Self {
                active: AtomicBool::new(false),
                starts: AtomicUsize::new(0),
                stops: AtomicUsize::new(0),
            }
        }
    }

    impl Profiler for RecordingProfiler {
        fn start(&self) {
            self.active.store(true, Ordering::SeqCst);
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn stop(&self) -> ProfilingResult {
            self.active.store(false, Ordering::SeqCst);
            self.stops.fetch_add(1, Ordering::SeqCst);
            ProfilingResult {
                nodes: vec![CallNode {
                    id: 0,
                    name: "request".to_string(),
                    self_time_us: 10,
                    total_time_us: 10,
                    call_count: 1,
                    children: vec![],
                }],
                start_time: 0.0,
                end_time: 10.0,
            }
        }
    }

    struct Fixture {
        runner: Runner,
        profiler: Arc<RecordingProfiler>,
        sessions: Arc<InMemorySessionStore>,
        catalog: ArtifactCatalog,
        _dir: TempDir,
    }

    fn fixture(app: Arc<dyn RequestHandler>) -> Fixture {
        let dir = TempDir::new().unwrap();
        let store: Arc<dyn ArtifactStore> = Arc::new(FsArtifactStore::new(dir.path()).unwrap());
        let profiler = Arc::new(RecordingProfiler::new());
        let sessions = Arc::new(InMemorySessionStore::new());

        let table = StaticRouteTable::new()
            .route("/pages/1", RouteInfo::new("pages", "show", "/pages/1").with_format("html"))
            .route(
                "/logo.jpeg",
                RouteInfo::new("assets", "show", "/logo.jpeg").with_format("jpeg"),
            );
        let validator = RouteValidator::new(vec![Arc::new(table)]);

        let runner = Runner::new(
            app,
            profiler.clone(),
            validator,
            sessions.clone(),
            Arc::new(PrinterRegistry::with_default_printers()),
            store.clone(),
        );

        Fixture {
            runner,
            profiler,
            sessions,
            catalog: ArtifactCatalog::new(store),
            _dir: dir,
        }
    }

    fn request(path: &str, session: Option<&str>) -> HttpRequest {
        let mut request = Request::builder().uri(path).body(Vec::new()).unwrap();
        if let Some(id) = session {
            request.extensions_mut().insert(SessionId::new(id));
        }
        request
    }

    fn session_config(enabled: bool, printers: PrinterSelection, excludes: &str) -> SessionProfilingConfig {
        SessionProfilingConfig {
            enabled,
            printers,
            exclude_formats: excludes.to_string(),
        }
    }

    #[test]
    fn test_enabled_and_disabled() {
        let fixture = fixture(Arc::new(EchoHandler));
        let config = SessionProfilingConfig::default();

        assert!(fixture.runner.enabled(&config));
        assert!(!fixture.runner.disabled(&config));

        let off = session_config(false, PrinterSelection::default(), "");
        assert!(fixture.runner.disabled(&off));
    }

    #[test]
    fn test_skip_config_endpoint() {
        let fixture = fixture(Arc::new(EchoHandler));

        // Regardless of enabled state or route validity
        let config = SessionProfilingConfig::default();
        assert!(fixture.runner.skip(CONFIG_ENDPOINT_PATH, &config));
    }

    #[test]
    fn test_skip_when_disabled() {
        let fixture = fixture(Arc::new(EchoHandler));
        let config = session_config(false, PrinterSelection::default(), "");

        assert!(fixture.runner.skip("/pages/1", &config));
    }

    #[test]
    fn test_skip_unresolved_route() {
        let fixture = fixture(Arc::new(EchoHandler));
        let config = SessionProfilingConfig::default();

        assert!(fixture.runner.skip("/not/a/route", &config));
    }

    #[test]
    fn test_skip_excluded_format() {
        let fixture = fixture(Arc::new(EchoHandler));
        let config = session_config(true, PrinterSelection::default(), "png, jpeg, js");

        assert!(fixture.runner.skip("/logo.jpeg", &config));
    }

    #[test]
    fn test_no_skip_for_valid_route() {
        let fixture = fixture(Arc::new(EchoHandler));
        let config = SessionProfilingConfig::default();

        assert!(!fixture.runner.skip("/pages/1", &config));
    }

    #[tokio::test]
    async fn test_skipped_request_passes_through_untouched() {
        let fixture = fixture(Arc::new(EchoHandler));
        fixture.sessions.store(
            SessionId::new("s1"),
            session_config(false, PrinterSelection::default(), ""),
        );

        let response = fixture
            .runner
            .call(request("/pages/1", Some("s1")))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), b"echo /pages/1");
        // No profiler invocation, no artifacts
        assert_eq!(fixture.profiler.starts.load(Ordering::SeqCst), 0);
        assert!(fixture.catalog.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_profiled_request_produces_artifact() {
        let fixture = fixture(Arc::new(EchoHandler));
        fixture.sessions.store(
            SessionId::new("s1"),
            session_config(true, PrinterSelection::One("flat".to_string()), ""),
        );

        let response = fixture
            .runner
            .call(request("/pages/1", Some("s1")))
            .await
            .unwrap();

        // Response unchanged
        assert_eq!(response.body(), b"echo /pages/1");

        // One flat artifact persisted
        let artifacts = fixture.catalog.list().unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].extension(), "txt");

        // Symmetric start/stop
        assert_eq!(fixture.profiler.starts.load(Ordering::SeqCst), 1);
        assert_eq!(fixture.profiler.stops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_multiple_printers_fan_out() {
        let fixture = fixture(Arc::new(EchoHandler));
        fixture.sessions.store(
            SessionId::new("s1"),
            session_config(
                true,
                PrinterSelection::Many(vec!["flat".to_string(), "dot".to_string()]),
                "",
            ),
        );

        fixture
            .runner
            .call(request("/pages/1", Some("s1")))
            .await
            .unwrap();

        assert_eq!(fixture.catalog.list().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_session_profiles_with_defaults() {
        let fixture = fixture(Arc::new(EchoHandler));

        fixture.runner.call(request("/pages/1", None)).await.unwrap();

        // Default config is enabled with the flat printer
        let artifacts = fixture.catalog.list().unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].extension(), "txt");
    }

    #[tokio::test]
    async fn test_excluded_route_leaves_catalog_unchanged() {
        let fixture = fixture(Arc::new(EchoHandler));
        fixture.sessions.store(
            SessionId::new("s1"),
            session_config(true, PrinterSelection::default(), "jpeg"),
        );

        fixture
            .runner
            .call(request("/logo.jpeg", Some("s1")))
            .await
            .unwrap();

        assert!(fixture.catalog.list().unwrap().is_empty());
        assert_eq!(fixture.profiler.starts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_downstream_failure_propagates_with_symmetric_stop() {
        let fixture = fixture(Arc::new(FailingHandler));

        let err = fixture
            .runner
            .call(request("/pages/1", None))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "downstream exploded");
        // Profiler stopped even though the handler failed
        assert_eq!(fixture.profiler.starts.load(Ordering::SeqCst), 1);
        assert_eq!(fixture.profiler.stops.load(Ordering::SeqCst), 1);
        assert!(!fixture.profiler.active.load(Ordering::SeqCst));
        // The failed request leaves no artifacts behind
        assert!(fixture.catalog.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_printer_kind_does_not_break_response() {
        let fixture = fixture(Arc::new(EchoHandler));
        fixture.sessions.store(
            SessionId::new("s1"),
            session_config(
                true,
                PrinterSelection::Many(vec!["pdf".to_string(), "flat".to_string()]),
                "",
            ),
        );

        let response = fixture
            .runner
            .call(request("/pages/1", Some("s1")))
            .await
            .unwrap();

        // Response untouched; the supported neighbor still rendered
        assert_eq!(response.status(), 200);
        let artifacts = fixture.catalog.list().unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].extension(), "txt");
    }

    #[tokio::test]
    async fn test_runner_chains_as_request_handler() {
        let inner = fixture(Arc::new(EchoHandler));
        let outer: Arc<dyn RequestHandler> = Arc::new(inner.runner);

        let response = outer.call(request("/pages/1", None)).await.unwrap();

        assert_eq!(response.body(), b"echo /pages/1");
    }
}
