//! Format identifier registry
//!
//! Maps each supported format identifier to a renderer capability and the
//! file extension its artifacts carry. Unknown identifiers are a typed
//! error at print time, never a crash.

use crate::renderers::{CallStackPrinter, DotPrinter, FlatPrinter, GraphHtmlPrinter};
use dashmap::DashMap;
use profiling_types::ProfilingResult;
use std::sync::Arc;
use tracing::debug;

/// Trait implemented by every output format
///
/// A renderer converts one profiling result into the byte representation of
/// its format. Rendering must not fail; formats that cannot represent a
/// given result render a best-effort placeholder instead.
pub trait ResultRenderer: Send + Sync {
    /// Render `result` to this format's byte representation
    fn render(&self, result: &ProfilingResult) -> Vec<u8>;
}

/// One registry entry: a renderer plus its artifact file extension
#[derive(Clone)]
pub struct RegisteredPrinter {
    renderer: Arc<dyn ResultRenderer>,
    extension: String,
}

impl RegisteredPrinter {
    /// The rendering capability
    pub fn renderer(&self) -> &Arc<dyn ResultRenderer> {
        &self.renderer
    }

    /// The file extension artifacts of this format carry
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

/// Registry of supported printer formats, keyed by format identifier
pub struct PrinterRegistry {
    printers: DashMap<String, RegisteredPrinter>,
}

impl PrinterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            printers: DashMap::new(),
        }
    }

    /// Create a registry pre-populated with the built-in formats
    ///
    /// Registers `flat` (.txt), `graph_html` (.html), `call_stack` (.html)
    /// and `dot` (.dot).
    pub fn with_default_printers() -> Self {
        let registry = Self::new();
        registry.register("flat", "txt", Arc::new(FlatPrinter));
        registry.register("graph_html", "html", Arc::new(GraphHtmlPrinter));
        registry.register("call_stack", "html", Arc::new(CallStackPrinter));
        registry.register("dot", "dot", Arc::new(DotPrinter));
        registry
    }

    /// Register a renderer under `kind`, replacing any previous entry
    pub fn register(&self, kind: &str, extension: &str, renderer: Arc<dyn ResultRenderer>) {
        debug!("registering printer kind: {} (.{})", kind, extension);
        self.printers.insert(
            kind.to_string(),
            RegisteredPrinter {
                renderer,
                extension: extension.to_string(),
            },
        );
    }

    /// Remove the renderer registered under `kind`
    ///
    /// Returns the removed entry, if it existed.
    pub fn unregister(&self, kind: &str) -> Option<RegisteredPrinter> {
        debug!("unregistering printer kind: {}", kind);
        self.printers.remove(kind).map(|(_, entry)| entry)
    }

    /// Look up the entry registered under `kind`
    pub fn lookup(&self, kind: &str) -> Option<RegisteredPrinter> {
        self.printers.get(kind).map(|entry| entry.clone())
    }

    /// Whether `kind` has a registered renderer
    pub fn supports(&self, kind: &str) -> bool {
        self.printers.contains_key(kind)
    }

    /// All registered format identifiers
    pub fn kinds(&self) -> Vec<String> {
        self.printers
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }
}

impl Default for PrinterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
