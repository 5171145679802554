//! Printer registry and multi-format fan-out
//!
//! Converts one profiling result into N persisted artifacts. Each supported
//! output format is registered under a string identifier together with its
//! file extension; the printer walks the session's configured identifiers in
//! order and renders each through the registry.

mod error;
mod printer;
mod registry;
pub mod renderers;

pub use error::{PrinterError, Result};
pub use printer::Printer;
pub use registry::{PrinterRegistry, RegisteredPrinter, ResultRenderer};
