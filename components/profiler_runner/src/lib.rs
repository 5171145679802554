//! Profiling middleware runner
//!
//! This crate ties the eligibility gate, the profiler capability and the
//! printer fan-out into a single middleware: the [`Runner`] wraps a
//! downstream request handler, decides per request whether to profile, and
//! renders the captured result to persisted artifacts as a pure side
//! channel. The client-visible response is never altered.

mod config;
mod handler;
mod profiler;
mod runner;
mod session;

pub use config::{RunnerConfig, RunnerConfigBuilder};
pub use handler::{HttpRequest, HttpResponse, RequestHandler};
pub use profiler::{Profiler, WallClockProfiler};
pub use runner::Runner;
pub use session::{InMemorySessionStore, SessionStore, SESSION_NAMESPACE};
