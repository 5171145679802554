//! Profiler capability
//!
//! The engine that actually samples execution is an external collaborator;
//! the middleware only needs a symmetric start/stop pair producing a
//! [`ProfilingResult`]. An instance supports at most one active start/stop
//! pair; per-worker isolation is the host's obligation, so two requests must
//! never share one instance while both are being profiled.

use parking_lot::Mutex;
use profiling_types::{CallNode, ProfilingResult};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Start/stop profiling capability consumed by the runner
pub trait Profiler: Send + Sync {
    /// Begin sampling
    fn start(&self);

    /// Stop sampling and yield the captured result
    fn stop(&self) -> ProfilingResult;
}

/// Built-in engine measuring the wall-clock window of the downstream call
///
/// Produces a single-root result covering the elapsed time between start and
/// stop. Stopping without a prior start yields an empty zero-width result.
pub struct WallClockProfiler {
    started: Mutex<Option<(Instant, f64)>>,
}

impl WallClockProfiler {
    /// Create an idle profiler
    pub fn new() -> Self {
        Self {
            started: Mutex::new(None),
        }
    }

    /// Current timestamp in microseconds since the epoch
    fn timestamp_micros() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as f64)
            .unwrap_or(0.0)
    }
}

impl Default for WallClockProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler for WallClockProfiler {
    fn start(&self) {
        debug!("wall-clock profiler started");
        *self.started.lock() = Some((Instant::now(), Self::timestamp_micros()));
    }

    fn stop(&self) -> ProfilingResult {
        match self.started.lock().take() {
            Some((instant, start_time)) => {
                let elapsed_us = instant.elapsed().as_micros() as u64;
                debug!("wall-clock profiler stopped after {} us", elapsed_us);
                ProfilingResult {
                    nodes: vec![CallNode {
                        id: 0,
                        name: "request".to_string(),
                        self_time_us: elapsed_us,
                        total_time_us: elapsed_us,
                        call_count: 1,
                        children: vec![],
                    }],
                    start_time,
                    end_time: start_time + elapsed_us as f64,
                }
            }
            None => ProfilingResult::empty(),
        }
    }
}
