//! Profiling result model
//!
//! A `ProfilingResult` is produced by a profiler engine's `stop` call and
//! consumed by the printer fan-out. The middleware treats it as opaque: it is
//! owned for the duration of one request, handed by reference to the
//! printers, then dropped.

use serde::{Deserialize, Serialize};

/// A single node in the profiled call tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CallNode {
    /// Unique identifier for this node, used as child reference
    pub id: u32,
    /// Name of the profiled frame (function, method, region)
    pub name: String,
    /// Time spent in this frame excluding children (microseconds)
    pub self_time_us: u64,
    /// Time spent in this frame including children (microseconds)
    pub total_time_us: u64,
    /// Number of times this frame was entered
    pub call_count: u64,
    /// Child node ids
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<u32>,
}

/// A complete profile captured between one start/stop pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfilingResult {
    /// All profiled call nodes; the node with id 0, when present, is the root
    pub nodes: Vec<CallNode>,
    /// Start of the profiled window (microseconds since epoch)
    pub start_time: f64,
    /// End of the profiled window (microseconds since epoch)
    pub end_time: f64,
}

impl ProfilingResult {
    /// An empty zero-width result
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            start_time: 0.0,
            end_time: 0.0,
        }
    }

    /// Width of the profiled window in microseconds
    pub fn duration_us(&self) -> f64 {
        (self.end_time - self.start_time).max(0.0)
    }

    /// Look up a node by id
    pub fn node(&self, id: u32) -> Option<&CallNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// The root node (id 0), if present
    pub fn root(&self) -> Option<&CallNode> {
        self.node(0)
    }

    /// Sum of self time across all nodes (microseconds)
    pub fn total_self_time_us(&self) -> u64 {
        self.nodes.iter().map(|node| node.self_time_us).sum()
    }
}
