//! Session-backed configuration access
//!
//! Profiling configuration is per session and mutable from outside (an
//! administrative endpoint writes it); the middleware reads it fresh on
//! every request and never writes. The store is a capability so hosts can
//! back it with their own session layer.

use dashmap::DashMap;
use profiling_types::{SessionId, SessionProfilingConfig};

/// Namespace under which the profiling configuration lives in the host's
/// session storage
pub const SESSION_NAMESPACE: &str = "request_profiler";

/// Get/set access to per-session profiling configuration
pub trait SessionStore: Send + Sync {
    /// Load the configuration stored for `session`, if any
    fn load(&self, session: &SessionId) -> Option<SessionProfilingConfig>;

    /// Store `config` for `session`, replacing any previous value
    fn store(&self, session: SessionId, config: SessionProfilingConfig);
}

/// Process-local session store
///
/// Suitable for single-process hosts and tests; multi-process deployments
/// supply a store backed by their shared session layer.
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, SessionProfilingConfig>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, session: &SessionId) -> Option<SessionProfilingConfig> {
        self.sessions.get(session).map(|entry| entry.clone())
    }

    fn store(&self, session: SessionId, config: SessionProfilingConfig) {
        self.sessions.insert(session, config);
    }
}
