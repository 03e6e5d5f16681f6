//! # Viewer sessions
//!
//! A `Session` pairs the shared, read-only graph with one overlay that only
//! that session mutates. Sessions never share overlays, so one viewer's
//! selection cannot show up in another viewer's rendering.
//!
//! | Piece | Ownership | Locking |
//! |-------|-----------|---------|
//! | `GraphStore` | `Arc`, shared by all sessions | none (immutable) |
//! | `OverlayState` | one per session | `RwLock` around an `Arc` swap |
//! | session map | registry | `RwLock` |

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::overlay::OverlayState;
use crate::storage::GraphStore;
use crate::{Error, Result};

/// Opaque session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Session
// ============================================================================

/// One connected viewer.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    connected_at: DateTime<Utc>,
    graph: Arc<GraphStore>,
    overlay: RwLock<Arc<OverlayState>>,
}

impl Session {
    pub fn new(id: SessionId, graph: Arc<GraphStore>) -> Self {
        Self {
            id,
            connected_at: Utc::now(),
            graph,
            overlay: RwLock::new(Arc::new(OverlayState::cleared())),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    /// Snapshot of the active overlay. Later swaps do not affect it.
    pub fn overlay(&self) -> Arc<OverlayState> {
        Arc::clone(&self.overlay.read())
    }

    pub(crate) fn replace_overlay(&self, next: Arc<OverlayState>) {
        *self.overlay.write() = next;
    }
}

// ============================================================================
// SessionRegistry
// ============================================================================

/// Live sessions over one graph.
#[derive(Debug)]
pub struct SessionRegistry {
    graph: Arc<GraphStore>,
    sessions: RwLock<HashMap<SessionId, Arc<Session>>>,
    next_id: AtomicU64,
}

impl SessionRegistry {
    pub fn new(graph: Arc<GraphStore>) -> Self {
        Self {
            graph,
            sessions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn graph(&self) -> &Arc<GraphStore> {
        &self.graph
    }

    /// Open a session with a cleared overlay.
    pub fn connect(&self) -> Arc<Session> {
        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let session = Arc::new(Session::new(id, Arc::clone(&self.graph)));
        self.sessions.write().insert(id, Arc::clone(&session));
        tracing::info!(session = %id, "session connected");
        session
    }

    /// Drop a session. Returns true if it existed.
    pub fn disconnect(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().remove(&id).is_some();
        if removed {
            tracing::info!(session = %id, "session disconnected");
        }
        removed
    }

    pub fn get(&self, id: SessionId) -> Result<Arc<Session>> {
        self.sessions
            .read()
            .get(&id)
            .cloned()
            .ok_or(Error::SessionNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SessionRegistry {
        SessionRegistry::new(Arc::new(GraphStore::from_edges([1, 2], [(1, 2)]).unwrap()))
    }

    #[test]
    fn test_connect_and_disconnect() {
        let reg = registry();
        let a = reg.connect();
        let b = reg.connect();
        assert_ne!(a.id(), b.id());
        assert_eq!(reg.len(), 2);

        assert!(reg.disconnect(a.id()));
        assert!(!reg.disconnect(a.id()));
        assert!(matches!(reg.get(a.id()), Err(Error::SessionNotFound(_))));
        assert_eq!(reg.get(b.id()).unwrap().id(), b.id());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_new_session_starts_cleared() {
        let reg = registry();
        let session = reg.connect();
        assert!(session.overlay().is_clear());
        assert!(session.connected_at() <= Utc::now());
    }

    #[test]
    fn test_sessions_share_graph() {
        let reg = registry();
        let a = reg.connect();
        let b = reg.connect();
        assert!(std::ptr::eq(a.graph(), b.graph()));
        assert_eq!(Arc::strong_count(reg.graph()), 3);
    }
}
