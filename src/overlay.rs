//! # Highlight overlay
//!
//! Which nodes and edges a session currently emphasizes.
//!
//! An `OverlayState` is a value: it is built whole from a chain (or built
//! clear) and then swapped into the session in one step. Nothing ever edits
//! an overlay a reader might be holding, so a reader sees either the old
//! highlight or the new one, never a mix.

use std::sync::Arc;
use hashbrown::HashSet;

use crate::model::*;
use crate::session::Session;
use crate::storage::GraphStore;

/// Emphasis flags for one session. Absent means not emphasized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayState {
    nodes: HashSet<NodeId>,
    edges: HashSet<Edge>,
}

impl OverlayState {
    /// Nothing emphasized.
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Emphasis for `chain`: every chain node, plus every edge leaving a
    /// chain node (not only the edges the chain walked).
    pub fn for_chain(graph: &GraphStore, chain: &Chain) -> Self {
        let nodes: HashSet<NodeId> = chain.iter().collect();
        let edges = graph
            .edges()
            .iter()
            .filter(|edge| nodes.contains(&edge.from))
            .copied()
            .collect();
        Self { nodes, edges }
    }

    pub fn is_clear(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn is_node_emphasized(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn is_edge_emphasized(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    pub fn emphasized_node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn emphasized_edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Emphasized node ids, sorted.
    pub fn emphasized_nodes(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Emphasized edges, sorted.
    pub fn emphasized_edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self.edges.iter().copied().collect();
        edges.sort_unstable();
        edges
    }
}

/// Replace the session's overlay with the emphasis for `chain`, or clear it
/// when `chain` is `None`. Returns the overlay now active.
///
/// The new overlay is computed before the session lock is taken; the lock
/// only covers the pointer swap.
pub fn apply(session: &Session, chain: Option<&Chain>) -> Arc<OverlayState> {
    let next = Arc::new(match chain {
        Some(chain) => OverlayState::for_chain(session.graph(), chain),
        None => OverlayState::cleared(),
    });
    session.replace_overlay(Arc::clone(&next));
    tracing::debug!(
        session = %session.id(),
        nodes = next.emphasized_node_count(),
        edges = next.emphasized_edge_count(),
        "applied overlay",
    );
    next
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use crate::session::SessionRegistry;

    fn branching() -> Arc<GraphStore> {
        // 1 -> 2 -> 3, plus side edges 1 -> 4 and 2 -> 5, and 4 -> 1
        Arc::new(
            GraphStore::from_edges(
                [1, 2, 3, 4, 5],
                [(1, 2), (2, 3), (1, 4), (2, 5), (4, 1)],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_for_chain_emphasizes_all_outgoing_edges() {
        let g = branching();
        let chain = resolve(&g, NodeId(1)).unwrap();
        let overlay = OverlayState::for_chain(&g, &chain);

        assert_eq!(overlay.emphasized_nodes(), vec![NodeId(1), NodeId(2), NodeId(3)]);
        assert_eq!(
            overlay.emphasized_edges(),
            vec![Edge::new(1, 2), Edge::new(1, 4), Edge::new(2, 3), Edge::new(2, 5)],
        );
        assert!(!overlay.is_node_emphasized(NodeId(4)));
        assert!(!overlay.is_edge_emphasized(&Edge::new(4, 1)));
    }

    #[test]
    fn test_apply_none_clears() {
        let registry = SessionRegistry::new(branching());
        let session = registry.connect();
        let chain = resolve(session.graph(), NodeId(2)).unwrap();

        let lit = apply(&session, Some(&chain));
        assert!(!lit.is_clear());
        assert_eq!(*session.overlay(), *lit);

        let cleared = apply(&session, None);
        assert!(cleared.is_clear());
        assert_eq!(cleared.emphasized_node_count(), 0);
        assert_eq!(cleared.emphasized_edge_count(), 0);
        assert!(session.overlay().is_clear());
    }

    #[test]
    fn test_apply_replaces_previous_highlight() {
        let registry = SessionRegistry::new(branching());
        let session = registry.connect();

        let first = resolve(session.graph(), NodeId(1)).unwrap();
        apply(&session, Some(&first));
        let second = resolve(session.graph(), NodeId(4)).unwrap();
        let overlay = apply(&session, Some(&second));

        // 4 -> 1 -> 2 -> 3; nothing from the first selection lingers beyond
        // what the second chain covers itself
        assert_eq!(
            overlay.emphasized_nodes(),
            vec![NodeId(1), NodeId(2), NodeId(3), NodeId(4)],
        );
        let sink = resolve(session.graph(), NodeId(5)).unwrap();
        let overlay = apply(&session, Some(&sink));
        assert_eq!(overlay.emphasized_nodes(), vec![NodeId(5)]);
        assert_eq!(overlay.emphasized_edge_count(), 0);
    }

    #[test]
    fn test_old_snapshot_is_untouched_by_swap() {
        let registry = SessionRegistry::new(branching());
        let session = registry.connect();
        let chain = resolve(session.graph(), NodeId(1)).unwrap();

        let before = session.overlay();
        apply(&session, Some(&chain));
        assert!(before.is_clear());
        assert!(!session.overlay().is_clear());
    }
}
