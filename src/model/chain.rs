//! Chain — the ordered first-successor sequence from a start node.

use serde::{Deserialize, Serialize};
use super::{Edge, NodeId};

/// Separator used when a chain is shown as text (`1 -> 2 -> 3`).
pub const ARROW: &str = " -> ";

/// Why a chain stopped growing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    /// The last node has no outgoing edges.
    Sink,
    /// The last node's first successor is already in the chain.
    Cycle { revisited: NodeId },
}

/// A chain of node ids: `start -> first successor -> ...`.
///
/// Never empty, never contains the same id twice. Only the resolver
/// constructs chains, so a `Chain` in hand always satisfies both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chain {
    nodes: Vec<NodeId>,
    termination: Termination,
}

impl Chain {
    pub(crate) fn new(nodes: Vec<NodeId>, termination: Termination) -> Self {
        debug_assert!(!nodes.is_empty(), "a chain always holds its start node");
        Self { nodes, termination }
    }

    /// The selected node the chain starts from.
    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    /// The node the chain stopped at.
    pub fn end(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Edges actually walked, including the closing edge of a cycle.
    pub fn path_edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self.nodes
            .windows(2)
            .map(|pair| Edge::new(pair[0], pair[1]))
            .collect();
        if let Termination::Cycle { revisited } = self.termination {
            edges.push(Edge::new(self.end(), revisited));
        }
        edges
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, id) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(ARROW)?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_with_arrows() {
        let chain = Chain::new(vec![NodeId(1), NodeId(2), NodeId(3)], Termination::Sink);
        assert_eq!(chain.to_string(), "1 -> 2 -> 3");
        assert_eq!(chain.start(), NodeId(1));
        assert_eq!(chain.end(), NodeId(3));
    }

    #[test]
    fn test_path_edges_close_cycle() {
        let chain = Chain::new(
            vec![NodeId(1), NodeId(2)],
            Termination::Cycle { revisited: NodeId(1) },
        );
        assert_eq!(chain.path_edges(), vec![Edge::new(1, 2), Edge::new(2, 1)]);

        let sink = Chain::new(vec![NodeId(5)], Termination::Sink);
        assert!(sink.path_edges().is_empty());
        assert_eq!(sink.to_string(), "5");
    }
}
