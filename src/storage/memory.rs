//! In-memory graph construction.
//!
//! `GraphBuilder` is the only way to make a [`GraphStore`]; every other
//! source funnels through it, so the store invariants live in one place:
//!
//! - **Endpoints exist**: an edge is rejected unless both nodes were added.
//! - **Simple graph**: a second `from -> to` edge is rejected. Self-loops
//!   are fine.
//! - **Stable order**: nodes, edges and per-node successors keep insertion
//!   order.

use hashbrown::{HashMap, HashSet};

use crate::model::*;
use crate::{Error, Result};
use super::GraphStore;

// ============================================================================
// GraphBuilder
// ============================================================================

/// Mutable staging area for a graph. Consumed by [`GraphBuilder::build`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
    edge_set: HashSet<Edge>,
    successors: Vec<Vec<NodeId>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for `nodes` nodes and `edges` edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            index: HashMap::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            edge_set: HashSet::with_capacity(edges),
            successors: Vec::with_capacity(nodes),
        }
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Add a node. Fails if a node with the same id was already added.
    pub fn add_node(&mut self, node: Node) -> Result<NodeId> {
        let id = node.id;
        if self.index.contains_key(&id) {
            return Err(Error::InvalidGraph(format!("Duplicate node {id}")));
        }
        self.index.insert(id, self.nodes.len());
        self.nodes.push(node);
        self.successors.push(Vec::new());
        Ok(id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ========================================================================
    // Edges
    // ========================================================================

    /// Add the directed edge `from -> to`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        // Verify both nodes exist
        let Some(&pos) = self.index.get(&from) else {
            return Err(Error::InvalidGraph(format!("Source node {from} does not exist")));
        };
        if !self.index.contains_key(&to) {
            return Err(Error::InvalidGraph(format!("Target node {to} does not exist")));
        }

        let edge = Edge::new(from, to);
        if !self.edge_set.insert(edge) {
            return Err(Error::InvalidGraph(format!("Duplicate edge {edge}")));
        }
        self.edges.push(edge);
        self.successors[pos].push(to);
        Ok(())
    }

    pub fn contains_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.edge_set.contains(&Edge::new(from, to))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Freeze into a read-only store.
    pub fn build(self) -> GraphStore {
        GraphStore::from_parts(self.nodes, self.index, self.edges, self.successors)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_preserves_order() {
        let mut b = GraphBuilder::new();
        b.add_node(Node::new(NodeId(3))).unwrap();
        b.add_node(Node::new(NodeId(1)).with_label("one")).unwrap();
        b.add_edge(NodeId(3), NodeId(1)).unwrap();
        b.add_edge(NodeId(1), NodeId(3)).unwrap();

        let g = b.build();
        let ids: Vec<NodeId> = g.nodes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![NodeId(3), NodeId(1)]);
        assert_eq!(g.edges(), &[Edge::new(3, 1), Edge::new(1, 3)]);
        assert_eq!(g.node(NodeId(1)).unwrap().label, "one");
    }

    #[test]
    fn test_rejects_dangling_edge() {
        let mut b = GraphBuilder::new();
        b.add_node(Node::new(NodeId(1))).unwrap();
        assert!(matches!(b.add_edge(NodeId(1), NodeId(2)), Err(Error::InvalidGraph(_))));
        assert!(matches!(b.add_edge(NodeId(2), NodeId(1)), Err(Error::InvalidGraph(_))));
        assert_eq!(b.edge_count(), 0);
    }

    #[test]
    fn test_rejects_duplicates() {
        let mut b = GraphBuilder::new();
        b.add_node(Node::new(NodeId(1))).unwrap();
        b.add_node(Node::new(NodeId(2))).unwrap();
        assert!(b.add_node(Node::new(NodeId(1))).is_err());

        b.add_edge(NodeId(1), NodeId(2)).unwrap();
        assert!(b.add_edge(NodeId(1), NodeId(2)).is_err());
        // Reverse direction is a different edge
        b.add_edge(NodeId(2), NodeId(1)).unwrap();
        assert_eq!(b.edge_count(), 2);
    }

    #[test]
    fn test_self_loop_allowed() {
        let mut b = GraphBuilder::new();
        b.add_node(Node::new(NodeId(1))).unwrap();
        b.add_edge(NodeId(1), NodeId(1)).unwrap();
        assert!(b.contains_edge(NodeId(1), NodeId(1)));
        let g = b.build();
        assert_eq!(g.first_successor(NodeId(1)), Some(NodeId(1)));
    }
}
