//! # Graph Store
//!
//! The immutable node/edge set a viewer works against, and the
//! `GraphSource` contract that produces one.
//!
//! ## Sources
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | `GraphBuilder` | `memory` | Programmatic construction, validated |
//! | `GraphData` | `json` | Serde `{nodes, links}` document |
//! | `RandomGraph` | `random` | Seeded directed `G(n, m)` demo data |
//! | `JsonFile` | `json` | `GraphData` read from disk (feature `fs`) |
//!
//! Whatever the source, successor order is the insertion order of a node's
//! outgoing edges. The resolver's "first successor" depends on that order
//! being reproducible, so nothing here ever sorts or rehashes adjacency.

pub mod memory;
pub mod json;
pub mod random;

use async_trait::async_trait;
use hashbrown::HashMap;
use crate::model::*;
use crate::Result;

pub use memory::GraphBuilder;
pub use json::{GraphData, GraphLink, GraphNode};
#[cfg(feature = "fs")]
pub use json::JsonFile;
pub use random::RandomGraph;

// ============================================================================
// GraphStore
// ============================================================================

/// Read-only directed graph.
///
/// Built once (see [`GraphBuilder`]) and then shared between sessions behind
/// an `Arc`. There are no interior locks: nothing mutates a store after
/// `build()`.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    /// Nodes in insertion order.
    nodes: Vec<Node>,
    /// node id → position in `nodes` / `successors`
    index: HashMap<NodeId, usize>,
    /// Edges in insertion order.
    edges: Vec<Edge>,
    /// node position → outgoing targets, in edge insertion order
    successors: Vec<Vec<NodeId>>,
}

impl GraphStore {
    pub(crate) fn from_parts(
        nodes: Vec<Node>,
        index: HashMap<NodeId, usize>,
        edges: Vec<Edge>,
        successors: Vec<Vec<NodeId>>,
    ) -> Self {
        Self { nodes, index, edges, successors }
    }

    /// Build a store from bare ids and `(from, to)` pairs.
    ///
    /// Labels default to the id. Fails like [`GraphBuilder`] does on
    /// dangling endpoints and duplicate nodes or edges.
    pub fn from_edges(
        nodes: impl IntoIterator<Item = u64>,
        edges: impl IntoIterator<Item = (u64, u64)>,
    ) -> Result<Self> {
        let mut builder = GraphBuilder::new();
        for id in nodes {
            builder.add_node(Node::new(NodeId(id)))?;
        }
        for (from, to) in edges {
            builder.add_edge(NodeId(from), NodeId(to))?;
        }
        Ok(builder.build())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&pos| &self.nodes[pos])
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Outgoing targets of `id` in deterministic order.
    /// `None` if the node does not exist.
    pub fn successors(&self, id: NodeId) -> Option<&[NodeId]> {
        self.index.get(&id).map(|&pos| self.successors[pos].as_slice())
    }

    /// The first outgoing target of `id`, if it has any.
    pub fn first_successor(&self, id: NodeId) -> Option<NodeId> {
        self.successors(id).and_then(|targets| targets.first().copied())
    }

    /// Outgoing edges of `id` in deterministic order.
    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = Edge> + '_ {
        self.successors(id)
            .unwrap_or(&[])
            .iter()
            .map(move |&to| Edge::new(id, to))
    }
}

// ============================================================================
// GraphSource Trait
// ============================================================================

/// Anything that can hand a viewer its graph.
///
/// Loading may do I/O (files), so the contract is async. Implementations
/// must yield a deterministic successor order for the same input.
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Produce the graph.
    async fn load(&self) -> Result<GraphStore>;

    /// Short human-readable description, used in log events.
    fn describe(&self) -> String;
}

#[async_trait]
impl GraphSource for GraphStore {
    async fn load(&self) -> Result<GraphStore> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory graph ({} nodes, {} edges)", self.node_count(), self.edge_count())
    }
}

// ============================================================================
// Tests
// ============================================================================
