//! Random directed graphs for demo data.
//!
//! Uniform `G(n, m)`: `n` nodes with ids `0..n`, then `m` distinct directed
//! edges drawn uniformly without self-loops. Edges are inserted in the order
//! they are drawn, which fixes successor order for a given seed.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::model::*;
use crate::{Error, Result};
use super::{GraphBuilder, GraphSource, GraphStore};

/// Default node count of the demo graph.
pub const DEFAULT_NODES: u64 = 50;
/// Default edge count of the demo graph.
pub const DEFAULT_EDGES: u64 = 100;

/// Parameters for a random directed graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomGraph {
    pub nodes: u64,
    pub edges: u64,
    /// Fixed seed for reproducible graphs. A fresh seed is drawn (and
    /// logged) when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RandomGraph {
    fn default() -> Self {
        Self { nodes: DEFAULT_NODES, edges: DEFAULT_EDGES, seed: None }
    }
}

impl RandomGraph {
    pub fn new(nodes: u64, edges: u64) -> Self {
        Self { nodes, edges, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Most edges a simple directed graph without self-loops can hold.
    pub fn max_edges(nodes: u64) -> Option<u64> {
        nodes.checked_mul(nodes.saturating_sub(1))
    }

    pub fn generate(&self) -> Result<GraphStore> {
        let max = Self::max_edges(self.nodes)
            .ok_or_else(|| Error::InvalidGraph(format!("{} nodes is too many", self.nodes)))?;
        if self.edges > max {
            return Err(Error::InvalidGraph(format!(
                "{} edges requested but {} nodes allow at most {max}",
                self.edges, self.nodes,
            )));
        }
        let capacity = usize::try_from(self.nodes)
            .map_err(|_| Error::InvalidGraph(format!("{} nodes is too many", self.nodes)))?;

        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
        tracing::info!(seed, nodes = self.nodes, edges = self.edges, "generating random graph");

        let mut builder = GraphBuilder::with_capacity(capacity, capacity.saturating_mul(2));
        for id in 0..self.nodes {
            builder.add_node(Node::new(NodeId(id)))?;
        }

        if self.edges == max {
            // Complete graph: no sampling needed
            for from in 0..self.nodes {
                for to in (0..self.nodes).filter(|&to| to != from) {
                    builder.add_edge(NodeId(from), NodeId(to))?;
                }
            }
            return Ok(builder.build());
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut placed = 0;
        while placed < self.edges {
            let from = NodeId(rng.gen_range(0..self.nodes));
            let to = NodeId(rng.gen_range(0..self.nodes));
            if from == to || builder.contains_edge(from, to) {
                continue;
            }
            builder.add_edge(from, to)?;
            placed += 1;
        }
        Ok(builder.build())
    }
}

#[async_trait]
impl GraphSource for RandomGraph {
    async fn load(&self) -> Result<GraphStore> {
        self.generate()
    }

    fn describe(&self) -> String {
        format!("random graph ({} nodes, {} edges)", self.nodes, self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_no_self_loops() {
        let g = RandomGraph::default().with_seed(7).generate().unwrap();
        assert_eq!(g.node_count(), 50);
        assert_eq!(g.edge_count(), 100);
        assert!(g.edges().iter().all(|e| !e.is_self_loop()));
    }

    #[test]
    fn test_same_seed_same_graph() {
        let a = RandomGraph::new(20, 40).with_seed(99).generate().unwrap();
        let b = RandomGraph::new(20, 40).with_seed(99).generate().unwrap();
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn test_complete_graph() {
        let g = RandomGraph::new(4, 12).with_seed(1).generate().unwrap();
        assert_eq!(g.edge_count(), 12);
        assert_eq!(g.successors(NodeId(0)).unwrap(), &[NodeId(1), NodeId(2), NodeId(3)]);
    }

    #[test]
    fn test_too_many_edges() {
        assert!(matches!(
            RandomGraph::new(3, 7).generate(),
            Err(Error::InvalidGraph(_))
        ));
        assert!(matches!(
            RandomGraph::new(1, 1).generate(),
            Err(Error::InvalidGraph(_))
        ));
    }

    #[test]
    fn test_empty_graph() {
        let g = RandomGraph::new(0, 0).generate().unwrap();
        assert!(g.is_empty());
    }
}
