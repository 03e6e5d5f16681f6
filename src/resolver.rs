//! # Chain Resolver
//!
//! Follows first successors from a start node until the walk hits a sink
//! or would revisit a node:
//!
//! ```text
//! 1 -> 2 -> 3          3 has no successors      => [1, 2, 3]  Sink
//! 1 -> 2 -> 1          1 already visited        => [1, 2]     Cycle { revisited: 1 }
//! 4 -> 4               self-loop                => [4]        Cycle { revisited: 4 }
//! ```
//!
//! Each step either stops or adds an unvisited node, so a chain never holds
//! more than `node_count()` ids. Resolution is pure over `&GraphStore`.

use std::collections::HashSet;
use serde::Serialize;

use crate::model::*;
use crate::storage::GraphStore;
use crate::{Error, Result};

/// Resolve the first-successor chain starting at `start`.
pub fn resolve(graph: &GraphStore, start: NodeId) -> Result<Chain> {
    if !graph.contains(start) {
        return Err(Error::NodeNotFound(start));
    }

    let mut nodes = vec![start];
    let mut visited = HashSet::from([start]);
    let mut current = start;

    let termination = loop {
        let Some(next) = graph.first_successor(current) else {
            break Termination::Sink;
        };
        if !visited.insert(next) {
            break Termination::Cycle { revisited: next };
        }
        nodes.push(next);
        current = next;
    };

    tracing::debug!(%start, len = nodes.len(), ?termination, "resolved chain");
    Ok(Chain::new(nodes, termination))
}

// ============================================================================
// Chain summary table
// ============================================================================

/// One row of the static summary: a node and its chain as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainRow {
    pub node: NodeId,
    /// The node's chain joined with `" -> "`.
    pub connections: String,
}

/// Every node's chain, in graph order. Computed once per graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChainTable {
    pub rows: Vec<ChainRow>,
}

impl ChainTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, node: NodeId) -> Option<&ChainRow> {
        self.rows.iter().find(|row| row.node == node)
    }
}

impl std::fmt::Display for ChainTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.rows
            .iter()
            .map(|row| row.node.to_string().len())
            .max()
            .unwrap_or(0)
            .max("Node".len());
        writeln!(f, "{:<width$} | Connections", "Node")?;
        for row in &self.rows {
            writeln!(f, "{:<width$} | {}", row.node.to_string(), row.connections)?;
        }
        Ok(())
    }
}

/// Resolve every node's chain.
pub fn chain_table(graph: &GraphStore) -> Result<ChainTable> {
    let rows = graph
        .nodes()
        .iter()
        .map(|node| {
            resolve(graph, node.id).map(|chain| ChainRow {
                node: node.id,
                connections: chain.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ChainTable { rows })
}

// ============================================================================
// Tests
// ============================================================================
