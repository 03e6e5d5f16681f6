//! # Renderer
//!
//! Two stages:
//!
//! ```text
//! (GraphStore, OverlayState) ──render()──▶ RenderableGraph ──embed()──▶ <iframe srcdoc="…">
//!        pure, no I/O                         serde data            escaped host markup
//! ```
//!
//! `render` decides what every node and edge looks like. `embed` turns that
//! into markup and owns all escaping; see [`embed`] for the contract.

pub mod embed;

use serde::{Deserialize, Serialize};

use crate::model::*;
use crate::overlay::OverlayState;
use crate::storage::GraphStore;

pub use embed::{document, embed, embed_or_fallback, escape_attribute, fallback_fragment};

// ============================================================================
// Style
// ============================================================================

/// Display settings for rendering and embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Color of emphasized nodes and edges.
    pub highlight_color: String,
    /// Size of emphasized nodes.
    pub highlight_size: u32,
    /// Height of the drawing canvas inside the embedded document.
    pub canvas_height: String,
    /// Height of the embedding frame in the host page.
    pub frame_height: String,
    /// Draw arrowheads on edges.
    pub directed: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            highlight_color: "red".into(),
            highlight_size: 20,
            canvas_height: "380px".into(),
            frame_height: "400px".into(),
            directed: true,
        }
    }
}

// ============================================================================
// Renderable graph
// ============================================================================

/// A node as drawn. `None` attributes fall back to the drawing library's
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: NodeId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// An edge as drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderEdge {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Everything needed to draw one view of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderableGraph {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    pub directed: bool,
}

impl RenderableGraph {
    pub fn emphasized_nodes(&self) -> impl Iterator<Item = &RenderNode> {
        self.nodes.iter().filter(|n| n.color.is_some())
    }

    pub fn emphasized_edges(&self) -> impl Iterator<Item = &RenderEdge> {
        self.edges.iter().filter(|e| e.color.is_some())
    }
}

/// Style every node and edge of `graph` according to `overlay`.
///
/// Output order follows graph insertion order.
pub fn render(graph: &GraphStore, overlay: &OverlayState, style: &RenderStyle) -> RenderableGraph {
    let nodes = graph
        .nodes()
        .iter()
        .map(|node| {
            let lit = overlay.is_node_emphasized(node.id);
            RenderNode {
                id: node.id,
                label: node.label.clone(),
                color: lit.then(|| style.highlight_color.clone()),
                size: lit.then_some(style.highlight_size),
            }
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .map(|edge| RenderEdge {
            from: edge.from,
            to: edge.to,
            color: overlay
                .is_edge_emphasized(edge)
                .then(|| style.highlight_color.clone()),
        })
        .collect();

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        emphasized = overlay.emphasized_node_count(),
        "rendered graph",
    );
    RenderableGraph { nodes, edges, directed: style.directed }
}

// ============================================================================
// Tests
// ============================================================================
