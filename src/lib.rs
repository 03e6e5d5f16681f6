//! # chain-view — First-successor chains over directed graphs
//!
//! Pick a node, follow its first outgoing edge, then that node's first
//! outgoing edge, and so on until a sink or a repeat. `chain-view` computes
//! that chain, highlights it per viewer, and renders the result as an
//! embeddable HTML fragment.
//!
//! ## Design Principles
//!
//! 1. **Shared graph, private overlay**: one immutable `GraphStore` behind an
//!    `Arc`; every `Session` owns its own highlight state
//! 2. **Resolution is a pure function**: `resolve(&graph, start)` never
//!    mutates anything and always terminates
//! 3. **Swap, don't edit**: overlays are rebuilt and swapped whole
//! 4. **Escaping lives in one place**: only `render::embed` produces markup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chain_view::{RandomGraph, RenderStyle, Viewer};
//!
//! # async fn example() -> chain_view::Result<()> {
//! let viewer = Viewer::open(&RandomGraph::default().with_seed(7), RenderStyle::default()).await?;
//! print!("{}", viewer.chain_table());
//!
//! let (session, initial) = viewer.connect();
//! let highlighted = viewer.select(session.id(), Some("3"))?;
//! let cleared = viewer.select(session.id(), Some(""))?;
//! assert_eq!(initial, cleared);
//! # let _ = highlighted;
//! viewer.disconnect(session.id());
//! # Ok(())
//! # }
//! ```
//!
//! ## Graph Sources
//!
//! | Source | Feature | Description |
//! |--------|---------|-------------|
//! | `GraphStore` / `GraphBuilder` | (default) | Built in code |
//! | `GraphData` | (default) | `{nodes, links}` JSON document |
//! | `RandomGraph` | (default) | Seeded random `G(n, m)` demo graph |
//! | `JsonFile` | `fs` | `GraphData` read from disk |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod storage;
pub mod resolver;
pub mod overlay;
pub mod session;
pub mod render;
pub mod controller;
pub mod config;

use std::sync::Arc;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{Chain, Edge, Node, NodeId, Termination};

// ============================================================================
// Re-exports: Storage
// ============================================================================

pub use storage::{GraphBuilder, GraphData, GraphSource, GraphStore, RandomGraph};
#[cfg(feature = "fs")]
pub use storage::JsonFile;

// ============================================================================
// Re-exports: Pipeline
// ============================================================================

pub use resolver::{chain_table, resolve, ChainRow, ChainTable};
pub use overlay::{apply, OverlayState};
pub use session::{Session, SessionId, SessionRegistry};
pub use render::{embed, render, RenderStyle, RenderableGraph};
pub use controller::{Selection, SelectionController};
pub use config::{SourceConfig, ViewerConfig};

// ============================================================================
// Top-level Viewer handle
// ============================================================================

/// The primary entry point. A `Viewer` owns one graph, its chain summary and
/// the sessions looking at it.
#[derive(Debug)]
pub struct Viewer {
    graph: Arc<GraphStore>,
    table: ChainTable,
    sessions: SessionRegistry,
    controller: SelectionController,
}

impl Viewer {
    /// Load a graph from `source` and prepare it for viewing.
    pub async fn open<S: GraphSource + ?Sized>(source: &S, style: RenderStyle) -> Result<Self> {
        let graph = source.load().await?;
        tracing::info!(
            source = %source.describe(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph loaded",
        );
        Self::with_graph(graph, SelectionController::new(style))
    }

    /// Build a viewer as described by `config`.
    pub async fn from_config(config: &ViewerConfig) -> Result<Self> {
        config.validate()?;
        let source = config.source.clone().into_source();
        let mut viewer = Self::open(&*source, config.style.clone()).await?;
        viewer.controller = viewer.controller.with_verbose(config.debug);
        Ok(viewer)
    }

    fn with_graph(graph: GraphStore, controller: SelectionController) -> Result<Self> {
        let table = chain_table(&graph)?;
        let graph = Arc::new(graph);
        Ok(Self {
            sessions: SessionRegistry::new(Arc::clone(&graph)),
            graph,
            table,
            controller,
        })
    }

    pub fn graph(&self) -> &Arc<GraphStore> {
        &self.graph
    }

    /// Every node's chain, computed once when the viewer was opened.
    pub fn chain_table(&self) -> &ChainTable {
        &self.table
    }

    /// Node ids as strings, in graph order: the choices a selector offers.
    pub fn node_choices(&self) -> Vec<String> {
        self.graph.nodes().iter().map(|n| n.id.to_string()).collect()
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    /// Open a session. Returns it with the initial, unhighlighted markup.
    pub fn connect(&self) -> (Arc<Session>, String) {
        let session = self.sessions.connect();
        let markup = self.controller.current(&session);
        (session, markup)
    }

    /// Apply a selection event for session `id` and return the markup.
    ///
    /// Only an unknown session is an error; selection problems are handled
    /// by the controller.
    pub fn select(&self, id: SessionId, raw: Option<&str>) -> Result<String> {
        let session = self.sessions.get(id)?;
        Ok(self.controller.on_select(&session, raw))
    }

    /// End session `id`. Returns true if it was open.
    pub fn disconnect(&self, id: SessionId) -> bool {
        self.sessions.disconnect(id)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid selection: {0:?} is not a node id")]
    InvalidSelection(String),

    #[error("Render escape failure: {0}")]
    RenderEscapeFailure(String),

    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
