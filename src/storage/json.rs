//! JSON graph documents.
//!
//! ```json
//! { "nodes": [{ "id": 1, "label": "start" }, { "id": 2 }],
//!   "links": [{ "source": 1, "target": 2 }] }
//! ```
//!
//! Link order in the document is successor order in the store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::*;
use crate::Result;
use super::{GraphBuilder, GraphSource, GraphStore};

/// A node entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    /// Optional display label; the id is shown when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A directed link between two node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: NodeId,
    pub target: NodeId,
}

/// Complete graph document: nodes and links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub links: Vec<GraphLink>,
}

impl GraphData {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate and build a store.
    pub fn to_store(&self) -> Result<GraphStore> {
        let mut builder = GraphBuilder::with_capacity(self.nodes.len(), self.links.len());
        for entry in &self.nodes {
            let node = match &entry.label {
                Some(label) => Node::new(entry.id).with_label(label.clone()),
                None => Node::new(entry.id),
            };
            builder.add_node(node)?;
        }
        for link in &self.links {
            builder.add_edge(link.source, link.target)?;
        }
        Ok(builder.build())
    }
}

impl From<&GraphStore> for GraphData {
    fn from(graph: &GraphStore) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|n| GraphNode {
                id: n.id,
                label: (n.label != n.id.to_string()).then(|| n.label.clone()),
            })
            .collect();
        let links = graph
            .edges()
            .iter()
            .map(|e| GraphLink { source: e.from, target: e.to })
            .collect();
        Self { nodes, links }
    }
}

#[async_trait]
impl GraphSource for GraphData {
    async fn load(&self) -> Result<GraphStore> {
        self.to_store()
    }

    fn describe(&self) -> String {
        format!("inline graph ({} nodes, {} links)", self.nodes.len(), self.links.len())
    }
}

// ============================================================================
// File source
// ============================================================================

/// A `GraphData` document on disk.
#[cfg(feature = "fs")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFile {
    pub path: std::path::PathBuf,
}

#[cfg(feature = "fs")]
impl JsonFile {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(feature = "fs")]
#[async_trait]
impl GraphSource for JsonFile {
    async fn load(&self) -> Result<GraphStore> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        GraphData::from_json_str(&text)?.to_store()
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}
