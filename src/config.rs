//! Viewer configuration.
//!
//! Everything is optional; an empty JSON object gives the demo setup (random
//! 50-node, 100-edge graph, red highlights).
//!
//! ```json
//! {
//!   "source": { "kind": "random", "nodes": 20, "edges": 30, "seed": 7 },
//!   "style": { "highlight_color": "orange" },
//!   "debug": true
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::render::RenderStyle;
use crate::storage::{GraphData, GraphSource, RandomGraph};
use crate::{Error, Result};

/// Where the viewer's graph comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Random directed graph.
    Random {
        #[serde(default = "default_nodes")]
        nodes: u64,
        #[serde(default = "default_edges")]
        edges: u64,
        #[serde(default)]
        seed: Option<u64>,
    },

    /// Graph given directly in the config.
    Inline { graph: GraphData },

    /// `GraphData` JSON file.
    #[cfg(feature = "fs")]
    JsonFile { path: std::path::PathBuf },
}

fn default_nodes() -> u64 {
    crate::storage::random::DEFAULT_NODES
}

fn default_edges() -> u64 {
    crate::storage::random::DEFAULT_EDGES
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Random { nodes: default_nodes(), edges: default_edges(), seed: None }
    }
}

impl SourceConfig {
    pub fn into_source(self) -> Box<dyn GraphSource> {
        match self {
            SourceConfig::Random { nodes, edges, seed } => {
                Box::new(RandomGraph { nodes, edges, seed })
            }
            SourceConfig::Inline { graph } => Box::new(graph),
            #[cfg(feature = "fs")]
            SourceConfig::JsonFile { path } => Box::new(crate::storage::JsonFile::new(path)),
        }
    }
}

/// Top-level configuration for a [`crate::Viewer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub source: SourceConfig,
    pub style: RenderStyle,
    /// Log every selection at `info` level.
    pub debug: bool,
}

impl ViewerConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| Error::Config(format!("invalid viewer config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a usable view.
    pub fn validate(&self) -> Result<()> {
        if self.style.highlight_color.trim().is_empty() {
            return Err(Error::Config("style.highlight_color must not be empty".into()));
        }
        if self.style.highlight_size == 0 {
            return Err(Error::Config("style.highlight_size must be positive".into()));
        }
        if let SourceConfig::Random { nodes, edges, .. } = self.source {
            let max = RandomGraph::max_edges(nodes).unwrap_or(u64::MAX);
            if edges > max {
                return Err(Error::Config(format!(
                    "source: {edges} edges do not fit in {nodes} nodes (max {max})"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_is_demo_setup() {
        let config = ViewerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(
            config.source,
            SourceConfig::Random { nodes: 50, edges: 100, seed: None },
        );
        assert_eq!(config.style.highlight_color, "red");
        assert_eq!(config.style.highlight_size, 20);
        assert!(!config.debug);
    }

    #[test]
    fn test_partial_config() {
        let config = ViewerConfig::from_json_str(
            r#"{"source": {"kind": "random", "nodes": 5, "seed": 3},
                "style": {"highlight_color": "orange"},
                "debug": true}"#,
        )
        .unwrap();
        assert_eq!(config.source, SourceConfig::Random { nodes: 5, edges: 100, seed: Some(3) });
        assert_eq!(config.style.highlight_color, "orange");
        assert_eq!(config.style.frame_height, "400px");
        assert!(config.debug);
    }

    #[test]
    fn test_inline_source() {
        let config = ViewerConfig::from_json_str(
            r#"{"source": {"kind": "inline", "graph": {
                "nodes": [{"id": 1}, {"id": 2}],
                "links": [{"source": 1, "target": 2}]}}}"#,
        )
        .unwrap();
        let SourceConfig::Inline { graph } = &config.source else {
            panic!("expected inline source, got {:?}", config.source);
        };
        assert_eq!(graph.nodes.len(), 2);
        assert!(config.source.into_source().describe().starts_with("inline graph"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            ViewerConfig::from_json_str(r#"{"source": {"kind": "random", "nodes": 3, "edges": 10}}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json_str(r#"{"style": {"highlight_size": 0}}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json_str(r#"{"source": {"kind": "carrier-pigeon"}}"#),
            Err(Error::Config(_))
        ));
    }
}
