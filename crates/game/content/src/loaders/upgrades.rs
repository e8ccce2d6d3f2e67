//! Upgrade graph loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use typing_core::{NodeId, UpgradeGraphConfig, UpgradeNode};

use crate::loaders::{LoadResult, read_file};

/// Upgrade graph structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeGraphFile {
    pub root: NodeId,
    pub nodes: Vec<UpgradeNode>,
}

/// Loader for the upgrade graph from RON files.
pub struct UpgradeLoader;

impl UpgradeLoader {
    /// Load and validate the upgrade graph from a RON file.
    pub fn load(path: &Path) -> LoadResult<UpgradeGraphConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid upgrade graph {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<UpgradeGraphConfig> {
        let file: UpgradeGraphFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse upgrade graph RON: {}", e))?;
        let graph = UpgradeGraphConfig::new(file.root, file.nodes)?;
        tracing::debug!(nodes = graph.len(), "upgrade graph loaded");
        Ok(graph)
    }
}
