//! The analysis source trait and the file-backed implementation

use std::path::{Path, PathBuf};

use repolens_core::{Graph, GraphBuilder};
use serde_json::Value;

use crate::error::Result;

/// The checkout an analysis run describes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnalysisTarget {
    /// Root directory of the cloned repository.
    pub repo: PathBuf,
    /// Branch the checkout is on; part of the cache key only.
    pub branch: String,
}

impl AnalysisTarget {
    pub fn new(repo: impl Into<PathBuf>, branch: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            branch: branch.into(),
        }
    }
}

/// Something that can produce raw analyzer JSON for a checkout.
#[async_trait::async_trait]
pub trait AnalysisSource: Send + Sync {
    /// Produce the analyzer document (`{ "modules": [...] }`) for `target`.
    async fn load(&self, target: &AnalysisTarget) -> Result<Value>;

    /// Get source name
    fn name(&self) -> &str;
}

/// Reads analyzer output saved to disk, ignoring the target.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl AnalysisSource for FileSource {
    async fn load(&self, _target: &AnalysisTarget) -> Result<Value> {
        tracing::debug!("Reading analysis output from {}", self.path.display());
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// Load analyzer output from `source` and build the graph for `target`.
pub async fn build_graph(source: &dyn AnalysisSource, target: &AnalysisTarget) -> Result<Graph> {
    let value = source.load(target).await?;
    let graph = GraphBuilder::from_value(&value)?;
    tracing::info!(
        "Built dependency graph from {} source: {} nodes, {} edges",
        source.name(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
