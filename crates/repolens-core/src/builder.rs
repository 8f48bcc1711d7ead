//! Builds a [`Graph`] from the analyzer's per-module dependency records

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::model::EdgeType;

/// Top-level analyzer document. Fields other than `modules` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub modules: Vec<ModuleRecord>,
}

/// One analysed source file and the imports found in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub source: String,
    #[serde(default)]
    pub dependencies: Option<Vec<DependencyRecord>>,
}

/// A single import of a module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRecord {
    /// Path the import resolved to; `None` when resolution failed outright.
    #[serde(default)]
    pub resolved: Option<String>,
    #[serde(default)]
    pub dependency_types: Option<Vec<String>>,
    #[serde(default)]
    pub core_module: bool,
    #[serde(default)]
    pub could_not_resolve: bool,
}

impl DependencyRecord {
    /// Edge type by priority: first analyzer tag, then core, then
    /// unresolved, then internal.
    pub fn edge_type(&self) -> EdgeType {
        if let Some(tag) = self.dependency_types.as_ref().and_then(|tags| tags.first()) {
            return EdgeType::from(tag.as_str());
        }
        if self.core_module {
            EdgeType::Core
        } else if self.could_not_resolve {
            EdgeType::Unresolved
        } else {
            EdgeType::Internal
        }
    }
}

/// Turns raw analyzer output into a canonical graph.
pub struct GraphBuilder;

impl GraphBuilder {
    /// Build a graph from typed module records.
    ///
    /// Sources and resolved targets become nodes in first-seen order; every
    /// dependency with a resolved path becomes one edge. Dependencies with no
    /// resolved path contribute nothing.
    pub fn build(output: &AnalysisOutput) -> Graph {
        let mut graph = Graph::new();
        let mut skipped = 0usize;

        for module in &output.modules {
            graph.ensure_node(&module.source);

            for dep in module.dependencies.iter().flatten() {
                let Some(resolved) = dep.resolved.as_deref() else {
                    skipped += 1;
                    continue;
                };
                graph.ensure_node(resolved);
                graph.add_edge(&module.source, resolved, dep.edge_type());
            }
        }

        tracing::debug!(
            "Built graph: {} nodes, {} edges, {} unresolvable imports skipped",
            graph.node_count(),
            graph.edge_count(),
            skipped
        );
        graph
    }

    /// Build a graph from an already parsed JSON document.
    ///
    /// Fails with [`GraphError::Input`] when `modules` is missing, is not an
    /// array, or holds records that are not module-shaped.
    pub fn from_value(value: &Value) -> Result<Graph> {
        let object = value
            .as_object()
            .ok_or_else(|| GraphError::Input("expected a JSON object".to_string()))?;
        let modules = object
            .get("modules")
            .ok_or_else(|| GraphError::Input("missing `modules`".to_string()))?;
        if !modules.is_array() {
            return Err(GraphError::Input("`modules` is not an array".to_string()));
        }

        let modules = Vec::<ModuleRecord>::deserialize(modules)
            .map_err(|e| GraphError::Input(format!("malformed module record: {}", e)))?;

        Ok(Self::build(&AnalysisOutput { modules }))
    }

    /// Parse raw analyzer text and build a graph from it.
    pub fn from_json_str(raw: &str) -> Result<Graph> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(&value)
    }
}
