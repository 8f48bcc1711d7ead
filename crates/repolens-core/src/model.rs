//! Core data structures for the dependency graph

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// What kind of import relationship an edge represents.
///
/// The four named variants are the types the builder assigns itself; any
/// other tag reported by the analyzer is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EdgeType {
    Internal,
    Core,
    DevDependency,
    Unresolved,
    Other(String),
}

impl EdgeType {
    pub fn as_str(&self) -> &str {
        match self {
            EdgeType::Internal => "internal",
            EdgeType::Core => "core",
            EdgeType::DevDependency => "devDependency",
            EdgeType::Unresolved => "unresolved",
            EdgeType::Other(tag) => tag,
        }
    }
}

impl From<&str> for EdgeType {
    fn from(tag: &str) -> Self {
        match tag {
            "internal" => EdgeType::Internal,
            "core" => EdgeType::Core,
            "devDependency" => EdgeType::DevDependency,
            "unresolved" => EdgeType::Unresolved,
            other => EdgeType::Other(other.to_string()),
        }
    }
}

impl From<String> for EdgeType {
    fn from(tag: String) -> Self {
        match EdgeType::from(tag.as_str()) {
            EdgeType::Other(_) => EdgeType::Other(tag),
            known => known,
        }
    }
}

impl From<EdgeType> for String {
    fn from(kind: EdgeType) -> Self {
        match kind {
            EdgeType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One source file or module in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Canonical file path, unique within a graph.
    pub id: String,
    /// Basename of `id`.
    pub label: String,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let label = label_for(&id).to_string();
        Node { id, label }
    }
}

/// Basename of a node id: everything after the last `/`.
pub fn label_for(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

/// A directed "source imports target" relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeType,
}

/// A node annotated with its traversal distance from the queried root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeWithDepth {
    pub id: String,
    pub label: String,
    pub depth: u32,
    pub is_root: bool,
}

/// Result of a scoped query. Built fresh per call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subgraph {
    pub nodes: Vec<NodeWithDepth>,
    pub edges: Vec<Edge>,
}

impl Subgraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Look up a node of this subgraph by id.
    pub fn node(&self, id: &str) -> Option<&NodeWithDepth> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Whether an edge `source -> target` is part of this subgraph.
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.source == source && e.target == target)
    }
}

/// Immediate neighbours of a node, sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectRelations {
    pub dependencies: Vec<String>,
    pub dependents: Vec<String>,
}

/// The full graph in the shape the renderer consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Size summary of a built graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    /// Edges rejected because an endpoint was never registered as a node.
    pub dropped_edges: usize,
    /// Edge count per edge type tag.
    pub edge_types: BTreeMap<String, usize>,
}
