//! Repolens Core: dependency graph model, path resolution and traversal queries

pub mod model;
pub mod error;
pub mod graph;
pub mod builder;
pub mod resolver;
pub mod traversal;
pub mod query;


#[cfg(test)]
pub mod test_utils;

pub use model::{Node, Edge, EdgeType, NodeWithDepth, Subgraph, DirectRelations, GraphData, GraphStats};
pub use error::{GraphError, Result};
pub use graph::Graph;
pub use builder::{GraphBuilder, AnalysisOutput, ModuleRecord, DependencyRecord};
pub use resolver::{PathResolver, normalize};
pub use query::GraphQuery;
