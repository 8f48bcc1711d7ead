//! Error types for graph construction.

use thiserror::Error;

/// Result type for repolens-core operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Failures raised while building a graph from analyzer output.
///
/// Queries never fail: an unknown root yields an empty result instead.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The analyzer output is not shaped like a module list.
    #[error("invalid analysis input: {0}")]
    Input(String),

    /// The raw text could not be parsed as JSON at all.
    #[error("analysis output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
