//! Error types for loading analyzer output.

use repolens_core::GraphError;
use thiserror::Error;

/// Result type for repolens-analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Reading a file or spawning the analyzer failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The analyzer printed something that is not JSON
    #[error("analyzer output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The analyzer exited unsuccessfully
    #[error("`{program}` exited with status {status:?}: {stderr}")]
    CommandFailed {
        program: String,
        status: Option<i32>,
        stderr: String,
    },

    /// The output was JSON but not a module list
    #[error(transparent)]
    Graph(#[from] GraphError),
}
