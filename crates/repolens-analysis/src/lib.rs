//! Analysis sources for Repolens
//!
//! This crate produces the raw analyzer JSON that `repolens-core` turns
//! into a graph: either read from a file written by an earlier run, or
//! by running the dependency analyzer CLI against a checkout.

pub mod error;
pub mod source;
pub mod invoker;

pub use error::{AnalysisError, Result};
pub use source::{AnalysisSource, AnalysisTarget, FileSource, build_graph};
pub use invoker::{CliInvoker, InvokerConfig};
