//! CLI command implementations

use std::path::PathBuf;

use repolens_analysis::{AnalysisSource, AnalysisTarget, CliInvoker, FileSource, build_graph};
use repolens_core::{DirectRelations, Graph, GraphQuery, Subgraph};
use repolens_server::RepolensServer;
use repolens_server::handlers::{RelationsResponse, SubgraphResponse};
use serde::Serialize;

use crate::config::Config;

/// Everything a command needs besides its own arguments.
pub struct Context {
    root: PathBuf,
    config: Config,
    analysis: Option<PathBuf>,
    branch: String,
}

impl Context {
    pub fn new(root: PathBuf, config: Config, analysis: Option<PathBuf>, branch: Option<String>) -> Self {
        let branch = branch.unwrap_or_else(|| config.analysis.branch.clone());
        Self {
            root,
            config,
            analysis,
            branch,
        }
    }

    /// Saved analyzer output to read, if one was named on the command line
    /// or in the config. Config paths are relative to the repository root.
    fn analysis_file(&self) -> Option<PathBuf> {
        self.analysis
            .clone()
            .or_else(|| self.config.analysis.output.as_ref().map(|p| self.root.join(p)))
    }

    fn source(&self) -> Box<dyn AnalysisSource> {
        match self.analysis_file() {
            Some(path) => Box::new(FileSource::new(path)),
            None => Box::new(CliInvoker::new(self.config.invoker_config())),
        }
    }

    async fn load_graph(&self) -> anyhow::Result<Graph> {
        let target = AnalysisTarget::new(self.root.clone(), self.branch.clone());
        let source = self.source();
        Ok(build_graph(source.as_ref(), &target).await?)
    }
}

pub async fn serve(ctx: &Context, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let mut config = ctx.config.server_config();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    tracing::info!("Starting repolens server on {}:{}", config.host, config.port);

    let graph = ctx.load_graph().await?;
    tracing::info!("Indexed {} nodes, {} edges", graph.node_count(), graph.edge_count());

    RepolensServer::new(graph, config).start().await
}

pub async fn graph(ctx: &Context) -> anyhow::Result<()> {
    let graph = ctx.load_graph().await?;
    print_json(&GraphQuery::new(&graph).full_graph())
}

pub async fn stats(ctx: &Context) -> anyhow::Result<()> {
    let graph = ctx.load_graph().await?;
    let stats = graph.stats();
    if stats.dropped_edges > 0 {
        tracing::warn!("{} edges referenced unknown nodes and were dropped", stats.dropped_edges);
    }
    print_json(&stats)
}

pub async fn subgraph(ctx: &Context, path: &str, depth: Option<u32>, indirect: bool) -> anyhow::Result<()> {
    let graph = ctx.load_graph().await?;
    let defaults = ctx.config.query_defaults();
    let depth = defaults.depth(depth);
    let indirect = indirect || defaults.include_indirect;

    let response = match GraphQuery::new(&graph).subgraph_for_path(path, depth, indirect) {
        Some((root, subgraph)) => SubgraphResponse {
            root: Some(root.to_string()),
            subgraph,
        },
        None => {
            tracing::warn!("No file in the graph matches {}", path);
            SubgraphResponse {
                root: None,
                subgraph: Subgraph::default(),
            }
        }
    };
    print_json(&response)
}

pub async fn relations(ctx: &Context, path: &str) -> anyhow::Result<()> {
    let graph = ctx.load_graph().await?;

    let response = match GraphQuery::new(&graph).relations_for_path(path) {
        Some((root, relations)) => RelationsResponse {
            root: Some(root.to_string()),
            relations,
        },
        None => {
            tracing::warn!("No file in the graph matches {}", path);
            RelationsResponse {
                root: None,
                relations: DirectRelations::default(),
            }
        }
    };
    print_json(&response)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
