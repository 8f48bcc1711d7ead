//! HTTP server exposing dependency graph queries

pub mod router;
pub mod handlers;

use std::sync::Arc;

use repolens_core::Graph;
use tokio::sync::RwLock;

/// Depth settings applied to subgraph requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDefaults {
    /// Depth used when a request names none.
    pub default_depth: u32,
    /// Requested depths are clamped to `1..=max_depth`.
    pub max_depth: u32,
    /// Used when a request does not set `indirect`.
    pub include_indirect: bool,
}

impl QueryDefaults {
    /// Requested depth, or the default, clamped to the allowed range.
    pub fn depth(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_depth)
            .clamp(1, self.max_depth.max(1))
    }
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            default_depth: 2,
            max_depth: 5,
            include_indirect: false,
        }
    }
}

/// Where the server listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub query: QueryDefaults,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7890,
            query: QueryDefaults::default(),
        }
    }
}

/// State shared by all handlers.
///
/// The graph itself is never mutated; replacing it swaps the `Arc` so
/// in-flight queries keep reading the graph they started with.
pub struct ServerState {
    graph: RwLock<Arc<Graph>>,
    pub query: QueryDefaults,
}

impl ServerState {
    pub fn new(graph: Graph, query: QueryDefaults) -> Self {
        Self {
            graph: RwLock::new(Arc::new(graph)),
            query,
        }
    }

    /// The current graph.
    pub async fn graph(&self) -> Arc<Graph> {
        Arc::clone(&*self.graph.read().await)
    }

    /// Install a freshly built graph.
    pub async fn replace_graph(&self, graph: Graph) {
        let mut current = self.graph.write().await;
        tracing::info!(
            "Replacing graph ({} nodes) with new graph ({} nodes, {} edges)",
            current.node_count(),
            graph.node_count(),
            graph.edge_count()
        );
        *current = Arc::new(graph);
    }
}

/// The repolens API server.
pub struct RepolensServer {
    state: Arc<ServerState>,
    config: ServerConfig,
}

impl RepolensServer {
    pub fn new(graph: Graph, config: ServerConfig) -> Self {
        let state = Arc::new(ServerState::new(graph, config.query));
        Self { state, config }
    }

    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    /// Bind and serve until Ctrl-C.
    pub async fn start(self) -> anyhow::Result<()> {
        let addr = (self.config.host.as_str(), self.config.port);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Listening on http://{}", listener.local_addr()?);

        let app = router::create_router(self.state);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
