//! Axum router setup for the repolens server

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::{
    handlers::{get_graph, get_relations, get_stats, get_subgraph, health_check, replace_graph},
    ServerState,
};

/// Create the axum router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        // Full graph, and replacement from a new analyzer run
        .route("/api/graph", get(get_graph).post(replace_graph))
        .route("/api/graph/stats", get(get_stats))
        // Scoped queries
        .route("/api/graph/subgraph", get(get_subgraph))
        .route("/api/graph/relations", get(get_relations))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QueryDefaults;
    use repolens_core::Graph;

    #[test]
    fn test_router_creation() {
        let state = Arc::new(ServerState::new(Graph::new(), QueryDefaults::default()));
        let _router = create_router(state);
    }
}
