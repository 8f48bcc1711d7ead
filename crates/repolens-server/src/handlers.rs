//! REST API handlers for the repolens server

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use repolens_core::{DirectRelations, GraphBuilder, GraphData, GraphQuery, GraphStats, Subgraph};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ServerState;

/// Query string of `GET /api/graph/subgraph`
#[derive(Debug, Deserialize)]
pub struct SubgraphParams {
    pub path: String,
    pub depth: Option<u32>,
    pub indirect: Option<bool>,
}

/// Query string of `GET /api/graph/relations`
#[derive(Debug, Deserialize)]
pub struct RelationsParams {
    pub path: String,
}

/// Subgraph around a resolved path. `root` is `None` when the path matched
/// no node, in which case the lists are empty.
#[derive(Debug, Serialize)]
pub struct SubgraphResponse {
    pub root: Option<String>,
    #[serde(flatten)]
    pub subgraph: Subgraph,
}

/// Direct relations of a resolved path.
#[derive(Debug, Serialize)]
pub struct RelationsResponse {
    pub root: Option<String>,
    #[serde(flatten)]
    pub relations: DirectRelations,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body for rejected requests
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Get the current graph as JSON
pub async fn get_graph(State(state): State<Arc<ServerState>>) -> Json<GraphData> {
    let graph = state.graph().await;
    Json(GraphQuery::new(&graph).full_graph())
}

/// Node, edge and edge type counts
pub async fn get_stats(State(state): State<Arc<ServerState>>) -> Json<GraphStats> {
    let graph = state.graph().await;
    Json(graph.stats())
}

/// Rebuild the graph from a new analyzer document
pub async fn replace_graph(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<Value>,
) -> Result<Json<GraphStats>, (StatusCode, Json<ErrorResponse>)> {
    let graph = GraphBuilder::from_value(&body).map_err(|e| {
        tracing::warn!("Rejected analysis upload: {}", e);
        (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e.to_string() }))
    })?;

    let stats = graph.stats();
    state.replace_graph(graph).await;
    Ok(Json(stats))
}

/// Dependencies and dependents of a path, bounded by depth
pub async fn get_subgraph(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SubgraphParams>,
) -> Json<SubgraphResponse> {
    let graph = state.graph().await;
    let depth = state.query.depth(params.depth);
    let indirect = params.indirect.unwrap_or(state.query.include_indirect);

    let response = match GraphQuery::new(&graph).subgraph_for_path(&params.path, depth, indirect) {
        Some((root, subgraph)) => SubgraphResponse {
            root: Some(root.to_string()),
            subgraph,
        },
        None => {
            tracing::debug!("No node matches {}", params.path);
            SubgraphResponse {
                root: None,
                subgraph: Subgraph::default(),
            }
        }
    };
    Json(response)
}

/// Immediate neighbours of a path
pub async fn get_relations(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<RelationsParams>,
) -> Json<RelationsResponse> {
    let graph = state.graph().await;

    let response = match GraphQuery::new(&graph).relations_for_path(&params.path) {
        Some((root, relations)) => RelationsResponse {
            root: Some(root.to_string()),
            relations,
        },
        None => RelationsResponse {
            root: None,
            relations: DirectRelations::default(),
        },
    };
    Json(response)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(health)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QueryDefaults;
    use serde_json::json;

    fn state() -> Arc<ServerState> {
        let graph = GraphBuilder::from_value(&json!({
            "modules": [
                { "source": "src/app.ts", "dependencies": [ { "resolved": "src/lib/a.ts" } ] },
                { "source": "src/lib/a.ts", "dependencies": [ { "resolved": "src/lib/b.ts" } ] },
                { "source": "src/lib/b.ts", "dependencies": [ { "resolved": "src/lib/c.ts" } ] },
                { "source": "src/lib/c.ts" }
            ]
        }))
        .unwrap();
        Arc::new(ServerState::new(graph, QueryDefaults::default()))
    }

    #[tokio::test]
    async fn test_health_check() {
        let _response = health_check().await;
    }

    #[tokio::test]
    async fn test_get_graph_returns_all_nodes() {
        let Json(data) = get_graph(State(state())).await;

        assert_eq!(data.nodes.len(), 4);
        assert_eq!(data.edges.len(), 3);
    }

    #[tokio::test]
    async fn test_subgraph_uses_defaults() {
        let params = SubgraphParams {
            path: "/main/src/app.ts".to_string(),
            depth: None,
            indirect: None,
        };
        let Json(response) = get_subgraph(State(state()), Query(params)).await;

        assert_eq!(response.root.as_deref(), Some("src/app.ts"));
        // default depth 2: app, a, b
        assert_eq!(response.subgraph.nodes.len(), 3);
        assert!(response.subgraph.node("src/lib/c.ts").is_none());
    }

    #[tokio::test]
    async fn test_subgraph_depth_is_clamped() {
        let params = SubgraphParams {
            path: "app.ts".to_string(),
            depth: Some(50),
            indirect: Some(true),
        };
        let Json(response) = get_subgraph(State(state()), Query(params)).await;

        assert_eq!(response.subgraph.nodes.len(), 4);
        assert!(response.subgraph.has_edge("src/lib/b.ts", "src/lib/c.ts"));
    }

    #[tokio::test]
    async fn test_unknown_path_has_null_root() {
        let params = SubgraphParams {
            path: "nowhere.ts".to_string(),
            depth: None,
            indirect: None,
        };
        let Json(response) = get_subgraph(State(state()), Query(params)).await;
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value, json!({ "root": null, "nodes": [], "edges": [] }));
    }

    #[tokio::test]
    async fn test_relations() {
        let params = RelationsParams {
            path: "lib/a.ts".to_string(),
        };
        let Json(response) = get_relations(State(state()), Query(params)).await;

        assert_eq!(response.root.as_deref(), Some("src/lib/a.ts"));
        assert_eq!(response.relations.dependencies, vec!["src/lib/b.ts"]);
        assert_eq!(response.relations.dependents, vec!["src/app.ts"]);
    }

    #[tokio::test]
    async fn test_replace_graph_accepts_module_list() {
        let state = state();
        let body = json!({ "modules": [ { "source": "x.ts" } ] });

        let Json(stats) = replace_graph(State(Arc::clone(&state)), Json(body)).await.unwrap();

        assert_eq!(stats.nodes, 1);
        assert_eq!(state.graph().await.node_count(), 1);
    }

    #[tokio::test]
    async fn test_replace_graph_rejects_bad_input() {
        let state = state();
        let body = json!({ "modules": {} });

        let (status, Json(error)) = replace_graph(State(Arc::clone(&state)), Json(body))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error.error.contains("modules"));
        assert_eq!(state.graph().await.node_count(), 4);
    }
}
