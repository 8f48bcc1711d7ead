//! Integration tests for Repolens
//!
//! These tests drive the analysis sources, graph queries and API handlers
//! together over the analyzer document in `demos/analysis.json`.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use repolens_analysis::{AnalysisTarget, FileSource, build_graph};
use repolens_core::{Graph, GraphQuery};
use repolens_server::handlers::{RelationsParams, SubgraphParams, get_relations, get_subgraph, replace_graph};
use repolens_server::{QueryDefaults, ServerState};

fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos")
}

async fn demo_graph() -> Graph {
    let source = FileSource::new(demos_dir().join("analysis.json"));
    let target = AnalysisTarget::new(demos_dir(), "main");
    build_graph(&source, &target).await.unwrap()
}

#[tokio::test]
async fn test_demo_analysis_builds() {
    let graph = demo_graph().await;
    let stats = graph.stats();

    assert_eq!(stats.nodes, 8);
    assert_eq!(stats.edges, 8);
    assert_eq!(stats.dropped_edges, 0);
    assert_eq!(stats.edge_types.get("local"), Some(&4));
    assert_eq!(stats.edge_types.get("core"), Some(&1));
    assert_eq!(stats.edge_types.get("npm-dev"), Some(&1));
}

#[tokio::test]
async fn test_subgraph_walks_both_directions() {
    let graph = demo_graph().await;
    let query = GraphQuery::new(&graph);

    let (root, subgraph) = query.subgraph_for_path("lib/graph.ts", 2, false).unwrap();

    assert_eq!(root, "src/lib/graph.ts");
    assert_eq!(subgraph.node("fs").unwrap().depth, 1);
    assert_eq!(subgraph.node("src/lib/api.ts").unwrap().depth, 1);
    assert_eq!(subgraph.node("src/app/page.tsx").unwrap().depth, 2);
    assert_eq!(subgraph.node("scripts/seed.ts").unwrap().depth, 2);
    // Downstream of the root only reaches one level
    assert!(subgraph.node("react").is_none());
}

#[tokio::test]
async fn test_indirect_edges_only_when_requested() {
    let graph = demo_graph().await;
    let query = GraphQuery::new(&graph);

    let (_, direct) = query.subgraph_for_path("fs", 3, false).unwrap();
    let (_, all) = query.subgraph_for_path("fs", 3, true).unwrap();

    let ids: Vec<&str> = direct.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "fs",
            "src/app/page.tsx",
            "src/components/Graph.tsx",
            "src/lib/api.ts",
            "src/lib/graph.ts",
            "scripts/seed.ts",
        ]
    );
    assert_eq!(direct.edges.len(), 3);
    assert_eq!(all.edges.len(), 6);
    assert!(!direct.has_edge("src/app/page.tsx", "src/lib/api.ts"));
    assert!(all.has_edge("src/app/page.tsx", "src/lib/api.ts"));
}

#[tokio::test]
async fn test_api_answers_checkout_prefixed_paths() {
    let state = Arc::new(ServerState::new(demo_graph().await, QueryDefaults::default()));

    let params = RelationsParams {
        path: "/main/src/lib/api.ts".to_string(),
    };
    let Json(response) = get_relations(State(Arc::clone(&state)), Query(params)).await;

    assert_eq!(response.root.as_deref(), Some("src/lib/api.ts"));
    assert_eq!(response.relations.dependencies, vec!["./missing", "src/lib/graph.ts"]);
    assert_eq!(response.relations.dependents, vec!["scripts/seed.ts", "src/app/page.tsx"]);
}

#[tokio::test]
async fn test_uploaded_analysis_replaces_served_graph() {
    let state = Arc::new(ServerState::new(Graph::new(), QueryDefaults::default()));
    let raw = std::fs::read_to_string(demos_dir().join("analysis.json")).unwrap();
    let body: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let Json(stats) = replace_graph(State(Arc::clone(&state)), Json(body)).await.unwrap();
    assert_eq!(stats.nodes, 8);

    let params = SubgraphParams {
        path: "page.tsx".to_string(),
        depth: Some(1),
        indirect: None,
    };
    let Json(response) = get_subgraph(State(state), Query(params)).await;

    assert_eq!(response.root.as_deref(), Some("src/app/page.tsx"));
    assert_eq!(response.subgraph.nodes.len(), 4);
    assert_eq!(response.subgraph.edges.len(), 3);
}

#[cfg(unix)]
#[tokio::test]
async fn test_invoker_runs_analyzer_in_checkout() {
    use repolens_analysis::{CliInvoker, InvokerConfig};

    let invoker = CliInvoker::new(InvokerConfig {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), "cat analysis.json".to_string()],
    });
    let target = AnalysisTarget::new(demos_dir(), "main");

    let graph = build_graph(&invoker, &target).await.unwrap();

    assert_eq!(graph.node_count(), 8);
    assert!(invoker.cached_at(&target).await.is_some());
}
