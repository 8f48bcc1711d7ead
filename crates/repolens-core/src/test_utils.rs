//! Test fixtures for repolens-core

use serde_json::{json, Value};

use crate::builder::GraphBuilder;
use crate::graph::Graph;

/// Analyzer output shaped like a small Next.js app.
///
/// ```text
/// app/page.tsx ──> components/Graph.tsx ──> lib/graph.ts ──> lib/paths.ts
///       │                                        │
///       └──> lib/api.ts ──> lib/graph.ts         └──> fs (core)
/// scripts/seed.ts ──> lib/api.ts
/// lib/api.ts ──> missing (resolved: null)
/// ```
pub fn sample_analysis() -> Value {
    json!({
        "modules": [
            {
                "source": "app/page.tsx",
                "dependencies": [
                    { "resolved": "components/Graph.tsx", "dependencyTypes": ["local"] },
                    { "resolved": "lib/api.ts" }
                ]
            },
            {
                "source": "components/Graph.tsx",
                "dependencies": [ { "resolved": "lib/graph.ts" } ]
            },
            {
                "source": "lib/api.ts",
                "dependencies": [
                    { "resolved": "lib/graph.ts" },
                    { "resolved": null, "couldNotResolve": true }
                ]
            },
            {
                "source": "lib/graph.ts",
                "dependencies": [
                    { "resolved": "lib/paths.ts" },
                    { "resolved": "fs", "coreModule": true }
                ]
            },
            { "source": "lib/paths.ts", "dependencies": [] },
            {
                "source": "scripts/seed.ts",
                "dependencies": [ { "resolved": "lib/api.ts", "dependencyTypes": ["npm-dev"] } ]
            }
        ]
    })
}

/// Graph built from [`sample_analysis`].
pub fn sample_graph() -> Graph {
    GraphBuilder::from_value(&sample_analysis()).expect("sample analysis is well formed")
}

/// Linear chain `ids[0] -> ids[1] -> ...` built through the builder.
pub fn chain_graph(ids: &[&str]) -> Graph {
    let modules: Vec<Value> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| match ids.get(i + 1) {
            Some(next) => json!({ "source": id, "dependencies": [ { "resolved": next } ] }),
            None => json!({ "source": id }),
        })
        .collect();
    GraphBuilder::from_value(&json!({ "modules": modules })).expect("chain is well formed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_graph_shape() {
        let graph = sample_graph();

        assert_eq!(graph.node_count(), 7);
        assert_eq!(graph.edge_count(), 7);
        assert!(graph.contains("fs"));
    }

    #[test]
    fn test_chain_graph_shape() {
        let graph = chain_graph(&["a", "b", "c"]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }
}
