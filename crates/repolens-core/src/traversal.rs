//! Depth-bounded, direction-aware reachability over a built graph

use std::collections::HashMap;

use petgraph::Direction;

use crate::graph::Graph;
use crate::model::{NodeWithDepth, Subgraph};

/// Minimum hop count from the root for every node reached in one direction.
///
/// `Outgoing` follows edges source → target (what the root depends on),
/// `Incoming` follows them backwards (what depends on the root). The root is
/// always present at depth 0. Nodes first reached at `max_depth` are recorded
/// but not expanded. An unknown root yields an empty map.
pub fn reachable<'g>(
    graph: &'g Graph,
    root: &str,
    max_depth: u32,
    direction: Direction,
) -> HashMap<&'g str, u32> {
    let Some(root) = graph.node(root).map(|n| n.id.as_str()) else {
        return HashMap::new();
    };

    let mut depth_of: HashMap<&'g str, u32> = HashMap::from([(root, 0)]);
    let mut frontier = vec![root];

    for depth in 0..max_depth {
        if frontier.is_empty() {
            break;
        }
        let next_depth = depth + 1;
        let mut next = Vec::new();

        for &node in &frontier {
            for candidate in graph.neighbors(node, direction) {
                let improves = depth_of
                    .get(candidate)
                    .is_none_or(|&known| known > next_depth);
                if improves {
                    depth_of.insert(candidate, next_depth);
                    next.push(candidate);
                }
            }
        }

        frontier = next;
    }

    depth_of
}

/// Reachable subgraph around `root` in both directions.
///
/// A node found in both directions takes the smaller of its two depths.
/// Nodes come back root first, then in the graph's first-seen order; edges
/// in insertion order. With `include_indirect` off, an edge is dropped when
/// both of its endpoints sit deeper than one hop, so direct relations stay
/// visible while deeper chains are hidden.
pub fn subgraph(graph: &Graph, root: &str, max_depth: u32, include_indirect: bool) -> Subgraph {
    if !graph.contains(root) {
        tracing::debug!("Subgraph root {} not in graph", root);
        return Subgraph::default();
    }

    let mut depths = reachable(graph, root, max_depth, Direction::Outgoing);
    for (id, depth) in reachable(graph, root, max_depth, Direction::Incoming) {
        depths
            .entry(id)
            .and_modify(|known| *known = (*known).min(depth))
            .or_insert(depth);
    }

    let mut ids: Vec<&str> = depths.keys().copied().collect();
    ids.sort_by_key(|id| (*id != root, graph.position(id)));

    let nodes = ids
        .iter()
        .filter_map(|id| graph.node(id))
        .map(|node| NodeWithDepth {
            id: node.id.clone(),
            label: node.label.clone(),
            depth: depths[node.id.as_str()],
            is_root: node.id == root,
        })
        .collect();

    let edges = graph
        .edges()
        .filter(|edge| {
            let (Some(&from), Some(&to)) = (
                depths.get(edge.source.as_str()),
                depths.get(edge.target.as_str()),
            ) else {
                return false;
            };
            include_indirect || from <= 1 || to <= 1
        })
        .cloned()
        .collect();

    Subgraph { nodes, edges }
}
