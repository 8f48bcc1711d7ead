//! Query surface used by the server, the CLI and tests

use petgraph::Direction;

use crate::graph::Graph;
use crate::model::{DirectRelations, GraphData, GraphStats, Subgraph};
use crate::resolver::PathResolver;
use crate::traversal;

/// Read-only queries over one built graph.
///
/// Holds no state besides the borrowed graph; every call returns a fresh
/// result.
#[derive(Debug, Clone, Copy)]
pub struct GraphQuery<'g> {
    graph: &'g Graph,
}

impl<'g> GraphQuery<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        GraphQuery { graph }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Dependencies and dependents of `root_id` up to `max_depth` hops.
    pub fn compute_subgraph(&self, root_id: &str, max_depth: u32, include_indirect: bool) -> Subgraph {
        traversal::subgraph(self.graph, root_id, max_depth, include_indirect)
    }

    /// Immediate neighbours of `root_id` per direction, sorted and
    /// deduplicated. Empty for unknown ids and for nodes without edges.
    pub fn list_direct_relations(&self, root_id: &str) -> DirectRelations {
        DirectRelations {
            dependencies: self.one_hop(root_id, Direction::Outgoing),
            dependents: self.one_hop(root_id, Direction::Incoming),
        }
    }

    fn one_hop(&self, root_id: &str, direction: Direction) -> Vec<String> {
        let mut ids: Vec<String> = traversal::reachable(self.graph, root_id, 1, direction)
            .into_iter()
            .filter(|&(_, depth)| depth == 1)
            .map(|(id, _)| id.to_string())
            .collect();
        ids.sort();
        ids
    }

    /// Canonical node id for a loosely written path.
    pub fn resolve(&self, path: &str) -> Option<&'g str> {
        PathResolver::new(self.graph).resolve(path)
    }

    /// Resolve `path` and compute its subgraph. `None` when the path does
    /// not name any node.
    pub fn subgraph_for_path(&self, path: &str, max_depth: u32, include_indirect: bool) -> Option<(&'g str, Subgraph)> {
        let root = self.resolve(path)?;
        Some((root, self.compute_subgraph(root, max_depth, include_indirect)))
    }

    /// Resolve `path` and list its direct relations.
    pub fn relations_for_path(&self, path: &str) -> Option<(&'g str, DirectRelations)> {
        let root = self.resolve(path)?;
        Some((root, self.list_direct_relations(root)))
    }

    pub fn full_graph(&self) -> GraphData {
        self.graph.to_data()
    }

    pub fn stats(&self) -> GraphStats {
        self.graph.stats()
    }
}
