//! Graph wrapper using petgraph::StableDiGraph keyed by canonical file path

use crate::model::*;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeMap, HashMap};

/// The dependency graph: a directed multigraph of files.
///
/// Nodes keep their first-seen order and edges their insertion order; both
/// orders are used as deterministic tie-breaks by the resolver and by
/// subgraph assembly. Nothing is ever removed, so petgraph's indices grow
/// monotonically with insertion.
pub struct Graph {
    inner: StableDiGraph<Node, Edge>,
    index: HashMap<String, NodeIndex>,
    dropped_edges: usize,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .field("dropped_edges", &self.dropped_edges)
            .finish()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            inner: StableDiGraph::new(),
            index: HashMap::new(),
            dropped_edges: 0,
        }
    }

    /// Register a node for `id` unless one exists. The first registration
    /// fixes the node's position in iteration order.
    pub fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.inner.add_node(Node::new(id));
        self.index.insert(id.to_string(), idx);
        idx
    }

    /// Append an edge between two registered nodes.
    ///
    /// Edges naming an unregistered endpoint are dropped and counted; the
    /// return value says whether the edge was stored.
    pub fn add_edge(&mut self, source: &str, target: &str, kind: EdgeType) -> bool {
        let (Some(&from), Some(&to)) = (self.index.get(source), self.index.get(target)) else {
            self.dropped_edges += 1;
            tracing::debug!("Dropping edge {} -> {} ({}): endpoint not registered", source, target, kind);
            return false;
        };
        let edge = Edge {
            source: source.to_string(),
            target: target.to_string(),
            kind,
        };
        self.inner.add_edge(from, to, edge);
        true
    }

    /// Whether a node with this exact id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Get a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index
            .get(id)
            .and_then(|&idx| self.inner.node_weight(idx))
    }

    /// First-seen position of a node, usable as a sort key.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).map(|idx| idx.index())
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Number of edges rejected by [`Graph::add_edge`].
    pub fn dropped_edge_count(&self) -> usize {
        self.dropped_edges
    }

    /// Iterate over all nodes in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// Iterate over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.inner
            .edge_indices()
            .filter_map(move |idx| self.inner.edge_weight(idx))
    }

    /// Ids one hop away from `id`: targets for `Outgoing`, sources for
    /// `Incoming`. Parallel edges yield the neighbour once per edge.
    pub fn neighbors<'a>(
        &'a self,
        id: &str,
        direction: Direction,
    ) -> impl Iterator<Item = &'a str> + use<'a> {
        let idx = self.index.get(id).copied();
        idx.into_iter()
            .flat_map(move |idx| self.inner.edges_directed(idx, direction))
            .map(move |edge_ref| {
                let edge = edge_ref.weight();
                match direction {
                    Direction::Outgoing => edge.target.as_str(),
                    Direction::Incoming => edge.source.as_str(),
                }
            })
    }

    /// Snapshot of the whole graph for serialization.
    pub fn to_data(&self) -> GraphData {
        GraphData {
            nodes: self.nodes().cloned().collect(),
            edges: self.edges().cloned().collect(),
        }
    }

    /// Count nodes, edges and edges per type.
    pub fn stats(&self) -> GraphStats {
        let mut edge_types = BTreeMap::new();
        for edge in self.edges() {
            *edge_types.entry(edge.kind.to_string()).or_insert(0) += 1;
        }
        GraphStats {
            nodes: self.node_count(),
            edges: self.edge_count(),
            dropped_edges: self.dropped_edges,
            edge_types,
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
