//! Maps loosely written file paths onto canonical node ids
//!
//! Paths reach the graph from several places: absolute paths from the file
//! tree, paths still carrying the checkout's `main/` or `code/` directory,
//! and bare file names typed by a user. [`PathResolver`] normalises them and
//! picks the first node that matches, walking nodes in first-seen order.

use crate::graph::Graph;

/// Two-segment checkout prefixes, stripped as a whole.
const NESTED_PREFIXES: [&str; 2] = ["main/code/", "code/main/"];

/// Single-segment checkout prefixes.
const ROOT_PREFIXES: [&str; 2] = ["main/", "code/"];

/// Strip a leading `/` and any checkout prefix from `path`.
pub fn normalize(path: &str) -> &str {
    let path = path.strip_prefix('/').unwrap_or(path);

    if let Some(rest) = NESTED_PREFIXES.iter().find_map(|p| path.strip_prefix(p)) {
        return rest;
    }
    ROOT_PREFIXES
        .iter()
        .find_map(|p| path.strip_prefix(p))
        .unwrap_or(path)
}

/// Resolves user supplied paths against one graph.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'g> {
    graph: &'g Graph,
}

impl<'g> PathResolver<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        PathResolver { graph }
    }

    /// Canonical id for `query`, or `None` when no node matches.
    ///
    /// Rules are tried in order and the first node matching a rule wins:
    /// the id itself, equal after normalisation, normalised suffix after a
    /// `/`, substring (only for queries with a directory part), and finally
    /// `stem.ext` suffix for bare file names.
    pub fn resolve(&self, query: &str) -> Option<&'g str> {
        let wanted = normalize(query);
        if wanted.is_empty() {
            return None;
        }
        if let Some(node) = self.graph.node(query) {
            return Some(node.id.as_str());
        }

        let suffix = format!("/{}", wanted);
        let has_dir = wanted.contains('/');

        self.find(|id| normalize(id) == wanted)
            .or_else(|| self.find(|id| normalize(id).ends_with(&suffix)))
            .or_else(|| if has_dir { self.find(|id| id.contains(wanted)) } else { None })
            .or_else(|| {
                if has_dir {
                    return None;
                }
                let (stem, ext) = wanted.rsplit_once('.')?;
                if stem.is_empty() || ext.is_empty() {
                    return None;
                }
                let file_suffix = format!("/{}.{}", stem, ext);
                self.find(|id| normalize(id).ends_with(&file_suffix))
            })
    }

    fn find(&self, matches: impl Fn(&str) -> bool) -> Option<&'g str> {
        self.graph
            .nodes()
            .map(|node| node.id.as_str())
            .find(|id| matches(id))
    }
}
