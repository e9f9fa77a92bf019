//! Name-keyed dependency graph and cycle detection.
//!
//! References between resources are inferred by name alone, so the graph is keyed
//! by resource name across all kinds: a pool and a volume that share a name are
//! one node. Cycle detection is a DFS with white/gray/black coloring that reports
//! the full cycle path.
//!
//! Creation order is computed separately over resource indices by
//! [`ResolvedGraph::creation_order`](super::ResolvedGraph::creation_order), since
//! several resources may share one name node here.

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use super::ResolveError;
use super::graph::ResourceConfig;

/// Color states for cycle detection using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is currently being visited (in the DFS stack).
    Gray,
    /// Node has been fully visited.
    Black,
}

/// Directed graph over resource names.
///
/// An edge `a → b` means the resource named `a` references the resource named `b`.
/// Nodes keep insertion order, which is batch order when built with
/// [`DependencyGraph::from_resources`], so traversal and reported cycles are
/// deterministic.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for a set of resolved resources.
    ///
    /// Every named resource becomes a node; every `depends_on` entry an edge.
    /// Unnamed resources cannot be referenced and are left out.
    pub fn from_resources<'a>(resources: impl IntoIterator<Item = &'a ResourceConfig>) -> Self {
        let mut graph = Self::new();
        let resources: Vec<&ResourceConfig> = resources.into_iter().collect();

        for resource in resources.iter().filter(|r| !r.name.is_empty()) {
            graph.add_node(&resource.name);
        }
        for resource in resources.iter().filter(|r| !r.name.is_empty()) {
            for dep in &resource.depends_on {
                graph.add_dependency(&resource.name, dep);
            }
        }

        graph
    }

    /// Add a node if it doesn't already exist and return its index.
    fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.node_map.get(name) {
            index
        } else {
            let index = self.graph.add_node(name.to_string());
            self.node_map.insert(name.to_string(), index);
            index
        }
    }

    /// Record that `from` depends on `to`.
    ///
    /// Repeated edges are stored once; multiplicity only matters in `depends_on`.
    pub fn add_dependency(&mut self, from: &str, to: &str) {
        let from_idx = self.add_node(from);
        let to_idx = self.add_node(to);

        if !self.graph.contains_edge(from_idx, to_idx) {
            self.graph.add_edge(from_idx, to_idx, ());
        }
    }

    /// Detect cycles using DFS with colors.
    ///
    /// Returns [`ResolveError::CyclicDependency`] with the names along the first
    /// cycle found, starting at the node where the cycle was entered. A self-loop
    /// reports a single name.
    pub fn detect_cycles(&self) -> Result<(), ResolveError> {
        let mut colors: HashMap<NodeIndex, Color> =
            self.graph.node_indices().map(|node| (node, Color::White)).collect();
        let mut path: Vec<NodeIndex> = Vec::new();

        for node in self.graph.node_indices() {
            if colors.get(&node) != Some(&Color::White) {
                continue;
            }
            if let Some(cycle) = self.dfs_visit(node, &mut colors, &mut path) {
                return Err(ResolveError::CyclicDependency {
                    cycle: cycle.into_iter().map(|idx| self.graph[idx].clone()).collect(),
                });
            }
        }

        Ok(())
    }

    /// DFS visit for cycle detection.
    ///
    /// Returns `Some(cycle_path)` if a cycle is reachable from `start`. The walk keeps
    /// its own stack of pending neighbors so chain length is not bounded by the
    /// thread stack.
    fn dfs_visit(
        &self,
        start: NodeIndex,
        colors: &mut HashMap<NodeIndex, Color>,
        path: &mut Vec<NodeIndex>,
    ) -> Option<Vec<NodeIndex>> {
        let mut stack: Vec<(NodeIndex, std::vec::IntoIter<NodeIndex>)> = Vec::new();

        colors.insert(start, Color::Gray);
        path.push(start);
        stack.push((start, self.neighbors_in_order(start).into_iter()));

        while let Some((node, neighbors)) = stack.last_mut() {
            let node = *node;
            let Some(neighbor) = neighbors.next() else {
                stack.pop();
                path.pop();
                colors.insert(node, Color::Black);
                continue;
            };

            match colors.get(&neighbor) {
                Some(Color::Gray) => {
                    // Gray nodes are always on the current path
                    let cycle_start = path.iter().position(|&n| n == neighbor).unwrap_or(0);
                    return Some(path[cycle_start..].to_vec());
                }
                Some(Color::White) => {
                    colors.insert(neighbor, Color::Gray);
                    path.push(neighbor);
                    stack.push((neighbor, self.neighbors_in_order(neighbor).into_iter()));
                }
                _ => {}
            }
        }

        None
    }

    /// Outgoing neighbors in edge insertion order.
    ///
    /// petgraph walks adjacency lists newest first.
    fn neighbors_in_order(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        neighbors.reverse();
        neighbors
    }
}
