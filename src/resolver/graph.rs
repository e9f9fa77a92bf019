//! The resolved, dependency-annotated resource graph.
//!
//! Resources live in an arena in batch order. A per-kind name index supports
//! lookups by `(kind, name)`, and several resources of the same kind may coexist.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::HashMap;

use super::ResolveError;
use crate::core::ResourceKind;
use crate::models::Element;

/// One resolved resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceConfig {
    /// Resource kind.
    pub kind: ResourceKind,

    /// Value of the `name` field, or `""` if the declaration has none.
    pub name: String,

    /// Names this resource references, in extraction order, duplicates kept.
    pub depends_on: Vec<String>,

    /// Whether generated code must bind this resource to a variable because
    /// another resource references it. Only meaningful after resolution.
    pub create_variable: bool,

    /// The declaration as received, for emitting the remaining attributes.
    pub raw: Element,
}

impl ResourceConfig {
    /// Create a resource with no variable binding yet.
    pub fn new(kind: ResourceKind, raw: Element, depends_on: Vec<String>) -> Self {
        Self {
            kind,
            name: raw.resource_name(),
            depends_on,
            create_variable: false,
            raw,
        }
    }

    /// Whether this resource references `name`.
    pub fn references(&self, name: &str) -> bool {
        self.depends_on.iter().any(|dep| dep == name)
    }
}

/// Result of a resolution call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedGraph {
    resources: Vec<ResourceConfig>,
    by_name: HashMap<(ResourceKind, String), Vec<usize>>,
}

impl ResolvedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resource and return its arena index.
    pub fn push(&mut self, resource: ResourceConfig) -> usize {
        let index = self.resources.len();
        self.by_name.entry((resource.kind, resource.name.clone())).or_default().push(index);
        self.resources.push(resource);
        index
    }

    /// All resources in batch order.
    pub fn resources(&self) -> &[ResourceConfig] {
        &self.resources
    }

    pub(crate) fn resources_mut(&mut self) -> &mut [ResourceConfig] {
        &mut self.resources
    }

    /// Resources of `kind` in batch order.
    pub fn resources_of(&self, kind: ResourceKind) -> impl Iterator<Item = &ResourceConfig> {
        self.resources.iter().filter(move |r| r.kind == kind)
    }

    /// The single resource for `kind` in the one-per-kind view.
    ///
    /// When a batch declares a kind more than once, the last declaration wins, as
    /// it did when the graph held exactly one slot per kind.
    pub fn get(&self, kind: ResourceKind) -> Option<&ResourceConfig> {
        self.resources.iter().rev().find(|r| r.kind == kind)
    }

    /// First resource of `kind` called `name`.
    pub fn find(&self, kind: ResourceKind, name: &str) -> Option<&ResourceConfig> {
        self.find_all(kind, name).next()
    }

    /// Every resource of `kind` called `name`, in batch order.
    pub fn find_all(
        &self,
        kind: ResourceKind,
        name: &str,
    ) -> impl Iterator<Item = &ResourceConfig> {
        self.by_name
            .get(&(kind, name.to_string()))
            .into_iter()
            .flatten()
            .map(|&index| &self.resources[index])
    }

    /// Resources that need a variable binding.
    pub fn variables(&self) -> impl Iterator<Item = &ResourceConfig> {
        self.resources.iter().filter(|r| r.create_variable)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Resources in an order where each one follows everything it depends on.
    ///
    /// References are by name, so a dependency on `x` orders the resource after
    /// every resource named `x`. Independent resources keep a stable relative order
    /// for a given batch.
    pub fn creation_order(&self) -> Result<Vec<&ResourceConfig>, ResolveError> {
        let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(self.len(), 0);
        let nodes: Vec<NodeIndex> = (0..self.len()).map(|i| graph.add_node(i)).collect();

        let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
        for (index, resource) in self.resources.iter().enumerate() {
            if !resource.name.is_empty() {
                by_name.entry(resource.name.as_str()).or_default().push(index);
            }
        }

        for (index, resource) in self.resources.iter().enumerate() {
            for dep in &resource.depends_on {
                for &target in by_name.get(dep.as_str()).into_iter().flatten() {
                    if !graph.contains_edge(nodes[index], nodes[target]) {
                        graph.add_edge(nodes[index], nodes[target], ());
                    }
                }
            }
        }

        match toposort(&graph, None) {
            Ok(order) => Ok(order.into_iter().rev().map(|n| &self.resources[graph[n]]).collect()),
            Err(cycle) => Err(ResolveError::CyclicDependency {
                cycle: vec![self.resources[graph[cycle.node_id()]].name.clone()],
            }),
        }
    }
}
