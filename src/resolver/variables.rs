//! Decide which resources need a variable binding in generated code.
//!
//! A resource that nothing references can be emitted inline. One that another
//! resource references by name must be bound to a variable so the reference can
//! point at it. Which kinds can reference which is given by
//! [`ResourceKind::dependents`].

use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::graph::ResolvedGraph;
use crate::core::ResourceKind;

/// Set `create_variable` on every resource of the graph.
///
/// A resource of kind `K` is marked iff it is named and its name appears in the
/// `depends_on` list of some resource whose kind is one of `K`'s dependents.
/// Must run after cycle detection succeeded.
pub fn mark_variables(graph: &mut ResolvedGraph) {
    let referenced = referenced_names(graph);

    for resource in graph.resources_mut() {
        resource.create_variable = !resource.name.is_empty()
            && resource.kind.dependents().iter().any(|dependent| {
                referenced.get(dependent).is_some_and(|names| names.contains(&resource.name))
            });

        if resource.create_variable {
            debug!("{} '{}' is referenced and needs a variable", resource.kind, resource.name);
        }
    }
}

/// Union of `depends_on` entries per referencing kind.
fn referenced_names(graph: &ResolvedGraph) -> HashMap<ResourceKind, HashSet<String>> {
    let mut referenced: HashMap<ResourceKind, HashSet<String>> = HashMap::new();
    for resource in graph.resources() {
        referenced.entry(resource.kind).or_default().extend(resource.depends_on.iter().cloned());
    }
    referenced
}
