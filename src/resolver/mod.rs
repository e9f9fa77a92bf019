//! Dependency resolution for libvirt resource batches.
//!
//! This module turns a flat batch of [`Element`]s into a [`ResolvedGraph`]: every
//! element of a known kind becomes a [`ResourceConfig`] annotated with the names it
//! references and whether generated code must bind it to a variable.
//!
//! # Resolution Process
//!
//! 1. **Dispatch**: each element's kind tag is parsed into a [`ResourceKind`].
//!    Unknown tags are skipped without error.
//! 2. **Extraction**: the kind's rules from [`extractors`] scan the whole batch for
//!    elements whose `name` equals a referencing field's value.
//! 3. **Cycle detection**: [`DependencyGraph`] runs a colored DFS over the
//!    name-keyed graph. The first cycle aborts resolution.
//! 4. **Variable marking**: [`variables::mark_variables`] flags every resource that
//!    a dependent kind references.
//!
//! Resolution is synchronous, allocation-only and deterministic: the same batch
//! always yields the same graph, with `depends_on` in extraction order.
//!
//! # Examples
//!
//! ```rust
//! use virtgraph::core::ResourceKind;
//! use virtgraph::models::Element;
//! use virtgraph::resolver::resolve;
//!
//! let batch = vec![
//!     Element::new("libvirt_pool").with_field("name", "p1"),
//!     Element::new("libvirt_volume").with_field("name", "v1").with_field("pool", "p1"),
//! ];
//!
//! let graph = resolve(&batch).unwrap();
//! assert_eq!(graph.get(ResourceKind::Volume).unwrap().depends_on, vec!["p1"]);
//! assert!(graph.get(ResourceKind::Pool).unwrap().create_variable);
//! ```

pub mod dependency_graph;
pub mod extractors;
pub mod graph;
pub mod variables;

pub use dependency_graph::DependencyGraph;
pub use graph::{ResolvedGraph, ResourceConfig};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::core::ResourceKind;
use crate::models::Element;

/// Failures raised by resolution itself.
///
/// Missing fields, unnamed resources and unmatched references are not errors;
/// they simply produce no edge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Resources reference each other in a cycle
    #[error("Cyclic dependency detected: {}", .cycle.join(" → "))]
    CyclicDependency {
        /// Names along the cycle, starting where it was entered
        cycle: Vec<String>,
    },

    /// The batch exceeds the configured size limit
    #[error("Batch of {size} elements exceeds the limit of {limit}")]
    BatchTooLarge {
        /// Number of elements in the batch
        size: usize,
        /// Configured maximum
        limit: usize,
    },
}

/// Resolve a batch with no size limit.
pub fn resolve(elements: &[Element]) -> Result<ResolvedGraph, ResolveError> {
    Resolver::new().resolve(elements)
}

/// Resolution pipeline with its settings.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    max_batch_size: Option<usize>,
}

impl Resolver {
    /// A resolver with no batch size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject batches larger than `limit`. A limit of 0 disables the check.
    #[must_use]
    pub fn with_max_batch_size(mut self, limit: usize) -> Self {
        self.max_batch_size = (limit > 0).then_some(limit);
        self
    }

    /// A resolver configured from the `[limits]` table.
    pub fn from_config(config: &Config) -> Self {
        Self::new().with_max_batch_size(config.limits.max_batch_size)
    }

    /// Run the full pipeline over `elements`.
    ///
    /// Returns the completed graph or the first error; a graph that failed cycle
    /// detection is never returned.
    pub fn resolve(&self, elements: &[Element]) -> Result<ResolvedGraph, ResolveError> {
        if let Some(limit) = self.max_batch_size {
            if elements.len() > limit {
                return Err(ResolveError::BatchTooLarge {
                    size: elements.len(),
                    limit,
                });
            }
        }

        let candidates = extractors::candidates(elements);
        let mut graph = ResolvedGraph::new();

        for element in elements {
            let Some(kind) = ResourceKind::from_tag(&element.kind) else {
                debug!("Skipping element of unknown kind '{}'", element.kind);
                continue;
            };

            let depends_on = extractors::extract_dependencies(kind, &element.fields, &candidates);
            let resource = ResourceConfig::new(kind, element.clone(), depends_on);
            debug!("{} '{}' depends on {:?}", kind, resource.name, resource.depends_on);
            graph.push(resource);
        }

        DependencyGraph::from_resources(graph.resources()).detect_cycles()?;
        variables::mark_variables(&mut graph);

        info!(
            "Resolved {} resources ({} skipped), {} need variables",
            graph.len(),
            elements.len() - graph.len(),
            graph.variables().count()
        );

        Ok(graph)
    }
}
