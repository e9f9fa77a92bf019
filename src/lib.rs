//! virtgraph - dependency resolution for libvirt resource declarations
//!
//! A batch of libvirt resource declarations (pools, volumes, networks, cloud-init
//! disks, ignition configs and domains) arrives as a flat list with no ids. Code
//! generation for the provider needs to know which declarations reference which,
//! so that referenced resources can be bound to variables and declared first.
//!
//! virtgraph infers those references by name, rejects cyclic batches and marks the
//! resources other resources point at.
//!
//! # Core Modules
//!
//! - [`models`] - The raw element/field payload as it arrives on the wire
//! - [`core`] - [`core::ResourceKind`], the error type and user-facing error reporting
//! - [`resolver`] - Extraction rules, cycle detection and variable marking
//! - [`schema`] - Provider schema and required-field validation
//! - [`config`] - Optional `~/.virtgraph/config.toml`
//! - [`cli`] - The `virtgraph` command-line interface
//!
//! # Example
//!
//! ```rust
//! use virtgraph::models::Element;
//! use virtgraph::resolver::resolve;
//!
//! let batch = vec![
//!     Element::new("libvirt_pool").with_field("name", "images"),
//!     Element::new("libvirt_volume")
//!         .with_field("name", "base")
//!         .with_field("pool", "images"),
//!     Element::new("libvirt_domain")
//!         .with_field("name", "vm1")
//!         .with_field("kernel", "base"),
//! ];
//!
//! let graph = resolve(&batch)?;
//! let names: Vec<&str> = graph.variables().map(|r| r.name.as_str()).collect();
//! assert_eq!(names, ["images", "base"]);
//! # Ok::<(), virtgraph::resolver::ResolveError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod models;
pub mod resolver;
pub mod schema;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
