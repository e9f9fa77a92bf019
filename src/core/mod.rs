//! Core types for virtgraph
//!
//! - [`ResourceKind`] - the libvirt resource kinds the resolver models
//! - [`VirtgraphError`] - crate-wide error enumeration
//! - [`ErrorContext`] and [`user_friendly_error`] - terminal error reporting with
//!   suggestions
//!
//! # Examples
//!
//! ```rust
//! use virtgraph::core::{ResourceKind, VirtgraphError};
//!
//! let kind: Result<ResourceKind, VirtgraphError> = "libvirt_bridge".parse();
//! assert!(matches!(kind, Err(VirtgraphError::UnknownResourceKind { .. })));
//! ```

pub mod error;
pub mod kind;

pub use error::{ErrorContext, VirtgraphError, user_friendly_error};
pub use kind::ResourceKind;
