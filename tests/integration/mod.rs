//! Integration test suite for virtgraph
//!
//! End-to-end tests for the public library API and the `virtgraph` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **scenarios**: Reference batches and their resolved graphs
//! - **properties**: Determinism, ordering and marking invariants
//! - **validation**: Required-field checks against the provider schema
//! - **wire_format**: Decoding the element payload in both key casings
//! - **cli**: The binary, its output formats and exit codes

mod cli;
mod properties;
mod scenarios;
mod validation;
mod wire_format;
