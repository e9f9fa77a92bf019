//! Error handling for virtgraph
//!
//! This module provides the crate-wide error type and user-friendly error reporting
//! for the CLI. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise handling in code
//! 2. **User-friendly messages** with actionable suggestions on the terminal
//!
//! # Architecture
//!
//! - [`VirtgraphError`] - Enumerated error types for every failure virtgraph reports
//! - [`ErrorContext`] - Wrapper that adds details and a suggestion for display
//!
//! The resolution core has its own, narrower error type
//! ([`ResolveError`](crate::resolver::ResolveError)); it converts into
//! [`VirtgraphError`] at the boundary.
//!
//! # Examples
//!
//! ```rust,no_run
//! use virtgraph::core::{VirtgraphError, user_friendly_error};
//!
//! let error = VirtgraphError::CyclicDependency {
//!     cycle: vec!["base".to_string(), "overlay".to_string()],
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::resolver::ResolveError;

/// Main error type for virtgraph operations
///
/// # Error Categories
///
/// - **Resolution**: [`CyclicDependency`], [`BatchTooLarge`]
/// - **Input**: [`InvalidBatch`], [`MissingRequiredField`], [`UnknownResourceKind`]
/// - **Configuration**: [`ConfigNotFound`], [`ConfigParseError`]
/// - **System**: [`FileSystemError`]
///
/// [`CyclicDependency`]: VirtgraphError::CyclicDependency
/// [`BatchTooLarge`]: VirtgraphError::BatchTooLarge
/// [`InvalidBatch`]: VirtgraphError::InvalidBatch
/// [`MissingRequiredField`]: VirtgraphError::MissingRequiredField
/// [`UnknownResourceKind`]: VirtgraphError::UnknownResourceKind
/// [`ConfigNotFound`]: VirtgraphError::ConfigNotFound
/// [`ConfigParseError`]: VirtgraphError::ConfigParseError
/// [`FileSystemError`]: VirtgraphError::FileSystemError
#[derive(Error, Debug)]
pub enum VirtgraphError {
    /// Resources reference each other in a cycle
    ///
    /// The simplest case is a volume whose `base_volume_name` is its own name.
    ///
    /// # Fields
    /// - `cycle`: Resource names along the cycle, starting at the first one visited
    #[error("Cyclic dependency detected: {}", .cycle.join(" → "))]
    CyclicDependency {
        /// Names along the cycle
        cycle: Vec<String>,
    },

    /// The batch holds more elements than the configured limit
    #[error("Batch of {size} elements exceeds the limit of {limit}")]
    BatchTooLarge {
        /// Number of elements in the batch
        size: usize,
        /// Configured maximum
        limit: usize,
    },

    /// An element lacks a field its resource schema marks as required
    #[error("Element {index} ({kind}) is missing required field '{field}'")]
    MissingRequiredField {
        /// Provider tag of the element
        kind: String,
        /// Name of the missing field
        field: String,
        /// Position of the element in the batch
        index: usize,
    },

    /// A kind tag does not name a modelled resource kind
    #[error("Unknown resource kind: {kind}")]
    UnknownResourceKind {
        /// The tag as given
        kind: String,
    },

    /// The input batch could not be decoded
    #[error("Invalid resource batch in {source_name}: {reason}")]
    InvalidBatch {
        /// File path, or `<stdin>`
        source_name: String,
        /// Decoder message
        reason: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was looked up
        path: String,
    },

    /// Configuration file has invalid syntax or values
    #[error("Invalid configuration file {file}")]
    ConfigParseError {
        /// Path to the configuration file
        file: String,
        /// Parser message
        reason: String,
    },

    /// File system operation failed
    #[error("File system error: {operation}")]
    FileSystemError {
        /// Operation that failed
        operation: String,
        /// Path involved
        path: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for VirtgraphError {
    fn clone(&self) -> Self {
        match self {
            Self::CyclicDependency {
                cycle,
            } => Self::CyclicDependency {
                cycle: cycle.clone(),
            },
            Self::BatchTooLarge {
                size,
                limit,
            } => Self::BatchTooLarge {
                size: *size,
                limit: *limit,
            },
            Self::MissingRequiredField {
                kind,
                field,
                index,
            } => Self::MissingRequiredField {
                kind: kind.clone(),
                field: field.clone(),
                index: *index,
            },
            Self::UnknownResourceKind {
                kind,
            } => Self::UnknownResourceKind {
                kind: kind.clone(),
            },
            Self::InvalidBatch {
                source_name,
                reason,
            } => Self::InvalidBatch {
                source_name: source_name.clone(),
                reason: reason.clone(),
            },
            Self::ConfigNotFound {
                path,
            } => Self::ConfigNotFound {
                path: path.clone(),
            },
            Self::ConfigParseError {
                file,
                reason,
            } => Self::ConfigParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::FileSystemError {
                operation,
                path,
            } => Self::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

impl From<ResolveError> for VirtgraphError {
    fn from(error: ResolveError) -> Self {
        match error {
            ResolveError::CyclicDependency {
                cycle,
            } => Self::CyclicDependency {
                cycle,
            },
            ResolveError::BatchTooLarge {
                size,
                limit,
            } => Self::BatchTooLarge {
                size,
                limit,
            },
        }
    }
}

/// Error wrapper with user-facing details and a suggestion
///
/// Produced by [`user_friendly_error`] and printed by the binary on failure.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: VirtgraphError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details
    #[must_use]
    pub const fn new(error: VirtgraphError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow, suggestion in green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions
///
/// Known error types ([`VirtgraphError`], [`ResolveError`]) are found anywhere in
/// the chain and mapped to tailored messages; a bare [`std::io::Error`] gets a
/// file access suggestion. A [`VirtgraphError::FileSystemError`] keeps its path
/// and the underlying io cause in the details. Everything else becomes [`VirtgraphError::Other`] carrying the full
/// cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    // Also matches a VirtgraphError attached with `.context(..)`.
    if let Some(known) = error.downcast_ref::<VirtgraphError>() {
        let mut ctx = create_error_context(known.clone());
        if matches!(known, VirtgraphError::FileSystemError { .. }) && error.chain().count() > 1 {
            let cause = error.root_cause().to_string();
            ctx.details = Some(match ctx.details.take() {
                Some(details) => format!("{details}: {cause}"),
                None => cause,
            });
        }
        return ctx;
    }

    for cause in error.chain() {
        if let Some(known) = cause.downcast_ref::<VirtgraphError>() {
            return create_error_context(known.clone());
        }
        if let Some(resolve_error) = cause.downcast_ref::<ResolveError>() {
            return create_error_context(resolve_error.clone().into());
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(VirtgraphError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the input file exists and the path is correct");
            }
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(VirtgraphError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check the file permissions of the input file");
            }
            _ => {}
        }
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(VirtgraphError::Other {
        message,
    })
}

fn create_error_context(error: VirtgraphError) -> ErrorContext {
    match &error {
        VirtgraphError::CyclicDependency { cycle } => {
            let suggestion = if cycle.len() == 1 {
                format!(
                    "Resource '{}' references its own name. Point the reference at a different resource",
                    cycle[0]
                )
            } else {
                "Break the cycle by removing one of the references between these resources".to_string()
            };
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("References are inferred by name: a field such as base_volume_name or pool matching another resource's name creates an edge")
        }

        VirtgraphError::BatchTooLarge { .. } => ErrorContext::new(error)
            .with_suggestion("Split the batch, or raise [limits] max_batch_size in the configuration file (0 disables the limit)"),

        VirtgraphError::MissingRequiredField { kind, field, .. } => {
            let suggestion = format!("Add a '{field}' field to the {kind} element, or pass --skip-validation");
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Required fields come from the libvirt provider schema plus any [schema.required] entries in the configuration")
        }

        VirtgraphError::UnknownResourceKind { .. } => ErrorContext::new(error).with_suggestion(
            "Use one of: libvirt_pool, libvirt_volume, libvirt_network, libvirt_cloudinit_disk, libvirt_ignition, libvirt_domain",
        ),

        VirtgraphError::InvalidBatch { .. } => ErrorContext::new(error)
            .with_suggestion("The input must be a JSON array of {\"kind\": ..., \"fields\": [{\"name\": ..., \"value\": ...}]} objects")
            .with_details("Check for trailing commas, unquoted keys or a top-level object instead of an array"),

        VirtgraphError::ConfigNotFound { path } => {
            let suggestion = format!("Create {path} or drop the --config option to use defaults");
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        VirtgraphError::ConfigParseError { file, reason } => {
            let details = reason.clone();
            let suggestion = format!("Check the TOML syntax in {file}. Verify quotes, brackets and table names");
            ErrorContext::new(error).with_details(details).with_suggestion(suggestion)
        }

        VirtgraphError::FileSystemError { operation, path } => {
            let details = path.clone();
            let suggestion = format!("Check that {path} exists and can be {operation}");
            ErrorContext::new(error).with_details(details).with_suggestion(suggestion)
        }

        _ => ErrorContext::new(error),
    }
}
