//! Resource schemas and required-field validation.
//!
//! The resolver assumes every element already carries the fields its resource
//! schema marks as required. This module provides that pre-condition check as a
//! separate step for callers to run before resolution.
//!
//! The schema is an explicit capability: build a [`LibvirtSchema`] once at startup
//! (optionally extended from configuration) and pass it to
//! [`validate_required_fields`]. Nothing here reads global state.
//!
//! # Examples
//!
//! ```rust
//! use virtgraph::models::Element;
//! use virtgraph::schema::{LibvirtSchema, validate_required_fields};
//!
//! let schema = LibvirtSchema::builtin();
//! let batch = vec![Element::new("libvirt_pool").with_field("name", "default")];
//!
//! // libvirt_pool also requires "type"
//! assert!(validate_required_fields(&batch, &schema).is_err());
//! ```

use std::collections::BTreeMap;
use tracing::debug;

use crate::core::{ResourceKind, VirtgraphError};
use crate::models::Element;

/// Source of resource schema metadata.
pub trait SchemaProvider {
    /// Provider tags of all kinds the schema describes, sorted.
    fn known_kinds(&self) -> Vec<&str>;

    /// Required field names for `kind`, or `None` if the kind is unknown.
    fn required_fields(&self, kind: &str) -> Option<&[String]>;
}

/// Required fields of the libvirt provider resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibvirtSchema {
    required: BTreeMap<String, Vec<String>>,
}

impl LibvirtSchema {
    /// The schema as declared by the libvirt provider.
    pub fn builtin() -> Self {
        let mut required = BTreeMap::new();
        for kind in ResourceKind::ALL {
            let fields: &[&str] = match kind {
                ResourceKind::Pool => &["name", "type"],
                ResourceKind::Ignition => &["name", "content"],
                ResourceKind::Volume
                | ResourceKind::Network
                | ResourceKind::CloudInit
                | ResourceKind::Domain => &["name"],
            };
            required
                .insert(kind.tag().to_string(), fields.iter().map(|f| f.to_string()).collect());
        }
        Self {
            required,
        }
    }

    /// Mark additional fields of `kind` as required.
    ///
    /// `kind` may be a provider tag or a short form such as `volume`; tags that do
    /// not name a modelled kind are stored verbatim so other provider resources
    /// can be checked too.
    #[must_use]
    pub fn with_required<I, S>(mut self, kind: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tag = kind
            .parse::<ResourceKind>()
            .map(|k| k.tag().to_string())
            .unwrap_or_else(|_| kind.to_string());
        let entry = self.required.entry(tag).or_default();
        for field in fields {
            let field = field.into();
            if !entry.contains(&field) {
                entry.push(field);
            }
        }
        self
    }

    /// The built-in schema extended with every `kind → fields` entry of `extra`.
    pub fn with_overrides(extra: &BTreeMap<String, Vec<String>>) -> Self {
        extra
            .iter()
            .fold(Self::builtin(), |schema, (kind, fields)| schema.with_required(kind, fields.clone()))
    }
}

impl Default for LibvirtSchema {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SchemaProvider for LibvirtSchema {
    fn known_kinds(&self) -> Vec<&str> {
        self.required.keys().map(String::as_str).collect()
    }

    fn required_fields(&self, kind: &str) -> Option<&[String]> {
        self.required.get(kind).map(Vec::as_slice)
    }
}

/// Check that every element carries the required fields of its kind.
///
/// Elements of kinds the schema does not know are not checked. An empty batch is
/// valid. The first missing field is reported with the element's batch index.
pub fn validate_required_fields(
    elements: &[Element],
    schema: &dyn SchemaProvider,
) -> Result<(), VirtgraphError> {
    for (index, element) in elements.iter().enumerate() {
        let Some(required) = schema.required_fields(&element.kind) else {
            debug!("No schema for element {index} ({}), not checked", element.kind);
            continue;
        };

        if let Some(missing) = required.iter().find(|field| !element.has_field(field)) {
            return Err(VirtgraphError::MissingRequiredField {
                kind: element.kind.clone(),
                field: missing.clone(),
                index,
            });
        }
    }

    Ok(())
}
