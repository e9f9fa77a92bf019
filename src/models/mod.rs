//! Raw resource declarations and field access
//!
//! An input batch is a JSON array of [`Element`]s. Each element carries a kind tag
//! and an ordered list of [`Field`]s whose values are arbitrary JSON scalars. The
//! resolver never interprets values beyond equality and string coercion.
//!
//! ```json
//! [
//!   { "kind": "libvirt_pool", "fields": [
//!       { "name": "name", "value": "default" },
//!       { "name": "type", "value": "dir" } ] },
//!   { "kind": "libvirt_volume", "fields": [
//!       { "name": "name", "value": "root" },
//!       { "name": "pool", "value": "default" } ] }
//! ]
//! ```
//!
//! Payloads produced by the legacy web front end use `Name`/`Fields`/`Value`/
//! `Subfields` keys, with the kind tag under `Name`. Both spellings decode to the
//! same values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the field that identifies a resource.
pub const NAME_FIELD: &str = "name";

/// A raw, untyped resource declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Provider tag such as `libvirt_volume`.
    #[serde(alias = "Kind", alias = "name", alias = "Name")]
    pub kind: String,

    /// Fields in declaration order.
    #[serde(default, alias = "Fields")]
    pub fields: Vec<Field>,
}

/// A name/value pair on an [`Element`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(alias = "Name")]
    pub name: String,

    /// Opaque value; a missing value decodes as `null`.
    #[serde(default, alias = "Value")]
    pub value: Value,

    /// Nested fields (e.g. a domain's `network_interface` blocks). Carried through
    /// resolution untouched.
    #[serde(default, alias = "Subfields", skip_serializing_if = "Option::is_none")]
    pub subfields: Option<Vec<Field>>,
}

impl Element {
    /// Create an element with no fields.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field, builder style.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push(Field::new(name, value));
        self
    }

    /// Value of the first field called `name`.
    pub fn field_value(&self, name: &str) -> Option<&Value> {
        field_value(&self.fields, name)
    }

    /// The element's resource name, or `""` when it has none.
    pub fn resource_name(&self) -> String {
        resource_name(&self.fields)
    }

    /// Whether a field called `name` is present, whatever its value.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            subfields: None,
        }
    }
}

/// Return the value of the first field whose name matches.
///
/// Absence is a normal outcome: optional fields are simply left out of a
/// declaration.
pub fn field_value<'a>(fields: &'a [Field], name: &str) -> Option<&'a Value> {
    fields.iter().find(|f| f.name == name).map(|f| &f.value)
}

/// The `name` field of a declaration coerced to a string, or `""` if absent.
///
/// The empty string means "unnamed"; nothing can depend on an unnamed resource.
pub fn resource_name(fields: &[Field]) -> String {
    field_value(fields, NAME_FIELD).map(value_to_string).unwrap_or_default()
}

/// Render a field value as a plain string.
///
/// Strings are returned without quotes, `null` becomes `""`, numbers and booleans
/// use their display form, and arrays and objects their compact JSON text.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
