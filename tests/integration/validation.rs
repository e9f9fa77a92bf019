use std::collections::BTreeMap;

use virtgraph::config::Config;
use virtgraph::core::VirtgraphError;
use virtgraph::models::Element;
use virtgraph::schema::{LibvirtSchema, SchemaProvider, validate_required_fields};
use virtgraph::test_utils::BatchFixture;

#[test]
fn test_fixtures_pass_builtin_schema() {
    let schema = LibvirtSchema::builtin();
    for fixture in [BatchFixture::pool_and_volume(), BatchFixture::full_vm(), BatchFixture::backing_chain()] {
        assert!(
            validate_required_fields(&fixture.elements(), &schema).is_ok(),
            "{} should validate",
            fixture.name
        );
    }
}

#[test]
fn test_pool_without_type_is_rejected() {
    let batch = vec![Element::new("libvirt_pool").with_field("name", "p1")];

    let err = validate_required_fields(&batch, &LibvirtSchema::builtin()).unwrap_err();
    assert_eq!(err.to_string(), "Element 0 (libvirt_pool) is missing required field 'type'");
}

#[test]
fn test_config_extends_schema() {
    let config = Config::parse(
        "[schema.required]\nvolume = [\"pool\"]\n",
        std::path::Path::new("config.toml"),
    )
    .unwrap();
    let schema = config.schema();

    let batch = vec![Element::new("libvirt_volume").with_field("name", "v1")];
    assert!(matches!(
        validate_required_fields(&batch, &schema),
        Err(VirtgraphError::MissingRequiredField { ref field, .. }) if field == "pool"
    ));
}

struct NothingRequired;

impl SchemaProvider for NothingRequired {
    fn known_kinds(&self) -> Vec<&str> {
        Vec::new()
    }

    fn required_fields(&self, _kind: &str) -> Option<&[String]> {
        None
    }
}

#[test]
fn test_custom_schema_provider() {
    let batch = vec![Element::new("libvirt_pool")];
    assert!(validate_required_fields(&batch, &NothingRequired).is_ok());

    let empty = LibvirtSchema::with_overrides(&BTreeMap::new());
    assert_eq!(empty, LibvirtSchema::builtin());
}
