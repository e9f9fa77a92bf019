use serde_json::json;
use virtgraph::core::ResourceKind;
use virtgraph::models::Element;
use virtgraph::resolver::resolve;

#[test]
fn test_legacy_capitalized_payload() {
    let batch: Vec<Element> = serde_json::from_value(json!([
        {"Name": "libvirt_pool", "Fields": [
            {"Name": "name", "Value": "p1"},
            {"Name": "type", "Value": "dir"}
        ]},
        {"Name": "libvirt_domain", "Fields": [
            {"Name": "name", "Value": "vm1"},
            {"Name": "network_interface", "Value": null, "Subfields": [
                {"Name": "network_name", "Value": "lan"}
            ]}
        ]}
    ]))
    .unwrap();

    assert_eq!(batch[0].kind, "libvirt_pool");
    let nic = &batch[1].fields[1];
    assert_eq!(nic.subfields.as_ref().unwrap()[0].value, json!("lan"));

    let graph = resolve(&batch).unwrap();
    assert_eq!(graph.len(), 2);
    assert!(graph.get(ResourceKind::Domain).unwrap().depends_on.is_empty());
}

#[test]
fn test_missing_value_decodes_as_null() {
    let batch: Vec<Element> = serde_json::from_value(json!([
        {"kind": "libvirt_volume", "fields": [{"name": "name", "value": "v1"}, {"name": "pool"}]}
    ]))
    .unwrap();

    assert!(batch[0].fields[1].value.is_null());
    assert!(resolve(&batch).unwrap().get(ResourceKind::Volume).unwrap().depends_on.is_empty());
}

#[test]
fn test_resolved_graph_serializes_provider_tags() {
    let batch = vec![Element::new("libvirt_cloudinit_disk").with_field("name", "c1")];
    let graph = resolve(&batch).unwrap();

    let value = serde_json::to_value(graph.resources()).unwrap();
    assert_eq!(value[0]["kind"], "libvirt_cloudinit_disk");
    assert_eq!(value[0]["create_variable"], false);
}
