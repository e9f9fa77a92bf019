use virtgraph::core::ResourceKind;
use virtgraph::models::Element;
use virtgraph::resolver::resolve;
use virtgraph::test_utils::{BatchFixture, cloudinit, domain, pool, volume};

#[test]
fn test_resolution_is_deterministic() {
    let batch = BatchFixture::full_vm().elements();
    assert_eq!(resolve(&batch).unwrap(), resolve(&batch).unwrap());
}

#[test]
fn test_resources_keep_batch_order() {
    let batch = BatchFixture::full_vm().elements();
    let graph = resolve(&batch).unwrap();

    let names: Vec<&str> = graph.resources().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["p1", "v1", "c1", "lan", "d1"]);
}

#[test]
fn test_many_instances_of_one_kind() {
    let batch = vec![
        pool("fast"),
        pool("slow"),
        volume("a", Some("fast")),
        volume("b", Some("slow")),
        volume("c", Some("fast")),
    ];
    let graph = resolve(&batch).unwrap();

    assert_eq!(graph.resources_of(ResourceKind::Volume).count(), 3);
    assert_eq!(graph.find(ResourceKind::Volume, "b").unwrap().depends_on, vec!["slow"]);
    assert!(graph.find(ResourceKind::Pool, "fast").unwrap().create_variable);
    assert!(graph.find(ResourceKind::Pool, "slow").unwrap().create_variable);
    // Legacy single-slot view: the last declaration of a kind wins
    assert_eq!(graph.get(ResourceKind::Volume).unwrap().name, "c");
}

#[test]
fn test_variable_iff_referenced_by_dependent_kind() {
    let batch = vec![
        pool("p1"),
        pool("unused"),
        volume("v1", Some("p1")),
        cloudinit("c1", "p1"),
        domain("d1").with_field("cloudinit", "c1"),
    ];
    let graph = resolve(&batch).unwrap();

    for resource in graph.resources() {
        let referenced = graph
            .resources()
            .iter()
            .filter(|other| resource.kind.dependents().contains(&other.kind))
            .any(|other| other.references(&resource.name));
        assert_eq!(resource.create_variable, referenced, "{} {}", resource.kind, resource.name);
    }
}

#[test]
fn test_duplicate_names_produce_duplicate_entries() {
    let batch = vec![pool("p1"), pool("p1"), volume("v1", Some("p1"))];
    let graph = resolve(&batch).unwrap();

    assert_eq!(graph.get(ResourceKind::Volume).unwrap().depends_on, vec!["p1", "p1"]);
    assert!(graph.resources_of(ResourceKind::Pool).all(|p| p.create_variable));
}

#[test]
fn test_unnamed_resources_are_never_matched() {
    let batch = vec![
        Element::new("libvirt_pool").with_field("type", "dir"),
        volume("v1", None).with_field("pool", ""),
    ];
    let graph = resolve(&batch).unwrap();

    assert!(graph.get(ResourceKind::Volume).unwrap().depends_on.is_empty());
    assert!(!graph.get(ResourceKind::Pool).unwrap().create_variable);
}

#[test]
fn test_non_string_values_compare_as_json() {
    let batch = vec![
        Element::new("libvirt_pool").with_field("name", 7),
        Element::new("libvirt_volume").with_field("name", "v1").with_field("pool", 7),
        Element::new("libvirt_volume").with_field("name", "v2").with_field("pool", "7"),
    ];
    let graph = resolve(&batch).unwrap();

    assert_eq!(graph.find(ResourceKind::Volume, "v1").unwrap().depends_on, vec!["7"]);
    assert!(graph.find(ResourceKind::Volume, "v2").unwrap().depends_on.is_empty());
}

#[test]
fn test_creation_order_puts_dependencies_first() {
    let mut batch = BatchFixture::full_vm().elements();
    batch.reverse();
    let graph = resolve(&batch).unwrap();

    let order = graph.creation_order().unwrap();
    assert_eq!(order.len(), graph.len());
    for (i, resource) in order.iter().enumerate() {
        for dep in &resource.depends_on {
            let dep_position = order.iter().position(|r| &r.name == dep).unwrap();
            assert!(dep_position < i, "{dep} must come before {}", resource.name);
        }
    }
}
