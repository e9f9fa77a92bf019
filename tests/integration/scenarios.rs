use virtgraph::core::ResourceKind;
use virtgraph::models::Element;
use virtgraph::resolver::{ResolveError, resolve};
use virtgraph::test_utils::{
    BatchFixture, cloudinit, domain, ignition, init_test_logging, network, pool, volume,
};

#[test]
fn test_volume_depends_on_its_pool() {
    init_test_logging(None);
    let graph = resolve(&BatchFixture::pool_and_volume().elements()).unwrap();

    let volume = graph.get(ResourceKind::Volume).unwrap();
    assert_eq!(volume.depends_on, vec!["p1"]);
    assert!(graph.get(ResourceKind::Pool).unwrap().create_variable);
    assert!(!volume.create_variable);
}

#[test]
fn test_self_based_volume_is_a_cycle() {
    let err = resolve(&BatchFixture::self_cycle().elements()).unwrap_err();
    assert_eq!(
        err,
        ResolveError::CyclicDependency {
            cycle: vec!["v1".to_string()]
        }
    );
}

#[test]
fn test_domain_with_cloudinit_disk() {
    let batch = vec![pool("p1"), cloudinit("c1", "p1"), domain("d1").with_field("cloudinit", "c1")];
    let graph = resolve(&batch).unwrap();

    assert_eq!(graph.get(ResourceKind::Domain).unwrap().depends_on, vec!["c1"]);
    assert!(graph.get(ResourceKind::CloudInit).unwrap().create_variable);
    assert!(graph.get(ResourceKind::Pool).unwrap().create_variable);
    assert!(!graph.get(ResourceKind::Domain).unwrap().create_variable);
}

#[test]
fn test_unknown_kind_does_not_affect_resolution() {
    let with_unknown = vec![
        pool("p1"),
        Element::new("libvirt_pool_snapshot").with_field("name", "snap").with_field("pool", "p1"),
        volume("v1", Some("p1")),
    ];
    let without = vec![pool("p1"), volume("v1", Some("p1"))];

    assert_eq!(resolve(&with_unknown).unwrap(), resolve(&without).unwrap());
}

#[test]
fn test_domain_with_ignition_and_kernel() {
    let batch = vec![
        pool("p1"),
        ignition("ign", "p1"),
        volume("kernel", Some("p1")),
        network("lan"),
        domain("d1").with_field("coreos_ignition", "ign").with_field("kernel", "kernel"),
    ];
    let graph = resolve(&batch).unwrap();

    // Candidates are scanned in batch order
    assert_eq!(graph.get(ResourceKind::Domain).unwrap().depends_on, vec!["ign", "kernel"]);
    assert!(graph.get(ResourceKind::Ignition).unwrap().create_variable);
    assert!(graph.get(ResourceKind::Volume).unwrap().create_variable);
    // Domains never reference networks by name
    assert!(!graph.get(ResourceKind::Network).unwrap().create_variable);
}

#[test]
fn test_backing_chain() {
    let graph = resolve(&BatchFixture::backing_chain().elements()).unwrap();

    let overlay = graph.find(ResourceKind::Volume, "overlay").unwrap();
    // pool and base_volume_pool each match p1, then base_volume_name matches base
    assert_eq!(overlay.depends_on, vec!["p1", "p1", "base"]);
    assert!(graph.find(ResourceKind::Volume, "base").unwrap().create_variable);
    assert!(!overlay.create_variable);

    let order: Vec<&str> =
        graph.creation_order().unwrap().iter().map(|r| r.name.as_str()).collect();
    let position = |name: &str| order.iter().position(|n| *n == name).unwrap();
    assert!(position("p1") < position("base"));
    assert!(position("base") < position("overlay"));
}

#[test]
fn test_two_volume_cycle() {
    let batch = vec![
        volume("a", None).with_field("base_volume_name", "b"),
        volume("b", None).with_field("base_volume_name", "a"),
    ];

    match resolve(&batch).unwrap_err() {
        ResolveError::CyclicDependency {
            cycle,
        } => assert_eq!(cycle, vec!["a", "b"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unmatched_reference_is_not_an_error() {
    let graph = resolve(&[volume("v1", Some("missing"))]).unwrap();
    assert!(graph.get(ResourceKind::Volume).unwrap().depends_on.is_empty());
}

#[test]
fn test_long_backing_chain_resolves() {
    // Each volume is based on the previous one; declared newest first
    let mut batch: Vec<Element> = (0..6_000)
        .map(|i| {
            let element = volume(&format!("v{i}"), None);
            if i == 0 {
                element
            } else {
                element.with_field("base_volume_name", format!("v{}", i - 1))
            }
        })
        .collect();
    batch.reverse();

    let graph = resolve(&batch).unwrap();
    assert_eq!(graph.len(), 6_000);
    assert!(graph.find(ResourceKind::Volume, "v0").unwrap().create_variable);
    assert!(!graph.find(ResourceKind::Volume, "v5999").unwrap().create_variable);
}

#[test]
fn test_short_kind_tags_are_skipped() {
    let batch = vec![
        Element::new("pool").with_field("name", "p1"),
        Element::new("Volume").with_field("name", "v1").with_field("pool", "p1"),
    ];

    assert!(resolve(&batch).unwrap().is_empty());
}
