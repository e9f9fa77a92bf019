//! Element builders and sample batches.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::models::Element;

/// A pool that passes validation.
pub fn pool(name: &str) -> Element {
    Element::new("libvirt_pool").with_field("name", name).with_field("type", "dir")
}

/// A volume, optionally placed in `pool`.
pub fn volume(name: &str, pool: Option<&str>) -> Element {
    let element = Element::new("libvirt_volume").with_field("name", name);
    match pool {
        Some(pool) => element.with_field("pool", pool),
        None => element,
    }
}

pub fn network(name: &str) -> Element {
    Element::new("libvirt_network").with_field("name", name).with_field("mode", "nat")
}

/// A cloud-init disk in `pool`.
pub fn cloudinit(name: &str, pool: &str) -> Element {
    Element::new("libvirt_cloudinit_disk")
        .with_field("name", name)
        .with_field("pool", pool)
        .with_field("user_data", "#cloud-config\n")
}

/// An ignition config in `pool`.
pub fn ignition(name: &str, pool: &str) -> Element {
    Element::new("libvirt_ignition")
        .with_field("name", name)
        .with_field("pool", pool)
        .with_field("content", "{}")
}

/// A domain with no references; add them with [`Element::with_field`].
pub fn domain(name: &str) -> Element {
    Element::new("libvirt_domain").with_field("name", name).with_field("memory", 512)
}

/// A named batch used across tests.
#[derive(Clone, Debug)]
pub struct BatchFixture {
    pub name: String,
    elements: Vec<Element>,
}

impl BatchFixture {
    pub fn new(name: &str, elements: Vec<Element>) -> Self {
        Self {
            name: name.to_string(),
            elements,
        }
    }

    /// A pool and a volume placed in it.
    pub fn pool_and_volume() -> Self {
        Self::new("pool_and_volume", vec![pool("p1"), volume("v1", Some("p1"))])
    }

    /// A domain booting a kernel volume and a cloud-init disk, both in one pool.
    pub fn full_vm() -> Self {
        Self::new(
            "full_vm",
            vec![
                pool("p1"),
                volume("v1", Some("p1")),
                cloudinit("c1", "p1"),
                network("lan"),
                domain("d1").with_field("kernel", "v1").with_field("cloudinit", "c1"),
            ],
        )
    }

    /// A volume whose base is itself.
    pub fn self_cycle() -> Self {
        Self::new(
            "self_cycle",
            vec![volume("v1", None).with_field("base_volume_name", "v1")],
        )
    }

    /// A copy-on-write volume chain: `overlay` is based on `base`, both in `p1`.
    pub fn backing_chain() -> Self {
        Self::new(
            "backing_chain",
            vec![
                pool("p1"),
                volume("base", Some("p1")),
                volume("overlay", Some("p1"))
                    .with_field("base_volume_name", "base")
                    .with_field("base_volume_pool", "p1"),
            ],
        )
    }

    pub fn elements(&self) -> Vec<Element> {
        self.elements.clone()
    }

    /// The batch as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.elements).context("Failed to serialize batch")
    }

    /// Write the batch to `<dir>/<name>.json` and return the path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.json", self.name));
        std::fs::write(&path, self.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
