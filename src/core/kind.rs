//! Resource kinds understood by the resolver
//!
//! Every element of an input batch carries a kind tag such as `libvirt_pool` or
//! `libvirt_domain`. The tag is the resource name used by the libvirt provider, and
//! [`ResourceKind`] is the typed form of it. Elements whose tag is not exactly one
//! of the provider tags ([`ResourceKind::from_tag`]) are not errors for the
//! resolver: they are skipped so batches can carry resources the resolver does not
//! model yet.
//!
//! # Examples
//!
//! ```rust
//! use virtgraph::core::ResourceKind;
//!
//! let pool: ResourceKind = "libvirt_pool".parse().unwrap();
//! assert_eq!(pool, ResourceKind::Pool);
//! assert_eq!(pool.tag(), "libvirt_pool");
//!
//! // Short forms are accepted on the command line and in configuration
//! let disk: ResourceKind = "cloudinit".parse().unwrap();
//! assert_eq!(disk, ResourceKind::CloudInit);
//! ```
//!
//! ## Serialization Support
//!
//! ```rust
//! use virtgraph::core::ResourceKind;
//!
//! let json = serde_json::to_string(&ResourceKind::CloudInit).unwrap();
//! assert_eq!(json, "\"libvirt_cloudinit_disk\"");
//! ```

use serde::{Deserialize, Serialize};

/// Enumeration of the libvirt resource kinds the resolver models.
///
/// The set is fixed. Kinds serialize to their provider tag, so a resolved graph
/// written as JSON carries the same identifiers the input batch used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Storage pool. Depends on nothing.
    #[serde(rename = "libvirt_pool")]
    Pool,

    /// Storage volume, placed in a pool and optionally backed by another volume.
    #[serde(rename = "libvirt_volume")]
    Volume,

    /// Virtual network. Depends on nothing.
    #[serde(rename = "libvirt_network")]
    Network,

    /// Cloud-init seed disk, placed in a pool.
    #[serde(rename = "libvirt_cloudinit_disk")]
    CloudInit,

    /// CoreOS ignition config, placed in a pool.
    #[serde(rename = "libvirt_ignition")]
    Ignition,

    /// Virtual machine.
    ///
    /// A domain references its kernel volume, its cloud-init disk and its
    /// ignition config by name. Network interfaces only reference networks by id,
    /// which does not exist before deployment, so no network edge is ever inferred.
    #[serde(rename = "libvirt_domain")]
    Domain,
}

impl ResourceKind {
    /// All kinds, in the order they are reported.
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Pool,
        ResourceKind::Volume,
        ResourceKind::Network,
        ResourceKind::CloudInit,
        ResourceKind::Ignition,
        ResourceKind::Domain,
    ];

    /// The provider tag for this kind, as it appears in input batches.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            ResourceKind::Pool => "libvirt_pool",
            ResourceKind::Volume => "libvirt_volume",
            ResourceKind::Network => "libvirt_network",
            ResourceKind::CloudInit => "libvirt_cloudinit_disk",
            ResourceKind::Ignition => "libvirt_ignition",
            ResourceKind::Domain => "libvirt_domain",
        }
    }

    /// Kinds whose resources may reference a resource of this kind.
    ///
    /// A resource needs a variable binding in generated code when its name shows
    /// up in the `depends_on` list of any resource of one of these kinds.
    ///
    /// `Network` lists `Domain` even though no domain edge to a network is ever
    /// extracted today.
    #[must_use]
    pub const fn dependents(&self) -> &'static [ResourceKind] {
        match self {
            ResourceKind::Pool => {
                &[ResourceKind::Volume, ResourceKind::CloudInit, ResourceKind::Ignition]
            }
            ResourceKind::Volume => &[ResourceKind::Domain, ResourceKind::Volume],
            ResourceKind::CloudInit => &[ResourceKind::Domain],
            ResourceKind::Ignition => &[ResourceKind::Domain],
            ResourceKind::Network => &[ResourceKind::Domain],
            ResourceKind::Domain => &[],
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Pool => write!(f, "pool"),
            ResourceKind::Volume => write!(f, "volume"),
            ResourceKind::Network => write!(f, "network"),
            ResourceKind::CloudInit => write!(f, "cloudinit"),
            ResourceKind::Ignition => write!(f, "ignition"),
            ResourceKind::Domain => write!(f, "domain"),
        }
    }
}

impl ResourceKind {
    /// The kind whose provider tag is exactly `tag`.
    ///
    /// Batch dispatch uses this: `pool` or `Libvirt_Pool` are not provider tags and
    /// name no kind. The lenient [`FromStr`](std::str::FromStr) form is for command
    /// line and configuration input.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = crate::core::VirtgraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "libvirt_pool" | "pool" => Ok(ResourceKind::Pool),
            "libvirt_volume" | "volume" => Ok(ResourceKind::Volume),
            "libvirt_network" | "network" => Ok(ResourceKind::Network),
            "libvirt_cloudinit_disk" | "cloudinit" | "cloudinit_disk" => {
                Ok(ResourceKind::CloudInit)
            }
            "libvirt_ignition" | "ignition" => Ok(ResourceKind::Ignition),
            "libvirt_domain" | "domain" => Ok(ResourceKind::Domain),
            _ => Err(crate::core::VirtgraphError::UnknownResourceKind {
                kind: s.to_string(),
            }),
        }
    }
}
