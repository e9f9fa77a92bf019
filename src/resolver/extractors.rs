//! Per-kind dependency extraction.
//!
//! Resources in a batch have no ids yet, so references are inferred by value: when
//! a volume's `pool` field equals the `name` of a pool in the same batch, the
//! volume depends on that pool. Each kind owns a fixed list of
//! [`ExtractionRule`]s, and [`extract_dependencies`] applies them against every
//! element of the batch.
//!
//! | Kind      | Field              | Target    |
//! |-----------|--------------------|-----------|
//! | CloudInit | `pool`             | Pool      |
//! | Ignition  | `pool`             | Pool      |
//! | Volume    | `pool`             | Pool      |
//! | Volume    | `base_volume_pool` | Pool      |
//! | Volume    | `base_volume_name` | Volume    |
//! | Domain    | `coreos_ignition`  | Ignition  |
//! | Domain    | `kernel`           | Volume    |
//! | Domain    | `cloudinit`        | CloudInit |
//!
//! Pools and networks reference nothing. A domain reaches networks only through
//! `network_interface` blocks that carry network ids, so no domain → network edge
//! can be inferred.

use serde_json::Value;
use tracing::trace;

use crate::core::ResourceKind;
use crate::models::{Element, Field, NAME_FIELD, field_value, value_to_string};

/// One inference rule: the value of `field` names a resource of kind `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionRule {
    /// Field on the referencing resource.
    pub field: &'static str,
    /// Kind of resource the field points at.
    pub target: ResourceKind,
}

const fn rule(field: &'static str, target: ResourceKind) -> ExtractionRule {
    ExtractionRule {
        field,
        target,
    }
}

const POOL_RULES: &[ExtractionRule] = &[];

const NETWORK_RULES: &[ExtractionRule] = &[];

const CLOUDINIT_RULES: &[ExtractionRule] = &[rule("pool", ResourceKind::Pool)];

const IGNITION_RULES: &[ExtractionRule] = &[rule("pool", ResourceKind::Pool)];

const VOLUME_RULES: &[ExtractionRule] = &[
    rule("pool", ResourceKind::Pool),
    rule("base_volume_pool", ResourceKind::Pool),
    rule("base_volume_name", ResourceKind::Volume),
];

const DOMAIN_RULES: &[ExtractionRule] = &[
    rule("coreos_ignition", ResourceKind::Ignition),
    rule("kernel", ResourceKind::Volume),
    rule("cloudinit", ResourceKind::CloudInit),
];

/// The extraction rules for `kind`, in scan order.
#[must_use]
pub const fn rules_for(kind: ResourceKind) -> &'static [ExtractionRule] {
    match kind {
        ResourceKind::Pool => POOL_RULES,
        ResourceKind::Network => NETWORK_RULES,
        ResourceKind::CloudInit => CLOUDINIT_RULES,
        ResourceKind::Ignition => IGNITION_RULES,
        ResourceKind::Volume => VOLUME_RULES,
        ResourceKind::Domain => DOMAIN_RULES,
    }
}

/// An element of the batch whose kind tag parsed.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub kind: ResourceKind,
    pub element: &'a Element,
}

/// Pair every element of a recognized kind with its parsed kind, in batch order.
///
/// Elements of unknown kind can never be the target of a reference.
pub fn candidates(batch: &[Element]) -> Vec<Candidate<'_>> {
    batch
        .iter()
        .filter_map(|element| {
            ResourceKind::from_tag(&element.kind).map(|kind| Candidate {
                kind,
                element,
            })
        })
        .collect()
}

/// Infer the names a resource of `kind` with `fields` depends on.
///
/// Candidates are scanned in batch order. For each candidate, the rules of `kind`
/// that target the candidate's kind are applied in table order, and a rule whose
/// referencing value equals the candidate's name records one match. The name is
/// the first `name` field, as in [`ResourceConfig::name`](super::ResourceConfig),
/// so a recorded dependency always names a resource of the graph. Nothing is
/// deduplicated, so two rules hitting the same candidate, or two candidates sharing
/// a name, each add an entry.
///
/// A referencing field that is absent or `null` matches nothing. Unnamed
/// candidates are never matched.
pub fn extract_dependencies(
    kind: ResourceKind,
    fields: &[Field],
    candidates: &[Candidate<'_>],
) -> Vec<String> {
    let rules = rules_for(kind);
    if rules.is_empty() {
        return Vec::new();
    }

    // Resolve referencing values once; the candidate scan is the hot loop
    let wanted: Vec<(&ExtractionRule, &Value)> = rules
        .iter()
        .filter_map(|rule| {
            field_value(fields, rule.field).filter(|v| !v.is_null()).map(|value| (rule, value))
        })
        .collect();

    let mut deps = Vec::new();
    if wanted.is_empty() {
        return deps;
    }

    for candidate in candidates {
        let Some(candidate_name) = field_value(&candidate.element.fields, NAME_FIELD) else {
            continue;
        };

        for (rule, _) in wanted
            .iter()
            .filter(|(rule, value)| rule.target == candidate.kind && *value == candidate_name)
        {
            let name = value_to_string(candidate_name);
            if name.is_empty() {
                continue;
            }
            trace!("{kind} field '{}' matches {} '{name}'", rule.field, candidate.kind);
            deps.push(name);
        }
    }

    deps
}

/// Convenience wrapper over [`extract_dependencies`] for a raw batch.
pub fn dependencies_in(kind: ResourceKind, fields: &[Field], batch: &[Element]) -> Vec<String> {
    extract_dependencies(kind, fields, &candidates(batch))
}
