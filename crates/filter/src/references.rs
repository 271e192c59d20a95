//! Named-type extraction from type references.
//!
//! A type reference is a finite tree (containers wrapping containers
//! wrapping names), so a plain recursive walk terminates. Cycles only
//! appear between declarations, via descendant edges in the graph.

use crate::ids::{type_id, TypeId};
use sdkscope_ir::{ContainerType, TypeReference};
use std::collections::BTreeSet;

/// Add every named type mentioned by `reference` to `out`.
pub fn collect_referenced_types(reference: &TypeReference, out: &mut BTreeSet<TypeId>) {
    match reference {
        TypeReference::Container { container } => collect_from_container(container, out),
        TypeReference::Named(name) => {
            out.insert(type_id(name));
        }
        TypeReference::Primitive { .. } | TypeReference::Unknown | TypeReference::Void => {}
    }
}

fn collect_from_container(container: &ContainerType, out: &mut BTreeSet<TypeId>) {
    match container {
        ContainerType::List { list: inner }
        | ContainerType::Optional { optional: inner }
        | ContainerType::Set { set: inner } => collect_referenced_types(inner, out),
        ContainerType::Map {
            key_type,
            value_type,
        } => {
            collect_referenced_types(key_type, out);
            collect_referenced_types(value_type, out);
        }
        ContainerType::Literal { .. } => {}
    }
}

/// Named types mentioned by `reference`, as a fresh set.
pub fn referenced_types(reference: &TypeReference) -> BTreeSet<TypeId> {
    let mut out = BTreeSet::new();
    collect_referenced_types(reference, &mut out);
    out
}
