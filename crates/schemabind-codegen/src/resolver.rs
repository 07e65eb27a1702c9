//! Type graph resolution.
//!
//! Collects the nesting subtree of a top-level type, validates every reference
//! against the bundle and orders the local types so that a type holding another
//! local type by value is emitted after it.
//!
//! Singular, option and map fields and command payloads hold their type by
//! value (`TSchemaOption<T>` and `TMap<K, V>` store it inline) and produce
//! strong edges. List fields and event payloads are heap-backed and produce weak
//! edges; when every remaining type waits on another, the first type whose
//! pending edges are all weak is emitted anyway and relies on the forward
//! declarations written ahead of all definitions.

use crate::naming::{header_path, relative_root};
use schemabind_core::{
    Bundle, EnumDefinition, GenerateError, GenerateResult, Multiplicity, TypeDescription,
    ValueType,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};

/// Strength of a "uses" edge between two local types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EdgeKind {
    /// The target may be incomplete at the point of use.
    Weak,
    /// The target must be fully defined first.
    Strong,
}

/// A weak edge whose target is emitted after its user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredEdge {
    pub from: String,
    pub to: String,
}

/// Result of resolving one top-level type.
#[derive(Debug, Clone)]
pub struct ResolvedType<'a> {
    /// The top-level type.
    pub root: &'a TypeDescription,
    /// The root and every type nested in it, in emission order.
    pub ordered_types: Vec<&'a TypeDescription>,
    /// Top-level types and enums outside the subtree that are referenced, sorted.
    pub includes: Vec<String>,
    /// Enums declared anywhere in the subtree, in declaration order.
    pub nested_enums: Vec<&'a EnumDefinition>,
    /// Weak edges that had to be broken to find an order.
    pub deferred: Vec<DeferredEdge>,
}

impl ResolvedType<'_> {
    /// Include paths of the referenced external units, relative to the root's unit.
    pub fn include_paths(&self) -> Vec<String> {
        let up = relative_root(&self.root.qualified_name);
        self.includes
            .iter()
            .map(|name| format!("{up}{}", header_path(name)))
            .collect()
    }
}

/// Resolve the nesting subtree, external references and emission order of `root`.
pub fn resolve<'a>(root: &'a TypeDescription, bundle: &'a Bundle) -> GenerateResult<ResolvedType<'a>> {
    let mut locals = Vec::new();
    collect_local_types(root, bundle, &mut locals)?;

    let mut nested_enums = Vec::new();
    for ty in &locals {
        for name in &ty.nested_enums {
            let def = bundle
                .enum_definition(name)
                .ok_or_else(|| missing(ty, format!("nested enum {name}"), name))?;
            nested_enums.push(def);
        }
    }

    let positions: HashMap<&str, usize> = locals
        .iter()
        .enumerate()
        .map(|(index, ty)| (ty.qualified_name.as_str(), index))
        .collect();

    let mut includes = BTreeSet::new();
    let mut pending: Vec<BTreeMap<usize, EdgeKind>> = vec![BTreeMap::new(); locals.len()];

    for (index, ty) in locals.iter().enumerate() {
        for reference in references(ty) {
            let name = match reference.target {
                Target::Value(ValueType::Primitive(_)) => continue,
                Target::Value(ValueType::Enum(name)) => {
                    if bundle.enum_definition(name).is_none() {
                        return Err(missing(ty, reference.member, name));
                    }
                    name
                }
                Target::Value(ValueType::Type(name)) | Target::Type(name) => {
                    if bundle.type_description(name).is_none() {
                        return Err(missing(ty, reference.member, name));
                    }
                    name
                }
            };

            let top = bundle.top_level_type_of(name);
            if top != root.qualified_name {
                includes.insert(top.to_string());
                continue;
            }

            let Some(&target) = positions.get(name.as_str()) else {
                continue;
            };
            if target == index {
                if reference.kind == EdgeKind::Strong {
                    return Err(GenerateError::UnorderableTypes {
                        type_name: root.qualified_name.clone(),
                        types: vec![ty.qualified_name.clone()],
                    });
                }
                continue;
            }
            let edge = pending[index].entry(target).or_insert(reference.kind);
            *edge = (*edge).max(reference.kind);
        }
    }

    let (order, deferred) = order_types(root, &locals, pending)?;
    let ordered_types: Vec<&TypeDescription> = order.into_iter().map(|index| locals[index]).collect();

    debug!(
        type_name = %root.qualified_name,
        types = ordered_types.len(),
        includes = includes.len(),
        enums = nested_enums.len(),
        "resolved type graph"
    );

    Ok(ResolvedType {
        root,
        ordered_types,
        includes: includes.into_iter().collect(),
        nested_enums,
        deferred,
    })
}

fn collect_local_types<'a>(
    ty: &'a TypeDescription,
    bundle: &'a Bundle,
    out: &mut Vec<&'a TypeDescription>,
) -> GenerateResult<()> {
    out.push(ty);
    for name in &ty.nested_types {
        let nested = bundle
            .type_description(name)
            .ok_or_else(|| missing(ty, format!("nested type {name}"), name))?;
        collect_local_types(nested, bundle, out)?;
    }
    Ok(())
}

/// Kahn's algorithm, lowest declaration index first, with a weak-edge fallback.
fn order_types(
    root: &TypeDescription,
    locals: &[&TypeDescription],
    mut pending: Vec<BTreeMap<usize, EdgeKind>>,
) -> GenerateResult<(Vec<usize>, Vec<DeferredEdge>)> {
    let mut emitted = vec![false; locals.len()];
    let mut order = Vec::with_capacity(locals.len());
    let mut deferred = Vec::new();

    while order.len() < locals.len() {
        let ready = (0..locals.len()).find(|&i| !emitted[i] && pending[i].is_empty());

        let next = match ready {
            Some(index) => index,
            None => {
                let fallback = (0..locals.len()).find(|&i| {
                    !emitted[i] && pending[i].values().all(|kind| *kind == EdgeKind::Weak)
                });
                let Some(index) = fallback else {
                    return Err(GenerateError::UnorderableTypes {
                        type_name: root.qualified_name.clone(),
                        types: (0..locals.len())
                            .filter(|&i| !emitted[i])
                            .map(|i| locals[i].qualified_name.clone())
                            .collect(),
                    });
                };
                for &target in pending[index].keys() {
                    warn!(
                        from = %locals[index].qualified_name,
                        to = %locals[target].qualified_name,
                        "cyclic reference, relying on forward declaration"
                    );
                    deferred.push(DeferredEdge {
                        from: locals[index].qualified_name.clone(),
                        to: locals[target].qualified_name.clone(),
                    });
                }
                pending[index].clear();
                index
            }
        };

        emitted[next] = true;
        order.push(next);
        for deps in pending.iter_mut() {
            deps.remove(&next);
        }
    }

    Ok((order, deferred))
}

#[derive(Clone, Copy)]
enum Target<'a> {
    Value(&'a ValueType),
    Type(&'a String),
}

struct Reference<'a> {
    member: String,
    target: Target<'a>,
    kind: EdgeKind,
}

fn references(ty: &TypeDescription) -> Vec<Reference<'_>> {
    let mut result = Vec::new();

    for field in &ty.fields {
        let kind = match field.multiplicity() {
            Multiplicity::List => EdgeKind::Weak,
            Multiplicity::Singular | Multiplicity::Option | Multiplicity::Map => EdgeKind::Strong,
        };
        for value in field.kind.value_types() {
            result.push(Reference {
                member: format!("field {}", field.name),
                target: Target::Value(value),
                kind,
            });
        }
    }

    for event in ty.events() {
        result.push(Reference {
            member: format!("event {} payload", event.name),
            target: Target::Type(&event.payload),
            kind: EdgeKind::Weak,
        });
    }

    for command in ty.commands() {
        result.push(Reference {
            member: format!("command {} request", command.name),
            target: Target::Type(&command.request),
            kind: EdgeKind::Strong,
        });
        result.push(Reference {
            member: format!("command {} response", command.name),
            target: Target::Type(&command.response),
            kind: EdgeKind::Strong,
        });
    }

    result
}

fn missing(ty: &TypeDescription, member: String, name: &str) -> GenerateError {
    GenerateError::MissingType {
        type_name: ty.qualified_name.clone(),
        member,
        missing: name.to_string(),
    }
}
