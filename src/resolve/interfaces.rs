//! Pass 4: interface prerequisites and class/interface implementation edges.

use indexmap::IndexMap;

use super::context::ResolutionContext;
use super::{ResolveReport, WarningKind};
use crate::base::Name;
use crate::base::constants::{GOBJECT_OBJECT, fundamental_ctype};
use crate::model::{Repository, Type};

pub(super) fn resolve_prerequisites(repo: &mut Repository, report: &mut ResolveReport) {
    let resolved: Vec<(Name, Option<Type>)> = {
        let ctx = ResolutionContext::new(repo);
        let mut resolved = Vec::new();
        for iface in ctx.primary().get_interfaces() {
            let requires = match iface.prerequisite.and_then(|id| ctx.types().get(id)) {
                None => Some(Type::new(
                    GOBJECT_OBJECT,
                    fundamental_ctype(GOBJECT_OBJECT).map(Name::from),
                )),
                Some(prerequisite) => match ctx.find_real_type(&prerequisite.name) {
                    Some(found) => {
                        let mut requires = prerequisite.clone();
                        if requires.ctype.is_none() {
                            requires.ctype = found.ctype().cloned();
                        }
                        Some(requires)
                    }
                    None if &*prerequisite.name == GOBJECT_OBJECT => Some(prerequisite.clone()),
                    None => {
                        report.warn(
                            WarningKind::UnresolvedPrerequisite,
                            &ctx.primary().qualify(&iface.name),
                            &prerequisite.name,
                        );
                        None
                    }
                },
            };
            resolved.push((iface.name.clone(), requires));
        }
        resolved
    };

    for (name, requires) in resolved {
        if let Some(iface) = repo.namespace.interface_mut(&name) {
            iface.requires = requires;
        }
    }
}

/// Resolves every `implements` reference and records the back edge on the
/// interface: on the interface itself when it is local, on the repository
/// otherwise.
pub(super) fn resolve_implementations(repo: &mut Repository, report: &mut ResolveReport) {
    let mut class_interfaces: Vec<(Name, Vec<Type>)> = Vec::new();
    let mut local_edges: Vec<(Name, Type)> = Vec::new();
    let mut external_edges: Vec<(Name, Type)> = Vec::new();
    {
        let ctx = ResolutionContext::new(repo);
        for class in ctx.primary().get_classes() {
            let class_type = ctx.local_type(&class.name, class.ctype.as_ref());
            let mut interfaces: Vec<Type> = Vec::new();
            for iface_type in class.implements.iter().filter_map(|&id| ctx.types().get(id)) {
                let Some(found) = ctx.find_interface(&iface_type.name) else {
                    report.warn(
                        WarningKind::UnresolvedInterface,
                        &class_type.name,
                        &iface_type.name,
                    );
                    continue;
                };
                let mut resolved = iface_type.clone();
                if resolved.ctype.is_none() {
                    resolved.ctype = found.item.ctype.clone();
                }
                if interfaces.contains(&resolved) {
                    continue;
                }
                if ctx.is_primary(found.namespace) {
                    local_edges.push((found.item.name.clone(), class_type.clone()));
                } else {
                    external_edges.push((resolved.name.clone(), class_type.clone()));
                }
                interfaces.push(resolved);
            }
            class_interfaces.push((class.name.clone(), interfaces));
        }
    }

    for (name, interfaces) in class_interfaces {
        if let Some(class) = repo.namespace.class_mut(&name) {
            class.interfaces = interfaces;
        }
    }

    for iface in repo.namespace.interfaces_mut() {
        iface.implementations.clear();
    }
    for (iface_name, class_type) in local_edges {
        if let Some(iface) = repo.namespace.interface_mut(&iface_name) {
            if !iface.implementations.contains(&class_type) {
                iface.implementations.push(class_type);
            }
        }
    }

    let mut external: IndexMap<Name, Vec<Type>> = IndexMap::new();
    for (iface_name, class_type) in external_edges {
        let implementations = external.entry(iface_name).or_default();
        if !implementations.contains(&class_type) {
            implementations.push(class_type);
        }
    }
    repo.external_implementations = external;
}
