//! Passes 2 and 3: class ancestor chains and their inverse.

use rustc_hash::FxHashSet;

use super::context::ResolutionContext;
use super::{ResolveReport, WarningKind};
use crate::base::Name;
use crate::base::constants::GOBJECT_OBJECT;
use crate::model::{Class, Repository, Type};

pub(super) fn resolve_ancestors(repo: &mut Repository, report: &mut ResolveReport) {
    let chains: Vec<(Name, Vec<Type>)> = {
        let ctx = ResolutionContext::new(repo);
        ctx.primary()
            .get_classes()
            .map(|class| (class.name.clone(), ancestor_chain(&ctx, class, report)))
            .collect()
    };

    for (name, ancestors) in chains {
        if let Some(class) = repo.namespace.class_mut(&name) {
            class.ancestors = ancestors;
        }
    }
}

/// Walks `parent` links, nearest first.
///
/// The walk stops at a class without a parent, at a name seen before, or
/// at a parent that cannot be found. `GObject.Object` is recorded even when
/// its namespace is not loaded.
fn ancestor_chain(
    ctx: &ResolutionContext<'_>,
    class: &Class,
    report: &mut ResolveReport,
) -> Vec<Type> {
    let qualified = ctx.primary().qualify(&class.name);
    let mut ancestors = Vec::new();
    let mut seen: FxHashSet<Name> = FxHashSet::default();
    seen.insert(Name::from(qualified.as_str()));

    let mut next = class.parent.and_then(|id| ctx.types().get(id)).cloned();
    while let Some(mut current) = next.take() {
        if !seen.insert(current.name.clone()) {
            report.warn(WarningKind::AncestryCycle, &qualified, &current.name);
            break;
        }
        match ctx.find_class(&current.name) {
            Some(found) => {
                if current.ctype.is_none() {
                    current.ctype = found.item.ctype.clone();
                }
                next = found
                    .item
                    .parent
                    .and_then(|id| found.types.get(id))
                    .cloned();
                ancestors.push(current);
            }
            None if &*current.name == GOBJECT_OBJECT => ancestors.push(current),
            None => report.warn(WarningKind::UnresolvedParent, &qualified, &current.name),
        }
    }
    ancestors
}

/// Records every class on the `descendants` list of each local ancestor.
pub(super) fn resolve_descendants(repo: &mut Repository) {
    let mut edges: Vec<(Name, Type)> = Vec::new();
    {
        let ns = &repo.namespace;
        for class in ns.get_classes() {
            let descendant = Type::new(ns.qualify(&class.name), class.ctype.clone());
            for ancestor in &class.ancestors {
                match ancestor.split_qualified() {
                    Some((ancestor_ns, local)) if ancestor_ns == &*ns.name => {
                        edges.push((Name::from(local), descendant.clone()));
                    }
                    _ => {}
                }
            }
        }
    }

    for class in repo.namespace.classes_mut() {
        class.descendants.clear();
    }
    for (ancestor, descendant) in edges {
        if let Some(class) = repo.namespace.class_mut(&ancestor) {
            if !class.descendants.contains(&descendant) {
                class.descendants.push(descendant);
            }
        }
    }
}
