//! Pass 5: link callables that declare `moved-to` with their replacement.

use super::context::ResolutionContext;
use super::{ResolveReport, WarningKind};
use crate::base::Name;
use crate::model::{
    AsCallable, Callable, Function, Namespace, RealType, Repository, SymbolKind, SymbolRef,
};

/// Finds the callable a `moved-to` value names.
///
/// Accepted forms are `function`, `Type.member`, `Namespace.function` and
/// `Namespace.Type.member`.
fn find_target(ctx: &ResolutionContext<'_>, target: &str) -> Option<SymbolRef> {
    let parts: Vec<&str> = target.split('.').collect();
    match parts.as_slice() {
        [function] => find_function(ctx.primary(), function),
        [first, member] => find_member(ctx.primary(), first, member).or_else(|| {
            ctx.namespace(first)
                .and_then(|(ns, _)| find_function(ns, member))
        }),
        [ns, owner, member] => ctx
            .namespace(ns)
            .and_then(|(ns, _)| find_member(ns, owner, member)),
        _ => None,
    }
}

fn find_function(ns: &Namespace, name: &str) -> Option<SymbolRef> {
    ns.find_function(name).map(|f| SymbolRef {
        namespace: ns.name.clone(),
        owner: None,
        name: f.name.clone(),
        kind: SymbolKind::Function,
    })
}

fn find_member(ns: &Namespace, owner: &str, member: &str) -> Option<SymbolRef> {
    let (owner, kind) = match ns.find_real_type(owner)? {
        RealType::Class(t) => (
            t.name.clone(),
            member_kind(
                t.methods.iter().map(AsCallable::callable),
                &t.constructors,
                &t.functions,
                member,
            )?,
        ),
        RealType::Interface(t) => (
            t.name.clone(),
            member_kind(
                t.methods.iter().map(AsCallable::callable),
                &[],
                &t.functions,
                member,
            )?,
        ),
        RealType::Record(t) => (
            t.name.clone(),
            member_kind(
                t.methods.iter().map(AsCallable::callable),
                &t.constructors,
                &t.functions,
                member,
            )?,
        ),
        RealType::Union(t) => (
            t.name.clone(),
            member_kind(
                t.methods.iter().map(AsCallable::callable),
                &t.constructors,
                &t.functions,
                member,
            )?,
        ),
        RealType::Enumeration(t) | RealType::BitField(t) | RealType::ErrorDomain(t) => (
            t.name.clone(),
            member_kind(std::iter::empty(), &[], &t.functions, member)?,
        ),
        RealType::Alias(_) => return None,
    };
    Some(SymbolRef {
        namespace: ns.name.clone(),
        owner: Some(owner),
        name: Name::from(member),
        kind,
    })
}

fn member_kind<'a>(
    mut methods: impl Iterator<Item = &'a Callable>,
    constructors: &[Function],
    functions: &[Function],
    member: &str,
) -> Option<SymbolKind> {
    if methods.any(|m| &*m.name == member) {
        Some(SymbolKind::Method)
    } else if functions.iter().any(|f| &*f.name == member) {
        Some(SymbolKind::TypeFunction)
    } else if constructors.iter().any(|f| &*f.name == member) {
        Some(SymbolKind::Constructor)
    } else {
        None
    }
}

/// A callable that declares `moved-to`, by owning type and name.
struct Source {
    owner: Option<Name>,
    name: Name,
}

impl Source {
    fn display(&self) -> Name {
        match &self.owner {
            Some(owner) => Name::from(format!("{owner}.{}", self.name)),
            None => self.name.clone(),
        }
    }
}

/// Every callable of the namespace, paired with its owning type.
fn owned_callables(ns: &Namespace) -> Vec<(Option<&Name>, &Callable)> {
    fn push_all<'a>(
        out: &mut Vec<(Option<&'a Name>, &'a Callable)>,
        owner: &'a Name,
        callables: impl Iterator<Item = &'a Callable>,
    ) {
        out.extend(callables.map(|c| (Some(owner), c)));
    }

    let mut out: Vec<(Option<&Name>, &Callable)> =
        ns.get_functions().map(|f| (None, f)).collect();
    for class in ns.get_classes() {
        let methods = class.methods.iter().map(AsCallable::callable);
        push_all(
            &mut out,
            &class.name,
            methods.chain(&class.constructors).chain(&class.functions),
        );
    }
    for iface in ns.get_interfaces() {
        let methods = iface.methods.iter().map(AsCallable::callable);
        push_all(&mut out, &iface.name, methods.chain(&iface.functions));
    }
    for record in ns.get_records() {
        let methods = record.methods.iter().map(AsCallable::callable);
        push_all(
            &mut out,
            &record.name,
            methods.chain(&record.constructors).chain(&record.functions),
        );
    }
    for union in ns.get_unions() {
        let methods = union.methods.iter().map(AsCallable::callable);
        push_all(
            &mut out,
            &union.name,
            methods.chain(&union.constructors).chain(&union.functions),
        );
    }
    let enums = ns
        .get_enumerations()
        .chain(ns.get_bitfields())
        .chain(ns.get_error_domains());
    for enumeration in enums {
        push_all(&mut out, &enumeration.name, enumeration.functions.iter());
    }
    out
}

pub(super) fn resolve_moved_to(repo: &mut Repository, report: &mut ResolveReport) {
    let links: Vec<(Source, SymbolRef)> = {
        let ctx = ResolutionContext::new(repo);
        let mut links = Vec::new();
        for (owner, callable) in owned_callables(ctx.primary()) {
            let Some(target) = callable.moved_to.as_deref() else {
                continue;
            };
            let source = Source {
                owner: owner.cloned(),
                name: callable.name.clone(),
            };
            match find_target(&ctx, target) {
                Some(symbol) => links.push((source, symbol)),
                None => report.warn(
                    WarningKind::UnresolvedMovedTo,
                    &ctx.primary().qualify(&source.display()),
                    target,
                ),
            }
        }
        links
    };

    for (source, target) in links {
        if target.namespace == repo.namespace.name {
            let owner = target.owner.as_deref();
            if let Some(callable) = callable_mut(&mut repo.namespace, owner, &target.name) {
                callable.moved_from = Some(source.display());
            }
        }
        let owner = source.owner.as_deref();
        if let Some(callable) = callable_mut(&mut repo.namespace, owner, &source.name) {
            callable.moved_to_target = Some(target);
        }
    }
}

fn callable_mut<'a>(
    ns: &'a mut Namespace,
    owner: Option<&str>,
    name: &str,
) -> Option<&'a mut Callable> {
    callables_mut(ns, owner)
        .into_iter()
        .find(|c| &*c.name == name)
}

/// Mutable view of the callables owned by `owner`, or of the namespace
/// functions when there is no owner.
fn callables_mut<'a>(ns: &'a mut Namespace, owner: Option<&str>) -> Vec<&'a mut Callable> {
    let Some(owner) = owner else {
        return ns.functions_mut().collect();
    };
    if ns.find_class(owner).is_some() {
        return ns.class_mut(owner).map_or_else(Vec::new, |class| {
            class
                .methods
                .iter_mut()
                .map(AsCallable::callable_mut)
                .chain(class.constructors.iter_mut())
                .chain(class.functions.iter_mut())
                .collect()
        });
    }
    if ns.find_interface(owner).is_some() {
        return ns.interface_mut(owner).map_or_else(Vec::new, |iface| {
            iface
                .methods
                .iter_mut()
                .map(AsCallable::callable_mut)
                .chain(iface.functions.iter_mut())
                .collect()
        });
    }
    if ns.find_record(owner).is_some() {
        return ns.record_mut(owner).map_or_else(Vec::new, |record| {
            record
                .methods
                .iter_mut()
                .map(AsCallable::callable_mut)
                .chain(record.constructors.iter_mut())
                .chain(record.functions.iter_mut())
                .collect()
        });
    }
    if ns.find_union(owner).is_some() {
        return ns.union_mut(owner).map_or_else(Vec::new, |union| {
            union
                .methods
                .iter_mut()
                .map(AsCallable::callable_mut)
                .chain(union.constructors.iter_mut())
                .chain(union.functions.iter_mut())
                .collect()
        });
    }
    ns.enumeration_mut(owner)
        .map_or_else(Vec::new, |e| e.functions.iter_mut().collect())
}
