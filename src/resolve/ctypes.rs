//! Pass 1: fill in C types the document left out.

use super::context::ResolutionContext;
use super::{ResolveReport, WarningKind};
use crate::base::Name;
use crate::model::{Repository, TypeId};

/// Classes without `c:type` take their GType name.
pub(super) fn resolve_class_ctypes(repo: &mut Repository) {
    for class in repo.namespace.classes_mut() {
        if class.ctype.is_none() {
            class.ctype = class.gtype.as_ref().map(|g| g.type_name.clone());
        }
    }
}

/// Copies the ctype of the defining element onto every type entry that
/// lacks one.
pub(super) fn resolve_empty_ctypes(repo: &mut Repository, report: &mut ResolveReport) {
    let updates: Vec<(TypeId, Name)> = {
        let ctx = ResolutionContext::new(repo);
        let mut updates = Vec::new();
        for (id, ty) in ctx.types().iter() {
            if ty.ctype.is_some() || ty.fundamental {
                continue;
            }
            match ctx.find_real_type(&ty.name).and_then(|t| t.ctype()) {
                Some(ctype) => updates.push((id, ctype.clone())),
                None => report.warn(WarningKind::UnresolvedCType, &ty.name, &ty.name),
            }
        }
        updates
    };

    for (id, ctype) in updates {
        repo.types.set_ctype(id, ctype);
    }
}
