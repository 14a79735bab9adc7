//! Read-only view over a repository and its loaded dependencies.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::base::Name;
use crate::model::{Class, Interface, Namespace, RealType, Repository, Type, TypeTable};

/// An element together with the namespace and type table that own it.
#[derive(Debug, Clone, Copy)]
pub struct Located<'a, T> {
    pub item: &'a T,
    pub namespace: &'a Namespace,
    pub types: &'a TypeTable,
}

/// Bundles the primary namespace with every transitively loaded
/// dependency namespace, so passes can follow names across files without
/// back-references on the nodes.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    primary: &'a Namespace,
    types: &'a TypeTable,
    dependencies: &'a IndexMap<Name, Arc<Repository>>,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(repository: &'a Repository) -> Self {
        Self {
            primary: &repository.namespace,
            types: &repository.types,
            dependencies: &repository.includes,
        }
    }

    pub fn primary(&self) -> &'a Namespace {
        self.primary
    }

    pub fn types(&self) -> &'a TypeTable {
        self.types
    }

    pub fn is_primary(&self, namespace: &Namespace) -> bool {
        namespace.name == self.primary.name
    }

    /// The namespace called `name` and its type table.
    pub fn namespace(&self, name: &str) -> Option<(&'a Namespace, &'a TypeTable)> {
        if &*self.primary.name == name {
            return Some((self.primary, self.types));
        }
        self.dependencies
            .get(name)
            .map(|repo| (&repo.namespace, &repo.types))
    }

    fn locate<T>(
        &self,
        fqtn: &str,
        find: impl FnOnce(&'a Namespace, &str) -> Option<&'a T>,
    ) -> Option<Located<'a, T>> {
        let (ns, local) = fqtn.split_once('.')?;
        let (namespace, types) = self.namespace(ns)?;
        find(namespace, local).map(|item| Located {
            item,
            namespace,
            types,
        })
    }

    pub fn find_real_type(&self, fqtn: &str) -> Option<RealType<'a>> {
        let (ns, local) = fqtn.split_once('.')?;
        self.namespace(ns)?.0.find_real_type(local)
    }

    pub fn find_class(&self, fqtn: &str) -> Option<Located<'a, Class>> {
        self.locate(fqtn, |ns, local| ns.find_class(local))
    }

    pub fn find_interface(&self, fqtn: &str) -> Option<Located<'a, Interface>> {
        self.locate(fqtn, |ns, local| ns.find_interface(local))
    }

    /// The [`Type`] value naming a class or interface of the primary namespace.
    pub fn local_type(&self, name: &str, ctype: Option<&Name>) -> Type {
        Type::new(self.primary.qualify(name), ctype.cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Class;

    #[test]
    fn test_lookups_cross_into_dependencies() {
        let mut gobject = Namespace::new("GObject", "2.0");
        gobject.add_class(Class::new("Object"));
        let dep = Repository::new(gobject);

        let mut ns = Namespace::new("Foo", "1.0");
        ns.add_class(Class::new("Bar"));
        let mut repo = Repository::new(ns);
        repo.includes.insert("GObject".into(), Arc::new(dep));

        let ctx = ResolutionContext::new(&repo);
        let bar = ctx.find_class("Foo.Bar").unwrap();
        assert!(ctx.is_primary(bar.namespace));
        let object = ctx.find_class("GObject.Object").unwrap();
        assert!(!ctx.is_primary(object.namespace));
        assert!(ctx.find_class("Bar").is_none(), "names must be qualified");
        assert!(ctx.find_interface("GObject.Object").is_none());
        assert_eq!(ctx.local_type("Bar", None).name.as_ref(), "Foo.Bar");
    }
}
