//! The root of a parsed GIR document.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;

use super::namespace::{Namespace, RealType};
use super::objects::{Class, Interface};
use super::types::{Type, TypeTable};
use crate::base::Name;

/// A dependency declared with `<include name="…" version="…"/>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Include {
    pub name: Name,
    pub version: Option<Name>,
}

impl Include {
    pub fn new(name: impl Into<Name>, version: Option<Name>) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    /// File name of the dependency, e.g. `GObject-2.0.gir`.
    pub fn gir_file(&self) -> String {
        format!("{self}.gir")
    }
}

impl fmt::Display for Include {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}-{version}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// One parsed GIR file: its namespace, the types it references, and the
/// repositories it depends on.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    pub namespace: Namespace,
    pub types: TypeTable,
    /// Declared `<include>` elements, in document order.
    pub include_declarations: Vec<Include>,
    /// Header files from `<c:include>`.
    pub c_includes: Vec<Name>,
    /// pkg-config names from `<package>`.
    pub packages: Vec<Name>,
    /// Path of the file this repository was read from.
    pub girfile: Option<PathBuf>,
    pub(crate) includes: IndexMap<Name, Arc<Repository>>,
    pub(crate) external_implementations: IndexMap<Name, Vec<Type>>,
}

impl Repository {
    pub fn new(namespace: Namespace) -> Self {
        Self {
            namespace,
            ..Self::default()
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Loaded dependency repositories keyed by namespace name.
    pub fn includes(&self) -> impl Iterator<Item = (&Name, &Arc<Repository>)> {
        self.includes.iter()
    }

    pub fn include(&self, namespace: &str) -> Option<&Arc<Repository>> {
        self.includes.get(namespace)
    }

    /// The namespace called `name` and its type table, searching this
    /// repository first and then the loaded dependencies.
    pub fn lookup_namespace(&self, name: &str) -> Option<(&Namespace, &TypeTable)> {
        if &*self.namespace.name == name {
            return Some((&self.namespace, &self.types));
        }
        self.includes
            .get(name)
            .map(|repo| (&repo.namespace, &repo.types))
    }

    /// Splits a possibly qualified name; unqualified names belong to this namespace.
    fn split<'n>(&'n self, name: &'n str) -> (&'n str, &'n str) {
        name.split_once('.').unwrap_or((&*self.namespace.name, name))
    }

    /// Finds a type definition by name, across loaded dependencies.
    pub fn find_type(&self, name: &str) -> Option<RealType<'_>> {
        let (ns, local) = self.split(name);
        self.lookup_namespace(ns)?.0.find_real_type(local)
    }

    pub fn find_class(&self, name: &str) -> Option<&Class> {
        let (ns, local) = self.split(name);
        self.lookup_namespace(ns)?.0.find_class(local)
    }

    pub fn find_interface(&self, name: &str) -> Option<&Interface> {
        let (ns, local) = self.split(name);
        self.lookup_namespace(ns)?.0.find_interface(local)
    }

    /// Classes in this repository implementing the interface `fqn`.
    ///
    /// Works for interfaces defined in dependencies too, whose own
    /// `implementations` never see classes from dependent namespaces.
    pub fn implementations_of(&self, fqn: &str) -> Vec<Type> {
        match fqn.split_once('.') {
            Some((ns, local)) if ns == &*self.namespace.name => self
                .namespace
                .find_interface(local)
                .map(|iface| iface.implementations.clone())
                .unwrap_or_default(),
            _ => self
                .external_implementations
                .get(fqn)
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// Every GIR file this repository was built from: dependencies first,
    /// then the repository's own file.
    pub fn dependency_files(&self) -> Vec<&Path> {
        self.includes
            .values()
            .filter_map(|repo| repo.girfile.as_deref())
            .chain(self.girfile.as_deref())
            .collect()
    }
}
