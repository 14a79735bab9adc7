//! Type references and the per-repository type registry.
//!
//! Every `<type name="…">` in a document resolves to a [`TypeId`] in the
//! repository's [`TypeTable`]. Lookups of the same fully qualified name are
//! memoized, so all references to `Gtk.Widget` share one entry and a ctype
//! filled in later by the resolver is visible through every reference.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;

use rustc_hash::FxHashMap;

use crate::base::Name;

/// Handle into a [`TypeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A named type.
///
/// Two types are equal when their fully qualified names are equal; the C
/// type is carried along but ignored by comparisons.
#[derive(Debug, Clone)]
pub struct Type {
    /// Fully qualified name (`Gtk.Widget`), or a bare fundamental (`gint`).
    pub name: Name,
    pub namespace: Option<Name>,
    pub ctype: Option<Name>,
    pub fundamental: bool,
}

impl Type {
    pub fn new(name: impl Into<Name>, ctype: Option<Name>) -> Self {
        let name = name.into();
        let namespace = name.split_once('.').map(|(ns, _)| Name::from(ns));
        Self {
            name,
            namespace,
            ctype,
            fundamental: false,
        }
    }

    pub fn fundamental(name: impl Into<Name>, ctype: Option<Name>) -> Self {
        Self {
            fundamental: true,
            ..Self::new(name, ctype)
        }
    }

    /// The name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        match self.name.split_once('.') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// `(namespace, local)` for qualified names.
    pub fn split_qualified(&self) -> Option<(&str, &str)> {
        self.name.split_once('.')
    }

    /// The C type with pointer stars stripped.
    pub fn base_ctype(&self) -> Option<&str> {
        self.ctype.as_deref().map(|c| c.trim_end_matches('*'))
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Arena of [`Type`] entries owned by a repository.
#[derive(Debug, Default, Clone)]
pub struct TypeTable {
    entries: Vec<Type>,
    memo: FxHashMap<Name, Vec<TypeId>>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized entry for `fqtn`, creating it if needed.
    ///
    /// With a ctype, an entry with the same ctype is reused and a new one is
    /// created otherwise. Without a ctype, the first entry wins.
    pub fn intern(&mut self, fqtn: Name, ctype: Option<Name>, fundamental: bool) -> TypeId {
        if let Some(bucket) = self.memo.get(&fqtn) {
            match &ctype {
                None => return bucket[0],
                Some(c) => {
                    if let Some(&id) = bucket
                        .iter()
                        .find(|&&id| self.entries[id.index()].ctype.as_ref() == Some(c))
                    {
                        return id;
                    }
                }
            }
        }

        let ty = if fundamental {
            Type::fundamental(fqtn.clone(), ctype)
        } else {
            Type::new(fqtn.clone(), ctype)
        };
        let id = self.push(ty);
        self.memo.entry(fqtn).or_default().push(id);
        id
    }

    /// Stores a type that does not take part in name memoization.
    pub fn detached(&mut self, ty: Type) -> TypeId {
        self.push(ty)
    }

    /// The first memoized entry registered under `fqtn`.
    pub fn lookup(&self, fqtn: &str) -> Option<TypeId> {
        self.memo.get(fqtn).and_then(|bucket| bucket.first().copied())
    }

    pub fn get(&self, id: TypeId) -> Option<&Type> {
        self.entries.get(id.index())
    }

    pub(crate) fn set_ctype(&mut self, id: TypeId, ctype: Name) {
        if let Some(ty) = self.entries.get_mut(id.index()) {
            ty.ctype = Some(ctype);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Type)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, ty)| (TypeId(i as u32), ty))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.entries.len() as u32);
        self.entries.push(ty);
        id
    }
}

impl Index<TypeId> for TypeTable {
    type Output = Type;

    fn index(&self, id: TypeId) -> &Type {
        &self.entries[id.index()]
    }
}

/// The type of a value: a parameter, return value, field, property,
/// alias target, or constant.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    Named(TypeId),
    Void,
    VarArgs,
    Array(Box<ArrayType>),
    List(Box<ListType>),
    Map(Box<MapType>),
}

impl TypeRef {
    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Void)
    }

    pub fn named(&self) -> Option<TypeId> {
        match self {
            TypeRef::Named(id) => Some(*id),
            _ => None,
        }
    }

    /// The C type of this reference, read through `types` for named types.
    pub fn ctype<'a>(&'a self, types: &'a TypeTable) -> Option<&'a str> {
        match self {
            TypeRef::Named(id) => types.get(*id).and_then(|t| t.ctype.as_deref()),
            TypeRef::Void => Some("void"),
            TypeRef::VarArgs => None,
            TypeRef::Array(array) => array.ctype.as_deref(),
            TypeRef::List(list) => list.ctype.as_deref(),
            TypeRef::Map(map) => map.ctype.as_deref(),
        }
    }

    /// A short human-readable rendering, e.g. `array<utf8>`.
    pub fn display(&self, types: &TypeTable) -> String {
        match self {
            TypeRef::Named(id) => types
                .get(*id)
                .map(|t| t.name.to_string())
                .unwrap_or_default(),
            TypeRef::Void => "none".to_string(),
            TypeRef::VarArgs => "...".to_string(),
            TypeRef::Array(array) => match &array.name {
                Some(name) => format!("{name}<{}>", array.element.display(types)),
                None => format!("array<{}>", array.element.display(types)),
            },
            TypeRef::List(list) => format!("{}<{}>", list.name, list.element.display(types)),
            TypeRef::Map(map) => format!(
                "{}<{}, {}>",
                map.name,
                map.key.display(types),
                map.value.display(types)
            ),
        }
    }
}

/// `<array>`: C arrays and the GLib array containers.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    /// Set for `GLib.Array`, `GLib.PtrArray` and `GLib.ByteArray`.
    pub name: Option<Name>,
    pub ctype: Option<Name>,
    pub element: TypeRef,
    pub zero_terminated: bool,
    pub fixed_size: Option<usize>,
    /// Index of the parameter holding the array length.
    pub length: Option<usize>,
}

/// `GLib.List` / `GLib.SList` with a declared element type.
#[derive(Debug, Clone, PartialEq)]
pub struct ListType {
    pub name: Name,
    pub ctype: Option<Name>,
    pub element: TypeRef,
}

/// `GLib.HashTable` with declared key and value types.
#[derive(Debug, Clone, PartialEq)]
pub struct MapType {
    pub name: Name,
    pub ctype: Option<Name>,
    pub key: TypeRef,
    pub value: TypeRef,
}
