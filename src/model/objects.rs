//! Compound types: classes, interfaces, records, unions and boxed types,
//! together with the pieces they are made of.

use super::callable::{
    Callback, Function, Method, Parameter, ReturnValue, Transfer, VirtualMethod,
};
use super::info::{Info, impl_gir_element};
use super::namespace::Namespace;
use super::types::{Type, TypeId, TypeRef};
use crate::base::Name;

/// GType registration data, from the `glib:` attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GType {
    pub type_name: Name,
    pub get_type: Option<Name>,
    pub type_struct: Option<Name>,
}

/// A GObject property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: Name,
    pub info: Info,
    pub target: TypeRef,
    pub transfer: Transfer,
    pub readable: bool,
    pub writable: bool,
    pub construct: bool,
    pub construct_only: bool,
    pub setter: Option<Name>,
    pub getter: Option<Name>,
    pub default_value: Option<Name>,
}

/// When a signal's class handler runs relative to user handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalWhen {
    First,
    Last,
    Cleanup,
}

impl SignalWhen {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "first" => Some(SignalWhen::First),
            "last" => Some(SignalWhen::Last),
            "cleanup" => Some(SignalWhen::Cleanup),
            _ => None,
        }
    }
}

/// A GObject signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub name: Name,
    pub info: Info,
    pub parameters: Vec<Parameter>,
    pub return_value: ReturnValue,
    pub when: Option<SignalWhen>,
    pub detailed: bool,
    pub action: bool,
    pub no_hooks: bool,
    pub no_recurse: bool,
}

/// What a field holds: a value of some type, or an inline callback.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldTarget {
    Type(TypeRef),
    Callback(Box<Callback>),
}

/// A struct member of a class, interface, record or union.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: Name,
    pub info: Info,
    pub target: FieldTarget,
    pub readable: bool,
    pub writable: bool,
    pub private: bool,
    /// Bit-field width.
    pub bits: Option<u32>,
}

/// A type alias (C typedef).
#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    pub name: Name,
    pub info: Info,
    pub ctype: Option<Name>,
    pub target: TypeRef,
}

/// A named constant value.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub name: Name,
    pub info: Info,
    pub ctype: Option<Name>,
    pub target: TypeRef,
    pub value: Option<Name>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: Name,
    pub info: Info,
    pub ctype: Option<Name>,
    pub symbol_prefix: Option<Name>,
    pub gtype: Option<GType>,
    pub parent: Option<TypeId>,
    pub is_abstract: bool,
    pub fundamental: bool,
    pub ref_func: Option<Name>,
    pub unref_func: Option<Name>,
    /// Declared `<implements>` references.
    pub implements: Vec<TypeId>,
    pub constructors: Vec<Function>,
    pub methods: Vec<Method>,
    pub virtual_methods: Vec<VirtualMethod>,
    pub functions: Vec<Function>,
    pub properties: Vec<Property>,
    pub signals: Vec<Signal>,
    pub fields: Vec<Field>,
    /// Parent chain, nearest first. Filled by the resolver.
    pub ancestors: Vec<Type>,
    /// Classes in the same namespace deriving from this one. Filled by the resolver.
    pub descendants: Vec<Type>,
    /// Resolved `implements` references. Filled by the resolver.
    pub interfaces: Vec<Type>,
}

impl Class {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            info: Info::default(),
            ctype: None,
            symbol_prefix: None,
            gtype: None,
            parent: None,
            is_abstract: false,
            fundamental: false,
            ref_func: None,
            unref_func: None,
            implements: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            virtual_methods: Vec::new(),
            functions: Vec::new(),
            properties: Vec::new(),
            signals: Vec::new(),
            fields: Vec::new(),
            ancestors: Vec::new(),
            descendants: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    pub fn type_struct(&self) -> Option<&str> {
        self.gtype.as_ref().and_then(|g| g.type_struct.as_deref())
    }

    pub fn type_func(&self) -> Option<&str> {
        self.gtype
            .as_ref()
            .and_then(|g| g.get_type.as_deref())
            .or(self.ctype.as_deref())
    }

    /// Whether the class cannot be subclassed.
    ///
    /// A class is final when its instance struct has no fields, or when its
    /// class struct is missing, disguised, or has no fields.
    pub fn is_final(&self, namespace: &Namespace) -> bool {
        if self.fields.is_empty() {
            return true;
        }
        match self.type_struct().and_then(|name| namespace.find_record(name)) {
            None => true,
            Some(record) => record.disguised || record.fields.is_empty(),
        }
    }

    pub fn find_method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| &*m.callable.name == name)
    }

    pub fn find_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| &*p.name == name)
    }

    pub fn find_signal(&self, name: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| &*s.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    pub name: Name,
    pub info: Info,
    pub ctype: Option<Name>,
    pub symbol_prefix: Option<Name>,
    pub gtype: Option<GType>,
    pub prerequisite: Option<TypeId>,
    pub methods: Vec<Method>,
    pub virtual_methods: Vec<VirtualMethod>,
    pub functions: Vec<Function>,
    pub properties: Vec<Property>,
    pub signals: Vec<Signal>,
    pub fields: Vec<Field>,
    /// The resolved prerequisite; `GObject.Object` when none was declared.
    pub requires: Option<Type>,
    /// Classes in the same namespace implementing this interface.
    pub implementations: Vec<Type>,
}

impl Interface {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            info: Info::default(),
            ctype: None,
            symbol_prefix: None,
            gtype: None,
            prerequisite: None,
            methods: Vec::new(),
            virtual_methods: Vec::new(),
            functions: Vec::new(),
            properties: Vec::new(),
            signals: Vec::new(),
            fields: Vec::new(),
            requires: None,
            implementations: Vec::new(),
        }
    }

    pub fn type_struct(&self) -> Option<&str> {
        self.gtype
            .as_ref()
            .and_then(|g| g.type_struct.as_deref())
            .or(self.ctype.as_deref())
    }

    pub fn type_func(&self) -> Option<&str> {
        self.gtype.as_ref().and_then(|g| g.get_type.as_deref())
    }
}

/// A plain C struct, optionally registered as a boxed type.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: Name,
    pub info: Info,
    pub ctype: Option<Name>,
    pub symbol_prefix: Option<Name>,
    pub gtype: Option<GType>,
    /// Set on class and interface structs, naming the type they belong to.
    pub struct_for: Option<Name>,
    pub disguised: bool,
    pub constructors: Vec<Function>,
    pub methods: Vec<Method>,
    pub functions: Vec<Function>,
    pub fields: Vec<Field>,
}

impl Record {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            info: Info::default(),
            ctype: None,
            symbol_prefix: None,
            gtype: None,
            struct_for: None,
            disguised: false,
            constructors: Vec::new(),
            methods: Vec::new(),
            functions: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn type_struct(&self) -> Option<&str> {
        self.gtype
            .as_ref()
            .and_then(|g| g.type_struct.as_deref())
            .or(self.ctype.as_deref())
    }

    pub fn type_func(&self) -> Option<&str> {
        self.gtype.as_ref().and_then(|g| g.get_type.as_deref())
    }

    /// Opaque private data structs (`FooPrivate`) are not part of the API.
    pub fn is_private_struct(&self) -> bool {
        self.name.contains("Private") && self.disguised
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    pub name: Name,
    pub info: Info,
    pub ctype: Option<Name>,
    pub symbol_prefix: Option<Name>,
    pub gtype: Option<GType>,
    pub constructors: Vec<Function>,
    pub methods: Vec<Method>,
    pub functions: Vec<Function>,
    pub fields: Vec<Field>,
}

impl Union {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            info: Info::default(),
            ctype: None,
            symbol_prefix: None,
            gtype: None,
            constructors: Vec::new(),
            methods: Vec::new(),
            functions: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn type_struct(&self) -> Option<&str> {
        self.gtype
            .as_ref()
            .and_then(|g| g.type_struct.as_deref())
            .or(self.ctype.as_deref())
    }

    pub fn type_func(&self) -> Option<&str> {
        self.gtype.as_ref().and_then(|g| g.get_type.as_deref())
    }
}

/// A boxed type with no C struct definition (`glib:boxed`).
#[derive(Debug, Clone, PartialEq)]
pub struct Boxed {
    pub name: Name,
    pub info: Info,
    pub symbol_prefix: Option<Name>,
    pub gtype: Option<GType>,
    pub functions: Vec<Function>,
}

impl_gir_element!(
    Property, Signal, Field, Alias, Constant, Class, Interface, Record, Union, Boxed
);

#[cfg(test)]
mod tests {
    use super::*;

    fn gtype(type_struct: Option<&str>) -> GType {
        GType {
            type_name: "GtkButton".into(),
            get_type: Some("gtk_button_get_type".into()),
            type_struct: type_struct.map(Into::into),
        }
    }

    fn field(name: &str) -> Field {
        Field {
            name: name.into(),
            info: Info::default(),
            target: FieldTarget::Type(TypeRef::Void),
            readable: true,
            writable: false,
            private: false,
            bits: None,
        }
    }

    #[test]
    fn test_class_type_func_prefers_get_type() {
        let mut class = Class::new("Button");
        class.ctype = Some("GtkButton".into());
        assert_eq!(class.type_func(), Some("GtkButton"));
        class.gtype = Some(gtype(None));
        assert_eq!(class.type_func(), Some("gtk_button_get_type"));
        assert_eq!(class.type_struct(), None);
    }

    #[test]
    fn test_record_type_struct_falls_back_to_ctype() {
        let mut record = Record::new("Rectangle");
        record.ctype = Some("GdkRectangle".into());
        assert_eq!(record.type_struct(), Some("GdkRectangle"));
        assert_eq!(record.type_func(), None);
    }

    #[test]
    fn test_is_final_heuristic() {
        let mut ns = Namespace::new("Gtk", "4.0");
        let mut class_struct = Record::new("ButtonClass");
        class_struct.fields.push(field("parent_class"));
        ns.add_record(class_struct);

        let mut class = Class::new("Button");
        assert!(class.is_final(&ns), "no instance fields");

        class.fields.push(field("parent_instance"));
        assert!(class.is_final(&ns), "no class struct");

        class.gtype = Some(gtype(Some("ButtonClass")));
        assert!(!class.is_final(&ns));

        let mut disguised = Record::new("ButtonClass");
        disguised.disguised = true;
        ns.add_record(disguised);
        assert!(class.is_final(&ns), "disguised class struct");
    }

    #[test]
    fn test_private_struct_detection() {
        let mut record = Record::new("WidgetPrivate");
        assert!(!record.is_private_struct());
        record.disguised = true;
        assert!(record.is_private_struct());
    }
}
