//! A single GIR namespace and its per-kind collections.

use indexmap::IndexMap;

use super::callable::{Callback, Function, FunctionMacro};
use super::enums::{BitField, Enumeration, ErrorDomain};
use super::objects::{Alias, Boxed, Class, Constant, Interface, Record, Union};
use crate::base::Name;

/// What kind of callable a C identifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Function,
    Constructor,
    Method,
    /// A static function scoped to a type.
    TypeFunction,
}

/// Where a C identifier lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRef {
    pub namespace: Name,
    /// Local name of the owning type; `None` for namespace-level functions.
    pub owner: Option<Name>,
    pub name: Name,
    pub kind: SymbolKind,
}

/// A type definition found by name.
#[derive(Debug, Clone, Copy)]
pub enum RealType<'a> {
    Alias(&'a Alias),
    BitField(&'a BitField),
    Enumeration(&'a Enumeration),
    ErrorDomain(&'a ErrorDomain),
    Class(&'a Class),
    Interface(&'a Interface),
    Record(&'a Record),
    Union(&'a Union),
}

impl<'a> RealType<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            RealType::Alias(t) => &t.name,
            RealType::BitField(t) | RealType::Enumeration(t) | RealType::ErrorDomain(t) => {
                &t.name
            }
            RealType::Class(t) => &t.name,
            RealType::Interface(t) => &t.name,
            RealType::Record(t) => &t.name,
            RealType::Union(t) => &t.name,
        }
    }

    pub fn ctype(&self) -> Option<&'a Name> {
        match self {
            RealType::Alias(t) => t.ctype.as_ref(),
            RealType::BitField(t) | RealType::Enumeration(t) | RealType::ErrorDomain(t) => {
                t.ctype.as_ref()
            }
            RealType::Class(t) => t.ctype.as_ref(),
            RealType::Interface(t) => t.ctype.as_ref(),
            RealType::Record(t) => t.ctype.as_ref(),
            RealType::Union(t) => t.ctype.as_ref(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RealType::Alias(_) => "alias",
            RealType::BitField(_) => "bitfield",
            RealType::Enumeration(_) => "enumeration",
            RealType::ErrorDomain(_) => "error domain",
            RealType::Class(_) => "class",
            RealType::Interface(_) => "interface",
            RealType::Record(_) => "record",
            RealType::Union(_) => "union",
        }
    }
}

/// A namespace: every type, function and constant declared in one GIR file.
///
/// Collections are keyed by local name; adding an element with an existing
/// name replaces the previous one.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    pub name: Name,
    pub version: Name,
    pub identifier_prefixes: Vec<Name>,
    pub symbol_prefixes: Vec<Name>,
    pub shared_libraries: Vec<Name>,
    aliases: IndexMap<Name, Alias>,
    bitfields: IndexMap<Name, BitField>,
    boxeds: IndexMap<Name, Boxed>,
    callbacks: IndexMap<Name, Callback>,
    classes: IndexMap<Name, Class>,
    constants: IndexMap<Name, Constant>,
    enumerations: IndexMap<Name, Enumeration>,
    error_domains: IndexMap<Name, ErrorDomain>,
    functions: IndexMap<Name, Function>,
    function_macros: IndexMap<Name, FunctionMacro>,
    interfaces: IndexMap<Name, Interface>,
    records: IndexMap<Name, Record>,
    unions: IndexMap<Name, Union>,
    symbols: IndexMap<Name, SymbolRef>,
}

impl Namespace {
    pub fn new(name: impl Into<Name>, version: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    /// Fully qualified name of a local name in this namespace.
    pub fn qualify(&self, local: &str) -> String {
        format!("{}.{local}", self.name)
    }

    pub fn add_alias(&mut self, alias: Alias) {
        self.aliases.insert(alias.name.clone(), alias);
    }

    pub fn add_bitfield(&mut self, bitfield: BitField) {
        self.bitfields.insert(bitfield.name.clone(), bitfield);
    }

    pub fn add_boxed(&mut self, boxed: Boxed) {
        self.boxeds.insert(boxed.name.clone(), boxed);
    }

    pub fn add_callback(&mut self, callback: Callback) {
        self.callbacks.insert(callback.callable.name.clone(), callback);
    }

    pub fn add_class(&mut self, class: Class) {
        self.classes.insert(class.name.clone(), class);
    }

    pub fn add_constant(&mut self, constant: Constant) {
        self.constants.insert(constant.name.clone(), constant);
    }

    pub fn add_enumeration(&mut self, enumeration: Enumeration) {
        self.enumerations.insert(enumeration.name.clone(), enumeration);
    }

    pub fn add_error_domain(&mut self, domain: ErrorDomain) {
        self.error_domains.insert(domain.name.clone(), domain);
    }

    pub fn add_function(&mut self, function: Function) {
        self.functions.insert(function.name.clone(), function);
    }

    pub fn add_function_macro(&mut self, function: FunctionMacro) {
        self.function_macros.insert(function.name.clone(), function);
    }

    pub fn add_interface(&mut self, interface: Interface) {
        self.interfaces.insert(interface.name.clone(), interface);
    }

    pub fn add_record(&mut self, record: Record) {
        self.records.insert(record.name.clone(), record);
    }

    pub fn add_union(&mut self, union: Union) {
        self.unions.insert(union.name.clone(), union);
    }

    pub fn get_aliases(&self) -> impl Iterator<Item = &Alias> {
        self.aliases.values()
    }

    pub fn get_bitfields(&self) -> impl Iterator<Item = &BitField> {
        self.bitfields.values()
    }

    pub fn get_boxeds(&self) -> impl Iterator<Item = &Boxed> {
        self.boxeds.values()
    }

    pub fn get_callbacks(&self) -> impl Iterator<Item = &Callback> {
        self.callbacks.values()
    }

    pub fn get_classes(&self) -> impl Iterator<Item = &Class> {
        self.classes.values()
    }

    pub fn get_constants(&self) -> impl Iterator<Item = &Constant> {
        self.constants.values()
    }

    pub fn get_enumerations(&self) -> impl Iterator<Item = &Enumeration> {
        self.enumerations.values()
    }

    pub fn get_error_domains(&self) -> impl Iterator<Item = &ErrorDomain> {
        self.error_domains.values()
    }

    pub fn get_functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.values()
    }

    pub fn get_function_macros(&self) -> impl Iterator<Item = &FunctionMacro> {
        self.function_macros.values()
    }

    /// Function macros that do not shadow a real function of the same name.
    pub fn get_effective_function_macros(&self) -> impl Iterator<Item = &FunctionMacro> {
        self.function_macros
            .values()
            .filter(|m| !self.functions.contains_key(&m.name))
    }

    pub fn get_interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.interfaces.values()
    }

    pub fn get_records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Records that are part of the public API: private data structs and
    /// class/interface structs are left out.
    pub fn get_effective_records(&self) -> impl Iterator<Item = &Record> {
        self.records
            .values()
            .filter(|r| !r.is_private_struct() && r.struct_for.is_none())
    }

    pub fn get_unions(&self) -> impl Iterator<Item = &Union> {
        self.unions.values()
    }

    pub fn find_alias(&self, name: &str) -> Option<&Alias> {
        self.aliases.get(name)
    }

    pub fn find_bitfield(&self, name: &str) -> Option<&BitField> {
        self.bitfields.get(name)
    }

    pub fn find_boxed(&self, name: &str) -> Option<&Boxed> {
        self.boxeds.get(name)
    }

    pub fn find_callback(&self, name: &str) -> Option<&Callback> {
        self.callbacks.get(name)
    }

    pub fn find_class(&self, name: &str) -> Option<&Class> {
        self.classes.get(name)
    }

    pub fn find_constant(&self, name: &str) -> Option<&Constant> {
        self.constants.get(name)
    }

    pub fn find_enumeration(&self, name: &str) -> Option<&Enumeration> {
        self.enumerations.get(name)
    }

    pub fn find_error_domain(&self, name: &str) -> Option<&ErrorDomain> {
        self.error_domains.get(name)
    }

    pub fn find_function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn find_function_macro(&self, name: &str) -> Option<&FunctionMacro> {
        self.function_macros.get(name)
    }

    pub fn find_interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.get(name)
    }

    pub fn find_record(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    pub fn find_union(&self, name: &str) -> Option<&Union> {
        self.unions.get(name)
    }

    /// Finds a type definition by local name.
    ///
    /// Searched in order: aliases, bit fields, enumerations, error domains,
    /// classes, interfaces, records, unions.
    pub fn find_real_type(&self, name: &str) -> Option<RealType<'_>> {
        if let Some(t) = self.aliases.get(name) {
            return Some(RealType::Alias(t));
        }
        if let Some(t) = self.bitfields.get(name) {
            return Some(RealType::BitField(t));
        }
        if let Some(t) = self.enumerations.get(name) {
            return Some(RealType::Enumeration(t));
        }
        if let Some(t) = self.error_domains.get(name) {
            return Some(RealType::ErrorDomain(t));
        }
        if let Some(t) = self.classes.get(name) {
            return Some(RealType::Class(t));
        }
        if let Some(t) = self.interfaces.get(name) {
            return Some(RealType::Interface(t));
        }
        if let Some(t) = self.records.get(name) {
            return Some(RealType::Record(t));
        }
        self.unions.get(name).map(RealType::Union)
    }

    /// Looks up a C identifier in the symbol table built by the resolver.
    pub fn find_symbol(&self, identifier: &str) -> Option<&SymbolRef> {
        self.symbols.get(identifier)
    }

    pub fn symbols(&self) -> impl Iterator<Item = (&Name, &SymbolRef)> {
        self.symbols.iter()
    }

    pub(crate) fn set_symbols(&mut self, symbols: IndexMap<Name, SymbolRef>) {
        self.symbols = symbols;
    }

    pub(crate) fn classes_mut(&mut self) -> impl Iterator<Item = &mut Class> {
        self.classes.values_mut()
    }

    pub(crate) fn class_mut(&mut self, name: &str) -> Option<&mut Class> {
        self.classes.get_mut(name)
    }

    pub(crate) fn interface_mut(&mut self, name: &str) -> Option<&mut Interface> {
        self.interfaces.get_mut(name)
    }

    pub(crate) fn interfaces_mut(&mut self) -> impl Iterator<Item = &mut Interface> {
        self.interfaces.values_mut()
    }

    pub(crate) fn function_mut(&mut self, name: &str) -> Option<&mut Function> {
        self.functions.get_mut(name)
    }

    pub(crate) fn functions_mut(&mut self) -> impl Iterator<Item = &mut Function> {
        self.functions.values_mut()
    }

    /// Looks through enumerations, bitfields and error domains.
    pub(crate) fn enumeration_mut(&mut self, name: &str) -> Option<&mut Enumeration> {
        if self.enumerations.contains_key(name) {
            return self.enumerations.get_mut(name);
        }
        if self.bitfields.contains_key(name) {
            return self.bitfields.get_mut(name);
        }
        self.error_domains.get_mut(name)
    }

    pub(crate) fn record_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    pub(crate) fn union_mut(&mut self, name: &str) -> Option<&mut Union> {
        self.unions.get_mut(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnumerationKind, Member};

    #[test]
    fn test_last_write_wins() {
        let mut ns = Namespace::new("Gtk", "4.0");
        let mut first = Class::new("Button");
        first.ctype = Some("GtkButton".into());
        ns.add_class(first);
        ns.add_class(Class::new("Button"));

        assert_eq!(ns.get_classes().count(), 1);
        assert!(ns.find_class("Button").unwrap().ctype.is_none());
    }

    #[test]
    fn test_find_real_type_order() {
        let mut ns = Namespace::new("Gtk", "4.0");
        let mut e = Enumeration::new("Align", EnumerationKind::Enumeration);
        e.add_member(Member::new("fill", 0));
        ns.add_enumeration(e);
        ns.add_record(Record::new("Align"));
        ns.add_class(Class::new("Widget"));

        assert_eq!(ns.find_real_type("Align").unwrap().kind(), "enumeration");
        assert_eq!(ns.find_real_type("Widget").unwrap().kind(), "class");
        assert!(ns.find_real_type("Missing").is_none());
    }

    #[test]
    fn test_effective_records() {
        let mut ns = Namespace::new("Gtk", "4.0");
        ns.add_record(Record::new("Border"));
        let mut private = Record::new("WidgetPrivate");
        private.disguised = true;
        ns.add_record(private);
        let mut class_struct = Record::new("WidgetClass");
        class_struct.struct_for = Some("Widget".into());
        ns.add_record(class_struct);

        let names: Vec<_> = ns.get_effective_records().map(|r| r.name.as_ref()).collect();
        assert_eq!(names, vec!["Border"]);
        assert_eq!(ns.get_records().count(), 3);
    }

    #[test]
    fn test_effective_function_macros() {
        let mut ns = Namespace::new("GLib", "2.0");
        ns.add_function(Function::new("assert"));
        ns.add_function_macro(FunctionMacro::new("assert"));
        ns.add_function_macro(FunctionMacro::new("likely"));

        let names: Vec<_> = ns
            .get_effective_function_macros()
            .map(|m| m.name.as_ref())
            .collect();
        assert_eq!(names, vec!["likely"]);
    }

    #[test]
    fn test_qualify() {
        let ns = Namespace::new("Gtk", "4.0");
        assert_eq!(ns.qualify("Widget"), "Gtk.Widget");
    }
}
