//! Builds a [`Repository`] from a GIR element tree.
//!
//! The builder walks the children of `<namespace>` once, dispatching on
//! [`Section`]. Type references are routed through [`Builder::lookup_type`]
//! so that every mention of a name shares one [`TypeId`].

use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::error::{GirError, Result};
use super::xml::{XmlElement, XmlNs};
use crate::base::constants::{
    GTYPE_FQTN, fundamental_ctype, glib_alias, is_fundamental, is_fundamental_integral,
};
use crate::base::{Interner, Name, SourcePosition};
use crate::model::{
    Alias, ArrayType, Boxed, Callable, Callback, Class, Constant, Direction, Doc, Enumeration,
    EnumerationKind, Field, FieldTarget, Function, GType, Include, Info, Interface, ListType,
    MapType, Member, Method, Namespace, Parameter, Property, Record, Repository, ReturnValue,
    Scope, Signal, SignalWhen, Transfer, Type, TypeId, TypeRef, TypeTable, Union, VirtualMethod,
};

/// Provides the repositories named by `<include>` elements.
pub trait IncludeLoader {
    /// Makes the repository for `include` available, loading it if needed.
    fn load_include(&mut self, include: &Include) -> Result<()>;

    /// A loaded repository, by namespace name.
    fn repository(&self, namespace: &str) -> Option<Arc<Repository>>;
}

/// An [`IncludeLoader`] that ignores every include.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIncludes;

impl IncludeLoader for NoIncludes {
    fn load_include(&mut self, _include: &Include) -> Result<()> {
        Ok(())
    }

    fn repository(&self, _namespace: &str) -> Option<Arc<Repository>> {
        None
    }
}

/// Builds a repository from the `<repository>` root element.
///
/// Every `<include>` is handed to `loader` before the namespace is built,
/// and the loaded repositories (with their own dependencies) become the
/// repository's includes.
pub fn build_repository(
    root: &XmlElement,
    girfile: Option<PathBuf>,
    loader: &mut dyn IncludeLoader,
) -> Result<Repository> {
    if !root.is(XmlNs::Core, "repository") {
        return Err(GirError::missing_element("repository"));
    }

    let mut names = Interner::new();
    let mut include_declarations = Vec::new();
    let mut c_includes = Vec::new();
    let mut packages = Vec::new();
    for child in &root.children {
        match (child.ns, child.name.as_str()) {
            (XmlNs::Core, "include") => {
                let name = required(child, "name")?;
                let version = child.attr("version").map(|v| names.intern(v));
                include_declarations.push(Include::new(names.intern(name), version));
            }
            (XmlNs::C, "include") => c_includes.push(names.intern(required(child, "name")?)),
            (XmlNs::Core, "package") => packages.push(names.intern(required(child, "name")?)),
            _ => {}
        }
    }

    let ns_node = root
        .child("namespace")
        .ok_or_else(|| GirError::missing_element("namespace"))?;

    let mut includes: IndexMap<Name, Arc<Repository>> = IndexMap::new();
    for include in &include_declarations {
        loader.load_include(include)?;
        let Some(dependency) = loader.repository(&include.name) else {
            continue;
        };
        for (name, repo) in dependency.includes() {
            includes
                .entry(name.clone())
                .or_insert_with(|| Arc::clone(repo));
        }
        includes.insert(include.name.clone(), dependency);
    }

    let mut types = TypeTable::new();
    let namespace = {
        let mut builder = Builder {
            namespace: names.intern(required(ns_node, "name")?),
            types: &mut types,
            names: &mut names,
        };
        builder.build_namespace(ns_node)?
    };

    debug!(
        "Built namespace {}-{} ({} types referenced, {} includes)",
        namespace.name,
        namespace.version,
        types.len(),
        includes.len()
    );

    Ok(Repository {
        namespace,
        types,
        include_declarations,
        c_includes,
        packages,
        girfile,
        includes,
        external_implementations: IndexMap::new(),
    })
}

/// Top-level children of `<namespace>` the builder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Section {
    Alias,
    BitField,
    Boxed,
    Callback,
    Class,
    Constant,
    Enumeration,
    Function,
    FunctionInline,
    FunctionMacro,
    Interface,
    Record,
    Union,
}

impl Section {
    fn of(node: &XmlElement) -> Option<Self> {
        let section = match (node.ns, node.name.as_str()) {
            (XmlNs::Core, "alias") => Section::Alias,
            (XmlNs::Core, "bitfield") => Section::BitField,
            (XmlNs::GLib, "boxed") => Section::Boxed,
            (XmlNs::Core, "callback") => Section::Callback,
            (XmlNs::Core, "class") => Section::Class,
            (XmlNs::Core, "constant") => Section::Constant,
            (XmlNs::Core, "enumeration") => Section::Enumeration,
            (XmlNs::Core, "function") => Section::Function,
            (XmlNs::Core, "function-inline") => Section::FunctionInline,
            (XmlNs::Core, "function-macro") => Section::FunctionMacro,
            (XmlNs::Core, "interface") => Section::Interface,
            (XmlNs::Core, "record") => Section::Record,
            (XmlNs::Core, "union") => Section::Union,
            _ => return None,
        };
        Some(section)
    }
}

struct Builder<'a> {
    /// Name of the namespace being built; unqualified type names belong to it.
    namespace: Name,
    types: &'a mut TypeTable,
    names: &'a mut Interner,
}

impl Builder<'_> {
    fn build_namespace(&mut self, node: &XmlElement) -> Result<Namespace> {
        let version = required(node, "version")?;
        let mut ns = Namespace::new(self.namespace.clone(), self.name(version));
        ns.identifier_prefixes = self.list(
            node.c_attr("identifier-prefixes")
                .or_else(|| node.c_attr("prefix")),
        );
        if ns.identifier_prefixes.is_empty() {
            ns.identifier_prefixes.push(ns.name.clone());
        }
        ns.symbol_prefixes = self.list(
            node.c_attr("symbol-prefixes")
                .or_else(|| node.c_attr("symbol-prefix")),
        );
        if ns.symbol_prefixes.is_empty() {
            let prefix = self.name(&ns.name.to_lowercase());
            ns.symbol_prefixes.push(prefix);
        }
        ns.shared_libraries = self.list(node.attr("shared-library"));

        for child in &node.children {
            let Some(section) = Section::of(child) else {
                trace!("Skipping <{}> in namespace {}", child.name, ns.name);
                continue;
            };
            match section {
                Section::Alias => self.parse_alias(child, &mut ns)?,
                Section::BitField => self.parse_bitfield(child, &mut ns)?,
                Section::Boxed => self.parse_boxed(child, &mut ns)?,
                Section::Callback => {
                    let callback = self.parse_callback(child)?;
                    ns.add_callback(callback);
                }
                Section::Class => self.parse_class(child, &mut ns)?,
                Section::Constant => self.parse_constant(child, &mut ns)?,
                Section::Enumeration => self.parse_enumeration(child, &mut ns)?,
                Section::Function => ns.add_function(self.parse_function(child, false)?),
                Section::FunctionInline => ns.add_function(self.parse_function(child, true)?),
                Section::FunctionMacro => ns.add_function_macro(self.parse_function_macro(child)?),
                Section::Interface => self.parse_interface(child, &mut ns)?,
                Section::Record => self.parse_record(child, &mut ns)?,
                Section::Union => self.parse_union(child, &mut ns)?,
            }
        }
        Ok(ns)
    }

    // ---- helpers ----

    fn name(&mut self, s: &str) -> Name {
        self.names.intern(s)
    }

    fn opt(&mut self, s: Option<&str>) -> Option<Name> {
        s.map(|s| self.names.intern(s))
    }

    fn list(&mut self, s: Option<&str>) -> Vec<Name> {
        s.map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(|p| self.names.intern(p))
                .collect()
        })
        .unwrap_or_default()
    }

    fn gtype(&mut self, node: &XmlElement) -> Option<GType> {
        let type_name = node.glib_attr("type-name")?;
        Some(GType {
            type_name: self.name(type_name),
            get_type: self.opt(node.glib_attr("get-type")),
            type_struct: self.opt(node.glib_attr("type-struct")),
        })
    }

    // ---- metadata ----

    fn parse_info(&mut self, node: &XmlElement) -> Result<Info> {
        let mut info = Info {
            introspectable: node.flag("introspectable", true),
            version: self.opt(node.attr("version")),
            stability: self.opt(node.attr("stability")),
            ..Info::default()
        };
        if let Some(doc) = node.child("doc") {
            info.doc = Some(self.parse_doc(node, doc)?);
        }
        if let Some(pos) = node.child("source-position") {
            info.source_position = self.parse_position(pos)?;
        }
        for attribute in node.children_named("attribute") {
            if let Some(name) = attribute.attr("name") {
                let name = self.name(name);
                let value = self.opt(attribute.attr("value"));
                info.add_annotation(name, value);
            }
        }
        if node.flag("deprecated", false) {
            let message = node.child("doc-deprecated").map(|d| d.text().to_string());
            let since = self.opt(node.attr("deprecated-version"));
            info.set_deprecated(message, since);
        }
        Ok(info)
    }

    fn parse_doc(&mut self, owner: &XmlElement, node: &XmlElement) -> Result<Doc> {
        let mut doc = Doc::new(node.text());
        if let Some(location) = self.parse_position(node)? {
            doc = doc.with_location(location);
        }
        doc.version = owner
            .child("doc-version")
            .map(|v| self.name(v.text().trim()));
        doc.stability = owner
            .child("doc-stability")
            .map(|s| self.name(s.text().trim()));
        Ok(doc)
    }

    fn parse_position(&mut self, node: &XmlElement) -> Result<Option<SourcePosition>> {
        let (Some(filename), Some(line)) = (node.attr("filename"), node.attr("line")) else {
            return Ok(None);
        };
        let line = line.parse::<u32>().map_err(|e| {
            GirError::invalid("line number", format!("{line:?} in {filename}: {e}"))
        })?;
        Ok(Some(SourcePosition::new(self.name(filename), line)))
    }

    // ---- types ----

    /// Returns the shared entry for a type name.
    fn lookup_type(&mut self, name: &str, ctype: Option<&str>) -> TypeId {
        let (fqtn, fundamental) = if is_fundamental(name) {
            (self.name(glib_alias(name).unwrap_or(name)), true)
        } else if name == "GType" {
            (self.name(GTYPE_FQTN), true)
        } else if name.contains('.') {
            (self.name(name), false)
        } else {
            let qualified = format!("{}.{name}", self.namespace);
            (self.name(&qualified), false)
        };

        let ctype = match ctype {
            Some(c) => Some(self.name(c)),
            None => fundamental_ctype(&fqtn)
                .or_else(|| is_fundamental(&fqtn).then_some(&*fqtn))
                .map(|c| self.names.intern(c)),
        };
        self.types.intern(fqtn, ctype, fundamental)
    }

    /// Decodes the `<array>`, `<type>` or `<varargs>` child of `node`.
    fn parse_type(&mut self, node: &XmlElement) -> Result<TypeRef> {
        if let Some(array) = node.child("array") {
            return self.parse_array(array);
        }
        if let Some(ty) = node.child("type") {
            return Ok(self.parse_type_element(ty));
        }
        if node.child("varargs").is_some() {
            return Ok(TypeRef::VarArgs);
        }
        Ok(TypeRef::Void)
    }

    fn parse_type_element(&mut self, node: &XmlElement) -> TypeRef {
        let tname = node.attr("name");
        let ttype = node.c_attr("type");
        match (tname, ttype) {
            (None, None) => {
                trace!("Empty type annotation");
                TypeRef::Void
            }
            (None, Some(ctype)) => {
                debug!("Unnamed type {ctype}");
                let ty = Type::new(self.name(&ctype.replace('*', "")), Some(self.name(ctype)));
                TypeRef::Named(self.types.detached(ty))
            }
            (Some("none"), _) => TypeRef::Void,
            (Some(name @ ("GLib.List" | "GLib.SList")), _) => match node.child("type") {
                Some(element) => TypeRef::List(Box::new(ListType {
                    name: self.name(name),
                    ctype: self.opt(ttype),
                    element: self.parse_element_type(element),
                })),
                None => TypeRef::Named(self.lookup_type(name, ttype)),
            },
            (Some(name @ "GLib.HashTable"), _) => {
                let params: Vec<_> = node.children_named("type").collect();
                match params.as_slice() {
                    [key, value] => TypeRef::Map(Box::new(MapType {
                        name: self.name(name),
                        ctype: self.opt(ttype),
                        key: self.parse_element_type(key),
                        value: self.parse_element_type(value),
                    })),
                    _ => TypeRef::Named(self.lookup_type(name, ttype)),
                }
            }
            (Some(name), Some("gpointer")) if is_fundamental_integral(name) => {
                // Pointer to a fundamental, as used by out arguments of signals
                TypeRef::Named(self.lookup_type(name, Some(&format!("{name}*"))))
            }
            (Some(name), Some("gpointer")) if name != "gpointer" => {
                TypeRef::Named(self.lookup_type(name, None))
            }
            (Some(name), ctype) => TypeRef::Named(self.lookup_type(name, ctype)),
        }
    }

    /// Element type of a container; an unnamed element is a `gpointer`.
    fn parse_element_type(&mut self, node: &XmlElement) -> TypeRef {
        match node.attr("name") {
            Some(_) => self.parse_type_element(node),
            None => TypeRef::Named(self.lookup_type("gpointer", None)),
        }
    }

    fn parse_array(&mut self, node: &XmlElement) -> Result<TypeRef> {
        let name = node.attr("name");
        let fixed_size = parse_index(node, "fixed-size")?;
        let length = parse_index(node, "length")?;
        let zero_terminated = match node.attr("zero-terminated") {
            Some(value) => value == "1",
            None => name.is_none() && fixed_size.is_none() && length.is_none(),
        };
        let element = self.parse_type(node)?;
        Ok(TypeRef::Array(Box::new(ArrayType {
            name: self.opt(name),
            ctype: self.opt(node.c_attr("type")),
            element,
            zero_terminated,
            fixed_size,
            length,
        })))
    }

    // ---- callables ----

    fn parse_parameter(&mut self, node: &XmlElement) -> Result<Parameter> {
        let name = required(node, "name")?;
        let target = self.parse_type(node)?;
        let mut param = Parameter::new(self.name(name), target);
        param.info = self.parse_info(node)?;
        param.direction = parse_enum(node, "direction", Direction::from_attr)?.unwrap_or_default();
        param.transfer =
            parse_enum(node, "transfer-ownership", Transfer::from_attr)?.unwrap_or_default();
        param.caller_allocates = node.flag("caller-allocates", true);
        param.optional = node.flag("optional", false);
        param.nullable = node.flag("nullable", false);
        param.closure = parse_index(node, "closure")?;
        param.destroy = parse_index(node, "destroy")?;
        param.scope = parse_enum(node, "scope", Scope::from_attr)?;
        Ok(param)
    }

    fn parse_parameters(&mut self, node: &XmlElement) -> Result<Vec<Parameter>> {
        let Some(params) = node.child("parameters") else {
            return Ok(Vec::new());
        };
        params
            .children_named("parameter")
            .map(|p| self.parse_parameter(p))
            .collect()
    }

    fn parse_instance_parameter(&mut self, node: &XmlElement) -> Result<Option<Parameter>> {
        node.child("parameters")
            .and_then(|params| params.child("instance-parameter"))
            .map(|p| self.parse_parameter(p))
            .transpose()
    }

    fn parse_return_value(&mut self, node: &XmlElement) -> Result<ReturnValue> {
        let Some(node) = node.child("return-value") else {
            return Ok(ReturnValue::default());
        };
        Ok(ReturnValue {
            info: self.parse_info(node)?,
            transfer: parse_enum(node, "transfer-ownership", Transfer::from_attr)?
                .unwrap_or_default(),
            nullable: node.flag("nullable", false),
            closure: parse_index(node, "closure")?,
            destroy: parse_index(node, "destroy")?,
            scope: parse_enum(node, "scope", Scope::from_attr)?,
            target: self.parse_type(node)?,
        })
    }

    /// Attributes common to every callable element.
    fn parse_callable(&mut self, node: &XmlElement) -> Result<Callable> {
        let name = required(node, "name")?;
        let mut callable = Callable::new(self.name(name));
        callable.info = self.parse_info(node)?;
        callable.identifier = self.opt(node.c_attr("identifier"));
        callable.throws = node.flag("throws", false);
        callable.shadows = self.opt(node.attr("shadows"));
        callable.shadowed_by = self.opt(node.attr("shadowed-by"));
        callable.moved_to = self.opt(node.attr("moved-to"));
        callable.async_func = self.opt(node.glib_attr("async-func"));
        callable.sync_func = self.opt(node.glib_attr("sync-func"));
        callable.finish_func = self.opt(node.glib_attr("finish-func"));
        callable.set_return_value(self.parse_return_value(node)?);
        callable.set_parameters(self.parse_parameters(node)?);
        Ok(callable)
    }

    fn parse_function(&mut self, node: &XmlElement, inline: bool) -> Result<Function> {
        let mut function = self.parse_callable(node)?;
        function.inline = inline;
        Ok(function)
    }

    fn parse_function_macro(&mut self, node: &XmlElement) -> Result<Function> {
        let mut function = self.parse_callable(node)?;
        function.return_value = ReturnValue::default();
        Ok(function)
    }

    fn parse_method(&mut self, node: &XmlElement, inline: bool) -> Result<Method> {
        let mut callable = self.parse_callable(node)?;
        callable.inline = inline;
        let instance_param = self.parse_instance_parameter(node)?.ok_or_else(|| {
            GirError::missing_element(format!("instance-parameter of method {}", callable.name))
        })?;
        Ok(Method {
            callable,
            instance_param,
            set_property: self.opt(node.glib_attr("set-property")),
            get_property: self.opt(node.glib_attr("get-property")),
        })
    }

    fn parse_virtual_method(&mut self, node: &XmlElement) -> Result<VirtualMethod> {
        let callable = self.parse_callable(node)?;
        Ok(VirtualMethod {
            callable,
            instance_param: self.parse_instance_parameter(node)?,
            invoker: self.opt(node.attr("invoker")),
            is_static: node.flag("static", false),
        })
    }

    fn parse_callback(&mut self, node: &XmlElement) -> Result<Callback> {
        Ok(Callback {
            callable: self.parse_callable(node)?,
            ctype: self.opt(node.c_attr("type")),
        })
    }

    fn parse_functions(&mut self, node: &XmlElement, tag: &str) -> Result<Vec<Function>> {
        node.children_named(tag)
            .map(|child| self.parse_function(child, false))
            .collect()
    }

    fn parse_methods(&mut self, node: &XmlElement) -> Result<Vec<Method>> {
        let mut methods = Vec::new();
        for child in node.children_named("method") {
            methods.push(self.parse_method(child, false)?);
        }
        for child in node.children_named("method-inline") {
            methods.push(self.parse_method(child, true)?);
        }
        Ok(methods)
    }

    fn parse_virtual_methods(&mut self, node: &XmlElement) -> Result<Vec<VirtualMethod>> {
        node.children_named("virtual-method")
            .map(|child| self.parse_virtual_method(child))
            .collect()
    }

    // ---- members of compound types ----

    fn parse_property(&mut self, node: &XmlElement) -> Result<Property> {
        let name = required(node, "name")?;
        Ok(Property {
            name: self.name(name),
            info: self.parse_info(node)?,
            target: self.parse_type(node)?,
            transfer: parse_enum(node, "transfer-ownership", Transfer::from_attr)?
                .unwrap_or_default(),
            readable: node.flag("readable", true),
            writable: node.flag("writable", false),
            construct: node.flag("construct", false),
            construct_only: node.flag("construct-only", false),
            setter: self.opt(node.attr("setter")),
            getter: self.opt(node.attr("getter")),
            default_value: self.opt(node.attr("default-value")),
        })
    }

    fn parse_properties(&mut self, node: &XmlElement) -> Result<Vec<Property>> {
        node.children_named("property")
            .map(|child| self.parse_property(child))
            .collect()
    }

    fn parse_signal(&mut self, node: &XmlElement) -> Result<Signal> {
        let name = required(node, "name")?;
        Ok(Signal {
            name: self.name(name),
            info: self.parse_info(node)?,
            parameters: self.parse_parameters(node)?,
            return_value: self.parse_return_value(node)?,
            when: parse_enum(node, "when", SignalWhen::from_attr)?,
            detailed: node.flag("detailed", false),
            action: node.flag("action", false),
            no_hooks: node.flag("no-hooks", false),
            no_recurse: node.flag("no-recurse", false),
        })
    }

    fn parse_signals(&mut self, node: &XmlElement) -> Result<Vec<Signal>> {
        node.glib_children("signal")
            .map(|child| self.parse_signal(child))
            .collect()
    }

    fn parse_field(&mut self, node: &XmlElement) -> Result<Field> {
        let name = required(node, "name")?;
        let target = match node.child("callback") {
            Some(callback) => FieldTarget::Callback(Box::new(self.parse_callback(callback)?)),
            None => FieldTarget::Type(self.parse_type(node)?),
        };
        let bits = match node.attr("bits") {
            Some(bits) => Some(bits.parse::<u32>().map_err(|e| {
                GirError::invalid("bits", format!("{bits:?} on field {name}: {e}"))
            })?),
            None => None,
        };
        Ok(Field {
            name: self.name(name),
            info: self.parse_info(node)?,
            target,
            readable: node.flag("readable", true),
            writable: node.flag("writable", false),
            private: node.flag("private", false),
            bits: bits.filter(|&b| b > 0),
        })
    }

    fn parse_fields(&mut self, node: &XmlElement) -> Result<Vec<Field>> {
        node.children_named("field")
            .map(|child| self.parse_field(child))
            .collect()
    }

    fn parse_member(&mut self, node: &XmlElement) -> Result<Member> {
        let name = required(node, "name")?;
        let raw = required(node, "value")?;
        let value = raw.parse::<i64>().map_err(|e| {
            GirError::invalid("member value", format!("{raw:?} for member {name}: {e}"))
        })?;
        let mut member = Member::new(self.name(name), value);
        member.info = self.parse_info(node)?;
        member.identifier = self.opt(node.c_attr("identifier"));
        member.nick = self.opt(node.glib_attr("nick"));
        Ok(member)
    }

    // ---- top-level sections ----

    fn parse_alias(&mut self, node: &XmlElement, ns: &mut Namespace) -> Result<()> {
        let name = required(node, "name")?;
        if node.child("type").is_none() && node.child("array").is_none() {
            return Err(GirError::missing_element(format!("type of alias {name}")));
        }
        ns.add_alias(Alias {
            name: self.name(name),
            info: self.parse_info(node)?,
            ctype: self.opt(node.c_attr("type")),
            target: self.parse_type(node)?,
        });
        Ok(())
    }

    fn parse_constant(&mut self, node: &XmlElement, ns: &mut Namespace) -> Result<()> {
        let name = required(node, "name")?;
        ns.add_constant(Constant {
            name: self.name(name),
            info: self.parse_info(node)?,
            ctype: self.opt(node.c_attr("type")),
            target: self.parse_type(node)?,
            value: self.opt(node.attr("value")),
        });
        Ok(())
    }

    fn parse_enum_common(
        &mut self,
        node: &XmlElement,
        kind: EnumerationKind,
    ) -> Result<Option<Enumeration>> {
        let name = required(node, "name")?;
        if node.children_named("member").next().is_none() {
            debug!("Skipping {name}: no members");
            return Ok(None);
        }
        let mut enumeration = Enumeration::new(self.name(name), kind);
        enumeration.info = self.parse_info(node)?;
        enumeration.ctype = self.opt(node.c_attr("type"));
        enumeration.gtype = self.gtype(node);
        for child in node.children_named("member") {
            let member = self.parse_member(child)?;
            enumeration.add_member(member);
        }
        enumeration.set_functions(self.parse_functions(node, "function")?);
        Ok(Some(enumeration))
    }

    fn parse_enumeration(&mut self, node: &XmlElement, ns: &mut Namespace) -> Result<()> {
        match node.glib_attr("error-domain") {
            Some(domain) => {
                let kind = EnumerationKind::ErrorDomain {
                    domain: self.name(domain),
                };
                if let Some(domain) = self.parse_enum_common(node, kind)? {
                    ns.add_error_domain(domain);
                }
            }
            None => {
                if let Some(e) = self.parse_enum_common(node, EnumerationKind::Enumeration)? {
                    ns.add_enumeration(e);
                }
            }
        }
        Ok(())
    }

    fn parse_bitfield(&mut self, node: &XmlElement, ns: &mut Namespace) -> Result<()> {
        if let Some(bitfield) = self.parse_enum_common(node, EnumerationKind::BitField)? {
            ns.add_bitfield(bitfield);
        }
        Ok(())
    }

    fn parse_boxed(&mut self, node: &XmlElement, ns: &mut Namespace) -> Result<()> {
        let name = node
            .glib_attr("name")
            .ok_or_else(|| GirError::missing_attribute("glib:boxed", "glib:name"))?;
        ns.add_boxed(Boxed {
            name: self.name(name),
            info: self.parse_info(node)?,
            symbol_prefix: self.opt(node.c_attr("symbol-prefix")),
            gtype: self.gtype(node),
            functions: self.parse_functions(node, "function")?,
        });
        Ok(())
    }

    fn parse_class(&mut self, node: &XmlElement, ns: &mut Namespace) -> Result<()> {
        let name = required(node, "name")?;
        let mut class = Class::new(self.name(name));
        class.info = self.parse_info(node)?;
        class.ctype = self.opt(node.c_attr("type"));
        class.symbol_prefix = self.opt(node.c_attr("symbol-prefix"));
        class.gtype = self.gtype(node);
        class.parent = node.attr("parent").map(|p| self.lookup_type(p, None));
        class.is_abstract = node.flag("abstract", false);
        class.fundamental = node.glib_flag("fundamental", false);
        class.ref_func = self.opt(node.glib_attr("ref-func"));
        class.unref_func = self.opt(node.glib_attr("unref-func"));
        for implements in node.children_named("implements") {
            let iface = required(implements, "name")?;
            class.implements.push(self.lookup_type(iface, None));
        }
        class.fields = self.parse_fields(node)?;
        class.constructors = self.parse_functions(node, "constructor")?;
        class.methods = self.parse_methods(node)?;
        class.virtual_methods = self.parse_virtual_methods(node)?;
        class.functions = self.parse_functions(node, "function")?;
        class.properties = self.parse_properties(node)?;
        class.signals = self.parse_signals(node)?;
        ns.add_class(class);
        Ok(())
    }

    fn parse_interface(&mut self, node: &XmlElement, ns: &mut Namespace) -> Result<()> {
        let name = required(node, "name")?;
        let mut iface = Interface::new(self.name(name));
        iface.info = self.parse_info(node)?;
        iface.ctype = self.opt(node.c_attr("type"));
        iface.symbol_prefix = self.opt(node.c_attr("symbol-prefix"));
        iface.gtype = self.gtype(node);
        if let Some(prerequisite) = node.child("prerequisite") {
            let prerequisite = required(prerequisite, "name")?;
            iface.prerequisite = Some(self.lookup_type(prerequisite, None));
        }
        iface.fields = self.parse_fields(node)?;
        iface.methods = self.parse_methods(node)?;
        iface.virtual_methods = self.parse_virtual_methods(node)?;
        iface.functions = self.parse_functions(node, "function")?;
        iface.properties = self.parse_properties(node)?;
        iface.signals = self.parse_signals(node)?;
        ns.add_interface(iface);
        Ok(())
    }

    fn parse_record(&mut self, node: &XmlElement, ns: &mut Namespace) -> Result<()> {
        let name = required(node, "name")?;
        let mut record = Record::new(self.name(name));
        record.info = self.parse_info(node)?;
        record.ctype = self.opt(node.c_attr("type"));
        record.symbol_prefix = self.opt(node.c_attr("symbol-prefix"));
        record.gtype = self.gtype(node);
        record.struct_for = self.opt(node.glib_attr("is-gtype-struct-for"));
        record.disguised = node.flag("disguised", false);
        record.fields = self.parse_fields(node)?;
        record.constructors = self.parse_functions(node, "constructor")?;
        record.methods = self.parse_methods(node)?;
        record.functions = self.parse_functions(node, "function")?;
        ns.add_record(record);
        Ok(())
    }

    fn parse_union(&mut self, node: &XmlElement, ns: &mut Namespace) -> Result<()> {
        let name = required(node, "name")?;
        let mut union = Union::new(self.name(name));
        union.info = self.parse_info(node)?;
        union.ctype = self.opt(node.c_attr("type"));
        union.symbol_prefix = self.opt(node.c_attr("symbol-prefix"));
        union.gtype = self.gtype(node);
        union.fields = self.parse_fields(node)?;
        union.constructors = self.parse_functions(node, "constructor")?;
        union.methods = self.parse_methods(node)?;
        union.functions = self.parse_functions(node, "function")?;
        ns.add_union(union);
        Ok(())
    }
}

fn required<'e>(node: &'e XmlElement, attr: &str) -> Result<&'e str> {
    node.attr(attr)
        .ok_or_else(|| GirError::missing_attribute(&node.name, attr))
}

fn parse_index(node: &XmlElement, attr: &str) -> Result<Option<usize>> {
    node.attr(attr)
        .map(|raw| {
            raw.parse::<usize>().map_err(|e| {
                GirError::invalid("index", format!("{attr}={raw:?} on <{}>: {e}", node.name))
            })
        })
        .transpose()
}

fn parse_enum<T>(
    node: &XmlElement,
    attr: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>> {
    node.attr(attr)
        .map(|raw| {
            parse(raw).ok_or_else(|| {
                GirError::invalid(
                    "attribute value",
                    format!("{attr}={raw:?} on <{}>", node.name),
                )
            })
        })
        .transpose()
}
