//! The GIR abstract syntax tree.
//!
//! A [`Repository`] owns one [`Namespace`] plus a [`TypeTable`] holding
//! every type referenced from that namespace. Elements refer to types by
//! [`TypeId`]; cross-namespace data computed by the resolver (ancestors,
//! implementations) is stored as [`Type`] values.

mod callable;
mod enums;
mod info;
mod namespace;
mod objects;
mod repository;
mod types;

pub use callable::{
    AsCallable, Callable, Callback, Direction, Function, FunctionMacro, Method, Parameter,
    ReturnValue, Scope, Transfer, VirtualMethod,
};
pub use enums::{BitField, Enumeration, EnumerationKind, ErrorDomain, Member};
pub use info::{Annotation, DeprecatedSince, Deprecation, Doc, GirElement, Info};
pub use namespace::{Namespace, RealType, SymbolKind, SymbolRef};
pub use objects::{
    Alias, Boxed, Class, Constant, Field, FieldTarget, GType, Interface, Property, Record, Signal,
    SignalWhen, Union,
};
pub use repository::{Include, Repository};
pub use types::{ArrayType, ListType, MapType, Type, TypeId, TypeRef, TypeTable};
