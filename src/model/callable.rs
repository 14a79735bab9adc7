//! Callables: functions, macros, methods, virtual methods and callbacks.

use std::fmt;

use super::info::{Info, impl_gir_element};
use super::namespace::SymbolRef;
use super::types::TypeRef;
use crate::base::Name;

macro_rules! attr_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            /// Parses the attribute value used in GIR documents.
            pub fn from_attr(value: &str) -> Option<Self> {
                match value {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

attr_enum!(
    /// Direction of a parameter.
    Direction { In => "in", Out => "out", InOut => "inout" }
);

attr_enum!(
    /// Ownership transfer of a value between caller and callee.
    Transfer { None => "none", Container => "container", Full => "full", Floating => "floating" }
);

attr_enum!(
    /// Lifetime of a callback argument.
    Scope { Call => "call", Notified => "notified", Async => "async", Forever => "forever" }
);

impl Default for Direction {
    fn default() -> Self {
        Direction::In
    }
}

impl Default for Transfer {
    fn default() -> Self {
        Transfer::None
    }
}

/// A named argument of a callable.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Name,
    pub info: Info,
    pub direction: Direction,
    pub transfer: Transfer,
    pub caller_allocates: bool,
    pub optional: bool,
    pub nullable: bool,
    /// Index of the user-data parameter for a callback.
    pub closure: Option<usize>,
    /// Index of the destroy-notify parameter for a callback.
    pub destroy: Option<usize>,
    pub scope: Option<Scope>,
    pub target: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<Name>, target: TypeRef) -> Self {
        Self {
            name: name.into(),
            info: Info::default(),
            direction: Direction::default(),
            transfer: Transfer::default(),
            caller_allocates: true,
            optional: false,
            nullable: false,
            closure: None,
            destroy: None,
            scope: None,
            target,
        }
    }

    pub fn is_varargs(&self) -> bool {
        matches!(self.target, TypeRef::VarArgs)
    }
}

/// The value returned by a callable. `void` unless declared otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnValue {
    pub info: Info,
    pub transfer: Transfer,
    pub nullable: bool,
    pub closure: Option<usize>,
    pub destroy: Option<usize>,
    pub scope: Option<Scope>,
    pub target: TypeRef,
}

impl Default for ReturnValue {
    fn default() -> Self {
        Self {
            info: Info::default(),
            transfer: Transfer::default(),
            nullable: false,
            closure: None,
            destroy: None,
            scope: None,
            target: TypeRef::Void,
        }
    }
}

impl ReturnValue {
    pub fn is_void(&self) -> bool {
        self.target.is_void()
    }
}

/// Data shared by every callable.
///
/// Plain functions and function macros are represented by this type
/// directly; the other variants wrap it.
#[derive(Debug, Clone, PartialEq)]
pub struct Callable {
    pub name: Name,
    pub info: Info,
    /// The C symbol, from `c:identifier`.
    pub identifier: Option<Name>,
    pub parameters: Vec<Parameter>,
    pub return_value: ReturnValue,
    pub throws: bool,
    /// Declared with `function-inline` / `method-inline`.
    pub inline: bool,
    pub shadows: Option<Name>,
    pub shadowed_by: Option<Name>,
    pub moved_to: Option<Name>,
    /// The symbol `moved_to` names, once resolved.
    pub moved_to_target: Option<SymbolRef>,
    /// Name of the callable that was moved here, once resolved.
    pub moved_from: Option<Name>,
    pub async_func: Option<Name>,
    pub sync_func: Option<Name>,
    pub finish_func: Option<Name>,
}

pub type Function = Callable;
pub type FunctionMacro = Callable;

impl Callable {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            info: Info::default(),
            identifier: None,
            parameters: Vec::new(),
            return_value: ReturnValue::default(),
            throws: false,
            inline: false,
            shadows: None,
            shadowed_by: None,
            moved_to: None,
            moved_to_target: None,
            moved_from: None,
            async_func: None,
            sync_func: None,
            finish_func: None,
        }
    }

    pub fn set_parameters(&mut self, parameters: Vec<Parameter>) {
        self.parameters.extend(parameters);
    }

    pub fn set_return_value(&mut self, return_value: ReturnValue) {
        self.return_value = return_value;
    }

    pub fn find_parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| &*p.name == name)
    }

    /// The identifier if present, the name otherwise.
    pub fn symbol(&self) -> &str {
        self.identifier.as_deref().unwrap_or(&self.name)
    }
}

/// An instance method.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub callable: Callable,
    pub instance_param: Parameter,
    /// Property this method sets, from `glib:set-property`.
    pub set_property: Option<Name>,
    /// Property this method gets, from `glib:get-property`.
    pub get_property: Option<Name>,
}

/// A class or interface virtual function.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualMethod {
    pub callable: Callable,
    pub instance_param: Option<Parameter>,
    /// The method that invokes this virtual function.
    pub invoker: Option<Name>,
    pub is_static: bool,
}

/// A function pointer type.
#[derive(Debug, Clone, PartialEq)]
pub struct Callback {
    pub callable: Callable,
    pub ctype: Option<Name>,
}

/// Gives uniform access to the [`Callable`] inside each variant.
pub trait AsCallable {
    fn callable(&self) -> &Callable;
    fn callable_mut(&mut self) -> &mut Callable;
}

impl AsCallable for Callable {
    fn callable(&self) -> &Callable {
        self
    }

    fn callable_mut(&mut self) -> &mut Callable {
        self
    }
}

macro_rules! wraps_callable {
    ($($ty:ty),*) => {
        $(
            impl AsCallable for $ty {
                fn callable(&self) -> &Callable {
                    &self.callable
                }

                fn callable_mut(&mut self) -> &mut Callable {
                    &mut self.callable
                }
            }

            impl super::info::GirElement for $ty {
                fn name(&self) -> &str {
                    &self.callable.name
                }

                fn info(&self) -> &Info {
                    &self.callable.info
                }

                fn info_mut(&mut self) -> &mut Info {
                    &mut self.callable.info
                }
            }
        )*
    };
}

wraps_callable!(Method, VirtualMethod, Callback);
impl_gir_element!(Callable, Parameter);
