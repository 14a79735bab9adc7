//! Enumerations, bit fields and error domains.

use super::callable::Function;
use super::info::{Info, impl_gir_element};
use super::objects::GType;
use crate::base::Name;

/// A single enumeration or bit-field value.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: Name,
    pub info: Info,
    pub value: i64,
    pub identifier: Option<Name>,
    /// Kebab-case name, from `glib:nick`.
    pub nick: Option<Name>,
}

impl Member {
    pub fn new(name: impl Into<Name>, value: i64) -> Self {
        Self {
            name: name.into(),
            info: Info::default(),
            value,
            identifier: None,
            nick: None,
        }
    }

    /// The nick, or the name in kebab case when no nick was declared.
    pub fn nick_or_name(&self) -> String {
        match &self.nick {
            Some(nick) => nick.to_string(),
            None => self.name.replace('_', "-"),
        }
    }
}

/// Which element an [`Enumeration`] was declared with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumerationKind {
    Enumeration,
    BitField,
    /// An enumeration carrying `glib:error-domain`.
    ErrorDomain { domain: Name },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enumeration {
    pub name: Name,
    pub info: Info,
    pub kind: EnumerationKind,
    pub ctype: Option<Name>,
    pub gtype: Option<GType>,
    pub members: Vec<Member>,
    pub functions: Vec<Function>,
}

pub type BitField = Enumeration;
pub type ErrorDomain = Enumeration;

impl Enumeration {
    pub fn new(name: impl Into<Name>, kind: EnumerationKind) -> Self {
        Self {
            name: name.into(),
            info: Info::default(),
            kind,
            ctype: None,
            gtype: None,
            members: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn add_member(&mut self, member: Member) {
        self.members.push(member);
    }

    pub fn set_members(&mut self, members: Vec<Member>) {
        self.members.extend(members);
    }

    pub fn add_function(&mut self, function: Function) {
        self.functions.push(function);
    }

    pub fn set_functions(&mut self, functions: Vec<Function>) {
        self.functions.extend(functions);
    }

    /// Finds a member by name, nick, or kebab-case name.
    pub fn find_member(&self, key: &str) -> Option<&Member> {
        self.members.iter().find(|m| {
            &*m.name == key || m.nick.as_deref() == Some(key) || m.nick_or_name() == key
        })
    }

    pub fn is_bitfield(&self) -> bool {
        self.kind == EnumerationKind::BitField
    }

    pub fn error_domain(&self) -> Option<&str> {
        match &self.kind {
            EnumerationKind::ErrorDomain { domain } => Some(domain),
            _ => None,
        }
    }
}

impl_gir_element!(Enumeration, Member);
