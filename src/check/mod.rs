//! # Documentation coverage
//!
//! Walks a resolved namespace and reports every symbol, parameter and
//! non-void return value that has no `<doc>`.
//!
//! Sections are independent, so they are checked in parallel; findings are
//! returned grouped by section name, each section in symbol order.

use std::fmt;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::model::{
    AsCallable, Callable, Enumeration, GirElement, Namespace, Parameter, Repository, ReturnValue,
    Signal,
};

/// What is missing documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingKind {
    Symbol,
    Parameter,
    ReturnValue,
}

/// One undocumented item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub section: Section,
    pub kind: FindingKind,
    /// Dotted path of the symbol, starting with the namespace name.
    pub symbol: String,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A group of top-level symbols checked together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Aliases,
    Bitfields,
    Callbacks,
    Classes,
    Constants,
    Domains,
    Enums,
    Functions,
    FunctionMacros,
    Interfaces,
    Structs,
    Unions,
}

impl Section {
    pub const ALL: &'static [Section] = &[
        Section::Aliases,
        Section::Bitfields,
        Section::Callbacks,
        Section::Classes,
        Section::Constants,
        Section::Domains,
        Section::Enums,
        Section::Functions,
        Section::FunctionMacros,
        Section::Interfaces,
        Section::Structs,
        Section::Unions,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Aliases => "aliases",
            Section::Bitfields => "bitfields",
            Section::Callbacks => "callbacks",
            Section::Classes => "classes",
            Section::Constants => "constants",
            Section::Domains => "domains",
            Section::Enums => "enums",
            Section::Functions => "functions",
            Section::FunctionMacros => "function_macros",
            Section::Interfaces => "interfaces",
            Section::Structs => "structs",
            Section::Unions => "unions",
        }
    }

    fn check(self, ns: &Namespace) -> Vec<Finding> {
        debug!("Checking symbols for section {}", self.name());
        let mut checker = Checker {
            section: self,
            namespace: &ns.name,
            findings: Vec::new(),
        };
        match self {
            Section::Aliases => {
                for alias in sorted(ns.get_aliases()) {
                    checker.element(&[], alias);
                }
            }
            Section::Bitfields => {
                for bitfield in sorted(ns.get_bitfields()) {
                    checker.enumeration(bitfield);
                }
            }
            Section::Callbacks => {
                for callback in sorted(ns.get_callbacks()) {
                    checker.callable(&[], callback.callable());
                }
            }
            Section::Classes => {
                for class in sorted(ns.get_classes()) {
                    checker.element(&[], class);
                    let owner = [&*class.name];
                    checker.callables(&owner, &class.constructors);
                    checker.callables(&owner, class.methods.iter().map(AsCallable::callable));
                    checker.callables(&owner, &class.functions);
                    for property in &class.properties {
                        checker.element(&owner, property);
                    }
                    for signal in &class.signals {
                        checker.signal(&owner, signal);
                    }
                }
            }
            Section::Constants => {
                for constant in sorted(ns.get_constants()) {
                    checker.element(&[], constant);
                }
            }
            Section::Domains => {
                for domain in sorted(ns.get_error_domains()) {
                    checker.enumeration(domain);
                }
            }
            Section::Enums => {
                for enumeration in sorted(ns.get_enumerations()) {
                    checker.enumeration(enumeration);
                }
            }
            Section::Functions => {
                checker.callables(&[], sorted(ns.get_functions()));
            }
            Section::FunctionMacros => {
                checker.callables(&[], sorted(ns.get_effective_function_macros()));
            }
            Section::Interfaces => {
                for iface in sorted(ns.get_interfaces()) {
                    checker.element(&[], iface);
                    let owner = [&*iface.name];
                    checker.callables(&owner, iface.methods.iter().map(AsCallable::callable));
                    checker.callables(&owner, &iface.functions);
                    for property in &iface.properties {
                        checker.element(&owner, property);
                    }
                    for signal in &iface.signals {
                        checker.signal(&owner, signal);
                    }
                }
            }
            Section::Structs => {
                for record in sorted(ns.get_effective_records()) {
                    checker.element(&[], record);
                    let owner = [&*record.name];
                    checker.callables(&owner, &record.constructors);
                    checker.callables(&owner, record.methods.iter().map(AsCallable::callable));
                    checker.callables(&owner, &record.functions);
                }
            }
            Section::Unions => {
                for union in sorted(ns.get_unions()) {
                    checker.element(&[], union);
                    let owner = [&*union.name];
                    checker.callables(&owner, &union.constructors);
                    checker.callables(&owner, union.methods.iter().map(AsCallable::callable));
                    checker.callables(&owner, &union.functions);
                }
            }
        }
        checker.findings
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn sorted<'a, E: GirElement + 'a>(items: impl Iterator<Item = &'a E>) -> Vec<&'a E> {
    let mut items: Vec<&E> = items.collect();
    items.sort_by_cached_key(|item| item.name().to_lowercase());
    items
}

struct Checker<'a> {
    section: Section,
    namespace: &'a str,
    findings: Vec<Finding>,
}

impl Checker<'_> {
    fn path(&self, owner: &[&str], name: &str) -> String {
        let mut path = String::from(self.namespace);
        for part in owner.iter().copied().chain(std::iter::once(name)) {
            path.push('.');
            path.push_str(part);
        }
        path
    }

    fn report(&mut self, kind: FindingKind, symbol: String, message: String) {
        self.findings.push(Finding {
            section: self.section,
            kind,
            symbol,
            message,
        });
    }

    fn element<E: GirElement>(&mut self, owner: &[&str], element: &E) {
        if element.doc().is_some() {
            return;
        }
        let symbol = self.path(owner, element.name());
        let location = match element.source_position() {
            Some(position) => position.to_string(),
            None => "<unknown>:0".to_string(),
        };
        let message = format!("Symbol '{symbol}' at {location} is not documented");
        self.report(FindingKind::Symbol, symbol, message);
    }

    fn parameters(&mut self, symbol: &str, parameters: &[Parameter]) {
        for parameter in parameters.iter().filter(|p| p.doc().is_none()) {
            let message = format!(
                "Parameter '{}' of symbol '{symbol}' is not documented",
                parameter.name
            );
            self.report(FindingKind::Parameter, symbol.to_string(), message);
        }
    }

    fn return_value(&mut self, symbol: &str, return_value: &ReturnValue) {
        if return_value.target.is_void() || return_value.info.doc.is_some() {
            return;
        }
        let message = format!("Return value for symbol '{symbol}' is not documented");
        self.report(FindingKind::ReturnValue, symbol.to_string(), message);
    }

    fn callable(&mut self, owner: &[&str], callable: &Callable) {
        self.element(owner, callable);
        let symbol = self.path(owner, &callable.name);
        self.parameters(&symbol, &callable.parameters);
        self.return_value(&symbol, &callable.return_value);
    }

    fn callables<'c>(&mut self, owner: &[&str], callables: impl IntoIterator<Item = &'c Callable>) {
        for callable in callables {
            self.callable(owner, callable);
        }
    }

    fn signal(&mut self, owner: &[&str], signal: &Signal) {
        self.element(owner, signal);
        let symbol = self.path(owner, &signal.name);
        self.parameters(&symbol, &signal.parameters);
        self.return_value(&symbol, &signal.return_value);
    }

    fn enumeration(&mut self, enumeration: &Enumeration) {
        self.element(&[], enumeration);
        let owner = [&*enumeration.name];
        for member in &enumeration.members {
            self.element(&owner, member);
        }
        self.callables(&owner, &enumeration.functions);
    }
}

/// Checks every section of `ns`.
pub fn check_namespace(ns: &Namespace) -> Vec<Finding> {
    let mut findings: Vec<Finding> = Section::ALL
        .par_iter()
        .flat_map_iter(|&section| section.check(ns))
        .collect();
    findings.sort_by(|a, b| a.section.name().cmp(b.section.name()));

    for finding in &findings {
        warn!(symbol = %finding.symbol, "{}", finding.message);
    }
    info!(
        "Documentation check of {}: {} findings",
        ns.name,
        findings.len()
    );
    findings
}

/// Checks the primary namespace of a resolved repository.
pub fn check_repository(repo: &Repository) -> Vec<Finding> {
    check_namespace(repo.namespace())
}
