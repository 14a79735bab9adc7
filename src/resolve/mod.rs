//! # Cross-reference resolution
//!
//! Runs after a [`Repository`] has been built and its includes loaded.
//! Each pass first computes its results against a read-only
//! [`ResolutionContext`] and then writes them back, so no pass holds a
//! borrow of the repository while mutating it.
//!
//! ## Passes (in order)
//!
//! 1. class ctypes from `glib:type-name`, then empty type ctypes
//! 2. ancestor chains
//! 3. descendants
//! 4. interface prerequisites and implementations
//! 5. `moved-to` targets
//! 6. the C identifier index
//!
//! Every pass is idempotent. Problems never abort resolution; they are
//! collected in a [`ResolveReport`].

mod context;
mod ctypes;
mod hierarchy;
mod interfaces;
mod moved_to;
mod symbols;

use std::fmt;

use tracing::{debug, warn};

pub use context::{Located, ResolutionContext};

use crate::base::Name;
use crate::model::Repository;

/// What could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    UnresolvedCType,
    UnresolvedParent,
    AncestryCycle,
    UnresolvedPrerequisite,
    UnresolvedInterface,
    UnresolvedMovedTo,
}

impl WarningKind {
    /// Stable code used in log output.
    pub fn code(&self) -> &'static str {
        match self {
            WarningKind::UnresolvedCType => "W0101",
            WarningKind::UnresolvedParent => "W0102",
            WarningKind::AncestryCycle => "W0103",
            WarningKind::UnresolvedPrerequisite => "W0104",
            WarningKind::UnresolvedInterface => "W0105",
            WarningKind::UnresolvedMovedTo => "W0106",
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            WarningKind::UnresolvedCType => "no definition found to take a C type from",
            WarningKind::UnresolvedParent => "parent class not found",
            WarningKind::AncestryCycle => "class hierarchy loops back",
            WarningKind::UnresolvedPrerequisite => "interface prerequisite not found",
            WarningKind::UnresolvedInterface => "implemented interface not found",
            WarningKind::UnresolvedMovedTo => "moved-to target not found",
        }
    }
}

/// A reference that resolution had to leave unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveWarning {
    pub kind: WarningKind,
    /// Qualified name of the element holding the reference.
    pub symbol: Name,
    /// The name that could not be found.
    pub target: Name,
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({})",
            self.kind.code(),
            self.symbol,
            self.kind.describe(),
            self.target
        )
    }
}

/// Warnings collected while resolving one repository.
#[derive(Debug, Clone, Default)]
pub struct ResolveReport {
    pub warnings: Vec<ResolveWarning>,
}

impl ResolveReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn warn(&mut self, kind: WarningKind, symbol: &str, target: &str) {
        warn!(symbol = %symbol, target = %target, code = kind.code(), "{}", kind.describe());
        self.warnings.push(ResolveWarning {
            kind,
            symbol: Name::from(symbol),
            target: Name::from(target),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Warnings of one kind.
    pub fn of_kind(&self, kind: WarningKind) -> impl Iterator<Item = &ResolveWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }
}

/// Runs every resolution pass over a freshly built repository.
pub fn resolve_repository(repo: &mut Repository) -> ResolveReport {
    let mut report = ResolveReport::new();

    ctypes::resolve_class_ctypes(repo);
    ctypes::resolve_empty_ctypes(repo, &mut report);
    hierarchy::resolve_ancestors(repo, &mut report);
    hierarchy::resolve_descendants(repo);
    interfaces::resolve_prerequisites(repo, &mut report);
    interfaces::resolve_implementations(repo, &mut report);
    moved_to::resolve_moved_to(repo, &mut report);
    symbols::resolve_symbols(repo);

    debug!(
        "Resolved namespace {} ({} warnings)",
        repo.namespace.name,
        report.len()
    );
    report
}

/// The reduced resolution applied to repositories loaded as dependencies:
/// `moved-to` links and the C identifier index only.
pub fn resolve_dependency(repo: &mut Repository) -> ResolveReport {
    let mut report = ResolveReport::new();
    moved_to::resolve_moved_to(repo, &mut report);
    symbols::resolve_symbols(repo);
    report
}
