//! # girscope-base
//!
//! Core library for GObject-Introspection (GIR) parsing, AST, and
//! cross-reference resolution.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! check     → Documentation coverage findings
//!   ↓
//! project   → Search paths, dependency loading, GirParser entry point
//!   ↓
//! resolve   → Cross-reference passes over a built repository
//!   ↓
//! gir       → quick-xml reader, XML-to-AST builder
//!   ↓
//! model     → AST nodes, type registry, Namespace, Repository
//!   ↓
//! base      → Primitives (Name interning, SourcePosition, GIR constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → model → gir → resolve → project → check)
// ============================================================================

/// Foundation types: Name interning, source positions, GIR vocabulary
pub mod base;

/// AST node model
pub mod model;

/// GIR XML reading and AST building
pub mod gir;

/// Cross-reference resolution
pub mod resolve;

/// Search paths, dependency loader, parser entry point
pub mod project;

/// Documentation coverage checks
pub mod check;

// Re-export foundation types
pub use base::{Interner, Name, SourcePosition};

// Re-export the entry points
pub use gir::{GirError, Result};
pub use model::{Namespace, Repository};
pub use project::{GirParser, ParserOptions, SearchPaths};
pub use resolve::{ResolveReport, ResolveWarning, WarningKind};
