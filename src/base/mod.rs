//! Foundation types for girscope.
//!
//! This module provides the primitives used throughout the crate:
//! - [`Name`], [`Interner`] - Shared, deduplicated strings
//! - [`SourcePosition`] - File/line locations recorded by the GIR compiler
//! - [`constants`] - XML namespace URIs and the fundamental C type tables
//!
//! This module has NO dependencies on other girscope modules.

pub mod constants;
mod intern;
mod position;

pub use intern::{Interner, Name};
pub use position::SourcePosition;
