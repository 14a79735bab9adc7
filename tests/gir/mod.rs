//! GIR reading tests
//!
//! Building repositories from documents without loading dependencies:
//! - Node fields decoded from attributes
//! - Type references and arrays
//! - Malformed input

pub mod tests_builder;
pub mod tests_errors;
