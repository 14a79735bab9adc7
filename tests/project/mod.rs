//! Project loading tests
//!
//! Dependency discovery on disk, include memoization, strictness and the
//! `GirParser` entry point.

pub mod tests_dependency_loader;
pub mod tests_parser;
