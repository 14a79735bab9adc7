//! # Project loading
//!
//! Locating GIR files on disk and turning them into resolved repositories.
//!
//! - [`SearchPaths`]: where `<name>-<version>.gir` files are looked up
//! - [`DependencyLoader`]: parses each include once and caches it
//! - [`GirParser`]: the entry point tying loading, building and resolution
//!   together

mod dependency_loader;
mod options;
mod parser;
mod search_paths;

pub use dependency_loader::DependencyLoader;
pub use options::ParserOptions;
pub use parser::GirParser;
pub use search_paths::SearchPaths;
