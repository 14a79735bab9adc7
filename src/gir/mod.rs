//! Reading GIR XML into the [`crate::model`] tree.
//!
//! [`xml`] folds the quick-xml event stream into an element tree;
//! [`build_repository`] turns that tree into a [`Repository`], asking an
//! [`IncludeLoader`] for every `<include>` it declares.

mod builder;
mod error;
pub mod xml;

pub use builder::{IncludeLoader, NoIncludes, build_repository};
pub use error::{GirError, Result};

use std::path::PathBuf;

use crate::model::Repository;

/// Parses a document and builds its repository without cross-reference
/// resolution.
pub fn read_repository(
    input: &[u8],
    girfile: Option<PathBuf>,
    loader: &mut dyn IncludeLoader,
) -> Result<Repository> {
    let root = xml::parse_document(input)?;
    build_repository(&root, girfile, loader)
}
