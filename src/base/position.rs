/// Position tracking for GIR elements
///
/// Stores the location of the C declaration (or doc comment) an element was
/// generated from, as recorded in `<source-position>` and `<doc>` elements.
use std::fmt;

use super::Name;

/// A location inside the introspected library's source code (1-indexed lines)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub filename: Name,
    pub line: u32,
}

impl SourcePosition {
    pub fn new(filename: impl Into<Name>, line: u32) -> Self {
        Self {
            filename: filename.into(),
            line,
        }
    }

    /// The filename with leading `../` components removed.
    ///
    /// The GIR compiler records paths relative to its build directory.
    pub fn relative_filename(&self) -> &str {
        let mut name: &str = &self.filename;
        while let Some(rest) = name.strip_prefix("../") {
            name = rest;
        }
        name
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.filename, self.line)
    }
}
