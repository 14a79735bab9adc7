//! Error types for GIR loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort parsing of a GIR document.
///
/// Unresolvable cross-references are not errors; the resolver logs them
/// and leaves the affected fields unset.
#[derive(Debug, Error)]
pub enum GirError {
    /// Malformed XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// A file could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Missing required element or attribute.
    #[error("Missing required {kind}: {name}")]
    Missing { kind: &'static str, name: String },

    /// An attribute value that does not parse.
    #[error("Invalid {kind}: {message}")]
    Invalid { kind: &'static str, message: String },

    /// An `<include>` that no search path provides.
    #[error("Unable to find GIR file for {include} in search paths: {}", display_paths(.search_paths))]
    DependencyNotFound {
        include: String,
        search_paths: Vec<PathBuf>,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl GirError {
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a missing element error.
    pub fn missing_element(name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "element",
            name: name.into(),
        }
    }

    /// Create a missing attribute error.
    pub fn missing_attribute(element: &str, attribute: &str) -> Self {
        Self::Missing {
            kind: "attribute",
            name: format!("{attribute} on <{element}>"),
        }
    }

    /// Create an invalid value error.
    pub fn invalid(kind: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            kind,
            message: message.into(),
        }
    }
}

/// Result type for GIR loading.
pub type Result<T> = std::result::Result<T, GirError>;
