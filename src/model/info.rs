//! Metadata shared by every GIR element: documentation, versioning,
//! deprecation, annotations, and source positions.

use std::fmt;

use crate::base::constants::DEFAULT_DEPRECATION_MESSAGE;
use crate::base::{Name, SourcePosition};

/// A documentation snippet attached to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doc {
    pub content: String,
    /// Where the doc comment was extracted from.
    pub location: Option<SourcePosition>,
    pub version: Option<Name>,
    pub stability: Option<Name>,
}

impl Doc {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            location: None,
            version: None,
            stability: None,
        }
    }

    pub fn with_location(mut self, location: SourcePosition) -> Self {
        self.location = Some(location);
        self
    }

    /// The first paragraph of the documentation.
    pub fn summary(&self) -> &str {
        let content = self.content.trim_start();
        match content.find("\n\n") {
            Some(end) => &content[..end],
            None => content,
        }
    }
}

impl fmt::Display for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

/// A free-form `<attribute name="…" value="…"/>` annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub name: Name,
    pub value: Option<Name>,
}

/// Raw deprecation data as declared in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deprecation {
    pub version: Option<Name>,
    pub message: Option<String>,
}

/// Deprecation as presented to consumers; the message is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeprecatedSince<'a> {
    pub version: Option<&'a str>,
    pub message: &'a str,
}

/// Common metadata carried by every element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub introspectable: bool,
    pub version: Option<Name>,
    pub stability: Option<Name>,
    pub deprecation: Option<Deprecation>,
    pub annotations: Vec<Annotation>,
    pub doc: Option<Doc>,
    pub source_position: Option<SourcePosition>,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            introspectable: true,
            version: None,
            stability: None,
            deprecation: None,
            annotations: Vec::new(),
            doc: None,
            source_position: None,
        }
    }
}

impl Info {
    pub fn set_doc(&mut self, doc: Doc) {
        self.doc = Some(doc);
    }

    pub fn set_deprecated(&mut self, message: Option<String>, since_version: Option<Name>) {
        self.deprecation = Some(Deprecation {
            version: since_version,
            message,
        });
    }

    pub fn add_annotation(&mut self, name: Name, value: Option<Name>) {
        self.annotations.push(Annotation { name, value });
    }

    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| &*a.name == name)
    }

    /// `None` unless the element was declared deprecated.
    ///
    /// A missing `<doc-deprecated>` yields the default message.
    pub fn deprecated_since(&self) -> Option<DeprecatedSince<'_>> {
        let deprecation = self.deprecation.as_ref()?;
        let message = deprecation
            .message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_DEPRECATION_MESSAGE);
        Some(DeprecatedSince {
            version: deprecation.version.as_deref(),
            message,
        })
    }
}

/// Accessors shared by all named GIR elements.
pub trait GirElement {
    fn name(&self) -> &str;
    fn info(&self) -> &Info;
    fn info_mut(&mut self) -> &mut Info;

    fn doc(&self) -> Option<&Doc> {
        self.info().doc.as_ref()
    }

    fn is_introspectable(&self) -> bool {
        self.info().introspectable
    }

    fn available_since(&self) -> Option<&str> {
        self.info().version.as_deref()
    }

    fn stability(&self) -> Option<&str> {
        self.info().stability.as_deref()
    }

    fn deprecated_since(&self) -> Option<DeprecatedSince<'_>> {
        self.info().deprecated_since()
    }

    fn source_position(&self) -> Option<&SourcePosition> {
        self.info().source_position.as_ref()
    }

    fn set_doc(&mut self, doc: Doc) {
        self.info_mut().set_doc(doc);
    }

    fn set_deprecated(&mut self, message: Option<String>, since_version: Option<Name>) {
        self.info_mut().set_deprecated(message, since_version);
    }
}

/// Implements [`GirElement`] for structs with `name: Name` and `info: Info` fields.
macro_rules! impl_gir_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::model::GirElement for $ty {
                fn name(&self) -> &str {
                    &self.name
                }

                fn info(&self) -> &$crate::model::Info {
                    &self.info
                }

                fn info_mut(&mut self) -> &mut $crate::model::Info {
                    &mut self.info
                }
            }
        )*
    };
}

pub(crate) use impl_gir_element;
