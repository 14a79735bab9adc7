//! A minimal namespace-aware element tree built with quick-xml.
//!
//! GIR documents are small enough to hold in memory, and the builder needs
//! random access to children (`<return-value>` before `<parameters>`, first
//! `<type>` child, and so on), so the event stream is folded into a tree.

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use super::error::{GirError, Result};
use crate::base::constants::namespace;

/// The XML namespaces GIR uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmlNs {
    Core,
    C,
    GLib,
    /// Unprefixed attributes, or elements outside any default namespace.
    None,
    Other,
}

impl XmlNs {
    fn from_resolved(resolved: &ResolveResult<'_>) -> Self {
        match resolved {
            ResolveResult::Bound(ns) => match ns.as_ref() {
                uri if uri == namespace::CORE.as_bytes() => XmlNs::Core,
                uri if uri == namespace::C.as_bytes() => XmlNs::C,
                uri if uri == namespace::GLIB.as_bytes() => XmlNs::GLib,
                _ => XmlNs::Other,
            },
            ResolveResult::Unbound => XmlNs::None,
            ResolveResult::Unknown(_) => XmlNs::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct XmlAttribute {
    ns: XmlNs,
    name: String,
    value: String,
}

/// One element with its resolved namespace, attributes, children and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub ns: XmlNs,
    pub name: String,
    attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    pub fn is(&self, ns: XmlNs, name: &str) -> bool {
        self.ns == ns && self.name == name
    }

    fn attr_in(&self, ns: XmlNs, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.ns == ns && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// An unprefixed attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attr_in(XmlNs::None, name)
    }

    /// A `c:` attribute.
    pub fn c_attr(&self, name: &str) -> Option<&str> {
        self.attr_in(XmlNs::C, name)
    }

    /// A `glib:` attribute.
    pub fn glib_attr(&self, name: &str) -> Option<&str> {
        self.attr_in(XmlNs::GLib, name)
    }

    /// An unprefixed boolean attribute (`"1"` is true).
    pub fn flag(&self, name: &str, default: bool) -> bool {
        self.attr(name).map_or(default, is_true)
    }

    pub fn glib_flag(&self, name: &str, default: bool) -> bool {
        self.glib_attr(name).map_or(default, is_true)
    }

    /// The first core-namespace child called `name`.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.is(XmlNs::Core, name))
    }

    /// Core-namespace children called `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.is(XmlNs::Core, name))
    }

    /// `glib:` children called `name`, in document order.
    pub fn glib_children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.is(XmlNs::GLib, name))
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

fn is_true(value: &str) -> bool {
    value == "1" || value == "true"
}

/// Parses a whole document and returns its root element.
pub fn parse_document(input: &[u8]) -> Result<XmlElement> {
    let mut reader = NsReader::from_reader(input);
    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(element_from_start(&reader, e)?);
            }
            Ok(Event::Empty(ref e)) => {
                // Self-closing element - handle as start + end
                let element = element_from_start(&reader, e)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| GirError::xml("Unexpected closing tag"))?;
                close_element(element, &mut stack, &mut root)?;
            }
            Ok(Event::Text(ref e)) => {
                if let Some(current) = stack.last_mut() {
                    let text = e
                        .unescape()
                        .map_err(|e| GirError::xml(format!("Text error: {e}")))?;
                    current.text.push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(GirError::xml(format!(
                    "XML parse error at position {}: {e}",
                    reader.error_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(GirError::xml(format!(
            "Unexpected end of document inside <{}>",
            open.name
        )));
    }
    root.ok_or_else(|| GirError::xml("Document has no root element"))
}

fn close_element(
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(GirError::xml(format!(
                "Multiple root elements: unexpected <{}>",
                element.name
            )));
        }
    }
    Ok(())
}

fn element_from_start<R>(reader: &NsReader<R>, e: &BytesStart<'_>) -> Result<XmlElement> {
    let (resolved, local) = reader.resolve_element(e.name());
    let ns = XmlNs::from_resolved(&resolved);
    let name = std::str::from_utf8(local.as_ref())
        .map_err(|e| GirError::xml(format!("Invalid tag name: {e}")))?
        .to_string();

    let mut attributes = Vec::new();
    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| GirError::xml(format!("Attribute error: {e}")))?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let (resolved, local) = reader.resolve_attribute(attr.key);
        let attr_name = std::str::from_utf8(local.as_ref())
            .map_err(|e| GirError::xml(format!("Attribute key error: {e}")))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| GirError::xml(format!("Attribute value error: {e}")))?
            .to_string();
        attributes.push(XmlAttribute {
            ns: XmlNs::from_resolved(&resolved),
            name: attr_name,
            value,
        });
    }

    Ok(XmlElement {
        ns,
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}
