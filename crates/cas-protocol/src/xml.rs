//! Normalized XML element tree.
//!
//! CAS servers disagree on namespace prefixes and whitespace, so response
//! parsing works on a normalized view of the document: tag names are
//! lower-cased with any namespace prefix stripped, text is trimmed with
//! internal whitespace collapsed, and attributes keep their original
//! names. Every traversal step returns an absence value instead of
//! panicking, so a malformed document can never raise a fault past the
//! parser boundary.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// XML parse failure.
#[derive(Debug, Error)]
#[error("XML parse error: {0}")]
pub struct XmlError(String);

/// A parsed element with normalized name and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    /// Parses a document and returns its root element.
    pub fn parse(xml: &str) -> Result<Element, XmlError> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Err(e) => return Err(XmlError(e.to_string())),
                Ok(Event::Eof) => break,
                Ok(Event::Start(start)) => {
                    stack.push(element_from_start(&start)?);
                }
                Ok(Event::Empty(start)) => {
                    let element = element_from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| XmlError("unbalanced end tag".to_string()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(text)) => {
                    let value = text.unescape().map_err(|e| XmlError(e.to_string()))?;
                    if let Some(open) = stack.last_mut() {
                        open.append_text(&value);
                    }
                }
                Ok(Event::CData(data)) => {
                    let value = String::from_utf8_lossy(&data).to_string();
                    if let Some(open) = stack.last_mut() {
                        open.append_text(&value);
                    }
                }
                Ok(_) => {}
            }
        }

        if !stack.is_empty() {
            return Err(XmlError("unclosed element".to_string()));
        }
        root.ok_or_else(|| XmlError("document has no root element".to_string()))
    }

    /// Returns the normalized element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the normalized, whitespace-collapsed text content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns an attribute value by exact attribute name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first child with the given normalized name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Returns all child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter()
    }

    /// Returns all children with the given normalized name.
    pub fn children_named(&self, name: &str) -> impl Iterator<Item = &Element> {
        let name = name.to_string();
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follows a chain of first-child lookups, absent if any step is
    /// missing.
    #[must_use]
    pub fn path(&self, names: &[&str]) -> Option<&Element> {
        let mut current = self;
        for name in names {
            current = current.child(name)?;
        }
        Some(current)
    }

    fn append_text(&mut self, raw: &str) {
        let normalized = normalize_text(raw);
        if normalized.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(&normalized);
    }
}

/// Closes an element into its parent, or installs it as the root.
fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(XmlError("multiple root elements".to_string())),
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError(e.to_string()))?
            .to_string();
        attributes.push((key, value));
    }

    Ok(Element {
        name: normalize_name(start),
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

/// Lower-cases the local name, stripping any namespace prefix.
fn normalize_name(start: &BytesStart<'_>) -> String {
    let qname = start.name();
    String::from_utf8_lossy(qname.local_name().as_ref()).to_lowercase()
}

/// Trims and collapses internal whitespace runs to a single space.
fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_lower_cased_and_prefix_stripped() {
        let root = Element::parse(
            r#"<cas:serviceResponse xmlns:cas="http://www.yale.edu/tp/cas">
                 <cas:authenticationSuccess><cas:user>alice</cas:user></cas:authenticationSuccess>
               </cas:serviceResponse>"#,
        )
        .unwrap();

        assert_eq!(root.name(), "serviceresponse");
        let user = root.path(&["authenticationsuccess", "user"]).unwrap();
        assert_eq!(user.text(), "alice");
    }

    #[test]
    fn text_is_trimmed_and_collapsed() {
        let root = Element::parse("<a>  hello \n\t world  </a>").unwrap();
        assert_eq!(root.text(), "hello world");
    }

    #[test]
    fn attributes_keep_original_names() {
        let root = Element::parse(r#"<a Code="X" other="y"/>"#).unwrap();
        assert_eq!(root.attribute("Code"), Some("X"));
        assert_eq!(root.attribute("code"), None);
    }

    #[test]
    fn repeated_children_are_all_kept() {
        let root = Element::parse("<a><v>1</v><v>2</v><w>3</w></a>").unwrap();
        let values: Vec<_> = root.children_named("v").map(Element::text).collect();
        assert_eq!(values, vec!["1", "2"]);
    }

    #[test]
    fn missing_path_step_is_absent() {
        let root = Element::parse("<a><b/></a>").unwrap();
        assert!(root.path(&["b", "c"]).is_none());
    }

    #[test]
    fn truncated_document_is_an_error() {
        assert!(Element::parse("<a><b>oops</a>").is_err());
        assert!(Element::parse("not xml at all").is_err());
        assert!(Element::parse("").is_err());
    }
}
