//! XML response parsing.
//!
//! Responses arrive as small XML documents. They are parsed into a tree of
//! [`Element`] values that supports first-match descendant lookups with an
//! explicit absent value, and a scan for service-reported `<Error>` elements.
//!
//! Text content is kept verbatim (no trimming) so message bodies round-trip
//! byte for byte.

use crate::error::SqsError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// One XML element: name, accumulated text content, and child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// The element's tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element's own text content, verbatim.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First descendant with the given tag name, in document order.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        find_first(&self.children, tag)
    }

    /// Text of the first descendant with the given tag name.
    ///
    /// Absence is a value, never a panic: `None` when no such descendant
    /// exists.
    pub fn first_text(&self, tag: &str) -> Option<&str> {
        self.find(tag).map(Element::text)
    }
}

/// A parsed XML response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    roots: Vec<Element>,
}

impl Document {
    /// Parse a raw response body.
    ///
    /// An empty body yields an empty document; lookups on it find nothing.
    ///
    /// # Errors
    /// Returns [`SqsError::MalformedResponse`] when the body is not
    /// well-formed XML.
    pub fn parse(body: &str) -> Result<Self, SqsError> {
        let mut reader = Reader::from_str(body);

        let mut roots: Vec<Element> = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    stack.push(Element::new(name));
                }
                Ok(Event::Empty(ref e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    attach(Element::new(name), &mut stack, &mut roots);
                }
                Ok(Event::End(_)) => match stack.pop() {
                    Some(element) => attach(element, &mut stack, &mut roots),
                    None => {
                        return Err(SqsError::MalformedResponse {
                            message: "unexpected closing tag".to_string(),
                        })
                    }
                },
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(|e| SqsError::MalformedResponse {
                        message: format!("Failed to parse XML: {}", e),
                    })?;
                    if let Some(open) = stack.last_mut() {
                        open.text.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(open) = stack.last_mut() {
                        open.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(SqsError::MalformedResponse {
                        message: format!("Failed to parse XML: {}", e),
                    })
                }
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(SqsError::MalformedResponse {
                message: "unexpected end of document".to_string(),
            });
        }

        Ok(Self { roots })
    }

    /// The document's root element, when one exists.
    pub fn root(&self) -> Option<&Element> {
        self.roots.first()
    }

    /// First element with the given tag name anywhere in the document.
    pub fn first_element(&self, tag: &str) -> Option<&Element> {
        find_first(&self.roots, tag)
    }

    /// Text of the first element with the given tag name.
    pub fn first_text(&self, tag: &str) -> Option<&str> {
        self.first_element(tag).map(Element::text)
    }

    /// All elements with the given tag name, in document order.
    pub fn elements(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        collect(&self.roots, tag, &mut found);
        found
    }

    /// Scan for service-reported errors.
    ///
    /// The first `Error` element carrying a non-empty `Code` child fails the
    /// response; `Error` elements without a code are skipped. The error
    /// message is the sibling `Message` text, empty when absent.
    pub fn check_errors(&self) -> Result<(), SqsError> {
        for error in self.elements("Error") {
            let code = match error.first_text("Code") {
                Some(code) if !code.is_empty() => code,
                _ => continue,
            };
            let message = error.first_text("Message").unwrap_or("").to_string();
            return Err(SqsError::Service {
                code: code.to_string(),
                message,
            });
        }
        Ok(())
    }
}

fn attach(element: Element, stack: &mut Vec<Element>, roots: &mut Vec<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => roots.push(element),
    }
}

fn find_first<'a>(nodes: &'a [Element], tag: &str) -> Option<&'a Element> {
    for node in nodes {
        if node.name == tag {
            return Some(node);
        }
        if let Some(found) = find_first(&node.children, tag) {
            return Some(found);
        }
    }
    None
}

fn collect<'a>(nodes: &'a [Element], tag: &str, found: &mut Vec<&'a Element>) {
    for node in nodes {
        if node.name == tag {
            found.push(node);
        }
        collect(&node.children, tag, found);
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
