//! PFIF document reader
//!
//! Parses PFIF XML into a small owned element tree. Only the surface the
//! canonicalizer needs is exposed: person and note enumeration, local tag
//! names, children and text. Namespace prefixes are dropped, so
//! `<pfif:full_name>` and `<full_name>` are the same field.

use crate::errors::{PfifDiffError, Result};
use crate::record::key::{NOTE_TAG, PERSON_TAG};
use crate::{log_op_end, log_op_error, log_op_start};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;
use std::time::Instant;

/// Namespace prefix shared by every published PFIF version.
const PFIF_NAMESPACE_PREFIX: &str = "http://zesty.ca/pfif/";

/// One XML element with its text and child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    text: Option<String>,
    children: Vec<Element>,
    // Set once a child, comment or processing instruction follows the text.
    text_closed: bool,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Self {
        Self {
            tag: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            text: None,
            children: Vec::new(),
            text_closed: false,
        }
    }

    /// Local tag name, without namespace prefix.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Text before the first child element, comment or processing
    /// instruction; `None` when there is none.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Direct children with the given local tag name.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Text of the first direct child named `field`, if it has any.
    pub fn field_text(&self, field: &str) -> Option<&str> {
        self.children
            .iter()
            .find(|c| c.tag == field)
            .and_then(Element::text)
            .filter(|t| !t.is_empty())
    }

    fn push_text(&mut self, text: &str) {
        if !self.text_closed && !text.is_empty() {
            self.text.get_or_insert_with(String::new).push_str(text);
        }
    }

    fn close_text(&mut self) {
        self.text_closed = true;
    }
}

/// A parsed PFIF document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PfifXmlTree {
    root: Element,
    version: Option<String>,
}

impl PfifXmlTree {
    /// Parse a document held in memory.
    ///
    /// # Errors
    ///
    /// - `XmlParse` — the text is not well-formed XML
    /// - `EmptyDocument` — the text holds no root element
    pub fn parse(xml: &str) -> Result<Self> {
        let start = Instant::now();
        log_op_start!("parse_document", bytes = xml.len());
        match parse_elements(xml) {
            Ok(tree) => {
                log_op_end!(
                    "parse_document",
                    duration_ms = start.elapsed().as_millis() as u64,
                    pfif_version = tree.version.as_deref().unwrap_or("unknown"),
                );
                Ok(tree)
            }
            Err(err) => {
                log_op_error!(
                    "parse_document",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    /// Read and parse a document from disk.
    ///
    /// # Errors
    ///
    /// - `Io` — the file cannot be read as UTF-8 text
    /// - any error of [`PfifXmlTree::parse`]
    pub fn from_path(path: &Path) -> Result<Self> {
        let xml = std::fs::read_to_string(path).map_err(|e| PfifDiffError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&xml)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// PFIF version declared by the root namespace (e.g. `"1.4"`).
    pub fn pfif_version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Person elements directly under the root.
    pub fn persons(&self) -> impl Iterator<Item = &Element> {
        self.root.children_named(PERSON_TAG)
    }

    /// Note elements directly under the root, i.e. not nested in a person.
    pub fn top_level_notes(&self) -> impl Iterator<Item = &Element> {
        self.root.children_named(NOTE_TAG)
    }

    /// Note elements directly under the given person.
    pub fn notes_of<'a>(&self, person: &'a Element) -> impl Iterator<Item = &'a Element> {
        person.children_named(NOTE_TAG)
    }
}

fn parse_elements(xml: &str) -> Result<PfifXmlTree> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut version: Option<String> = None;

    loop {
        let event = reader.read_event().map_err(|e| PfifDiffError::XmlParse {
            position: reader.buffer_position() as u64,
            message: e.to_string(),
        })?;
        match event {
            Event::Start(e) => {
                if stack.is_empty() {
                    version = pfif_version_of(&e)?;
                }
                stack.push(Element::from_start(&e));
            }
            Event::Empty(e) => {
                if stack.is_empty() {
                    version = pfif_version_of(&e)?;
                }
                close(Element::from_start(&e), &mut stack, &mut root);
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    let text = t.unescape()?;
                    current.push_text(&text);
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Comment(_) | Event::PI(_) => {
                if let Some(current) = stack.last_mut() {
                    current.close_text();
                }
            }
            Event::End(_) => {
                // quick-xml has already checked that end tags match.
                if let Some(element) = stack.pop() {
                    close(element, &mut stack, &mut root);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(PfifDiffError::XmlParse {
            position: reader.buffer_position() as u64,
            message: format!("unclosed element <{}>", open.tag),
        });
    }

    let root = root.ok_or(PfifDiffError::EmptyDocument)?;
    Ok(PfifXmlTree { root, version })
}

fn close(element: Element, stack: &mut [Element], root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => {
            parent.close_text();
            parent.children.push(element);
        }
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

fn pfif_version_of(start: &BytesStart<'_>) -> Result<Option<String>> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| PfifDiffError::XmlParse {
            position: 0,
            message: e.to_string(),
        })?;
        if !attr.key.as_ref().starts_with(b"xmlns") {
            continue;
        }
        let value = attr.unescape_value()?;
        if let Some(version) = value.strip_prefix(PFIF_NAMESPACE_PREFIX) {
            return Ok(Some(version.trim_end_matches('/').to_string()));
        }
    }
    Ok(None)
}
