//! XML utilities for OpenDocument parts.
//!
//! The writer side is a small element tree whose tag and attribute names can only be
//! built from the fixed ODF namespace table, so an unqualified name cannot be produced.
//! The reader side wraps `quick_xml::Reader` for reading produced packages back.

use crate::error::ExportError;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::BytesDecl;
use quick_xml::events::BytesEnd;
use quick_xml::events::BytesRef;
use quick_xml::events::BytesStart;
use quick_xml::events::BytesText;
use quick_xml::events::Event;
use quick_xml::Reader;
use quick_xml::Writer;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::io::BufRead;
use std::io::Cursor;
use std::str::FromStr;
use thiserror::Error;

/// Errors specific to XML parsing operations
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("Parse entity '{0}' failed")]
    ParseEntityError(String),

    #[error("Parse attribute value '{0}' failed")]
    ParseAttributeValueError(String),
}

/// The fixed set of ODF namespaces used by the generated parts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Namespace {
    Office,
    Style,
    Text,
    Table,
    Fo,
    Svg,
    Draw,
    Meta,
    Manifest,
}

impl Namespace {
    pub const fn prefix(self) -> &'static str {
        match self {
            Namespace::Office => "office",
            Namespace::Style => "style",
            Namespace::Text => "text",
            Namespace::Table => "table",
            Namespace::Fo => "fo",
            Namespace::Svg => "svg",
            Namespace::Draw => "draw",
            Namespace::Meta => "meta",
            Namespace::Manifest => "manifest",
        }
    }

    pub const fn uri(self) -> &'static str {
        match self {
            Namespace::Office => "urn:oasis:names:tc:opendocument:xmlns:office:1.0",
            Namespace::Style => "urn:oasis:names:tc:opendocument:xmlns:style:1.0",
            Namespace::Text => "urn:oasis:names:tc:opendocument:xmlns:text:1.0",
            Namespace::Table => "urn:oasis:names:tc:opendocument:xmlns:table:1.0",
            Namespace::Fo => "urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0",
            Namespace::Svg => "urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0",
            Namespace::Draw => "urn:oasis:names:tc:opendocument:xmlns:drawing:1.0",
            Namespace::Meta => "urn:oasis:names:tc:opendocument:xmlns:meta:1.0",
            Namespace::Manifest => "urn:oasis:names:tc:opendocument:xmlns:manifest:1.0",
        }
    }

    /// Qualifies a local name with this namespace.
    pub const fn name(self, local: &'static str) -> QualifiedName {
        QualifiedName { namespace: self, local }
    }
}

/// A namespace-qualified element or attribute name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    namespace: Namespace,
    local: &'static str,
}

impl QualifiedName {
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn local(&self) -> &'static str {
        self.local
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace.prefix(), self.local)
    }
}

/// Child of an [`Element`]: either a nested element or character data.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// In-memory XML element with qualified name, ordered attributes and children.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    name: QualifiedName,
    attributes: Vec<(QualifiedName, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: QualifiedName) -> Self {
        Element {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: QualifiedName, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Sets an attribute, replacing an earlier value of the same name.
    pub fn set_attr(&mut self, name: QualifiedName, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.children.push(Node::Text(text));
        }
    }

    pub fn name(&self) -> QualifiedName {
        self.name
    }

    pub fn attribute(&self, name: QualifiedName) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// Iterates over the element children, skipping text nodes.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenated character data of this element and all descendants.
    pub fn text_content(&self) -> String {
        let mut content = String::new();
        self.collect_text(&mut content);
        content
    }

    fn collect_text(&self, content: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => content.push_str(text),
                Node::Element(element) => element.collect_text(content),
            }
        }
    }

    /// All namespaces referenced by names in this subtree.
    pub fn namespaces(&self) -> BTreeSet<Namespace> {
        let mut namespaces = BTreeSet::new();
        self.collect_namespaces(&mut namespaces);
        namespaces
    }

    fn collect_namespaces(&self, namespaces: &mut BTreeSet<Namespace>) {
        namespaces.insert(self.name.namespace);
        for (key, _) in &self.attributes {
            namespaces.insert(key.namespace);
        }
        for element in self.elements() {
            element.collect_namespaces(namespaces);
        }
    }

    fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>, declarations: &[(String, &str)]) -> Result<(), ExportError> {
        let tag = self.name.to_string();
        let mut start = BytesStart::new(tag.as_str());
        for (key, uri) in declarations {
            start.push_attribute((key.as_str(), *uri));
        }
        for (key, value) in &self.attributes {
            start.push_attribute((key.to_string().as_str(), value.as_str()));
        }
        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }
        writer.write_event(Event::Start(start))?;
        for node in &self.children {
            match node {
                Node::Element(element) => element.write_to(writer, &[])?,
                Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
        Ok(())
    }
}

/// Serializes a document root with the XML prolog.
/// Every namespace used anywhere in the tree is declared on the root element.
pub fn to_xml_bytes(root: &Element) -> Result<Vec<u8>, ExportError> {
    let declarations = root
        .namespaces()
        .into_iter()
        .map(|namespace| (format!("xmlns:{}", namespace.prefix()), namespace.uri()))
        .collect::<Vec<_>>();
    let mut writer = Writer::new(Cursor::new(Vec::with_capacity(4096)));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    root.write_to(&mut writer, &declarations)?;
    Ok(writer.into_inner().into_inner())
}

/// Event reader over one part of a written package. Empty elements are expanded into
/// start/end pairs, so one `Event::Start` arm matches both forms.
pub(crate) struct XmlReader<R: BufRead> {
    reader: Reader<R>,
    buffer: Vec<u8>,
}

impl<R: BufRead> XmlReader<R> {
    pub(crate) fn new(buf_reader: R) -> XmlReader<R> {
        let mut reader = Reader::from_reader(buf_reader);
        let config = reader.config_mut();
        config.check_comments = false;
        config.expand_empty_elements = true;
        config.trim_text(false);

        XmlReader {
            reader,
            buffer: Vec::with_capacity(1024),
        }
    }

    /// Next event; `None` at the end of the part.
    pub(crate) fn next(&'_ mut self) -> Result<Option<Event<'_>>, ExportError> {
        self.buffer.clear();
        match self.reader.read_event_into(&mut self.buffer)? {
            Event::Eof => Ok(None),
            event => Ok(Some(event)),
        }
    }
}

/// Attribute lookup on start tags by qualified name, e.g. `table:number-columns-spanned`.
pub(crate) trait XmlNodeHelper<'a> {
    /// Unescaped attribute value; `None` when the attribute is absent.
    fn get_attribute_value(&'a self, name: &str) -> Result<Option<Cow<'a, str>>, ExportError>;

    /// Attribute value parsed as `T`; `None` when absent, an error when unparsable.
    fn parse_attribute_value<T: FromStr>(&self, name: &str) -> Result<Option<T>, ExportError>;
}

impl<'a> XmlNodeHelper<'a> for BytesStart<'a> {
    fn get_attribute_value(&'a self, name: &str) -> Result<Option<Cow<'a, str>>, ExportError> {
        match self.try_get_attribute(name)? {
            Some(attribute) => Ok(Some(attribute.unescape_value()?)),
            None => Ok(None),
        }
    }

    fn parse_attribute_value<T: FromStr>(&self, name: &str) -> Result<Option<T>, ExportError> {
        let Some(attribute) = self.try_get_attribute(name)? else {
            return Ok(None);
        };
        let value = attribute.unescape_value()?;
        match value.parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(XmlError::ParseAttributeValueError(value.into_owned()).into()),
        }
    }
}

/// Collects character data of text and reference events into a string.
pub(crate) trait XmlTextContextHelper {
    fn push_bytes_text(&mut self, text: &BytesText) -> Result<(), ExportError>;

    /// Appends a resolved entity (`&amp;`) or character reference (`&#65;`, `&#x41;`).
    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), ExportError>;
}

impl XmlTextContextHelper for String {
    fn push_bytes_text(&mut self, text: &BytesText) -> Result<(), ExportError> {
        self.push_str(&text.xml_content()?);
        Ok(())
    }

    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), ExportError> {
        let raw = bytes.xml_content()?;
        let Some(number) = raw.strip_prefix('#') else {
            let entity = resolve_xml_entity(&raw).ok_or_else(|| XmlError::ParseEntityError(raw.to_string()))?;
            self.push_str(entity);
            return Ok(());
        };
        let code = match number.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16)?,
            None => number.parse::<u32>()?,
        };
        self.extend(char::from_u32(code));
        Ok(())
    }
}

/// Runs the given match arms over every event of an [`XmlReader`] until the end of input.
/// Unmatched events are skipped; `Event` must be in scope at the call site.
#[macro_export]
macro_rules! match_xml_events {
    ($reader:expr => { $($arms:tt)* }) => {
        while let Some(result) = $reader.next()? {
            match result {
                Event::Eof => break,
                $($arms)*
                _ => (),
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE_CELL: QualifiedName = Namespace::Table.name("table-cell");
    const TABLE_STYLE_NAME: QualifiedName = Namespace::Table.name("style-name");
    const TEXT_P: QualifiedName = Namespace::Text.name("p");

    #[test]
    fn serializes_prolog_and_declares_used_namespaces() {
        let cell = Element::new(TABLE_CELL)
            .attr(TABLE_STYLE_NAME, "ce1")
            .child(Element::new(TEXT_P).text("Heizung & Lüftung"));
        let xml = String::from_utf8(to_xml_bytes(&cell).unwrap()).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0""#));
        assert!(xml.contains(r#"xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0""#));
        assert!(!xml.contains("xmlns:office"));
        assert!(xml.contains(r#"table:style-name="ce1""#));
        assert!(xml.contains("<text:p>Heizung &amp; Lüftung</text:p>"));
    }

    #[test]
    fn childless_elements_are_written_empty() {
        let xml = String::from_utf8(to_xml_bytes(&Element::new(TEXT_P)).unwrap()).unwrap();
        assert!(xml.ends_with(r#"<text:p xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0"/>"#));
    }

    #[test]
    fn set_attr_replaces_existing_value() {
        let mut cell = Element::new(TABLE_CELL).attr(TABLE_STYLE_NAME, "a");
        cell.set_attr(TABLE_STYLE_NAME, "b");
        assert_eq!(cell.attribute(TABLE_STYLE_NAME), Some("b"));
        assert_eq!(cell.attributes.len(), 1);
    }

    #[test]
    fn text_content_joins_descendants() {
        let paragraph = Element::new(TEXT_P)
            .text("A")
            .child(Element::new(Namespace::Text.name("span")).text("B"))
            .text("C");
        assert_eq!(paragraph.text_content(), "ABC");
        assert_eq!(paragraph.elements().count(), 1);
    }

    #[test]
    fn reader_resolves_references() -> Result<(), ExportError> {
        let mut reader = XmlReader::new("<text:p>a &amp; b &#x41;</text:p>".as_bytes());
        let mut value = String::new();
        match_xml_events!(reader => {
            Event::Text(event) => value.push_bytes_text(&event)?,
            Event::GeneralRef(event) => value.push_bytes_ref(&event)?,
        });
        assert_eq!(value, "a & b A");
        Ok(())
    }

    #[test]
    fn attributes_read_back() -> Result<(), ExportError> {
        let xml = r#"<r><table:table-cell table:number-columns-spanned="3" table:style-name="a&amp;b"/><table:table-cell table:number-columns-spanned="x"/></r>"#;
        let mut reader = XmlReader::new(xml.as_bytes());
        let mut spans = Vec::new();
        let mut styles = Vec::new();
        match_xml_events!(reader => {
            Event::Start(event) if event.name().as_ref() == b"table:table-cell" => {
                styles.push(event.get_attribute_value("table:style-name")?.map(Cow::into_owned));
                spans.push(event.parse_attribute_value::<u32>("table:number-columns-spanned").ok().flatten());
            }
        });
        assert_eq!(styles, vec![Some("a&b".to_owned()), None]);
        assert_eq!(spans, vec![Some(3), None]);
        Ok(())
    }
}
