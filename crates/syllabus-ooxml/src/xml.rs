//! Lossless XML element tree for OOXML parts
//!
//! Word parts are edited by moving whole elements around, so the tree keeps
//! everything it does not need to understand verbatim: qualified names,
//! attribute values and text are stored in their raw (still escaped) form and
//! written back unchanged. Comments, processing instructions and the doctype
//! are kept as raw markup.
//!
//! Whitespace-only text is dropped when it sits between sibling elements
//! (indentation inside structural content) and kept everywhere else, so
//! `<w:t xml:space="preserve"> </w:t>` survives a round trip.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};

/// Declaration written when the source part had none
const DEFAULT_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// A node in the element tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// An element with attributes and children
    Element(XmlElement),
    /// Character data, raw (entity references are not resolved)
    Text(String),
    /// Content of a CDATA section
    CData(String),
    /// Full raw markup of a comment, `<!--...-->`
    Comment(String),
    /// Full raw markup of a processing instruction, `<?...?>`
    ProcessingInstruction(String),
    /// Full raw markup of a doctype declaration
    DocType(String),
}

/// An XML element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    /// Qualified name as written, e.g. `w:p`
    pub name: String,
    /// Attributes in document order; values are raw (still escaped)
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order
    pub children: Vec<XmlNode>,
}

/// A parsed XML part: optional declaration, prolog nodes and the root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlPart {
    /// Raw `<?xml ...?>` declaration, if the part had one
    pub declaration: Option<String>,
    /// Comments, processing instructions and doctype before the root
    pub prolog: Vec<XmlNode>,
    /// The document element
    pub root: XmlElement,
}

impl XmlNode {
    /// Borrow the node as an element
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Mutably borrow the node as an element
    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            XmlNode::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Serialize the node to markup
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out);
        out
    }

    /// Append the node's markup to `out`
    pub fn write_xml(&self, out: &mut String) {
        match self {
            XmlNode::Element(e) => e.write_xml(out),
            XmlNode::Text(raw) => out.push_str(raw),
            XmlNode::CData(raw) => {
                out.push_str("<![CDATA[");
                out.push_str(raw);
                out.push_str("]]>");
            }
            XmlNode::Comment(raw) | XmlNode::ProcessingInstruction(raw) | XmlNode::DocType(raw) => {
                out.push_str(raw)
            }
        }
    }

    /// Unescaped text carried by this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            XmlNode::Element(e) => {
                for child in &e.children {
                    child.collect_text(out);
                }
            }
            XmlNode::Text(raw) => out.push_str(&unescape_lossy(raw)),
            XmlNode::CData(raw) => out.push_str(raw),
            _ => {}
        }
    }
}

impl From<XmlElement> for XmlNode {
    fn from(element: XmlElement) -> Self {
        XmlNode::Element(element)
    }
}

impl XmlElement {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: add an attribute; `value` is escaped
    pub fn with_attr(mut self, key: impl Into<String>, value: &str) -> Self {
        self.attributes.push((key.into(), escape(value).into_owned()));
        self
    }

    /// Builder: append a child node
    pub fn with_child(mut self, child: impl Into<XmlNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Builder: append a text child; `text` is escaped
    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(XmlNode::Text(escape(text).into_owned()));
        self
    }

    /// Name without its namespace prefix
    pub fn local_name(&self) -> &str {
        self.name
            .rsplit_once(':')
            .map(|(_, local)| local)
            .unwrap_or(&self.name)
    }

    /// Raw value of an attribute, looked up by qualified name
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over child elements, skipping text and other nodes
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// First child element with the given qualified name
    pub fn find_child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|e| e.name == name)
    }

    /// Unescaped text of all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Serialize the element to markup
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out);
        out
    }

    /// Append the element's markup to `out`
    pub fn write_xml(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            // A raw value read from a single-quoted attribute may hold '"'
            let quote = if value.contains('"') { '\'' } else { '"' };
            out.push(' ');
            out.push_str(key);
            out.push('=');
            out.push(quote);
            out.push_str(value);
            out.push(quote);
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write_xml(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

impl XmlPart {
    /// Parse a part from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        // Don't trim text - whitespace inside runs is content
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut declaration = None;
        let mut prolog = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            buf.clear();
            let start = reader.buffer_position() as usize;
            let event = reader.read_event_into(&mut buf)?;
            let end = reader.buffer_position() as usize;
            let raw = || String::from_utf8_lossy(&xml[start..end]).into_owned();

            match event {
                Event::Decl(_) => declaration = Some(raw()),
                Event::Start(ref e) => stack.push(element_from_start(e)?),
                Event::Empty(ref e) => {
                    let element = element_from_start(e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let mut element = stack.pop().ok_or_else(|| {
                        OoxmlError::InvalidStructure("unexpected closing tag".to_string())
                    })?;
                    drop_indentation(&mut element);
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(ref e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(e).into_owned();
                        parent.children.push(XmlNode::Text(text));
                    }
                }
                Event::CData(ref e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(e).into_owned();
                        parent.children.push(XmlNode::CData(text));
                    }
                }
                Event::Comment(_) => push_misc(&mut stack, &mut prolog, XmlNode::Comment(raw())),
                Event::PI(_) => push_misc(
                    &mut stack,
                    &mut prolog,
                    XmlNode::ProcessingInstruction(raw()),
                ),
                Event::DocType(_) => prolog.push(XmlNode::DocType(raw())),
                Event::Eof => break,
            }
        }

        if !stack.is_empty() {
            return Err(OoxmlError::InvalidStructure(format!(
                "unclosed element <{}>",
                stack.last().map(|e| e.name.as_str()).unwrap_or_default()
            )));
        }

        let root =
            root.ok_or_else(|| OoxmlError::InvalidStructure("no root element".to_string()))?;

        Ok(Self {
            declaration,
            prolog,
            root,
        })
    }

    /// Serialize the part back to XML
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        out.push_str(self.declaration.as_deref().unwrap_or(DEFAULT_DECLARATION));
        out.push_str("\r\n");
        for node in &self.prolog {
            node.write_xml(&mut out);
        }
        self.root.write_xml(&mut out);
        out
    }
}

/// Escape text for use in element content or a quoted attribute
pub fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Resolve entity and character references, keeping the raw text on error
pub fn unescape_lossy(raw: &str) -> Cow<'_, str> {
    quick_xml::escape::unescape(raw).unwrap_or(Cow::Borrowed(raw))
}

fn element_from_start(e: &BytesStart) -> Result<XmlElement> {
    let mut element = XmlElement::new(String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes() {
        let attr = attr?;
        element.attributes.push((
            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            String::from_utf8_lossy(&attr.value).into_owned(),
        ));
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(OoxmlError::InvalidStructure(format!(
                "second root element <{}>",
                element.name
            )))
        }
    }
    Ok(())
}

fn push_misc(stack: &mut [XmlElement], prolog: &mut Vec<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => prolog.push(node),
    }
}

fn drop_indentation(element: &mut XmlElement) {
    let has_elements = element
        .children
        .iter()
        .any(|c| matches!(c, XmlNode::Element(_)));
    if has_elements {
        element.children.retain(|c| match c {
            XmlNode::Text(t) => !t.chars().all(|ch| matches!(ch, ' ' | '\t' | '\r' | '\n')),
            _ => true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    fn parse(xml: &str) -> XmlPart {
        XmlPart::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_and_serialize_compact_part() {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{W}"><w:body><w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>Hello</w:t></w:r></w:p></w:body></w:document>"#
        );
        let part = parse(&xml);

        assert_eq!(part.root.name, "w:document");
        assert_eq!(part.root.local_name(), "document");
        assert_eq!(part.root.attr("xmlns:w"), Some(W));
        assert_eq!(part.to_xml(), xml.replacen("?>", "?>\r\n", 1));
    }

    #[test]
    fn test_indentation_between_elements_is_dropped() {
        let part = parse("<root>\n  <a>x</a>\n  <b/>\n</root>");
        assert_eq!(part.root.children.len(), 2);
        assert_eq!(part.root.to_xml(), "<root><a>x</a><b/></root>");
    }

    #[test]
    fn test_preserved_space_in_leaf_is_kept() {
        let part = parse(r#"<w:r xmlns:w="x"><w:t xml:space="preserve"> </w:t></w:r>"#);
        let t = part.root.find_child("w:t").unwrap();
        assert_eq!(t.children, vec![XmlNode::Text(" ".to_string())]);
    }

    #[test]
    fn test_entities_stay_raw_but_text_content_unescapes() {
        let part = parse("<p><t>R&amp;D &#1057;&lt;</t></p>");
        assert_eq!(part.root.to_xml(), "<p><t>R&amp;D &#1057;&lt;</t></p>");
        assert_eq!(part.root.text_content(), "R&D С<");
    }

    #[test]
    fn test_single_quoted_attribute_with_double_quote() {
        let part = parse(r#"<a title='say "hi"'/>"#);
        assert_eq!(part.root.attr("title"), Some(r#"say "hi""#));
        assert_eq!(part.root.to_xml(), r#"<a title='say "hi"'/>"#);
    }

    #[test]
    fn test_comments_and_processing_instructions_survive() {
        let xml = r#"<?xml version="1.0"?><?mso-application progid="Word.Document"?><root><!-- note --><a/></root>"#;
        let part = parse(xml);
        assert_eq!(part.prolog.len(), 1);
        assert_eq!(part.declaration.as_deref(), Some(r#"<?xml version="1.0"?>"#));
        assert!(part.to_xml().contains("<!-- note -->"));
        assert!(part
            .to_xml()
            .contains(r#"<?mso-application progid="Word.Document"?>"#));
    }

    #[test]
    fn test_cdata_roundtrip() {
        let part = parse("<a><![CDATA[x < y]]></a>");
        assert_eq!(part.root.text_content(), "x < y");
        assert_eq!(part.root.to_xml(), "<a><![CDATA[x < y]]></a>");
    }

    #[test]
    fn test_mismatched_end_tag_is_an_error() {
        assert!(XmlPart::parse(b"<a><b></a>").is_err());
    }

    #[test]
    fn test_unclosed_element_is_an_error() {
        assert!(XmlPart::parse(b"<a><b>").is_err());
    }

    #[test]
    fn test_empty_input_has_no_root() {
        let err = XmlPart::parse(b"").unwrap_err();
        assert!(matches!(err, OoxmlError::InvalidStructure(_)));
    }

    #[test]
    fn test_builder_escapes_text_and_attributes() {
        let el = XmlElement::new("w:t")
            .with_attr("title", "a\"b")
            .with_text("Fish & <Chips>");
        assert_eq!(
            el.to_xml(),
            r#"<w:t title="a&quot;b">Fish &amp; &lt;Chips&gt;</w:t>"#
        );
    }

    #[test]
    fn test_escape_round_trips_through_unescape() {
        assert!(matches!(escape("plain text"), Cow::Borrowed("plain text")));

        let raw = escape(r#"It's <"A" & B>"#);
        assert_eq!(raw, "It&apos;s &lt;&quot;A&quot; &amp; B&gt;");
        assert_eq!(unescape_lossy(&raw), r#"It's <"A" & B>"#);
    }
}
