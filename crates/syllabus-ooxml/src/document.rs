//! Document content (word/document.xml)
//!
//! The main document part is kept as a lossless element tree. Its body is
//! exposed as an ordered, mutable sequence of block-level nodes (paragraphs,
//! tables, content controls and the trailing section properties), which is
//! the unit every body edit works on.

use crate::error::{OoxmlError, Result};
use crate::xml::{XmlElement, XmlNode, XmlPart};

/// The parsed main document part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPart {
    /// The part with the body element taken out of the root's children
    part: XmlPart,
    /// Position of the body among the root's children
    body_index: usize,
    /// The `w:body` element
    body: XmlElement,
}

impl DocumentPart {
    /// Parse a document from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut part = XmlPart::parse(xml)?;

        if part.root.local_name() != "document" {
            return Err(OoxmlError::InvalidStructure(format!(
                "expected <w:document> root, found <{}>",
                part.root.name
            )));
        }

        let body_index = part
            .root
            .children
            .iter()
            .position(|n| n.as_element().is_some_and(|e| e.local_name() == "body"))
            .ok_or_else(|| OoxmlError::InvalidStructure("document has no <w:body>".to_string()))?;

        let body = match part.root.children.remove(body_index) {
            XmlNode::Element(e) => e,
            _ => {
                return Err(OoxmlError::InvalidStructure(
                    "body is not an element".to_string(),
                ))
            }
        };

        tracing::debug!(blocks = body.children.len(), "parsed document body");
        Ok(Self {
            part,
            body_index,
            body,
        })
    }

    /// Body-level blocks in document order
    pub fn blocks(&self) -> &[XmlNode] {
        &self.body.children
    }

    /// Mutable access to the body-level block sequence
    pub fn blocks_mut(&mut self) -> &mut Vec<XmlNode> {
        &mut self.body.children
    }

    /// Unescaped text of every body block, one entry per block
    pub fn block_texts(&self) -> Vec<String> {
        self.body.children.iter().map(XmlNode::text_content).collect()
    }

    /// Serialize the part back to XML
    pub fn to_xml(&self) -> String {
        let mut part = self.part.clone();
        part.root
            .children
            .insert(self.body_index, XmlNode::Element(self.body.clone()));
        part.to_xml()
    }
}
