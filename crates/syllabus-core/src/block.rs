//! The block abstraction the extractor works on

use std::borrow::Cow;

use syllabus_ooxml::XmlNode;

use crate::normalize::normalize;

/// A content block in an ordered document sequence
///
/// The extractor only needs to read a block's markup (to derive its
/// normalized text) and to reach its own child blocks. Removal is done by
/// the extractor on the owning `Vec`.
pub trait Block: Sized {
    /// Markup the normalized text is derived from
    fn markup(&self) -> Cow<'_, str>;

    /// The block's own child blocks, if it can have any
    fn children_mut(&mut self) -> Option<&mut Vec<Self>>;

    /// Normalized text of the block
    fn normalized_text(&self) -> String {
        normalize(&self.markup())
    }

    /// Whether the normalized text contains an already-normalized phrase
    fn contains_phrase(&self, phrase: &str) -> bool {
        self.normalized_text().contains(phrase)
    }
}

impl Block for XmlNode {
    fn markup(&self) -> Cow<'_, str> {
        match self {
            XmlNode::Text(raw) => Cow::Borrowed(raw),
            other => Cow::Owned(other.to_xml()),
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Self>> {
        self.as_element_mut().map(|e| &mut e.children)
    }
}
