//! WordprocessingML paragraph construction
//!
//! Generated paragraphs use the conventional `w:` prefix, which every Word
//! document binds to the main namespace on `<w:document>`.

use crate::xml::{XmlElement, XmlNode};

/// Builder for a single-run paragraph
///
/// ```
/// use syllabus_ooxml::ParagraphBuilder;
///
/// let title = ParagraphBuilder::new("Title page")
///     .bold()
///     .font_size(18.0)
///     .centered()
///     .page_break_after()
///     .build();
/// assert!(syllabus_ooxml::has_page_break(&title));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParagraphBuilder {
    text: String,
    bold: bool,
    /// Font size in half-points, the unit of `w:sz`
    half_points: Option<u32>,
    centered: bool,
    page_break_after: bool,
}

impl ParagraphBuilder {
    /// Start a paragraph with the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Make the run bold
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set the run font size in points
    pub fn font_size(mut self, points: f32) -> Self {
        self.half_points = Some((points * 2.0).round().max(1.0) as u32);
        self
    }

    /// Center the paragraph (`w:jc`)
    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    /// End the paragraph with a page break so the next block starts a new page
    pub fn page_break_after(mut self) -> Self {
        self.page_break_after = true;
        self
    }

    /// Build the `w:p` node
    pub fn build(self) -> XmlNode {
        let mut paragraph = XmlElement::new("w:p");

        if self.centered {
            paragraph = paragraph.with_child(
                XmlElement::new("w:pPr")
                    .with_child(XmlElement::new("w:jc").with_attr("w:val", "center")),
            );
        }

        let mut r_pr = XmlElement::new("w:rPr");
        if self.bold {
            r_pr = r_pr
                .with_child(XmlElement::new("w:b"))
                .with_child(XmlElement::new("w:bCs"));
        }
        if let Some(size) = self.half_points {
            let size = size.to_string();
            r_pr = r_pr
                .with_child(XmlElement::new("w:sz").with_attr("w:val", &size))
                .with_child(XmlElement::new("w:szCs").with_attr("w:val", &size));
        }

        let mut run = XmlElement::new("w:r");
        if !r_pr.children.is_empty() {
            run = run.with_child(r_pr);
        }
        run = run.with_child(
            XmlElement::new("w:t")
                .with_attr("xml:space", "preserve")
                .with_text(&self.text),
        );
        paragraph = paragraph.with_child(run);

        if self.page_break_after {
            paragraph = paragraph.with_child(
                XmlElement::new("w:r")
                    .with_child(XmlElement::new("w:br").with_attr("w:type", "page")),
            );
        }

        XmlNode::Element(paragraph)
    }
}

/// Whether a block carries a hard page break (`<w:br w:type="page"/>`)
pub fn has_page_break(node: &XmlNode) -> bool {
    fn walk(element: &XmlElement) -> bool {
        if element.local_name() == "br"
            && element
                .attributes
                .iter()
                .any(|(k, v)| k.ends_with("type") && v == "page")
        {
            return true;
        }
        element.child_elements().any(walk)
    }
    node.as_element().is_some_and(walk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paragraph() {
        let p = ParagraphBuilder::new("Hello").build();
        assert_eq!(
            p.to_xml(),
            r#"<w:p><w:r><w:t xml:space="preserve">Hello</w:t></w:r></w:p>"#
        );
        assert!(!has_page_break(&p));
    }

    #[test]
    fn test_formatted_title_paragraph() {
        let p = ParagraphBuilder::new("Титульный лист")
            .bold()
            .font_size(18.0)
            .centered()
            .page_break_after()
            .build();

        let xml = p.to_xml();
        assert!(xml.starts_with(r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr>"#));
        assert!(xml.contains(r#"<w:rPr><w:b/><w:bCs/><w:sz w:val="36"/><w:szCs w:val="36"/></w:rPr>"#));
        assert!(xml.ends_with(r#"<w:r><w:br w:type="page"/></w:r></w:p>"#));
        assert_eq!(p.text_content(), "Титульный лист");
        assert!(has_page_break(&p));
    }

    #[test]
    fn test_text_is_escaped() {
        let p = ParagraphBuilder::new("A & B").build();
        let xml = p.to_xml();
        assert!(xml.contains("A &amp; B"));
        assert_eq!(p.text_content(), "A & B");
    }

    #[test]
    fn test_line_break_is_not_page_break() {
        let node = XmlNode::Element(
            XmlElement::new("w:p")
                .with_child(XmlElement::new("w:r").with_child(XmlElement::new("w:br"))),
        );
        assert!(!has_page_break(&node));
    }
}
