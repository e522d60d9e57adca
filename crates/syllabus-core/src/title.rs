//! Generated title page

use syllabus_ooxml::{ParagraphBuilder, XmlNode};

/// Title font size in points
pub const TITLE_FONT_SIZE_PT: f32 = 18.0;

/// Prepend a bold, centered title paragraph that ends its page
///
/// Must run after the recipe: the block that survives at index 0 becomes the
/// first content after the title. The leading child node of that block is
/// dropped first.
pub fn insert_title_page(blocks: &mut Vec<XmlNode>, title: &str) {
    if let Some(first) = blocks.first_mut().and_then(XmlNode::as_element_mut) {
        if !first.children.is_empty() {
            first.children.remove(0);
        }
    }

    let paragraph = ParagraphBuilder::new(title)
        .bold()
        .font_size(TITLE_FONT_SIZE_PT)
        .centered()
        .page_break_after()
        .build();
    blocks.insert(0, paragraph);

    tracing::trace!(title, blocks = blocks.len(), "inserted title page");
}
