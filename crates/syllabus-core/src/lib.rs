//! syllabus-core - one syllabus in, three documents out
//!
//! Splits a syllabus DOCX into a work program, an annotation and an
//! assessment fund. Each variant is produced by running a fixed recipe of
//! section-range steps over its own copy of the document body and then
//! prepending a title page.
//!
//! # Example
//!
//! ```
//! use syllabus_core::extract::truncate_leading;
//! use syllabus_ooxml::{XmlElement, XmlNode};
//!
//! let mut blocks: Vec<XmlNode> = ["Cover", "Место дисциплины в структуре", "Body"]
//!     .iter()
//!     .map(|text| XmlElement::new("w:p").with_text(text).into())
//!     .collect();
//!
//! let removed = truncate_leading(&mut blocks, "местодисциплинывструктуре")?;
//! assert_eq!(removed, 1);
//! assert_eq!(blocks[0].text_content(), "Место дисциплины в структуре");
//! # Ok::<(), syllabus_core::ExtractError>(())
//! ```

pub mod block;
pub mod convert;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod recipe;
pub mod title;
pub mod variant;

// Re-export main types and functions
pub use block::Block;
pub use convert::{split_document, Conversion, OutputBundle, SplitDocument, DEFAULT_OUTPUT_DIR_NAME};
pub use error::{ExtractError, Result, SplitError};
pub use extract::{Boundary, SubsectionRange};
pub use recipe::{Recipe, Step};
pub use title::insert_title_page;
pub use variant::{Titles, Variant};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "1.0.0");
    }
}
