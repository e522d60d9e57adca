//! # syllabus-ooxml
//!
//! Lossless OOXML (Office Open XML) package editing for syllabus-split.
//!
//! This crate provides functionality to:
//! - Read and write DOCX packages without disturbing parts it does not edit
//! - Expose the document body as an ordered, mutable sequence of blocks
//! - Build formatted paragraphs to insert into that sequence
//!
//! ## Example: Dropping the first block of a document
//!
//! ```no_run
//! use syllabus_ooxml::Docx;
//!
//! let mut docx = Docx::open("syllabus.docx")?;
//! docx.document_mut().blocks_mut().remove(0);
//! docx.save_as("trimmed.docx")?;
//! # Ok::<(), syllabus_ooxml::OoxmlError>(())
//! ```

pub mod archive;
pub mod document;
pub mod docx;
pub mod error;
pub mod paragraph;
pub mod xml;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use archive::{OoxmlArchive, DOCUMENT_XML_PATH};
pub use document::DocumentPart;
pub use docx::Docx;
pub use error::{OoxmlError, Result};
pub use paragraph::{has_page_break, ParagraphBuilder};
pub use xml::{XmlElement, XmlNode, XmlPart};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
