//! Error types for DOCX package handling

use thiserror::Error;

/// Errors raised while unpacking, parsing or repacking a package
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// The file is not a readable ZIP container
    #[error("not a valid DOCX package: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A part is not well-formed XML
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An element carries an attribute quick-xml cannot read
    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// The package lacks a part every word-processing document has
    #[error("package part not found: {0}")]
    MissingFile(String),

    /// The XML is well-formed but not shaped like a WordprocessingML part
    #[error("unexpected document structure: {0}")]
    InvalidStructure(String),
}

/// Result type for package operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
