//! Error types for extraction and conversion

use std::path::PathBuf;

use syllabus_ooxml::OoxmlError;
use thiserror::Error;

use crate::variant::Variant;

/// A range operation could not locate the boundary it needs
///
/// Every operation that returns one of these has left its block sequence
/// untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No block at or after the scan start contains the stop phrase
    #[error("section boundary not found: no block contains \"{phrase}\"")]
    BoundaryNotFound { phrase: String },

    /// No top-level block contains the section phrase
    #[error("section not found: no top-level block contains \"{phrase}\"")]
    SectionNotFound { phrase: String },

    /// The section exists but none of its child blocks repeats the phrase
    #[error("nested heading \"{phrase}\" not found inside its section")]
    NestedHeadingNotFound { phrase: String },

    /// A positional step needs more blocks than the document has
    #[error("expected at least {needed} blocks, found {available}")]
    NotEnoughBlocks { needed: usize, available: usize },
}

/// Errors that can occur while splitting one source document
#[derive(Error, Debug)]
pub enum SplitError {
    /// The source could not be loaded or an output could not be encoded
    #[error(transparent)]
    Ooxml(#[from] OoxmlError),

    /// A recipe step failed; the variant's output would be visually broken
    #[error("{variant}: recipe step {step} failed")]
    Recipe {
        variant: Variant,
        step: usize,
        #[source]
        source: ExtractError,
    },

    /// Creating or clearing the output directory failed
    #[error("cannot prepare output directory {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing one of the output documents failed
    #[error("cannot write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: OoxmlError,
    },

    /// The source path has no usable file name
    #[error("invalid source path: {0}")]
    InvalidSource(String),
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, SplitError>;
