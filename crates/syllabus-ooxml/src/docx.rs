//! An editable DOCX package
//!
//! Pairs the unpacked archive with the parsed main document part. Every other
//! part (styles, numbering, relationships, media) is carried through
//! byte-for-byte; only `word/document.xml` is re-serialized on save.

use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use crate::archive::{OoxmlArchive, DOCUMENT_XML_PATH};
use crate::document::DocumentPart;
use crate::error::Result;

/// A loaded word-processing document
#[derive(Debug, Clone)]
pub struct Docx {
    archive: OoxmlArchive,
    document: DocumentPart,
}

impl Docx {
    /// Load a DOCX file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading document");
        Self::from_archive(OoxmlArchive::open(path)?)
    }

    /// Load from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_archive(OoxmlArchive::from_reader(reader)?)
    }

    /// Load from in-memory DOCX bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Parse the main document part of an already unpacked archive
    pub fn from_archive(archive: OoxmlArchive) -> Result<Self> {
        let document = DocumentPart::parse(archive.document_xml()?)?;
        Ok(Self { archive, document })
    }

    /// The main document part
    pub fn document(&self) -> &DocumentPart {
        &self.document
    }

    /// Mutable access to the main document part
    pub fn document_mut(&mut self) -> &mut DocumentPart {
        &mut self.document
    }

    /// The underlying archive, as loaded
    pub fn archive(&self) -> &OoxmlArchive {
        &self.archive
    }

    /// Consume the document, returning an archive with the edited body
    pub fn into_archive(mut self) -> OoxmlArchive {
        self.archive
            .set_string(DOCUMENT_XML_PATH, self.document.to_xml());
        self.archive
    }

    /// Write the package to any writer
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        self.clone().into_archive().write_to(writer)
    }

    /// Serialize the package to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.write_to(&mut buffer)?;
        Ok(buffer.into_inner())
    }

    /// Save the package to a file, replacing any existing file
    pub fn save_as<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.clone().into_archive().write_to_file(path)?;
        tracing::debug!(path = %path.display(), "saved document");
        Ok(())
    }
}
