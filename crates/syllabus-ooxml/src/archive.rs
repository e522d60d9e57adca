//! The ZIP container of a DOCX package
//!
//! Every part is unpacked into memory on load, so a package can be cloned
//! and the clones edited independently before each is packed again.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::Path;

use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::error::{OoxmlError, Result};

/// Path of the main document part inside a WordprocessingML package
pub const DOCUMENT_XML_PATH: &str = "word/document.xml";

/// Path of the package content-types manifest
pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";

/// An unpacked OOXML package: part name to raw bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OoxmlArchive {
    parts: BTreeMap<String, Vec<u8>>,
}

impl OoxmlArchive {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Unpack every part of a ZIP stream; directory entries are ignored
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut zip = ZipArchive::new(reader)?;
        let mut parts = BTreeMap::new();

        for index in 0..zip.len() {
            let mut entry = zip.by_index(index)?;
            if entry.is_dir() {
                continue;
            }
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut bytes)?;
            parts.insert(entry.name().to_string(), bytes);
        }

        tracing::debug!(parts = parts.len(), "unpacked OOXML archive");
        Ok(Self { parts })
    }

    /// Raw bytes of a part
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.parts.get(path).map(Vec::as_slice)
    }

    /// A part decoded as UTF-8, the encoding of every XML part Word writes
    pub fn get_string(&self, path: &str) -> Result<Option<String>> {
        self.get(path)
            .map(|bytes| {
                String::from_utf8(bytes.to_vec()).map_err(|_| {
                    OoxmlError::InvalidStructure(format!("part {path} is not valid UTF-8"))
                })
            })
            .transpose()
    }

    /// The main document part; every word-processing package has one
    pub fn document_xml(&self) -> Result<&[u8]> {
        self.get(DOCUMENT_XML_PATH)
            .ok_or_else(|| OoxmlError::MissingFile(DOCUMENT_XML_PATH.to_string()))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.parts.contains_key(path)
    }

    /// Part names in sorted order
    pub fn file_list(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Add a part or replace its contents
    pub fn set(&mut self, path: impl Into<String>, contents: Vec<u8>) {
        self.parts.insert(path.into(), contents);
    }

    pub fn set_string(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.set(path, contents.into().into_bytes());
    }

    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.parts.remove(path)
    }

    /// Pack the archive into a new file, replacing any existing one
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Pack the archive with Deflate
    ///
    /// The content-types manifest is written first, then the remaining
    /// parts in name order, so equal archives produce identical entries.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let manifest = self.parts.get_key_value(CONTENT_TYPES_PATH);
        let rest = self
            .parts
            .iter()
            .filter(|(path, _)| path.as_str() != CONTENT_TYPES_PATH);

        for (path, bytes) in manifest.into_iter().chain(rest) {
            zip.start_file(path.as_str(), options)?;
            zip.write_all(bytes)?;
        }

        zip.finish()?;
        Ok(())
    }
}
