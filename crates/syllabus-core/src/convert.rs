//! Conversion of one source syllabus into its three derivative documents

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syllabus_ooxml::Docx;

use crate::error::{Result, SplitError};
use crate::recipe::Recipe;
use crate::title::insert_title_page;
use crate::variant::{Titles, Variant};

/// Default name of the output directory created next to the sources
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "dist";

/// One derivative document, trimmed and titled
#[derive(Debug, Clone)]
pub struct SplitDocument {
    pub variant: Variant,
    pub docx: Docx,
}

/// Apply every variant's recipe and title page to its own copy of `source`
///
/// `source` itself is never modified. Fails on the first variant whose
/// recipe cannot find a section boundary.
pub fn split_document(source: &Docx, titles: &Titles) -> Result<Vec<SplitDocument>> {
    Variant::ALL
        .iter()
        .map(|&variant| -> Result<SplitDocument> {
            let mut docx = source.clone();
            let blocks = docx.document_mut().blocks_mut();
            let removed = Recipe::for_variant(variant).apply(blocks)?;
            insert_title_page(blocks, titles.get(variant));
            tracing::debug!(%variant, removed, blocks = blocks.len(), "built variant");
            Ok(SplitDocument { variant, docx })
        })
        .collect()
}

/// A loaded source document and the settings used to split it
#[derive(Debug, Clone)]
pub struct Conversion {
    source: PathBuf,
    docx: Docx,
    titles: Titles,
    output_dir_name: String,
}

impl Conversion {
    /// Load the source document once
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        source_stem(path)?;
        let docx = Docx::open(path)?;
        Ok(Self::from_docx(path, docx))
    }

    /// Wrap an already loaded document that was read from `source`
    pub fn from_docx(source: impl Into<PathBuf>, docx: Docx) -> Self {
        Self {
            source: source.into(),
            docx,
            titles: Titles::default(),
            output_dir_name: DEFAULT_OUTPUT_DIR_NAME.to_string(),
        }
    }

    /// Use custom title page texts
    pub fn with_titles(mut self, titles: Titles) -> Self {
        self.titles = titles;
        self
    }

    /// Use a custom output directory name instead of `dist`
    pub fn with_output_dir_name(mut self, name: impl Into<String>) -> Self {
        self.output_dir_name = name.into();
        self
    }

    /// Path the source was loaded from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Build the three derivative documents in memory
    pub fn split(&self) -> Result<OutputBundle> {
        let stem = source_stem(&self.source)?;
        let extension = self
            .source
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let output_root = self
            .source
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.output_dir_name);

        let documents = split_document(&self.docx, &self.titles)?;
        Ok(OutputBundle {
            stem,
            extension,
            output_root,
            documents,
        })
    }
}

/// The finished documents of one source, ready to be written
#[derive(Debug, Clone)]
pub struct OutputBundle {
    stem: String,
    extension: String,
    output_root: PathBuf,
    documents: Vec<SplitDocument>,
}

impl OutputBundle {
    /// `<source dir>/<dist>/<source stem>`
    pub fn output_dir(&self) -> PathBuf {
        self.output_root.join(&self.stem)
    }

    /// The documents in output order
    pub fn documents(&self) -> &[SplitDocument] {
        &self.documents
    }

    /// Output file name of a variant, keeping the source extension as written
    pub fn file_name(&self, variant: Variant) -> String {
        format!("{}{}", variant.file_stem(), self.extension)
    }

    /// Recreate the output directory and write every document into it
    ///
    /// Anything already in the directory is deleted first, so it ends up
    /// holding exactly the files returned.
    pub fn save(&self) -> Result<Vec<PathBuf>> {
        let dir = self.output_dir();
        let io_error = |source: io::Error| SplitError::Io {
            path: dir.clone(),
            source,
        };

        match fs::remove_dir_all(&dir) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(io_error(e)),
            _ => {}
        }
        fs::create_dir_all(&dir).map_err(io_error)?;

        let mut written = Vec::with_capacity(self.documents.len());
        for document in &self.documents {
            let path = dir.join(self.file_name(document.variant));
            document
                .docx
                .save_as(&path)
                .map_err(|source| SplitError::Write {
                    path: path.clone(),
                    source,
                })?;
            tracing::info!(path = %path.display(), "wrote document");
            written.push(path);
        }
        Ok(written)
    }
}

fn source_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| SplitError::InvalidSource(path.display().to_string()))
}
