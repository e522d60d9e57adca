//! Configuration settings
//!
//! Loaded from an optional TOML file; every section and key may be omitted.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use syllabus_core::{Titles, DEFAULT_OUTPUT_DIR_NAME};

use crate::retry::RetryPolicy;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "syllabus-split.toml";

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Where the sources are read from
    pub input: InputSettings,
    /// Where the results are written
    pub output: OutputSettings,
    /// Retry behaviour when deleting the output directory
    pub cleanup: CleanupSettings,
    /// Title page text per variant
    pub titles: Titles,
}

/// Input discovery settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Directory scanned when no input directory is passed
    pub dir: PathBuf,
    /// Extension of the source files, matched case-insensitively
    pub extension: String,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("documents"),
            extension: "docx".to_string(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Name of the directory created inside the input directory
    pub dir_name: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir_name: DEFAULT_OUTPUT_DIR_NAME.to_string(),
        }
    }
}

/// Bounded exponential backoff for deleting a directory that is in use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupSettings {
    pub attempts: u32,
    pub initial_delay_ms: u64,
    pub backoff_factor: u32,
    pub max_delay_ms: u64,
}

impl Default for CleanupSettings {
    fn default() -> Self {
        Self {
            attempts: 3,
            initial_delay_ms: 500,
            backoff_factor: 2,
            max_delay_ms: 4000,
        }
    }
}

impl CleanupSettings {
    /// The retry policy these settings describe
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.attempts,
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            backoff_factor: self.backoff_factor,
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load settings from `path`, or from [`DEFAULT_CONFIG_FILE`] in the
    /// working directory if present, or fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Self::read(path)?
            }
            None => {
                let candidate = Path::new(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    Self::read(candidate)?
                } else {
                    Self::default()
                }
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let settings = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Reject values the batch cannot work with
    pub fn validate(&self) -> Result<()> {
        let extension = self.input.extension.trim_start_matches('.');
        if extension.is_empty() {
            bail!("input.extension must not be empty");
        }
        if extension.contains(['*', '?', '[', ']', '/', '\\']) {
            bail!("input.extension must be a plain extension: {:?}", self.input.extension);
        }

        let dir_name = &self.output.dir_name;
        if dir_name.is_empty() || dir_name == "." || dir_name == ".." || dir_name.contains(['/', '\\']) {
            bail!("output.dir_name must be a single directory name: {:?}", dir_name);
        }

        if self.cleanup.attempts == 0 {
            bail!("cleanup.attempts must be at least 1");
        }
        if self.cleanup.backoff_factor == 0 {
            bail!("cleanup.backoff_factor must be at least 1");
        }
        Ok(())
    }

    /// Source extension without a leading dot
    pub fn extension(&self) -> &str {
        self.input.extension.trim_start_matches('.')
    }
}
