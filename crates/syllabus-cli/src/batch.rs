//! Batch processing of an input directory
//!
//! Every source is processed on its own: a file whose sections cannot be
//! found is logged, recorded in the report and skipped, and the batch moves
//! on to the next file unless fail-fast is requested.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glob::{glob_with, MatchOptions, Pattern};
use syllabus_core::Conversion;

use crate::config::Settings;
use crate::report::{BatchReport, FileOutcome, Outcome};

/// Prefix of the owner files Word keeps next to an open document
const OWNER_FILE_PREFIX: &str = "~$";

/// Per-run switches that are not part of the settings file
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub input_dir: PathBuf,
    /// Stop at the first failing file
    pub fail_fast: bool,
    /// Leave the existing output directory in place before processing
    pub keep_dist: bool,
}

/// Source files directly inside `dir` with the given extension, sorted
///
/// The extension is matched case-insensitively. Word owner files (`~$...`)
/// and anything that is not a regular file are skipped.
pub fn discover_inputs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Input directory not found: {}", dir.display());
    }

    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&dir.display().to_string()),
        Pattern::escape(extension)
    );
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut inputs = Vec::new();
    for entry in glob_with(&pattern, options).with_context(|| format!("Invalid glob pattern: {}", pattern))? {
        match entry {
            Ok(path) => {
                let is_owner_file = path
                    .file_name()
                    .is_some_and(|name| name.to_string_lossy().starts_with(OWNER_FILE_PREFIX));
                if is_owner_file || !path.is_file() {
                    tracing::debug!(path = %path.display(), "skipping");
                    continue;
                }
                inputs.push(path);
            }
            Err(e) => tracing::warn!("Could not read {}", e),
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Split one source into its output directory
///
/// `written` holds the output directories saved earlier in the run, compared
/// case-insensitively. A source whose directory is taken (`a.docx` next to
/// `a.DOCX`) fails and leaves the earlier outputs in place.
pub fn process_file(path: &Path, settings: &Settings, written: &mut HashSet<String>) -> Result<Vec<PathBuf>> {
    let bundle = Conversion::open(path)?
        .with_titles(settings.titles.clone())
        .with_output_dir_name(settings.output.dir_name.as_str())
        .split()?;

    let output_dir = bundle.output_dir();
    let key = output_dir.to_string_lossy().to_lowercase();
    if written.contains(&key) {
        bail!(
            "Duplicate output directory {}: already written by another input in this run",
            output_dir.display()
        );
    }

    let outputs = bundle.save()?;
    written.insert(key);
    Ok(outputs)
}

/// Process every source in the input directory
///
/// `on_start` is called with each input path before it is processed. Errors
/// that prevent the batch from starting (missing input directory, output
/// directory that stays locked) are returned; per-file failures end up in
/// the report.
pub fn run_batch<F>(settings: &Settings, options: &BatchOptions, mut on_start: F) -> Result<BatchReport>
where
    F: FnMut(&Path),
{
    let dir = &options.input_dir;
    let inputs = discover_inputs(dir, settings.extension())?;
    tracing::info!(dir = %dir.display(), count = inputs.len(), "found inputs");

    if !options.keep_dist {
        let dist = dir.join(&settings.output.dir_name);
        settings
            .cleanup
            .retry_policy()
            .remove_dir_all(&dist)
            .with_context(|| format!("Failed to delete output directory: {}", dist.display()))?;
    }

    let mut written = HashSet::new();
    let mut report = BatchReport::default();
    for (index, input) in inputs.iter().enumerate() {
        on_start(input);

        let outcome = match process_file(input, settings, &mut written) {
            Ok(outputs) => Outcome::Ok { outputs },
            Err(e) => {
                let error = format!("{:#}", e);
                tracing::error!(input = %input.display(), "{}", error);
                Outcome::Failed { error }
            }
        };
        let failed = matches!(outcome, Outcome::Failed { .. });
        report.processed.push(FileOutcome {
            input: input.clone(),
            outcome,
        });

        if failed && options.fail_fast {
            report.stopped_early = index + 1 < inputs.len();
            break;
        }
    }
    Ok(report)
}
