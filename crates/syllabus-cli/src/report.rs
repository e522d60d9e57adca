//! Batch report

use std::path::PathBuf;

use serde::Serialize;

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// All three documents were written
    Ok { outputs: Vec<PathBuf> },
    /// The file was skipped; `error` holds the full cause chain
    Failed { error: String },
}

/// Result for one input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Ok { .. })
    }
}

/// Result of a whole batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub processed: Vec<FileOutcome>,
    /// Set when `--fail-fast` stopped the run before every input was seen
    pub stopped_early: bool,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.processed.iter().filter(|f| f.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.processed.len() - self.succeeded()
    }

    /// Whether every processed file succeeded
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    /// Human-readable summary, one line per file
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for file in &self.processed {
            match &file.outcome {
                Outcome::Ok { outputs } => {
                    out.push_str(&format!("  ✓ {}\n", file.input.display()));
                    for path in outputs {
                        out.push_str(&format!("      -> {}\n", path.display()));
                    }
                }
                Outcome::Failed { error } => {
                    out.push_str(&format!("  ✗ {}: {}\n", file.input.display(), error));
                }
            }
        }
        out.push_str(&format!(
            "Processed {} file(s): {} succeeded, {} failed",
            self.processed.len(),
            self.succeeded(),
            self.failed()
        ));
        if self.stopped_early {
            out.push_str(" (stopped at first failure)");
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
