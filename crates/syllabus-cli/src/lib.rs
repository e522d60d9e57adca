//! syllabus-split CLI - Command-line interface library
//!
//! Splits every syllabus in a directory into its work program, annotation
//! and assessment fund, writing them to `<dir>/dist/<name>/`.
//!
//! # Library Usage
//!
//! ```no_run
//! use syllabus_cli::{run_batch, BatchOptions, Settings};
//!
//! let options = BatchOptions {
//!     input_dir: "documents".into(),
//!     ..Default::default()
//! };
//! let report = run_batch(&Settings::default(), &options, |path| println!("{}", path.display()))?;
//! println!("{}", report.to_text());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Split everything in ./documents
//! syllabus-split
//!
//! # Another directory, JSON report, stop at the first broken file
//! syllabus-split sources --format json --fail-fast
//! ```

pub mod app;
pub mod batch;
pub mod config;
pub mod report;
pub mod retry;

// Re-export main entry point and types
pub use app::{init_tracing, run, run_cli, Cli, OutputFormat};
pub use batch::{discover_inputs, process_file, run_batch, BatchOptions};
pub use config::Settings;
pub use report::{BatchReport, FileOutcome, Outcome};
pub use retry::RetryPolicy;
