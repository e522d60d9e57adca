//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::batch::{run_batch, BatchOptions};
use crate::config::Settings;

/// Output format for the batch report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable progress and summary
    #[default]
    Text,
    /// JSON report on stdout, nothing else
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "syllabus-split")]
#[command(
    author,
    version,
    about = "Split syllabus DOCX files into a work program, an annotation and an assessment fund",
    long_about = None
)]
pub struct Cli {
    /// Directory containing the source documents [default: documents]
    pub input: Option<PathBuf>,

    /// Configuration file path [default: ./syllabus-split.toml if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report format (text or json)
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Stop at the first file that cannot be split
    #[arg(long)]
    pub fail_fast: bool,

    /// Do not delete the output directory before processing
    #[arg(long)]
    pub keep_dist: bool,

    /// Wait for Enter before exiting
    #[arg(long)]
    pub pause: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Run the CLI application
///
/// Parses arguments, runs the batch and maps the report to the exit code:
/// 0 when every file was split, 1 when any file failed.
pub fn run_cli() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(&cli);
    if cli.pause {
        pause()?;
    }
    result
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the verbosity
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded or under test
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Run a parsed command line
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let settings = Settings::load(cli.config.as_deref())?;
    let input_dir = cli.input.clone().unwrap_or_else(|| settings.input.dir.clone());
    let text = cli.format == OutputFormat::Text;

    if text {
        println!("syllabus-split v{}", syllabus_core::VERSION);
        println!("Splitting: {}", input_dir.display());
    }

    let options = BatchOptions {
        input_dir,
        fail_fast: cli.fail_fast,
        keep_dist: cli.keep_dist,
    };
    let report = run_batch(&settings, &options, |path| {
        if text {
            println!("{}", path.display());
        }
    })?;

    match cli.format {
        OutputFormat::Text => {
            println!();
            println!("{}", report.to_text());
            println!("Finished!");
        }
        OutputFormat::Json => {
            let json = report.to_json().context("Failed to serialize report")?;
            println!("{}", json);
        }
    }

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn pause() -> Result<()> {
    print!("Press Enter to exit...");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
