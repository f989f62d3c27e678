// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring the command line to the batch runner.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::logic::report::{OutputFormat, render_json, render_text};
use crate::logic::runner::{collect_submissions, run_batch};
use crate::models::ValidationTier;

/// Validate subdomain record submissions before they are merged.
#[derive(Debug, Parser)]
#[command(name = "subgate", version, about)]
pub struct Cli {
    /// Validation tier: loose, normal or strict. Unknown values fall back to loose.
    #[arg(long, env = "VALIDATION_MODE")]
    pub mode: Option<String>,

    /// Directory holding one `<subdomain>.json` file per record.
    #[arg(long, default_value = "domains")]
    pub dir: PathBuf,

    /// Output style for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable logging entirely.
    #[arg(short, long)]
    pub quiet: bool,

    /// Check only these files instead of scanning `--dir`.
    pub files: Vec<PathBuf>,
}

/// Install the stderr log subscriber.
///
/// `SUBGATE_LOG` takes an `EnvFilter` directive; `--verbose` and `--quiet`
/// override it.
fn init_tracing(quiet: bool, verbose: bool) {
    let filter = if quiet {
        EnvFilter::new("off")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SUBGATE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .try_init()
        .ok();
}

/// Parse arguments, validate the batch and map the outcome to an exit status.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    // Read once; every file in this run uses the same tier.
    let tier = ValidationTier::from_config(cli.mode.as_deref());

    let paths = if cli.files.is_empty() {
        collect_submissions(&cli.dir)?
    } else {
        cli.files
    };
    let report = run_batch(&paths, tier);

    match cli.format {
        OutputFormat::Text => render_text(&report, &mut io::stdout(), &mut io::stderr())
            .context("Failed to write report")?,
        OutputFormat::Json => render_json(&report, &mut io::stdout())?,
    }

    Ok(if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
