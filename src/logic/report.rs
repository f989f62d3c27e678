// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Console rendering of a batch report.
//!
//! Informational lines (warnings, the success banner) go to `out`, blocking
//! problems go to `err`, matching how CI logs separate stdout and stderr.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::logic::runner::{BatchReport, FileOutcome};

/// Output style selected on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable console report.
    #[default]
    Text,
    /// One JSON document describing every file.
    Json,
}

/// Write the human-readable report.
pub fn render_text(
    report: &BatchReport,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    writeln!(
        out,
        "🔍 Starting PR Validation (Mode: {})...\n",
        report.tier.as_str().to_ascii_uppercase()
    )?;

    for file in &report.files {
        match &file.outcome {
            FileOutcome::Unreadable { message } => {
                writeln!(err, "❌ [{}] Read Error:", file.file)?;
                writeln!(err, "   {message}\n")?;
            }
            FileOutcome::ParseError { message } => {
                writeln!(err, "❌ [{}] JSON Parse Error:", file.file)?;
                writeln!(err, "   {message}")?;
                writeln!(err, "   Please check for missing commas or unescaped quotes.\n")?;
            }
            FileOutcome::Checked(findings) => {
                if !findings.warnings.is_empty() {
                    writeln!(out, "⚠️ [{}] Warnings:", file.file)?;
                    for warning in &findings.warnings {
                        writeln!(out, "   - {warning}")?;
                    }
                }
                if !findings.errors.is_empty() {
                    writeln!(err, "❌ [{}] Validation Failed:", file.file)?;
                    for error in &findings.errors {
                        writeln!(err, "   - {error}")?;
                    }
                    writeln!(err)?;
                }
            }
        }
    }

    if report.passed() {
        writeln!(
            out,
            "\n✅ All {} domain files passed validation! Ready to merge.",
            report.checked_count()
        )?;
    } else {
        writeln!(
            err,
            "🚨 Validation failed! Please fix the errors above before merging."
        )?;
    }
    Ok(())
}

/// Write the report as pretty-printed JSON.
pub fn render_json(report: &BatchReport, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).context("Failed to serialize report")?;
    writeln!(out).context("Failed to write report")?;
    Ok(())
}
