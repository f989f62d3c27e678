// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Batch evaluation of submission files.
//!
//! Each file is read, decoded and validated on its own; a broken file is
//! recorded and the batch moves on. The aggregate passes only when every
//! file decoded and produced no errors.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use crate::logic::rules::validate;
use crate::models::{Findings, ValidationTier};
use crate::utils::{label_from_path, parse_json_with_comments};

/// What happened to one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The file could not be read from disk.
    Unreadable { message: String },
    /// The text is not JSON once comments are stripped; rules did not run.
    ParseError { message: String },
    /// The rule engine ran.
    Checked(Findings),
}

/// Outcome for one submission file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// File name as shown to the submitter.
    pub file: String,
    /// Subdomain label derived from the file name.
    pub label: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn passed(&self) -> bool {
        matches!(&self.outcome, FileOutcome::Checked(findings) if findings.passed())
    }

    /// Whether the rule engine ran for this file.
    pub fn checked(&self) -> bool {
        matches!(self.outcome, FileOutcome::Checked(_))
    }
}

/// Aggregated outcome for one invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub tier: ValidationTier,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Logical AND of every per-file outcome.
    pub fn passed(&self) -> bool {
        self.files.iter().all(FileReport::passed)
    }

    /// Number of files that decoded and went through the rule engine.
    pub fn checked_count(&self) -> usize {
        self.files.iter().filter(|f| f.checked()).count()
    }
}

/// List the `*.json` submissions directly inside `dir`, sorted by file name.
///
/// # Errors
///
/// Fails when `dir` is missing or cannot be listed.
pub fn collect_submissions(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("domains directory not found: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("Failed to list domains directory {:?}", dir))?;
        let is_json = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(".json"));
        if entry.file_type().is_file() && is_json {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Read, decode and validate a single submission file.
pub fn check_file(path: &Path, tier: ValidationTier) -> FileReport {
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let label = label_from_path(path);

    let outcome = match read_submission(path) {
        Err(err) => FileOutcome::Unreadable {
            message: format!("{err:#}"),
        },
        Ok(text) => match parse_json_with_comments(&text) {
            Err(err) => FileOutcome::ParseError {
                message: err.to_string(),
            },
            Ok(document) => FileOutcome::Checked(validate(&label, &document, tier)),
        },
    };

    tracing::debug!(file = %file, label = %label, ?outcome, "evaluated submission");
    FileReport {
        file,
        label,
        outcome,
    }
}

fn read_submission(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read submission {:?}", path))
}

/// Evaluate every file independently; report order follows `paths`.
pub fn run_batch(paths: &[PathBuf], tier: ValidationTier) -> BatchReport {
    tracing::info!(tier = %tier, files = paths.len(), "starting validation");

    let files: Vec<FileReport> = paths.par_iter().map(|p| check_file(p, tier)).collect();
    let report = BatchReport { tier, files };

    tracing::info!(
        passed = report.passed(),
        checked = report.checked_count(),
        "validation finished"
    );
    report
}
