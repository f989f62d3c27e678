// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Subdomain label helpers shared by the runner and the rule engine.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// RFC 1123 style label: 1-63 chars of `[a-z0-9-]`, no leading or trailing hyphen.
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").expect("label pattern is valid")
});

/// Whether `label` is an acceptable single DNS label.
pub fn is_valid_label(label: &str) -> bool {
    LABEL_RE.is_match(label)
}

/// Derive the requested subdomain from a submission file name.
///
/// Drops a trailing `.json` and lowercases the rest; the result is not
/// validated here.
pub fn label_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.strip_suffix(".json")
        .unwrap_or(&name)
        .to_lowercase()
}
