// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by the rule engine and the batch runner.

pub mod jsonc;
pub mod label;

/// Decode JSON-with-comments into a plain document.
pub use jsonc::parse_json_with_comments;
/// Label grammar and file-name derivation.
pub use label::{is_valid_label, label_from_path};
