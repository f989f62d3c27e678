// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Classified validation output for one submission.

use serde::Serialize;

/// Ordered blocking errors and non-blocking warnings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Findings {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Findings {
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// A submission passes when nothing blocks it; warnings never do.
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}
