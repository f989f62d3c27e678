// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: submission data, tiers and findings shared by the rule engine and runner.

pub mod findings;
pub mod submission;
pub mod tier;

pub use findings::Findings;
pub use submission::{RecordSubmission, RecordType};
pub use tier::ValidationTier;
