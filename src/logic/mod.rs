// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic: the tiered rule engine, batch evaluation and reporting.

pub mod report;
pub mod rules;
pub mod runner;
