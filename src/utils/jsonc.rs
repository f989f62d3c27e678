// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Decode JSON documents that carry `//` line and `/* */` block comments.
//!
//! Submitters annotate their record files freely, so comments are removed
//! before handing the text to `serde_json`. String literals are copied through
//! untouched: a redirect target such as `"https://example.com"` keeps its `//`.

use serde_json::Value;
use thiserror::Error;

/// The submitted text is not valid JSON once comments are removed.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct ParseError {
    #[from]
    source: serde_json::Error,
}

/// Scanner position relative to string literals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    Outside,
    InString,
}

/// Remove comments that appear outside of string literals.
///
/// Single left-to-right pass: a double quote opens or closes a literal
/// (backslash escapes are copied as a pair), and comment markers only count
/// while outside a literal. Line comments stop before the newline so line
/// numbers in later diagnostics stay aligned. An unterminated block comment is
/// left in place so the JSON parser reports it.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = ScanState::Outside;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match state {
            ScanState::InString => {
                out.push(ch);
                match ch {
                    '\\' => {
                        if let Some((_, escaped)) = chars.next() {
                            out.push(escaped);
                        }
                    }
                    '"' => state = ScanState::Outside,
                    _ => {}
                }
            }
            ScanState::Outside => match ch {
                '"' => {
                    out.push(ch);
                    state = ScanState::InString;
                }
                '\\' => {
                    // Stray escape outside a literal: keep the pair so `\"` cannot open a string.
                    out.push(ch);
                    if let Some((_, escaped)) = chars.next() {
                        out.push(escaped);
                    }
                }
                '/' => match chars.peek().map(|&(_, next)| next) {
                    Some('/') => {
                        while let Some(&(_, next)) = chars.peek() {
                            if next == '\n' {
                                break;
                            }
                            chars.next();
                        }
                    }
                    Some('*') => match text[idx + 2..].find("*/") {
                        Some(rel_end) => {
                            let resume = idx + 2 + rel_end + 2;
                            while chars.peek().is_some_and(|&(pos, _)| pos < resume) {
                                chars.next();
                            }
                        }
                        None => out.push(ch),
                    },
                    _ => out.push(ch),
                },
                _ => out.push(ch),
            },
        }
    }

    out
}

/// Parse JSON-with-comments into a plain document.
///
/// # Errors
///
/// Returns [`ParseError`] when the comment-free text is not well-formed JSON
/// (trailing commas, unescaped quotes, truncated input, ...).
///
/// # Examples
///
/// ```rust,ignore
/// let doc = parse_json_with_comments(r#"{ "url": "https://a.b" // target
/// }"#)?;
/// assert_eq!(doc["url"], "https://a.b");
/// ```
pub fn parse_json_with_comments(text: &str) -> Result<Value, ParseError> {
    let cleaned = strip_comments(text);
    Ok(serde_json::from_str(&cleaned)?)
}
