// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Strictness tiers that decide which policy checks block a submission.

use std::fmt;

use serde::Serialize;

/// Validation strictness, ordered `Loose < Normal < Strict`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationTier {
    /// Basic shape only; policy violations are reported as warnings.
    #[default]
    Loose,
    /// Reserved names, blocklisted keywords and ownership become errors.
    Normal,
    /// Adds contact requirements and per-type target grammars.
    Strict,
}

impl ValidationTier {
    /// Map a configuration token onto a tier.
    ///
    /// Matching ignores ASCII case and surrounding whitespace. Returns `None`
    /// for anything that is not one of `loose`, `normal`, `strict`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "loose" => Some(Self::Loose),
            "normal" => Some(Self::Normal),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }

    /// Resolve the process-wide tier from an optional configuration value.
    ///
    /// Unset, empty or unrecognized values fall back to [`ValidationTier::Loose`].
    pub fn from_config(raw: Option<&str>) -> Self {
        match raw {
            None => Self::default(),
            Some(value) if value.trim().is_empty() => Self::default(),
            Some(value) => Self::parse(value).unwrap_or_else(|| {
                tracing::warn!(mode = value, "unrecognized validation mode, using loose");
                Self::default()
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loose => "loose",
            Self::Normal => "normal",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for ValidationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ValidationTier;

    // Tiers are totally ordered by strictness.
    #[test]
    fn tiers_are_ordered_by_strictness() {
        assert!(ValidationTier::Loose < ValidationTier::Normal);
        assert!(ValidationTier::Normal < ValidationTier::Strict);
    }

    // Known tokens parse regardless of case and padding.
    #[test]
    fn from_config_accepts_known_tokens() {
        assert_eq!(
            ValidationTier::from_config(Some(" STRICT ")),
            ValidationTier::Strict
        );
        assert_eq!(
            ValidationTier::from_config(Some("normal")),
            ValidationTier::Normal
        );
    }

    // Anything else means loose.
    #[test]
    fn from_config_defaults_to_loose() {
        assert_eq!(ValidationTier::from_config(None), ValidationTier::Loose);
        assert_eq!(ValidationTier::from_config(Some("")), ValidationTier::Loose);
        assert_eq!(
            ValidationTier::from_config(Some("paranoid")),
            ValidationTier::Loose
        );
    }
}
