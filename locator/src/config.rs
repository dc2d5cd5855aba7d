use serde::{Deserialize, Serialize};

use crate::error::MatchError;

/// Edit distances below this value count as a fuzzy match. Tight enough to
/// reject unrelated words, loose enough to absorb one or two misread
/// characters on a typical word.
pub const DEFAULT_FUZZY_THRESHOLD: usize = 3;

/// Configuration for a matching pass.
///
/// Serde-friendly so it can sit inside on-disk run configs; all fields
/// default to the behavior of the original matcher (raw, case-sensitive
/// comparison with a threshold of 3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// A word matches when its edit distance to the expected phrase word
    /// is strictly below this value.
    #[serde(default = "MatcherConfig::default_fuzzy_threshold")]
    pub fuzzy_threshold: usize,
    /// Compare text with case preserved.
    #[serde(default = "MatcherConfig::default_case_sensitive")]
    pub case_sensitive: bool,
    /// NFKC-normalize token and phrase words before comparing. Useful for
    /// full-width/half-width form noise; off by default.
    #[serde(default)]
    pub normalize_unicode: bool,
}

impl MatcherConfig {
    pub(crate) fn default_fuzzy_threshold() -> usize {
        DEFAULT_FUZZY_THRESHOLD
    }

    pub(crate) fn default_case_sensitive() -> bool {
        true
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.fuzzy_threshold == 0 {
            return Err(MatchError::InvalidConfig(
                "fuzzy_threshold must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: Self::default_fuzzy_threshold(),
            case_sensitive: Self::default_case_sensitive(),
            normalize_unicode: false,
        }
    }
}
