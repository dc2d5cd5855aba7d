use std::str::FromStr;

use crate::error::MatchError;

/// The search target: an ordered, non-empty sequence of words.
///
/// Built by splitting the caller's string on any whitespace run; empty
/// tokens are dropped, punctuation stays attached to its word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    words: Vec<String>,
}

impl Phrase {
    pub fn parse(input: &str) -> Result<Self, MatchError> {
        let words: Vec<String> = input.split_whitespace().map(str::to_owned).collect();
        if words.is_empty() {
            return Err(MatchError::EmptyPhrase);
        }
        Ok(Self { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        // Construction rejects empty phrases; kept for API completeness.
        self.words.is_empty()
    }
}

impl FromStr for Phrase {
    type Err = MatchError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}
