//! Locate a multi-word phrase inside the noisy word stream of an OCR
//! backend and return candidate regions ranked by match confidence.
//!
//! The matcher runs a single left-to-right pass over the recognized words,
//! accepting a word when its edit distance to the next expected phrase
//! word stays under a fuzzy threshold. Contiguous runs that cover the whole
//! phrase become [`PhraseMatch`]es: the enclosing box of the run, mapped
//! back to pre-upscaling coordinates, plus the mean edit distance as the
//! confidence value (lower is better).

mod config;
mod distance;
mod error;
mod finder;
mod matcher;
mod phrase;

pub use config::{DEFAULT_FUZZY_THRESHOLD, MatcherConfig};
pub use distance::edit_distance;
pub use error::MatchError;
pub use finder::PhraseFinder;
pub use matcher::{PhraseMatch, PhraseMatcher};
pub use phrase::Phrase;
