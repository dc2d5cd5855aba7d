use std::cmp::Ordering;

use ocr::{BoundingBox, RecognizedWord};
use tracing::{debug, trace};
use unicode_normalization::UnicodeNormalization;

use crate::config::MatcherConfig;
use crate::distance::edit_distance;
use crate::error::MatchError;
use crate::phrase::Phrase;

/// A completed phrase match.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseMatch {
    /// Smallest rectangle enclosing every matched word, in original
    /// (pre-upscaling) image coordinates.
    pub region: BoundingBox,
    /// Mean edit distance across the matched words. Lower is better, and
    /// result lists are sorted ascending on this field; callers keying off
    /// "highest confidence" would get the ordering backwards.
    pub confidence: f32,
}

/// The candidate run being accumulated.
///
/// One component per satisfied phrase word, so the index of the next
/// expected word is always `components.len()`; an empty vec is the idle
/// state.
#[derive(Debug, Default)]
struct MatchRun {
    components: Vec<(BoundingBox, usize)>,
}

impl MatchRun {
    fn position(&self) -> usize {
        self.components.len()
    }

    fn is_idle(&self) -> bool {
        self.components.is_empty()
    }

    fn advance(&mut self, bbox: BoundingBox, distance: usize) {
        self.components.push((bbox, distance));
    }

    fn reset(&mut self) {
        self.components.clear();
    }

    /// Fold the accumulated components into a match and return to idle.
    fn complete(&mut self, scale_factor: u32) -> PhraseMatch {
        let mut region: Option<BoundingBox> = None;
        let mut distance_sum = 0usize;
        for (bbox, distance) in &self.components {
            region = Some(match region {
                Some(enclosing) => enclosing.union(bbox),
                None => bbox.clone(),
            });
            distance_sum += distance;
        }
        let confidence = distance_sum as f32 / self.components.len().max(1) as f32;
        let region = region
            .unwrap_or_else(|| BoundingBox::new(0, 0, 0, 0))
            .scaled_down(scale_factor);
        self.reset();
        PhraseMatch { region, confidence }
    }
}

/// Single-pass fuzzy matcher over an OCR word stream.
pub struct PhraseMatcher {
    config: MatcherConfig,
}

impl PhraseMatcher {
    pub fn new(config: MatcherConfig) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Find every contiguous run of `words` that covers `phrase`, ranked
    /// best (lowest mean edit distance) first.
    ///
    /// `scale_factor` is the upscale the OCR backend saw; match regions
    /// are divided by it to land in original image coordinates.
    ///
    /// Each word is tested only against the next expected phrase word. A
    /// word that fails the test resets the run and is NOT re-tried against
    /// the first phrase word, so occurrences overlapping a discarded
    /// prefix are not found. An empty or unsatisfying stream yields an
    /// empty vec, which is a successful "not found".
    pub fn find_phrase<'a, I>(
        &self,
        words: I,
        phrase: &Phrase,
        scale_factor: u32,
    ) -> Result<Vec<PhraseMatch>, MatchError>
    where
        I: IntoIterator<Item = &'a RecognizedWord>,
    {
        if scale_factor == 0 {
            return Err(MatchError::InvalidScaleFactor);
        }

        let expected: Vec<String> = phrase.words().iter().map(|w| self.fold(w)).collect();
        let mut matches = Vec::new();
        let mut run = MatchRun::default();

        for word in words {
            let text = self.fold(&word.text);
            let distance = edit_distance(&text, &expected[run.position()]);
            if distance < self.config.fuzzy_threshold {
                run.advance(word.bbox.clone(), distance);
                if run.position() == expected.len() {
                    let hit = run.complete(scale_factor);
                    debug!(confidence = hit.confidence, "phrase run completed");
                    matches.push(hit);
                }
            } else {
                if !run.is_idle() {
                    trace!(position = run.position(), word = %word.text, "run reset");
                }
                run.reset();
            }
        }

        matches.sort_by(|a, b| {
            a.confidence
                .partial_cmp(&b.confidence)
                .unwrap_or(Ordering::Equal)
        });
        Ok(matches)
    }

    /// Apply the configured normalization and case folding.
    fn fold(&self, text: &str) -> String {
        let folded: String = if self.config.normalize_unicode {
            text.nfkc().collect()
        } else {
            text.to_owned()
        };
        if self.config.case_sensitive {
            folded
        } else {
            folded.to_lowercase()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, x: u32, y: u32, width: u32, height: u32) -> RecognizedWord {
        RecognizedWord::new(BoundingBox::new(x, y, width, height), text.to_string())
    }

    fn stream(texts: &[&str]) -> Vec<RecognizedWord> {
        // 1:1 boxes laid out left to right.
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| word(text, i as u32 * 12, 0, 10, 10))
            .collect()
    }

    fn matcher() -> PhraseMatcher {
        PhraseMatcher::new(MatcherConfig::default()).unwrap()
    }

    fn phrase(input: &str) -> Phrase {
        Phrase::parse(input).unwrap()
    }

    #[test]
    fn exact_match_spans_all_words() {
        let words = stream(&["the", "quick", "fox"]);
        let matches = matcher()
            .find_phrase(&words, &phrase("the quick fox"), 1)
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].confidence, 0.0);
        assert_eq!(matches[0].region, BoundingBox::new(0, 0, 34, 10));
    }

    #[test]
    fn light_noise_still_matches() {
        let words = stream(&["the", "qvick", "fox"]);
        let matches = matcher()
            .find_phrase(&words, &phrase("the quick fox"), 1)
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert!((matches[0].confidence - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn heavy_noise_breaks_the_run() {
        let words = stream(&["the", "zzzzz", "fox"]);
        let matches = matcher()
            .find_phrase(&words, &phrase("the quick fox"), 1)
            .unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn distance_at_threshold_is_rejected() {
        // "qk" is distance 3 from "quick": the test is strictly below.
        let words = stream(&["qk"]);
        let matches = matcher().find_phrase(&words, &phrase("quick"), 1).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn run_resets_on_mismatch_and_recovers_later() {
        let words = stream(&["the", "wrong", "the", "quick", "fox"]);
        let matches = matcher()
            .find_phrase(&words, &phrase("the quick fox"), 1)
            .unwrap();
        assert_eq!(matches.len(), 1);
        // The surviving run starts at the second "the" (x = 24).
        assert_eq!(matches[0].region.x, 24);
        assert_eq!(matches[0].region.right(), 58);
    }

    #[test]
    fn failed_word_is_not_retried_as_first_phrase_word() {
        // After "the quick" the next "the" fails against "fox" and resets
        // the run; it is not reconsidered as a fresh run start, so the
        // trailing "quick fox" alone cannot complete the phrase.
        let words = stream(&["the", "quick", "the", "quick", "fox"]);
        let matches = matcher()
            .find_phrase(&words, &phrase("the quick fox"), 1)
            .unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn multiple_occurrences_rank_by_confidence() {
        let words = stream(&["pay", "nvw", "and", "pay", "now"]);
        let matches = matcher().find_phrase(&words, &phrase("pay now"), 1).unwrap();
        assert_eq!(matches.len(), 2);
        // Exact occurrence first despite appearing later in the stream.
        assert_eq!(matches[0].confidence, 0.0);
        assert_eq!(matches[0].region.x, 36);
        assert!(matches[1].confidence > 0.0);
    }

    #[test]
    fn empty_stream_returns_no_matches() {
        let matches = matcher()
            .find_phrase(&[], &phrase("the quick fox"), 1)
            .unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn single_word_phrase_emits_per_matching_word() {
        let words = stream(&["ok", "cancel", "ok"]);
        let matches = matcher().find_phrase(&words, &phrase("ok"), 1).unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn regions_are_unscaled_by_the_factor() {
        let words = vec![word("go", 30, 30, 30, 30)];
        let matches = matcher().find_phrase(&words, &phrase("go"), 3).unwrap();
        assert_eq!(matches[0].region, BoundingBox::new(10, 10, 10, 10));
    }

    #[test]
    fn zero_scale_factor_is_rejected() {
        let words = stream(&["go"]);
        let result = matcher().find_phrase(&words, &phrase("go"), 0);
        assert!(matches!(result, Err(MatchError::InvalidScaleFactor)));
    }

    #[test]
    fn case_insensitive_config_folds_case() {
        let words = stream(&["Pay", "NOW"]);
        let sensitive = matcher().find_phrase(&words, &phrase("pay now"), 1).unwrap();
        // "Pay"/"pay" and "NOW"/"now" are within distance 3 even without
        // folding; use a longer word to see the config take effect.
        assert_eq!(sensitive.len(), 1);

        let words = stream(&["CONFIRM"]);
        let sensitive = matcher().find_phrase(&words, &phrase("confirm"), 1).unwrap();
        assert!(sensitive.is_empty());

        let folding = PhraseMatcher::new(MatcherConfig {
            case_sensitive: false,
            ..MatcherConfig::default()
        })
        .unwrap();
        let folded = folding.find_phrase(&words, &phrase("confirm"), 1).unwrap();
        assert_eq!(folded.len(), 1);
        assert_eq!(folded[0].confidence, 0.0);
    }

    #[test]
    fn nfkc_folding_merges_compatibility_forms() {
        // Full-width letters normalize to ASCII under NFKC.
        let words = stream(&["ＯＫＡＹＹ"]);
        let plain = matcher().find_phrase(&words, &phrase("OKAYY"), 1).unwrap();
        assert!(plain.is_empty() || plain[0].confidence > 0.0);

        let normalizing = PhraseMatcher::new(MatcherConfig {
            normalize_unicode: true,
            ..MatcherConfig::default()
        })
        .unwrap();
        let folded = normalizing.find_phrase(&words, &phrase("OKAYY"), 1).unwrap();
        assert_eq!(folded.len(), 1);
        assert_eq!(folded[0].confidence, 0.0);
    }
}
