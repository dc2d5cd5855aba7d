use anyhow::Context;
use image::DynamicImage;
use ocr::{OcrOptions, WordEngine, upscale_for_recognition};
use tracing::debug;

use crate::config::MatcherConfig;
use crate::error::MatchError;
use crate::matcher::{PhraseMatch, PhraseMatcher};
use crate::phrase::Phrase;

/// Glue between an OCR backend and the phrase matcher: upscales the image,
/// recognizes words, and runs the matcher with the same upscale factor so
/// results land in original image coordinates.
pub struct PhraseFinder<E: WordEngine> {
    engine: E,
    options: OcrOptions,
    matcher: PhraseMatcher,
}

impl<E: WordEngine> PhraseFinder<E> {
    pub fn new(engine: E, options: OcrOptions, config: MatcherConfig) -> Result<Self, MatchError> {
        options.validate()?;
        let matcher = PhraseMatcher::new(config)?;
        Ok(Self {
            engine,
            options,
            matcher,
        })
    }

    pub fn with_defaults(engine: E) -> Result<Self, MatchError> {
        Self::new(engine, OcrOptions::default(), MatcherConfig::default())
    }

    /// Locate `phrase` in `image`, ranked best match first.
    pub fn find_phrase(
        &mut self,
        image: &DynamicImage,
        phrase: &str,
    ) -> Result<Vec<PhraseMatch>, MatchError> {
        let phrase = Phrase::parse(phrase)?;
        let scaled = upscale_for_recognition(image, self.options.upscale_factor);
        let words = self
            .engine
            .recognize_words(&scaled)
            .context("word recognition failed")?;
        debug!(
            engine = self.engine.name(),
            words = words.len(),
            "recognition finished"
        );
        self.matcher
            .find_phrase(&words, &phrase, self.options.upscale_factor)
    }

    /// The single-result policy: best hit only, `None` when not found.
    pub fn best_match(
        &mut self,
        image: &DynamicImage,
        phrase: &str,
    ) -> Result<Option<PhraseMatch>, MatchError> {
        Ok(self.find_phrase(image, phrase)?.into_iter().next())
    }

    /// Raw full-text extraction, no matching involved.
    pub fn read_text(&mut self, image: &DynamicImage) -> Result<String, MatchError> {
        let scaled = upscale_for_recognition(image, self.options.upscale_factor);
        let text = self
            .engine
            .recognize_text(&scaled)
            .context("text extraction failed")?;
        Ok(text)
    }
}
