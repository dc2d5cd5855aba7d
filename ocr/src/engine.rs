use crate::OcrResult;
use crate::config::EngineConfig;
use crate::word::RecognizedWord;
use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

/// Black-box interface to an OCR backend.
///
/// Implementations must yield words in natural reading order
/// (left-to-right, top-to-bottom) with non-negative box coordinates in the
/// pixel space of the image they were handed.
pub trait WordEngine {
    /// Backend name, for logs.
    fn name(&self) -> &'static str;

    /// Languages the backend can recognize, best first.
    fn available_languages(&self) -> OcrResult<Vec<String>>;

    /// Recognize individual words with their bounding boxes.
    fn recognize_words(&mut self, image: &DynamicImage) -> OcrResult<Vec<RecognizedWord>>;

    /// Extract the full text of the image as a single string.
    fn recognize_text(&mut self, image: &DynamicImage) -> OcrResult<String>;
}

/// Pick the recognition language: the configured one if set, otherwise the
/// engine's first available.
pub fn resolve_language(config: &EngineConfig, engine: &dyn WordEngine) -> OcrResult<String> {
    if let Some(language) = config.language() {
        debug!(engine = engine.name(), language, "using configured language");
        return Ok(language.to_string());
    }

    let languages = engine.available_languages()?;
    debug!(
        engine = engine.name(),
        available = languages.len(),
        "picking engine default language"
    );
    languages
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("engine {} reports no languages", engine.name()))
}

/// Upscale an image before recognition.
///
/// Uses Catmull-Rom resampling; a factor of 1 returns an unchanged copy.
pub fn upscale_for_recognition(image: &DynamicImage, factor: u32) -> DynamicImage {
    if factor <= 1 {
        return image.clone();
    }
    let width = image.width() * factor;
    let height = image.height() * factor;
    image.resize_exact(width, height, FilterType::CatmullRom)
}

/// Engine that returns a fixed word list and text, for tests and for
/// wiring call sites before a real backend is attached.
#[derive(Debug, Clone)]
pub struct StaticWordEngine {
    languages: Vec<String>,
    words: Vec<RecognizedWord>,
    text: String,
}

impl StaticWordEngine {
    pub fn new(words: Vec<RecognizedWord>) -> Self {
        Self {
            languages: vec!["eng".to_string()],
            words,
            text: String::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }
}

impl WordEngine for StaticWordEngine {
    fn name(&self) -> &'static str {
        "static"
    }

    fn available_languages(&self) -> OcrResult<Vec<String>> {
        Ok(self.languages.clone())
    }

    fn recognize_words(&mut self, _image: &DynamicImage) -> OcrResult<Vec<RecognizedWord>> {
        Ok(self.words.clone())
    }

    fn recognize_text(&mut self, _image: &DynamicImage) -> OcrResult<String> {
        Ok(self.text.clone())
    }
}
