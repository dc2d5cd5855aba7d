use crate::OcrResult;

/// Upscale applied before recognition; small UI text recognizes poorly at
/// native resolution.
pub const DEFAULT_UPSCALE_FACTOR: u32 = 3;

/// Engine selection, passed explicitly to whichever backend produces the
/// word stream.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    language: Option<String>,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a specific recognition language (e.g. `"eng"`).
    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
        }
    }

    /// Requested language, or `None` to take the engine's first available.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

/// Tunable parameters when running recognition.
#[derive(Debug, Clone, Copy)]
pub struct OcrOptions {
    /// Factor the source image is upscaled by before recognition. Word
    /// boxes come back in the upscaled space and must be divided by this
    /// factor to land in source coordinates.
    pub upscale_factor: u32,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            upscale_factor: DEFAULT_UPSCALE_FACTOR,
        }
    }
}

impl OcrOptions {
    pub fn validate(&self) -> OcrResult<()> {
        anyhow::ensure!(self.upscale_factor > 0, "upscale factor must be non-zero");
        Ok(())
    }
}
