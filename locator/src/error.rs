use thiserror::Error;

/// Errors produced by the phrase-location layer.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The search phrase contained no words after whitespace splitting.
    #[error("phrase is empty or whitespace-only")]
    EmptyPhrase,
    /// Invalid matcher configuration.
    #[error("invalid matcher config: {0}")]
    InvalidConfig(String),
    /// Word boxes cannot be mapped back through a zero scale factor.
    #[error("scale factor must be non-zero")]
    InvalidScaleFactor,
    /// The OCR backend failed.
    #[error(transparent)]
    Engine(#[from] anyhow::Error),
}
