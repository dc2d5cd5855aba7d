//! Word-level OCR surface for the workspace: the data model produced by a
//! recognition backend (words with pixel bounding boxes) and the trait the
//! rest of the workspace consumes it through.
//!
//! Backends are external; this crate fixes the contract (reading-order word
//! stream, non-negative boxes in the image's pixel space) and provides the
//! pre-recognition upscaling helper plus a fixed-output engine for tests.

mod config;
mod engine;
mod word;

pub use config::{DEFAULT_UPSCALE_FACTOR, EngineConfig, OcrOptions};
pub use engine::{StaticWordEngine, WordEngine, resolve_language, upscale_for_recognition};
pub use word::{BoundingBox, RecognizedWord, clean_utf8};

/// Crate-wide result type.
pub type OcrResult<T> = anyhow::Result<T>;
