//! Boundary to the external text-recognition engine.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

/// Failure classes an OCR engine can report.
///
/// All of them are recoverable at the pipeline level: the image still
/// gets a slide, just without text.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The engine could not be launched at all.
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),

    /// The engine ran but reported failure.
    #[error("OCR failed: {0}")]
    Failed(String),

    /// The engine exceeded its time budget and was killed.
    #[error("OCR timed out after {0:?}")]
    TimedOut(Duration),
}

/// A text recognition backend.
///
/// Implementations must tolerate concurrent calls from worker threads.
pub trait OcrEngine: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Recognize the text in the image at `path`.
    fn extract_text(&self, path: &Path) -> Result<String, OcrError>;

    /// Cheap preflight probe; engines default to available.
    fn is_available(&self) -> bool {
        true
    }
}
