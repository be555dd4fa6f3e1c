//! Error types for the slide generation pipeline.
//!
//! Only run-fatal failures live here. Per-image failures (an image that
//! cannot be read, an OCR call that fails) are statuses on the image
//! record, not errors; see [`crate::types::ImageStatus`].

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that abort a conversion run.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file is missing, unparseable, or carries
    /// invalid values. Raised before any image is touched.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The images folder is missing or cannot be listed.
    #[error("Cannot read images folder '{path}': {source}")]
    InputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The finished presentation could not be written.
    #[error("Failed to write presentation: {0}")]
    OutputWrite(String),
}
