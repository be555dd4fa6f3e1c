//! Core pipeline for turning a folder of images into a slide deck:
//! configuration, image discovery, OCR orchestration, slide assembly
//! and run reporting.

pub mod config;
pub mod discover;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod ocr;
pub mod pipeline;
pub mod report;
pub mod types;

pub use config::{Config, OcrConfig, PathsConfig, PresentationConfig};
pub use discover::ExtensionFilter;
pub use error::{Error, Result};
pub use geometry::{Geometry, Rect, SlideSize};
pub use ocr::{OcrEngine, OcrError};
pub use pipeline::{DeckWriter, Pipeline};
pub use report::{ImageOutcome, RunReport};
pub use types::{Deck, ImageRecord, ImageStatus, MediaFormat, Slide};
