//! OCR engine backends for slide deck generation.

pub mod tesseract;

pub use tesseract::TesseractEngine;
