//! Per-image text extraction with isolated failure handling.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::ocr::OcrEngine;
use crate::types::{ImageRecord, MediaFormat};

/// Read one image and run OCR on it, classifying failures.
///
/// Two failure classes come out of this, and they are deliberately
/// different policies:
/// - a file that cannot be read or decoded is `unreadable` and will
///   produce no slide;
/// - a decodable image whose OCR call fails is `ocr_failed` and still
///   produces a slide with an empty textbox.
///
/// Neither aborts the run; the classification is the return value.
pub fn extract_image(path: &Path, engine: &dyn OcrEngine) -> ImageRecord {
    log::info!("Processing image: {}", path.display());

    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) => {
            log::error!("Could not read image '{}': {err}", path.display());
            return ImageRecord::unreadable(path, format!("could not read file: {err}"));
        }
    };

    let (dimensions, format) = match probe(&data) {
        Ok(probed) => probed,
        Err(message) => {
            log::error!("Could not decode image '{}': {message}", path.display());
            return ImageRecord::unreadable(path, message);
        }
    };

    match engine.extract_text(path) {
        Ok(text) => ImageRecord::extracted(path, data, dimensions, format, text),
        Err(err) => {
            log::warn!(
                "{} failed on '{}': {err}; slide will have no text",
                engine.name(),
                path.display()
            );
            ImageRecord::ocr_failed(path, data, dimensions, format, err.to_string())
        }
    }
}

/// Probe pixel dimensions and payload format from the file header,
/// without decoding the full image.
fn probe(data: &[u8]) -> Result<((u32, u32), MediaFormat), String> {
    let format = MediaFormat::detect(data).ok_or_else(|| "unsupported image format".to_string())?;
    let dimensions = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|err| format!("could not sniff image format: {err}"))?
        .into_dimensions()
        .map_err(|err| format!("could not decode image header: {err}"))?;
    Ok((dimensions, format))
}
