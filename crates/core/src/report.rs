//! Per-image outcome bookkeeping and the end-of-run summary.

use std::path::PathBuf;

use serde::Serialize;

use crate::types::{ImageRecord, ImageStatus};

/// Outcome of a single input image.
#[derive(Debug, Clone, Serialize)]
pub struct ImageOutcome {
    /// Input file name.
    pub file_name: String,

    /// Final classification.
    pub status: ImageStatus,

    /// Failure detail, absent for `ok`.
    pub error: Option<String>,
}

/// Aggregated outcomes of one conversion run.
///
/// Purely informational: recording outcomes never changes what the
/// pipeline does. Unreadable images and OCR failures are counted
/// separately, since one lost its slide and the other only its text.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    outcomes: Vec<ImageOutcome>,
    slides_written: usize,
    output_path: Option<PathBuf>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one image, in input order.
    pub fn record(&mut self, record: &ImageRecord) {
        self.outcomes.push(ImageOutcome {
            file_name: record.file_name.clone(),
            status: record.status,
            error: record.error.clone(),
        });
    }

    /// Note the written deck once the writer has succeeded.
    pub fn set_output(&mut self, slides_written: usize, output_path: PathBuf) {
        self.slides_written = slides_written;
        self.output_path = Some(output_path);
    }

    /// All outcomes in input order.
    pub fn outcomes(&self) -> &[ImageOutcome] {
        &self.outcomes
    }

    /// Outcomes that were not clean successes, in input order.
    pub fn failures(&self) -> impl Iterator<Item = &ImageOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status != ImageStatus::Ok)
    }

    /// Number of images with the given status.
    pub fn count(&self, status: ImageStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn ok_count(&self) -> usize {
        self.count(ImageStatus::Ok)
    }

    pub fn ocr_failed_count(&self) -> usize {
        self.count(ImageStatus::OcrFailed)
    }

    pub fn unreadable_count(&self) -> usize {
        self.count(ImageStatus::Unreadable)
    }

    /// Slides actually written to the output file.
    pub fn slides_written(&self) -> usize {
        self.slides_written
    }

    /// Path of the written deck, once set.
    pub fn output_path(&self) -> Option<&PathBuf> {
        self.output_path.as_ref()
    }

    /// One-line human summary of the run.
    pub fn summary(&self) -> String {
        format!(
            "{} image(s) processed: {} with text, {} without text (OCR failed), {} unreadable; {} slide(s) written",
            self.outcomes.len(),
            self.ok_count(),
            self.ocr_failed_count(),
            self.unreadable_count(),
            self.slides_written
        )
    }
}
