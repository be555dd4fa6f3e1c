//! End-to-end orchestration of the image-to-deck conversion.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::Config;
use crate::discover::{self, ExtensionFilter};
use crate::error::{Error, Result};
use crate::extract::extract_image;
use crate::geometry;
use crate::ocr::OcrEngine;
use crate::report::RunReport;
use crate::types::{Deck, ImageRecord, Slide};

/// Destination for a finished deck.
///
/// The production implementation writes a .pptx package; tests
/// substitute in-memory fakes.
pub trait DeckWriter {
    /// Materialize `deck` at `path`.
    fn write_deck(&self, deck: &Deck, path: &Path) -> Result<()>;
}

/// Drives discovery, extraction, slide building and writing, keeping
/// slides in the enumerator's order throughout.
pub struct Pipeline<'a> {
    config: &'a Config,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Run the whole conversion and return the per-image report.
    ///
    /// Fatal errors (invalid geometry, missing input folder, write
    /// failure) abort the run. Per-image failures never do; they end
    /// up in the report instead.
    pub fn run(&self, engine: &dyn OcrEngine, writer: &dyn DeckWriter) -> Result<RunReport> {
        let geometry = geometry::resolve(&self.config.presentation)?;
        let filter = ExtensionFilter::new(self.config.extensions.iter());
        let paths = &self.config.paths;

        log::info!("Images folder: {}", paths.images_folder.display());
        log::info!(
            "Output file: {}",
            paths.output_folder.join(&paths.output_filename).display()
        );
        log::info!("Accepted extensions: {:?}", filter.suffixes());
        log::info!(
            "Page size: {} x {} in",
            geometry.page_width_in,
            geometry.page_height_in
        );

        let files = discover::list_images(&paths.images_folder, &filter)?;
        if files.is_empty() {
            log::warn!(
                "No matching image files found in '{}'",
                paths.images_folder.display()
            );
        }

        let records = self.extract_all(&files, engine);

        let mut report = RunReport::new();
        let mut deck = Deck::new(&geometry);
        for record in records {
            report.record(&record);
            if let Some(slide) = Slide::from_record(record, &geometry) {
                deck.push(slide);
            }
        }

        fs::create_dir_all(&paths.output_folder).map_err(|err| {
            Error::OutputWrite(format!(
                "could not create output folder '{}': {err}",
                paths.output_folder.display()
            ))
        })?;
        let output_path = paths.output_folder.join(&paths.output_filename);
        writer.write_deck(&deck, &output_path)?;

        report.set_output(deck.slide_count(), output_path);
        Ok(report)
    }

    /// Extract every file, returning records in input order.
    ///
    /// With `ocr.workers > 1` extraction fans out over a bounded
    /// thread pool. Indexed parallel iterators collect in input order,
    /// which is the re-ordering guarantee slide assembly relies on.
    fn extract_all(&self, files: &[PathBuf], engine: &dyn OcrEngine) -> Vec<ImageRecord> {
        let workers = self.config.ocr.workers;
        if workers <= 1 || files.len() <= 1 {
            return files
                .iter()
                .map(|path| extract_image(path, engine))
                .collect();
        }

        match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool.install(|| {
                files
                    .par_iter()
                    .map(|path| extract_image(path, engine))
                    .collect()
            }),
            Err(err) => {
                log::warn!("Could not start {workers} OCR workers ({err}); extracting sequentially");
                files
                    .iter()
                    .map(|path| extract_image(path, engine))
                    .collect()
            }
        }
    }
}
