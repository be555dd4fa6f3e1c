//! Command line tool for building a PowerPoint deck from a folder of
//! scanned images.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use slidescan_core::{Config, ImageStatus, OcrEngine, Pipeline};
use slidescan_ocr::TesseractEngine;
use slidescan_pptx::PptxWriter;

/// Build a .pptx presentation from a folder of images, one slide per
/// image, with OCR text under each picture.
#[derive(Parser, Debug)]
#[command(name = "slidescan")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML or JSON)
    #[arg(default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG overrides the default level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;

    let engine = build_engine(&config);
    if !engine.is_available() {
        log::warn!(
            "OCR engine '{}' is not available; every image will produce a slide without text",
            engine.name()
        );
    }

    let report = Pipeline::new(&config)
        .run(&engine, &PptxWriter::new())
        .context("Pipeline run failed")?;

    println!("{}", report.summary());
    for outcome in report.failures() {
        let reason = outcome.error.as_deref().unwrap_or("unknown");
        match outcome.status {
            ImageStatus::Unreadable => eprintln!("  skipped {}: {}", outcome.file_name, reason),
            _ => eprintln!("  no text for {}: {}", outcome.file_name, reason),
        }
    }

    Ok(())
}

fn build_engine(config: &Config) -> TesseractEngine {
    let mut engine = TesseractEngine::new().with_language(&config.ocr.language);
    if let Some(secs) = config.ocr.timeout_secs {
        engine = engine.with_timeout(Duration::from_secs(secs));
    }
    if let Some(binary) = &config.ocr.binary {
        engine = engine.with_binary(binary);
    }
    engine
}
