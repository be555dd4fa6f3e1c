//! End-to-end runs of the full pipeline against the real package
//! writer: images on disk in, .pptx on disk out.

use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::ZipArchive;

use slidescan_core::config::{Config, OcrConfig, PathsConfig, PresentationConfig};
use slidescan_core::ocr::{OcrEngine, OcrError};
use slidescan_core::pipeline::Pipeline;

use crate::PptxWriter;

struct StubEngine {
    fail: Vec<&'static str>,
}

impl StubEngine {
    fn new() -> Self {
        Self { fail: Vec::new() }
    }

    fn failing_on(names: &[&'static str]) -> Self {
        Self {
            fail: names.to_vec(),
        }
    }
}

impl OcrEngine for StubEngine {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn extract_text(&self, path: &Path) -> Result<String, OcrError> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        if self.fail.iter().any(|failing| *failing == name) {
            return Err(OcrError::Failed("no text layer".to_string()));
        }
        Ok(format!("text for {name}"))
    }
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([64, 64, 64]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
        .unwrap();
    bytes
}

fn setup(names: &[&str]) -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();
    let images = dir.path().join("images");
    fs::create_dir(&images).unwrap();
    for name in names {
        fs::write(images.join(name), png_bytes(80, 40)).unwrap();
    }
    let config = Config {
        paths: PathsConfig {
            images_folder: images,
            output_folder: dir.path().join("out"),
            output_filename: "deck.pptx".to_string(),
        },
        presentation: PresentationConfig::default(),
        extensions: vec![".png".to_string()],
        ocr: OcrConfig::default(),
    };
    (dir, config)
}

fn output_path(config: &Config) -> PathBuf {
    config
        .paths
        .output_folder
        .join(&config.paths.output_filename)
}

fn deck_archive(path: &Path) -> ZipArchive<fs::File> {
    ZipArchive::new(fs::File::open(path).unwrap()).unwrap()
}

fn part_text(archive: &mut ZipArchive<fs::File>, name: &str) -> String {
    let mut out = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut out)
        .unwrap();
    out
}

fn slide_part_count(archive: &ZipArchive<fs::File>) -> usize {
    archive
        .file_names()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .count()
}

#[test]
fn test_full_run_produces_one_slide_per_image_in_name_order() {
    let (_dir, config) = setup(&["b.png", "a.png", "c.png"]);
    let report = Pipeline::new(&config)
        .run(&StubEngine::new(), &PptxWriter::new())
        .unwrap();

    assert_eq!(report.ok_count(), 3);
    assert_eq!(report.slides_written(), 3);

    let mut archive = deck_archive(&output_path(&config));
    assert_eq!(slide_part_count(&archive), 3);
    assert!(part_text(&mut archive, "ppt/slides/slide1.xml")
        .contains("<a:t>text for a.png</a:t>"));
    assert!(part_text(&mut archive, "ppt/slides/slide2.xml")
        .contains("<a:t>text for b.png</a:t>"));
    assert!(part_text(&mut archive, "ppt/slides/slide3.xml")
        .contains("<a:t>text for c.png</a:t>"));
    assert!(part_text(&mut archive, "ppt/presentation.xml")
        .contains("<p:sldSz cx=\"12191970\" cy=\"6858000\"/>"));
}

#[test]
fn test_ocr_failure_keeps_the_slide_with_an_empty_caption() {
    let (_dir, config) = setup(&["a.png", "b.png", "c.png"]);
    let report = Pipeline::new(&config)
        .run(&StubEngine::failing_on(&["b.png"]), &PptxWriter::new())
        .unwrap();

    assert_eq!(report.slides_written(), 3);
    assert_eq!(report.ocr_failed_count(), 1);

    let mut archive = deck_archive(&output_path(&config));
    assert_eq!(slide_part_count(&archive), 3);
    let slide2 = part_text(&mut archive, "ppt/slides/slide2.xml");
    assert!(!slide2.contains("<a:t>"));
    assert!(slide2.contains("<a:endParaRPr"));
    // The image itself is still embedded.
    assert!(slide2.contains("<a:blip r:embed=\"rId2\"/>"));
}

#[test]
fn test_unreadable_image_is_dropped_from_the_deck() {
    let (_dir, config) = setup(&["a.png", "c.png"]);
    fs::write(
        config.paths.images_folder.join("b.png"),
        b"this is not an image",
    )
    .unwrap();

    let report = Pipeline::new(&config)
        .run(&StubEngine::new(), &PptxWriter::new())
        .unwrap();

    assert_eq!(report.outcomes().len(), 3);
    assert_eq!(report.unreadable_count(), 1);
    assert_eq!(report.slides_written(), 2);

    let mut archive = deck_archive(&output_path(&config));
    assert_eq!(slide_part_count(&archive), 2);
    // b.png's neighbors close ranks: slide 2 is c.png.
    assert!(part_text(&mut archive, "ppt/slides/slide2.xml")
        .contains("<a:t>text for c.png</a:t>"));
}

#[test]
fn test_empty_folder_still_writes_a_presentation() {
    let (_dir, config) = setup(&[]);
    let report = Pipeline::new(&config)
        .run(&StubEngine::new(), &PptxWriter::new())
        .unwrap();

    assert_eq!(report.outcomes().len(), 0);
    assert_eq!(report.slides_written(), 0);

    let archive = deck_archive(&output_path(&config));
    assert_eq!(slide_part_count(&archive), 0);
}

#[test]
fn test_output_directory_is_created_on_demand() {
    let (dir, mut config) = setup(&["a.png"]);
    config.paths.output_folder = dir.path().join("nested").join("deeper");

    Pipeline::new(&config)
        .run(&StubEngine::new(), &PptxWriter::new())
        .unwrap();

    assert!(output_path(&config).is_file());
    // Exactly the configured file, no staging leftovers.
    let entries: Vec<_> = fs::read_dir(&config.paths.output_folder)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec!["deck.pptx"]);
}

#[test]
fn test_repeated_runs_produce_identical_slides() {
    let (_dir, config) = setup(&["a.png", "b.png"]);
    let pipeline = Pipeline::new(&config);

    pipeline.run(&StubEngine::new(), &PptxWriter::new()).unwrap();
    let mut first = deck_archive(&output_path(&config));
    let first_slide1 = part_text(&mut first, "ppt/slides/slide1.xml");
    let first_slide2 = part_text(&mut first, "ppt/slides/slide2.xml");
    drop(first);

    pipeline.run(&StubEngine::new(), &PptxWriter::new()).unwrap();
    let mut second = deck_archive(&output_path(&config));
    assert_eq!(
        part_text(&mut second, "ppt/slides/slide1.xml"),
        first_slide1
    );
    assert_eq!(
        part_text(&mut second, "ppt/slides/slide2.xml"),
        first_slide2
    );
}

#[test]
fn test_image_scale_is_applied_against_pixel_dimensions() {
    let (_dir, mut config) = setup(&[]);
    fs::write(
        config.paths.images_folder.join("wide.png"),
        png_bytes(1920, 960),
    )
    .unwrap();
    config.presentation.slide_size_option = Some("standard".to_string());
    config.presentation.image_scale_percent = 50.0;

    Pipeline::new(&config)
        .run(&StubEngine::new(), &PptxWriter::new())
        .unwrap();

    // 1920 px at 96 px/in is 20 in; half of that fills the standard
    // 10 in page exactly.
    let mut archive = deck_archive(&output_path(&config));
    let slide = part_text(&mut archive, "ppt/slides/slide1.xml");
    assert!(slide.contains("<a:ext cx=\"9144000\" cy=\"4572000\"/>"));
    assert!(part_text(&mut archive, "ppt/presentation.xml")
        .contains("<p:sldSz cx=\"9144000\" cy=\"6858000\"/>"));
}
