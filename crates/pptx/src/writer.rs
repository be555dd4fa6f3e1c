//! Assembles the deck into a .pptx package and writes it to disk.

use std::ffi::OsString;
use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use slidescan_core::error::{Error, Result};
use slidescan_core::pipeline::DeckWriter;
use slidescan_core::types::{Deck, MediaFormat};

use crate::package::{
    app_props_xml, content_types_xml, presentation_rels_xml, presentation_xml, CORE_PROPS_XML,
    ROOT_RELS_XML,
};
use crate::slide::{slide_rels_xml, slide_xml};
use crate::template::{
    SLIDE_LAYOUT_RELS_XML, SLIDE_LAYOUT_XML, SLIDE_MASTER_RELS_XML, SLIDE_MASTER_XML, THEME_XML,
};

/// Writes a [`Deck`] as a PowerPoint package.
#[derive(Debug, Default)]
pub struct PptxWriter;

impl PptxWriter {
    pub fn new() -> Self {
        Self
    }

    /// Assemble the complete package in memory.
    ///
    /// Scaffolding parts first, then one slide part, one relationship
    /// part and one media part per slide, numbered in deck order.
    pub fn to_bytes(&self, deck: &Deck) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let slide_count = deck.slide_count();
        let media: Vec<MediaFormat> = deck.slides.iter().map(|slide| slide.image_format).collect();

        add_part(
            &mut zip,
            "[Content_Types].xml",
            content_types_xml(slide_count, &media).as_bytes(),
        )?;
        add_part(&mut zip, "_rels/.rels", ROOT_RELS_XML.as_bytes())?;
        add_part(&mut zip, "docProps/core.xml", CORE_PROPS_XML.as_bytes())?;
        add_part(
            &mut zip,
            "docProps/app.xml",
            app_props_xml(slide_count).as_bytes(),
        )?;
        add_part(
            &mut zip,
            "ppt/presentation.xml",
            presentation_xml(deck).as_bytes(),
        )?;
        add_part(
            &mut zip,
            "ppt/_rels/presentation.xml.rels",
            presentation_rels_xml(slide_count).as_bytes(),
        )?;
        add_part(
            &mut zip,
            "ppt/slideMasters/slideMaster1.xml",
            SLIDE_MASTER_XML.as_bytes(),
        )?;
        add_part(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            SLIDE_MASTER_RELS_XML.as_bytes(),
        )?;
        add_part(
            &mut zip,
            "ppt/slideLayouts/slideLayout1.xml",
            SLIDE_LAYOUT_XML.as_bytes(),
        )?;
        add_part(
            &mut zip,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            SLIDE_LAYOUT_RELS_XML.as_bytes(),
        )?;
        add_part(&mut zip, "ppt/theme/theme1.xml", THEME_XML.as_bytes())?;

        for (index, slide) in deck.slides.iter().enumerate() {
            let number = index + 1;
            log::debug!("Adding slide {number} for '{}'", slide.file_name);
            add_part(
                &mut zip,
                &format!("ppt/slides/slide{number}.xml"),
                slide_xml(slide).as_bytes(),
            )?;
            add_part(
                &mut zip,
                &format!("ppt/slides/_rels/slide{number}.xml.rels"),
                slide_rels_xml(number, slide.image_format).as_bytes(),
            )?;
            add_part(
                &mut zip,
                &format!("ppt/media/image{number}.{}", slide.image_format.extension()),
                &slide.image_data,
            )?;
        }

        let cursor = zip
            .finish()
            .map_err(|err| Error::OutputWrite(format!("could not finish package: {err}")))?;
        Ok(cursor.into_inner())
    }
}

fn add_part<W: Write + Seek>(zip: &mut ZipWriter<W>, name: &str, data: &[u8]) -> Result<()> {
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(name, options)
        .map_err(|err| Error::OutputWrite(format!("could not start part '{name}': {err}")))?;
    zip.write_all(data)
        .map_err(|err| Error::OutputWrite(format!("could not write part '{name}': {err}")))?;
    Ok(())
}

/// Destination file name with a `.tmp` suffix, in the same directory.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("presentation.pptx"));
    name.push(".tmp");
    path.with_file_name(name)
}

impl DeckWriter for PptxWriter {
    fn write_deck(&self, deck: &Deck, path: &Path) -> Result<()> {
        let bytes = self.to_bytes(deck)?;

        // Stage next to the destination and rename, so an interrupted
        // run never leaves a truncated .pptx at the final path.
        let staged = staging_path(path);
        if let Err(err) = fs::write(&staged, &bytes) {
            let _ = fs::remove_file(&staged);
            return Err(Error::OutputWrite(format!(
                "could not write '{}': {err}",
                staged.display()
            )));
        }
        if let Err(err) = fs::rename(&staged, path) {
            let _ = fs::remove_file(&staged);
            return Err(Error::OutputWrite(format!(
                "could not move presentation into place at '{}': {err}",
                path.display()
            )));
        }

        log::info!(
            "Presentation saved to {} ({} slide(s))",
            path.display(),
            deck.slide_count()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::Event;
    use quick_xml::Reader;
    use slidescan_core::geometry::Rect;
    use slidescan_core::types::Slide;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn rect(left: f64, top: f64, width: f64, height: f64) -> Rect {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    fn deck_with(texts: &[&str]) -> Deck {
        let mut deck = Deck {
            page_width_in: 13.3333,
            page_height_in: 7.5,
            slides: Vec::new(),
        };
        for (index, text) in texts.iter().enumerate() {
            deck.slides.push(Slide {
                file_name: format!("img{index}.png"),
                image_data: vec![index as u8; 4],
                image_format: MediaFormat::Png,
                image_rect: rect(0.5, 0.5, 4.0, 2.0),
                text: text.to_string(),
                textbox_rect: rect(0.5, 5.5, 9.0, 1.5),
                font_size_pt: 14,
            });
        }
        deck
    }

    fn package_of(deck: &Deck) -> ZipArchive<Cursor<Vec<u8>>> {
        let bytes = PptxWriter::new().to_bytes(deck).unwrap();
        ZipArchive::new(Cursor::new(bytes)).unwrap()
    }

    fn part_text(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut out = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_package_part_list() {
        let archive = package_of(&deck_with(&["one", "two"]));
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "docProps/app.xml",
                "docProps/core.xml",
                "ppt/_rels/presentation.xml.rels",
                "ppt/media/image1.png",
                "ppt/media/image2.png",
                "ppt/presentation.xml",
                "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
                "ppt/slideLayouts/slideLayout1.xml",
                "ppt/slideMasters/_rels/slideMaster1.xml.rels",
                "ppt/slideMasters/slideMaster1.xml",
                "ppt/slides/_rels/slide1.xml.rels",
                "ppt/slides/_rels/slide2.xml.rels",
                "ppt/slides/slide1.xml",
                "ppt/slides/slide2.xml",
                "ppt/theme/theme1.xml",
            ]
        );
    }

    #[test]
    fn test_presentation_advertises_page_size() {
        let mut archive = package_of(&deck_with(&["x"]));
        let presentation = part_text(&mut archive, "ppt/presentation.xml");
        assert!(presentation.contains("<p:sldSz cx=\"12191970\" cy=\"6858000\"/>"));
    }

    #[test]
    fn test_slide_text_survives_round_trip() {
        let mut archive = package_of(&deck_with(&["alpha\nbeta"]));
        let xml = part_text(&mut archive, "ppt/slides/slide1.xml");

        let mut reader = Reader::from_str(&xml);
        reader.trim_text(true);
        let mut texts = Vec::new();
        let mut in_run_text = false;
        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"a:t" => in_run_text = true,
                Ok(Event::End(ref e)) if e.name().as_ref() == b"a:t" => in_run_text = false,
                Ok(Event::Text(e)) if in_run_text => {
                    texts.push(e.unescape().unwrap().into_owned());
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => panic!("unparseable slide XML: {err}"),
            }
        }
        assert_eq!(texts, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_media_bytes_are_embedded_unchanged() {
        let mut deck = deck_with(&["one"]);
        deck.slides[0].image_data = vec![0x89, 0x50, 0x4E, 0x47];
        let mut archive = package_of(&deck);
        let mut data = Vec::new();
        archive
            .by_name("ppt/media/image1.png")
            .unwrap()
            .read_to_end(&mut data)
            .unwrap();
        assert_eq!(data, vec![0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn test_mixed_media_formats() {
        let mut deck = deck_with(&["a", "b"]);
        deck.slides[1].image_format = MediaFormat::Jpeg;
        deck.slides[1].file_name = "img1.jpg".to_string();
        let mut archive = package_of(&deck);

        let types = part_text(&mut archive, "[Content_Types].xml");
        assert!(types.contains("Extension=\"png\""));
        assert!(types.contains("Extension=\"jpeg\""));

        let rels = part_text(&mut archive, "ppt/slides/_rels/slide2.xml.rels");
        assert!(rels.contains("Target=\"../media/image2.jpeg\""));
    }

    #[test]
    fn test_empty_deck_is_still_a_package() {
        let mut archive = package_of(&deck_with(&[]));
        let names: Vec<String> = archive.file_names().map(String::from).collect();
        assert!(!names.iter().any(|name| name.starts_with("ppt/slides/")));
        assert!(!names.iter().any(|name| name.starts_with("ppt/media/")));

        let types = part_text(&mut archive, "[Content_Types].xml");
        assert!(!types.contains("/ppt/slides/"));

        let presentation = part_text(&mut archive, "ppt/presentation.xml");
        assert!(!presentation.contains("sldIdLst"));
    }

    #[test]
    fn test_write_deck_leaves_no_staging_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.pptx");
        PptxWriter::new()
            .write_deck(&deck_with(&["hi"]), &path)
            .unwrap();

        assert!(path.is_file());
        assert!(!dir.path().join("out.pptx.tmp").exists());

        let file = std::fs::File::open(&path).unwrap();
        assert!(ZipArchive::new(file).is_ok());
    }

    #[test]
    fn test_write_deck_missing_parent_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.pptx");
        let err = PptxWriter::new()
            .write_deck(&deck_with(&[]), &path)
            .unwrap_err();
        assert!(matches!(err, Error::OutputWrite(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_staging_write_is_cleaned_up() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.pptx");
        // A staging path that resolves into a missing directory makes
        // the staged write fail before anything reaches the final path.
        let staged = dir.path().join("out.pptx.tmp");
        std::os::unix::fs::symlink(dir.path().join("gone").join("x"), &staged).unwrap();

        let err = PptxWriter::new()
            .write_deck(&deck_with(&["hi"]), &path)
            .unwrap_err();
        assert!(matches!(err, Error::OutputWrite(_)));
        assert!(!path.exists());
        assert!(fs::symlink_metadata(&staged).is_err());
    }
}
