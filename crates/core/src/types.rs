//! Domain types flowing through the conversion pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::{Geometry, Rect, PIXELS_PER_INCH};

/// Per-image outcome of text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    /// The image decoded and OCR returned text (possibly empty).
    Ok,
    /// The image decoded but OCR failed; it still gets a slide.
    OcrFailed,
    /// The file could not be read or decoded; it gets no slide.
    Unreadable,
}

impl ImageStatus {
    /// Stable lowercase name used in logs and summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::OcrFailed => "ocr_failed",
            Self::Unreadable => "unreadable",
        }
    }
}

/// Raster format of an embeddable image payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
    WebP,
}

impl MediaFormat {
    /// Detect the format from magic bytes.
    ///
    /// Returns `None` for payloads that are not one of the formats a
    /// presentation can embed.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        match image::guess_format(bytes).ok()? {
            image::ImageFormat::Png => Some(Self::Png),
            image::ImageFormat::Jpeg => Some(Self::Jpeg),
            image::ImageFormat::Gif => Some(Self::Gif),
            image::ImageFormat::Bmp => Some(Self::Bmp),
            image::ImageFormat::Tiff => Some(Self::Tiff),
            image::ImageFormat::WebP => Some(Self::WebP),
            _ => None,
        }
    }

    /// File extension used when naming a media part.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::WebP => "webp",
        }
    }

    /// MIME type registered for the media part.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
            Self::WebP => "image/webp",
        }
    }
}

/// One discovered input image, carried through extraction.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    /// Path the file was discovered at.
    pub path: PathBuf,

    /// File name without the directory, as shown in reports.
    pub file_name: String,

    /// Raw file bytes; empty for unreadable files.
    pub data: Vec<u8>,

    /// Native pixel dimensions; present iff the file decoded.
    pub dimensions: Option<(u32, u32)>,

    /// Detected payload format; present iff the file decoded.
    pub format: Option<MediaFormat>,

    /// Recognized text; absent when OCR failed.
    pub text: Option<String>,

    /// Classification of this image's outcome.
    pub status: ImageStatus,

    /// Human-readable failure detail for reporting.
    pub error: Option<String>,
}

impl ImageRecord {
    /// Record for a file that could not be read or decoded.
    pub fn unreadable(path: &Path, error: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            file_name: file_name_of(path),
            data: Vec::new(),
            dimensions: None,
            format: None,
            text: None,
            status: ImageStatus::Unreadable,
            error: Some(error.into()),
        }
    }

    /// Record for a decoded image whose OCR call failed.
    pub fn ocr_failed(
        path: &Path,
        data: Vec<u8>,
        dimensions: (u32, u32),
        format: MediaFormat,
        error: impl Into<String>,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            file_name: file_name_of(path),
            data,
            dimensions: Some(dimensions),
            format: Some(format),
            text: None,
            status: ImageStatus::OcrFailed,
            error: Some(error.into()),
        }
    }

    /// Record for a fully processed image.
    pub fn extracted(
        path: &Path,
        data: Vec<u8>,
        dimensions: (u32, u32),
        format: MediaFormat,
        text: impl Into<String>,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            file_name: file_name_of(path),
            data,
            dimensions: Some(dimensions),
            format: Some(format),
            text: Some(text.into()),
            status: ImageStatus::Ok,
            error: None,
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// One finished slide: the image, its placement, and the recognized text.
#[derive(Debug, Clone)]
pub struct Slide {
    /// Source file name, used for the picture description.
    pub file_name: String,

    /// Image payload embedded into the presentation.
    pub image_data: Vec<u8>,

    /// Payload format, for media part naming.
    pub image_format: MediaFormat,

    /// Image placement in inches.
    pub image_rect: Rect,

    /// Recognized text; empty when OCR failed.
    pub text: String,

    /// Textbox placement in inches.
    pub textbox_rect: Rect,

    /// Caption font size in points.
    pub font_size_pt: u32,
}

impl Slide {
    /// Build a slide from an extracted record.
    ///
    /// The image is placed at the configured anchor and sized from its
    /// native pixel dimensions at 96 px/in times the scale factor, so
    /// aspect ratio is preserved. Records that never decoded carry no
    /// dimensions and yield `None`, so they produce no slide.
    pub fn from_record(record: ImageRecord, geometry: &Geometry) -> Option<Self> {
        let (px_w, px_h) = record.dimensions?;
        let format = record.format?;
        let width_in = f64::from(px_w) / PIXELS_PER_INCH * geometry.scale;
        let height_in = f64::from(px_h) / PIXELS_PER_INCH * geometry.scale;
        Some(Self {
            file_name: record.file_name,
            image_data: record.data,
            image_format: format,
            image_rect: Rect {
                left: geometry.image_left_in,
                top: geometry.image_top_in,
                width: width_in,
                height: height_in,
            },
            text: record.text.unwrap_or_default(),
            textbox_rect: geometry.textbox,
            font_size_pt: geometry.font_size_pt,
        })
    }
}

/// The finished, ordered presentation handed to a document writer.
#[derive(Debug, Clone)]
pub struct Deck {
    /// Page width in inches.
    pub page_width_in: f64,

    /// Page height in inches.
    pub page_height_in: f64,

    /// Slides in input order.
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create an empty deck with the resolved page size.
    pub fn new(geometry: &Geometry) -> Self {
        Self {
            page_width_in: geometry.page_width_in,
            page_height_in: geometry.page_height_in,
            slides: Vec::new(),
        }
    }

    /// Append a slide, keeping input order.
    pub fn push(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Number of slides in the deck.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}
