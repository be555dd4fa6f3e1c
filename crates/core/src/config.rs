//! Run configuration loaded from a YAML or JSON file.
//!
//! The document is a required `paths` block, an optional
//! `presentation` block, an optional `extensions` list and an optional
//! `ocr` block. Every optional field has a documented default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level run configuration. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input and output locations.
    pub paths: PathsConfig,

    /// Slide geometry knobs.
    #[serde(default)]
    pub presentation: PresentationConfig,

    /// Accepted file extensions, matched case-insensitively.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// OCR engine knobs.
    #[serde(default)]
    pub ocr: OcrConfig,
}

/// Where to read images from and where to write the deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Folder scanned for input images.
    pub images_folder: PathBuf,

    /// Folder the presentation is written into; created if absent.
    pub output_folder: PathBuf,

    /// Output file name; must end with `.pptx`.
    pub output_filename: String,
}

/// Slide geometry block. All lengths are inches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// `standard` (4:3) or `widescreen` (16:9); anything else falls
    /// back to widescreen. Default: absent (widescreen).
    pub slide_size_option: Option<String>,

    /// Caption textbox left edge. Default 0.5.
    pub textbox_left_inches: f64,

    /// Caption textbox top edge. Default 5.5.
    pub textbox_top_inches: f64,

    /// Caption textbox width. Default 9.0.
    pub textbox_width_inches: f64,

    /// Caption textbox height. Default 1.5.
    pub textbox_height_inches: f64,

    /// Image left edge. Default 0.5.
    pub image_left_inches: f64,

    /// Image top edge. Default 0.5.
    pub image_top_inches: f64,

    /// Image size as a percentage of its native size at 96 px/in.
    /// Default 100.
    pub image_scale_percent: f64,

    /// Caption font size in points. Default 14.
    pub text_font_size: u32,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            slide_size_option: None,
            textbox_left_inches: 0.5,
            textbox_top_inches: 5.5,
            textbox_width_inches: 9.0,
            textbox_height_inches: 1.5,
            image_left_inches: 0.5,
            image_top_inches: 0.5,
            image_scale_percent: 100.0,
            text_font_size: 14,
        }
    }
}

/// OCR engine block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Recognition language model (tesseract `-l`). Default `eng`.
    pub language: String,

    /// Worker threads for extraction; 1 means sequential. Default 1.
    pub workers: usize,

    /// Kill a single OCR call after this many seconds. Default: none.
    pub timeout_secs: Option<u64>,

    /// Executable to invoke instead of `tesseract` from PATH.
    pub binary: Option<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            workers: 1,
            timeout_secs: None,
            binary: None,
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec![".png".to_string()]
}

impl Config {
    /// Load and validate configuration from `path`.
    ///
    /// `.json` files parse as JSON; everything else parses as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| {
            Error::Config(format!(
                "cannot read config file '{}': {err}",
                path.display()
            ))
        })?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match extension.as_str() {
            "json" => Self::from_json(&text),
            _ => Self::from_yaml(&text),
        }
    }

    /// Parse and validate a YAML configuration document.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = serde_saphyr::from_str(text)
            .map_err(|err| Error::Config(format!("invalid YAML configuration: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|err| Error::Config(format!("invalid JSON configuration: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.paths.output_filename.ends_with(".pptx") {
            return Err(Error::Config(format!(
                "output_filename '{}' must end with .pptx",
                self.paths.output_filename
            )));
        }
        Ok(())
    }
}
