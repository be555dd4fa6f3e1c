//! Placement and sizing parameters resolved from configuration.
//!
//! All geometry is kept in inches; the document writer converts to its
//! own units at the very edge. Pixel sizes convert to inches at an
//! assumed 96 px/in.

use crate::config::PresentationConfig;
use crate::error::{Error, Result};

/// Page size in inches for the 4:3 layout.
pub const STANDARD_PAGE_IN: (f64, f64) = (10.0, 7.5);

/// Page size in inches for the 16:9 layout.
pub const WIDESCREEN_PAGE_IN: (f64, f64) = (13.3333, 7.5);

/// Assumed raster resolution when converting pixels to inches.
pub const PIXELS_PER_INCH: f64 = 96.0;

/// Page size selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideSize {
    Standard,
    Widescreen,
}

impl SlideSize {
    /// Map the configured selector to a size.
    ///
    /// Unknown values fall back to widescreen with a warning rather
    /// than failing; an absent selector falls back silently.
    pub fn from_option(value: Option<&str>) -> Self {
        match value {
            None => Self::Widescreen,
            Some(raw) => match raw.to_lowercase().as_str() {
                "standard" => Self::Standard,
                "widescreen" => Self::Widescreen,
                other => {
                    log::warn!("Invalid slide_size_option '{other}'. Defaulting to 'widescreen'.");
                    Self::Widescreen
                }
            },
        }
    }

    /// Page width and height in inches.
    pub fn page_in(self) -> (f64, f64) {
        match self {
            Self::Standard => STANDARD_PAGE_IN,
            Self::Widescreen => WIDESCREEN_PAGE_IN,
        }
    }
}

/// A rectangle in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Validated placement parameters for every slide of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Page width in inches.
    pub page_width_in: f64,

    /// Page height in inches.
    pub page_height_in: f64,

    /// Caption textbox placement.
    pub textbox: Rect,

    /// Image anchor, left edge in inches.
    pub image_left_in: f64,

    /// Image anchor, top edge in inches.
    pub image_top_in: f64,

    /// Multiplier applied to the native image size (percent / 100).
    pub scale: f64,

    /// Caption font size in points.
    pub font_size_pt: u32,
}

/// Resolve the raw `presentation` block into validated geometry.
///
/// Pure apart from the fallback warning: negative, non-finite or
/// zero-where-positive-required values fail with
/// [`Error::Config`] before any image is touched.
pub fn resolve(config: &PresentationConfig) -> Result<Geometry> {
    let (page_width_in, page_height_in) =
        SlideSize::from_option(config.slide_size_option.as_deref()).page_in();

    let textbox = Rect {
        left: non_negative("textbox_left_inches", config.textbox_left_inches)?,
        top: non_negative("textbox_top_inches", config.textbox_top_inches)?,
        width: non_negative("textbox_width_inches", config.textbox_width_inches)?,
        height: non_negative("textbox_height_inches", config.textbox_height_inches)?,
    };
    let image_left_in = non_negative("image_left_inches", config.image_left_inches)?;
    let image_top_in = non_negative("image_top_inches", config.image_top_inches)?;

    if !config.image_scale_percent.is_finite() || config.image_scale_percent <= 0.0 {
        return Err(Error::Config(format!(
            "'image_scale_percent' must be a positive number (got {})",
            config.image_scale_percent
        )));
    }
    // 4000 pt is the largest font size a presentation file may carry.
    if config.text_font_size == 0 || config.text_font_size > 4000 {
        return Err(Error::Config(format!(
            "'text_font_size' must be between 1 and 4000 points (got {})",
            config.text_font_size
        )));
    }

    Ok(Geometry {
        page_width_in,
        page_height_in,
        textbox,
        image_left_in,
        image_top_in,
        scale: config.image_scale_percent / 100.0,
        font_size_pt: config.text_font_size,
    })
}

fn non_negative(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::Config(format!(
            "'{name}' must be a non-negative number (got {value})"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_page_size() {
        let size = SlideSize::from_option(Some("standard"));
        assert_eq!(size, SlideSize::Standard);
        assert_eq!(size.page_in(), (10.0, 7.5));
    }

    #[test]
    fn test_widescreen_page_size() {
        let size = SlideSize::from_option(Some("Widescreen"));
        assert_eq!(size, SlideSize::Widescreen);
        assert_eq!(size.page_in(), (13.3333, 7.5));
    }

    #[test]
    fn test_unknown_selector_falls_back_to_widescreen() {
        assert_eq!(SlideSize::from_option(Some("foo")), SlideSize::Widescreen);
        assert_eq!(SlideSize::from_option(None), SlideSize::Widescreen);
    }

    #[test]
    fn test_resolve_defaults() {
        let geometry = resolve(&PresentationConfig::default()).unwrap();
        assert!((geometry.page_width_in - 13.3333).abs() < 1e-9);
        assert!((geometry.page_height_in - 7.5).abs() < 1e-9);
        assert!((geometry.scale - 1.0).abs() < 1e-9);
        assert_eq!(geometry.font_size_pt, 14);
    }

    #[test]
    fn test_resolve_scale_factor() {
        let config = PresentationConfig {
            image_scale_percent: 50.0,
            ..PresentationConfig::default()
        };
        let geometry = resolve(&config).unwrap();
        assert!((geometry.scale - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_negative_geometry_is_rejected() {
        let config = PresentationConfig {
            textbox_top_inches: -1.0,
            ..PresentationConfig::default()
        };
        let err = resolve(&config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("textbox_top_inches"));
    }

    #[test]
    fn test_zero_scale_is_rejected() {
        let config = PresentationConfig {
            image_scale_percent: 0.0,
            ..PresentationConfig::default()
        };
        assert!(matches!(resolve(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_nan_geometry_is_rejected() {
        let config = PresentationConfig {
            image_left_inches: f64::NAN,
            ..PresentationConfig::default()
        };
        assert!(matches!(resolve(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_font_size_is_rejected() {
        let config = PresentationConfig {
            text_font_size: 0,
            ..PresentationConfig::default()
        };
        assert!(matches!(resolve(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_oversized_font_size_is_rejected() {
        let config = PresentationConfig {
            text_font_size: 4001,
            ..PresentationConfig::default()
        };
        let err = resolve(&config).unwrap_err();
        assert!(err.to_string().contains("text_font_size"));

        let config = PresentationConfig {
            text_font_size: 4000,
            ..PresentationConfig::default()
        };
        assert_eq!(resolve(&config).unwrap().font_size_pt, 4000);
    }
}
