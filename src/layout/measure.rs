//! Text measurement.
//!
//! The layout engine never assumes glyph widths; it asks a [`TextMeasurer`]
//! supplied by the rendering surface. [`FontManager`] is the PDF surface's
//! measurer.

use super::style::RunStyle;
use crate::error::{Error, Result};
use crate::writer::FontManager;

/// Width provider for styled text.
///
/// Implementations fail with [`Error::StyleUnavailable`] when they cannot
/// measure in the requested style; the build treats that as fatal.
pub trait TextMeasurer {
    /// Rendered width of `text` in `style`, in points.
    fn measure(&self, text: &str, style: &RunStyle) -> Result<f32>;

    /// Distance from the top of a line box to the baseline.
    fn ascent(&self, style: &RunStyle) -> Result<f32> {
        Ok(style.size * 0.75)
    }
}

impl TextMeasurer for FontManager {
    fn measure(&self, text: &str, style: &RunStyle) -> Result<f32> {
        self.text_width(text, &style.font, style.size)
            .ok_or_else(|| Error::StyleUnavailable {
                font: style.font.clone(),
            })
    }

    fn ascent(&self, style: &RunStyle) -> Result<f32> {
        self.get_font(&style.font)
            .map(|font| font.ascent(style.size))
            .ok_or_else(|| Error::StyleUnavailable {
                font: style.font.clone(),
            })
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &RunStyle) -> Result<f32> {
        (**self).measure(text, style)
    }

    fn ascent(&self, style: &RunStyle) -> Result<f32> {
        (**self).ascent(style)
    }
}

/// Measurer that gives every character the same advance.
///
/// Useful for deterministic layouts; it knows every font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    /// Advance per character, in points, independent of size
    pub per_char: f32,
}

impl FixedAdvance {
    /// Create a measurer with the given per-character advance.
    pub fn new(per_char: f32) -> Self {
        Self { per_char }
    }
}

impl TextMeasurer for FixedAdvance {
    fn measure(&self, text: &str, _style: &RunStyle) -> Result<f32> {
        Ok(text.chars().count() as f32 * self.per_char)
    }
}
