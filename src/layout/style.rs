//! Text styles and alignment.
//!
//! A [`TextStyle`] describes a logical unit (body, title, heading). Each run
//! inside it resolves to a concrete [`RunStyle`] exactly once, and that same
//! value is carried from measurement to drawing.

use serde::{Deserialize, Serialize};

/// Horizontal alignment of the lines of a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Start at the left margin (default)
    #[default]
    Left,
    /// Center within the column
    Center,
    /// Flush against the right edge of the column
    Right,
    /// Distribute extra space between words to fill the column
    Justify,
}

/// Style of a logical text unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font used for plain runs
    pub font: String,
    /// Font used for `**emphasized**` runs
    pub emphasis_font: String,
    /// Font size in points
    pub size: f32,
    /// Vertical advance per line in points
    pub line_height: f32,
}

impl TextStyle {
    /// Create a style with the given fonts, size and line height.
    pub fn new(
        font: impl Into<String>,
        emphasis_font: impl Into<String>,
        size: f32,
        line_height: f32,
    ) -> Self {
        Self {
            font: font.into(),
            emphasis_font: emphasis_font.into(),
            size,
            line_height,
        }
    }

    /// Helvetica body text at `size`, with bold emphasis.
    pub fn helvetica(size: f32, line_height: f32) -> Self {
        Self::new("Helvetica", "Helvetica-Bold", size, line_height)
    }

    /// Same style with every run drawn in the emphasis font.
    pub fn emphasized(&self) -> Self {
        Self {
            font: self.emphasis_font.clone(),
            ..self.clone()
        }
    }

    /// Concrete style for one run.
    pub fn run_style(&self, emphasized: bool) -> RunStyle {
        let font = if emphasized {
            &self.emphasis_font
        } else {
            &self.font
        };
        RunStyle {
            font: font.clone(),
            size: self.size,
        }
    }
}

/// Concrete font and size for a run of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStyle {
    /// Font name
    pub font: String,
    /// Font size in points
    pub size: f32,
}

impl RunStyle {
    /// Create a run style.
    pub fn new(font: impl Into<String>, size: f32) -> Self {
        Self {
            font: font.into(),
            size,
        }
    }
}
