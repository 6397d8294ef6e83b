//! Horizontal placement of a wrapped line.
//!
//! Computes where a line starts (left/center/right) or how wide each
//! inter-word gap is (justify), then expands the line into positioned
//! fragments ready to be drawn.

use super::line_breaker::{Fragment, Line};
use super::style::{Alignment, RunStyle};

/// How a line is laid out horizontally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Start at `start_x` and keep natural spaces
    Offset {
        /// X of the first word
        start_x: f32,
    },
    /// Start at `start_x` and use `space_width` for every gap
    Spread {
        /// X of the first word
        start_x: f32,
        /// Width of each inter-word gap
        space_width: f32,
    },
}

/// A fragment with its final x position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRun<'a> {
    /// Left edge in points
    pub x: f32,
    /// Text to draw
    pub text: &'a str,
    /// Style the text was measured in
    pub style: &'a RunStyle,
    /// Measured width
    pub width: f32,
}

/// Width of each gap needed to stretch words to `target_width`.
///
/// `None` for fewer than two words, where there is no gap to stretch.
pub fn justification_spacing(word_widths: &[f32], target_width: f32) -> Option<f32> {
    let gaps = word_widths.len().checked_sub(1).filter(|g| *g > 0)?;
    let content: f32 = word_widths.iter().sum();
    Some((target_width - content) / gaps as f32)
}

/// Decide the placement of `line` inside `[left, left + target_width]`.
///
/// The last line of a justified paragraph is left aligned unless
/// `justify_last_line` is set. A line wider than the column (an overflowing
/// word) always starts at `left`.
pub fn place(line: &Line, left: f32, target_width: f32, justify_last_line: bool) -> Placement {
    let slack = (target_width - line.natural_width).max(0.0);
    match line.alignment {
        Alignment::Left => Placement::Offset { start_x: left },
        Alignment::Right => Placement::Offset {
            start_x: left + slack,
        },
        Alignment::Center => Placement::Offset {
            start_x: left + slack / 2.0,
        },
        Alignment::Justify => {
            if line.is_last && !justify_last_line {
                return Placement::Offset { start_x: left };
            }
            let widths: Vec<f32> = line.words.iter().map(|w| w.width).collect();
            match justification_spacing(&widths, target_width) {
                Some(space_width) if slack > 0.0 => Placement::Spread {
                    start_x: left,
                    space_width,
                },
                _ => Placement::Offset { start_x: left },
            }
        },
    }
}

/// Expand a line into positioned fragments according to `placement`.
///
/// Words advance by their width, then by the gap; no gap follows the last word.
pub fn position(line: &Line, placement: Placement) -> Vec<PlacedRun<'_>> {
    let (mut x, spread) = match placement {
        Placement::Offset { start_x } => (start_x, None),
        Placement::Spread {
            start_x,
            space_width,
        } => (start_x, Some(space_width)),
    };

    let mut placed = Vec::new();
    for (i, word) in line.words.iter().enumerate() {
        if i > 0 {
            x += spread.unwrap_or(word.space_before);
        }
        for Fragment { text, style, width } in &word.fragments {
            placed.push(PlacedRun {
                x,
                text,
                style,
                width: *width,
            });
            x += width;
        }
    }
    placed
}

/// Convenience: [`place`] then [`position`].
pub fn layout_line(
    line: &Line,
    left: f32,
    target_width: f32,
    justify_last_line: bool,
) -> Vec<PlacedRun<'_>> {
    position(line, place(line, left, target_width, justify_last_line))
}
