//! Greedy line breaking over styled runs.
//!
//! Runs are split into words at whitespace while every piece keeps the style
//! of the run it came from, so a word such as `**pre**pago` is one word made
//! of two fragments. Words are then packed onto lines first-fit.

use super::markup::StyledRun;
use super::measure::TextMeasurer;
use super::style::{Alignment, RunStyle, TextStyle};
use crate::error::Result;

/// Tolerance for width comparisons.
pub const WIDTH_EPSILON: f32 = 1e-3;

/// A measured piece of a word, drawn in exactly the style it was measured in.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Text of the fragment (never contains whitespace)
    pub text: String,
    /// Style used for both measurement and drawing
    pub style: RunStyle,
    /// Measured width in points
    pub width: f32,
}

/// A word: one or more fragments with no whitespace between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    /// Fragments in reading order
    pub fragments: Vec<Fragment>,
    /// Sum of fragment widths
    pub width: f32,
    /// Width of the space separating this word from the previous one
    pub space_before: f32,
}

impl Word {
    fn new(space_before: f32) -> Self {
        Self {
            fragments: Vec::new(),
            width: 0.0,
            space_before,
        }
    }

    fn push(&mut self, fragment: Fragment) {
        self.width += fragment.width;
        self.fragments.push(fragment);
    }

    /// Word text with fragment boundaries removed.
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

/// One wrapped row of words.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Words in reading order
    pub words: Vec<Word>,
    /// Width with natural inter-word spaces
    pub natural_width: f32,
    /// Alignment inherited from the paragraph
    pub alignment: Alignment,
    /// Whether this is the final line of its sub-paragraph
    pub is_last: bool,
}

impl Line {
    /// Create an empty line.
    pub fn new(alignment: Alignment) -> Self {
        Self {
            words: Vec::new(),
            natural_width: 0.0,
            alignment,
            is_last: false,
        }
    }

    fn push(&mut self, word: Word) {
        if !self.words.is_empty() {
            self.natural_width += word.space_before;
        }
        self.natural_width += word.width;
        self.words.push(word);
    }

    /// Width that `word` would give this line.
    fn width_with(&self, word: &Word) -> f32 {
        if self.words.is_empty() {
            word.width
        } else {
            self.natural_width + word.space_before + word.width
        }
    }

    /// Sum of word widths, inter-word spaces excluded.
    pub fn content_width(&self) -> f32 {
        self.words.iter().map(|w| w.width).sum()
    }

    /// Number of inter-word gaps.
    pub fn gap_count(&self) -> usize {
        self.words.len().saturating_sub(1)
    }

    /// Line text with single spaces between words.
    pub fn text(&self) -> String {
        self.words.iter().map(Word::text).collect::<Vec<_>>().join(" ")
    }
}

/// Split runs into measured words.
///
/// Whitespace between words collapses to a single space measured in the
/// style of the run that contained it. Leading and trailing whitespace is
/// dropped.
pub fn split_words<M: TextMeasurer + ?Sized>(
    runs: &[StyledRun],
    style: &TextStyle,
    measurer: &M,
) -> Result<Vec<Word>> {
    let mut words = Vec::new();
    let mut current = Word::new(0.0);
    let mut pending_space = 0.0;

    for run in runs {
        let run_style = style.run_style(run.emphasized);
        let mut rest = run.text.as_str();

        while !rest.is_empty() {
            let ws_len = rest.len() - rest.trim_start().len();
            if ws_len > 0 {
                if !current.fragments.is_empty() {
                    words.push(std::mem::replace(&mut current, Word::new(0.0)));
                }
                if !words.is_empty() {
                    pending_space = measurer.measure(" ", &run_style)?;
                }
                rest = &rest[ws_len..];
                continue;
            }

            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let text = &rest[..end];
            if current.fragments.is_empty() {
                current.space_before = pending_space;
            }
            current.push(Fragment {
                text: text.to_string(),
                width: measurer.measure(text, &run_style)?,
                style: run_style.clone(),
            });
            rest = &rest[end..];
        }
    }
    if !current.fragments.is_empty() {
        words.push(current);
    }

    Ok(words)
}

/// Wrap one sub-paragraph into lines no wider than `max_width`.
///
/// A word wider than `max_width` on its own is placed alone on a line and
/// allowed to overflow; words are never split.
pub fn break_lines<M: TextMeasurer + ?Sized>(
    runs: &[StyledRun],
    style: &TextStyle,
    max_width: f32,
    alignment: Alignment,
    measurer: &M,
) -> Result<Vec<Line>> {
    let words = split_words(runs, style, measurer)?;
    Ok(pack_words(words, max_width, alignment))
}

/// First-fit packing of measured words onto lines.
pub fn pack_words(words: Vec<Word>, max_width: f32, alignment: Alignment) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line::new(alignment);

    for word in words {
        if !line.words.is_empty() && line.width_with(&word) > max_width + WIDTH_EPSILON {
            lines.push(std::mem::replace(&mut line, Line::new(alignment)));
        }
        if line.words.is_empty() && word.width > max_width + WIDTH_EPSILON {
            log::debug!(
                "word '{}' ({:.1}pt) overflows the {:.1}pt column",
                word.text(),
                word.width,
                max_width
            );
        }
        line.push(word);
    }
    if !line.words.is_empty() {
        lines.push(line);
    }
    if let Some(last) = lines.last_mut() {
        last.is_last = true;
    }

    lines
}
