//! Templates for the repeating page chrome.
//!
//! Header and footer content is a stack of [`ChromeRow`]s. Each row holds up
//! to one [`ChromeCell`] per [`Slot`]; cell text may contain [`Token`]s that
//! are filled in from a [`StampContext`] each time a page is stamped.
//!
//! # Example
//!
//! ```ignore
//! use folio_oxide::writer::{ChromeRow, ChromeStyle, StampContext};
//!
//! let row = ChromeRow::new(ChromeStyle::new("Helvetica", 8.0))
//!     .with_left("Supply contract")
//!     .with_right("{legend}");
//! let ctx = StampContext::new(2, 7);
//! assert_eq!(row.cells()[1].resolve(&ctx), "Page 2 of 7");
//! ```

use serde::{Deserialize, Serialize};

/// Substitution tokens recognised in chrome text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Current page number, 1-based
    Page,
    /// Total page count (`0` while unknown)
    Pages,
    /// Page legend per the [`LegendFormat`]
    Legend,
    /// Build date, `YYYY-MM-DD`
    Date,
    /// Document title
    Title,
}

impl Token {
    /// Every token, in substitution order.
    pub const ALL: [Token; 5] = [Token::Legend, Token::Page, Token::Pages, Token::Date, Token::Title];

    /// Literal form, e.g. `{legend}`.
    pub fn literal(self) -> &'static str {
        match self {
            Token::Page => "{page}",
            Token::Pages => "{pages}",
            Token::Legend => "{legend}",
            Token::Date => "{date}",
            Token::Title => "{title}",
        }
    }
}

/// Horizontal position of a cell within its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Slot {
    /// Flush with the left margin
    Left,
    /// Centered between the margins
    Center,
    /// Flush with the right margin
    Right,
}

/// Font and color of chrome text.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromeStyle {
    /// Base-14 font name
    pub font: String,
    /// Size in points
    pub size: f32,
    /// Fill color (RGB, 0.0-1.0)
    pub color: (f32, f32, f32),
}

impl ChromeStyle {
    /// Black text in `font` at `size`.
    pub fn new(font: impl Into<String>, size: f32) -> Self {
        Self {
            font: font.into(),
            size,
            color: (0.0, 0.0, 0.0),
        }
    }

    /// Set the fill color.
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.color = (r, g, b);
        self
    }
}

/// One piece of text in a row.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromeCell {
    /// Template text, may contain tokens
    pub text: String,
    /// Where the cell sits
    pub slot: Slot,
    /// Overrides the row style
    pub style: Option<ChromeStyle>,
}

impl ChromeCell {
    /// Cell with the row's style.
    pub fn new(text: impl Into<String>, slot: Slot) -> Self {
        Self {
            text: text.into(),
            slot,
            style: None,
        }
    }

    /// Give this cell its own style.
    pub fn with_style(mut self, style: ChromeStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Text with every token substituted.
    pub fn resolve(&self, ctx: &StampContext) -> String {
        Token::ALL.iter().fold(self.text.clone(), |text, &token| {
            if text.contains(token.literal()) {
                text.replace(token.literal(), &ctx.value(token))
            } else {
                text
            }
        })
    }
}

/// A row of cells sharing a baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromeRow {
    cells: Vec<ChromeCell>,
    /// Style of cells without their own
    pub style: ChromeStyle,
}

impl ChromeRow {
    /// Empty row.
    pub fn new(style: ChromeStyle) -> Self {
        Self {
            cells: Vec::new(),
            style,
        }
    }

    /// Put `cell` in its slot, replacing whatever was there.
    pub fn with_cell(mut self, cell: ChromeCell) -> Self {
        self.cells.retain(|c| c.slot != cell.slot);
        self.cells.push(cell);
        self.cells.sort_by_key(|c| c.slot);
        self
    }

    /// Set the left cell.
    pub fn with_left(self, text: impl Into<String>) -> Self {
        self.with_cell(ChromeCell::new(text, Slot::Left))
    }

    /// Set the center cell.
    pub fn with_center(self, text: impl Into<String>) -> Self {
        self.with_cell(ChromeCell::new(text, Slot::Center))
    }

    /// Set the right cell.
    pub fn with_right(self, text: impl Into<String>) -> Self {
        self.with_cell(ChromeCell::new(text, Slot::Right))
    }

    /// Cells, left to right.
    pub fn cells(&self) -> &[ChromeCell] {
        &self.cells
    }

    /// Cell in `slot`, if any.
    pub fn cell(&self, slot: Slot) -> Option<&ChromeCell> {
        self.cells.iter().find(|c| c.slot == slot)
    }

    /// Effective style of `cell`.
    pub fn style_for<'a>(&'a self, cell: &'a ChromeCell) -> &'a ChromeStyle {
        cell.style.as_ref().unwrap_or(&self.style)
    }
}

/// Page legend templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendFormat {
    /// Used once the total is known, e.g. `"Page {page} of {pages}"`
    pub with_total: String,
    /// Used while the total is unknown, e.g. `"Page {page}"`
    pub without_total: String,
}

impl Default for LegendFormat {
    fn default() -> Self {
        Self {
            with_total: "Page {page} of {pages}".to_string(),
            without_total: "Page {page}".to_string(),
        }
    }
}

impl LegendFormat {
    /// Legend for `page`; a `total` of `0` means unknown.
    pub fn legend(&self, page: usize, total: usize) -> String {
        let template = if total > 0 {
            &self.with_total
        } else {
            &self.without_total
        };
        template
            .replace(Token::Page.literal(), &page.to_string())
            .replace(Token::Pages.literal(), &total.to_string())
    }
}

/// Values substituted for tokens when one page is stamped.
#[derive(Debug, Clone, PartialEq)]
pub struct StampContext {
    /// Page being stamped, 1-based
    pub page: usize,
    /// Total pages, `0` while unknown
    pub total: usize,
    /// Build date
    pub date: String,
    /// Document title
    pub title: String,
    /// Legend templates
    pub format: LegendFormat,
}

impl StampContext {
    /// Context with an empty date and title and the default legend.
    pub fn new(page: usize, total: usize) -> Self {
        Self {
            page,
            total,
            date: String::new(),
            title: String::new(),
            format: LegendFormat::default(),
        }
    }

    /// Set the build date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the legend templates.
    pub fn with_format(mut self, format: LegendFormat) -> Self {
        self.format = format;
        self
    }

    fn value(&self, token: Token) -> String {
        match token {
            Token::Page => self.page.to_string(),
            Token::Pages => self.total.to_string(),
            Token::Legend => self.format.legend(self.page, self.total),
            Token::Date => self.date.clone(),
            Token::Title => self.title.clone(),
        }
    }
}
