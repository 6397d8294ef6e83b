//! Deploy-time layout configuration.
//!
//! Everything here is a constant of the document template: page geometry,
//! margins, line heights, text styles and the static header/footer text.
//! Nothing is read from the environment.

use crate::error::{Error, Result};
use crate::layout::style::TextStyle;
use crate::writer::LegendFormat;
use serde::{Deserialize, Serialize};

/// Standard page sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PageSize {
    /// US Letter (8.5" x 11")
    Letter,
    /// A4 (210mm x 297mm)
    #[default]
    A4,
    /// Legal (8.5" x 14")
    Legal,
    /// Custom dimensions in points
    Custom(f32, f32),
}

impl PageSize {
    /// Get dimensions in points (1 inch = 72 points).
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.0, 842.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom(w, h) => (*w, *h),
        }
    }
}

/// Document information dictionary entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentInfo {
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
}

/// Static header and footer content repeated on every page.
///
/// Header rows pair `title_block[i]` on the left with `contact_block[i]` on
/// the right; a final row carries the address and the page legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageChrome {
    /// Left column lines; the first is drawn in the header bold font
    pub title_block: Vec<String>,
    /// Right column lines
    pub contact_block: Vec<String>,
    /// Address shown on the last header row
    pub address: String,
    /// Size of the logo placeholder box, if any
    pub logo_box: Option<(f32, f32)>,
    /// Header font
    pub header_font: String,
    /// Header font for the first title line
    pub header_bold_font: String,
    /// Header font size
    pub header_size: f32,
    /// Vertical advance per header row
    pub header_line_height: f32,
    /// Gap between the header separator and the first body line
    pub body_gap: f32,
    /// Footer font
    pub footer_font: String,
    /// Footer font size
    pub footer_size: f32,
    /// Footer baseline, measured up from the bottom edge
    pub footer_baseline: f32,
    /// Left footer text; `{date}` and `{title}` are resolved
    pub footer_note: String,
    /// Page legend templates
    pub legend: LegendFormat,
    /// Draw rules under the header and above the footer
    pub separator: bool,
}

impl Default for PageChrome {
    fn default() -> Self {
        Self {
            title_block: Vec::new(),
            contact_block: Vec::new(),
            address: String::new(),
            logo_box: None,
            header_font: "Helvetica".to_string(),
            header_bold_font: "Helvetica-Bold".to_string(),
            header_size: 8.0,
            header_line_height: 10.0,
            body_gap: 14.0,
            footer_font: "Helvetica".to_string(),
            footer_size: 8.0,
            footer_baseline: 30.0,
            footer_note: "{date}".to_string(),
            legend: LegendFormat::default(),
            separator: true,
        }
    }
}

impl PageChrome {
    /// Set the left header column.
    pub fn with_title_block<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title_block = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Set the right header column.
    pub fn with_contact_block<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contact_block = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Set the address line.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Reserve a logo placeholder box of `width` x `height` points.
    pub fn with_logo_box(mut self, width: f32, height: f32) -> Self {
        self.logo_box = Some((width, height));
        self
    }

    /// Set the left footer text.
    pub fn with_footer_note(mut self, note: impl Into<String>) -> Self {
        self.footer_note = note.into();
        self
    }

    /// Set the page legend templates.
    pub fn with_legend(mut self, legend: LegendFormat) -> Self {
        self.legend = legend;
        self
    }

    /// Enable or disable separator rules.
    pub fn with_separator(mut self, separator: bool) -> Self {
        self.separator = separator;
        self
    }
}

/// Layout constants for one document template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Page size
    pub page_size: PageSize,
    /// Left margin in points
    pub margin_left: f32,
    /// Right margin in points
    pub margin_right: f32,
    /// Top margin in points; the header starts here
    pub margin_top: f32,
    /// Body content may not reach closer than this to the bottom edge
    pub bottom_threshold: f32,
    /// Paragraph text
    pub body: TextStyle,
    /// Document title block
    pub title: TextStyle,
    /// Section headings
    pub heading: TextStyle,
    /// Advance for a blank sub-paragraph
    pub small_line_height: f32,
    /// Extra advance after every content block
    pub block_spacing: f32,
    /// Indent of list item labels from the left margin
    pub list_indent: f32,
    /// Gap between a label and its text
    pub label_gap: f32,
    /// Authored page-count estimate; `0` disables the check
    pub estimated_total_pages: usize,
    /// Print the estimate as the total during the provisional pass
    pub provisional_uses_estimate: bool,
    /// Justify the last line of justified paragraphs too
    pub justify_last_line: bool,
    /// Flate-compress content streams
    pub compress: bool,
    /// Info dictionary entries
    pub metadata: DocumentInfo,
    /// Static header and footer content
    pub chrome: PageChrome,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin_left: 56.0,
            margin_right: 56.0,
            margin_top: 36.0,
            bottom_threshold: 60.0,
            body: TextStyle::helvetica(10.0, 14.0),
            title: TextStyle::new("Helvetica-Bold", "Helvetica-Bold", 13.0, 18.0),
            heading: TextStyle::new("Helvetica-Bold", "Helvetica-Bold", 10.5, 15.0),
            small_line_height: 6.0,
            block_spacing: 6.0,
            list_indent: 14.0,
            label_gap: 6.0,
            estimated_total_pages: 0,
            provisional_uses_estimate: false,
            justify_last_line: false,
            compress: true,
            metadata: DocumentInfo::default(),
            chrome: PageChrome::default(),
        }
    }
}

impl LayoutConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set left and right margins.
    pub fn with_margins(mut self, left: f32, right: f32) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    /// Set the top margin.
    pub fn with_margin_top(mut self, top: f32) -> Self {
        self.margin_top = top;
        self
    }

    /// Set the bottom break threshold.
    pub fn with_bottom_threshold(mut self, threshold: f32) -> Self {
        self.bottom_threshold = threshold;
        self
    }

    /// Set the body text style.
    pub fn with_body(mut self, body: TextStyle) -> Self {
        self.body = body;
        self
    }

    /// Set the title style.
    pub fn with_title_style(mut self, title: TextStyle) -> Self {
        self.title = title;
        self
    }

    /// Set the heading style.
    pub fn with_heading_style(mut self, heading: TextStyle) -> Self {
        self.heading = heading;
        self
    }

    /// Set the advance used for blank sub-paragraphs.
    pub fn with_small_line_height(mut self, height: f32) -> Self {
        self.small_line_height = height;
        self
    }

    /// Set the spacing after each block.
    pub fn with_block_spacing(mut self, spacing: f32) -> Self {
        self.block_spacing = spacing;
        self
    }

    /// Set the authored page-count estimate.
    pub fn with_estimated_total_pages(mut self, pages: usize) -> Self {
        self.estimated_total_pages = pages;
        self
    }

    /// Print the estimate during the provisional pass.
    pub fn with_provisional_estimate(mut self, enable: bool) -> Self {
        self.provisional_uses_estimate = enable;
        self
    }

    /// Justify the last line of justified paragraphs.
    pub fn with_justify_last_line(mut self, enable: bool) -> Self {
        self.justify_last_line = enable;
        self
    }

    /// Enable or disable stream compression.
    pub fn with_compression(mut self, enable: bool) -> Self {
        self.compress = enable;
        self
    }

    /// Set the Info dictionary entries.
    pub fn with_metadata(mut self, metadata: DocumentInfo) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the header/footer content.
    pub fn with_chrome(mut self, chrome: PageChrome) -> Self {
        self.chrome = chrome;
        self
    }

    /// Page width and height in points.
    pub fn page_dimensions(&self) -> (f32, f32) {
        self.page_size.dimensions()
    }

    /// Width available to body text.
    pub fn content_width(&self) -> f32 {
        self.page_dimensions().0 - self.margin_left - self.margin_right
    }

    /// Line height of body text.
    pub fn base_line_height(&self) -> f32 {
        self.body.line_height
    }

    /// Total printed during the provisional pass.
    pub fn provisional_total(&self) -> usize {
        if self.provisional_uses_estimate {
            self.estimated_total_pages
        } else {
            0
        }
    }

    /// Check that the configuration can lay out at least one body line.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.page_dimensions();
        if !(width > 0.0 && height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "page dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if self.margin_left < 0.0 || self.margin_right < 0.0 || self.margin_top < 0.0 {
            return Err(Error::InvalidConfig("margins must not be negative".to_string()));
        }
        if self.content_width() <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "margins {} + {} leave no room on a {}pt wide page",
                self.margin_left, self.margin_right, width
            )));
        }
        for (name, style) in [("body", &self.body), ("title", &self.title), ("heading", &self.heading)]
        {
            if !(style.size > 0.0 && style.line_height > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} style needs a positive size and line height",
                    name
                )));
            }
        }
        if self.small_line_height < 0.0 || self.block_spacing < 0.0 {
            return Err(Error::InvalidConfig("vertical spacing must not be negative".to_string()));
        }
        let body_area = height - self.bottom_threshold - self.margin_top;
        if self.bottom_threshold < 0.0 || body_area < self.base_line_height() {
            return Err(Error::InvalidConfig(format!(
                "bottom threshold {} leaves {:.1}pt for body text, less than one line",
                self.bottom_threshold, body_area
            )));
        }
        Ok(())
    }
}
