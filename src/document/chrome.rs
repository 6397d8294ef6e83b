//! Header/footer stamper.
//!
//! Stamping always clears the region first, so a page can be stamped any
//! number of times and only the latest total is visible. The header layout
//! does not depend on the total, so the body start returned by a re-stamp
//! matches the one used during assembly.

use super::page::{Page, Region};
use crate::config::{LayoutConfig, PageChrome};
use crate::error::Result;
use crate::layout::measure::TextMeasurer;
use crate::layout::style::RunStyle;
use crate::writer::{ChromeCell, ChromeRow, ChromeStyle, Slot, StampContext, Token};

/// Horizontal gap between the logo placeholder and the header text.
const LOGO_GAP: f32 = 8.0;

/// Distance between the last header row and the separator rule.
const RULE_GAP: f32 = 3.0;

/// Renders the repeating chrome of a page for a given total.
#[derive(Debug, Clone)]
pub struct ChromeStamper {
    chrome: PageChrome,
    margin_left: f32,
    margin_right: f32,
    margin_top: f32,
    title: String,
    date: String,
}

impl ChromeStamper {
    /// Create a stamper. `date` is printed wherever `{date}` appears.
    pub fn new(config: &LayoutConfig, date: impl Into<String>) -> Self {
        Self {
            chrome: config.chrome.clone(),
            margin_left: config.margin_left,
            margin_right: config.margin_right,
            margin_top: config.margin_top,
            title: config.metadata.title.clone().unwrap_or_default(),
            date: date.into(),
        }
    }

    /// Date printed in place of `{date}`.
    pub fn date(&self) -> &str {
        &self.date
    }

    fn context(&self, page: usize, total: usize) -> StampContext {
        StampContext::new(page, total)
            .with_date(self.date.clone())
            .with_title(self.title.clone())
            .with_format(self.chrome.legend.clone())
    }

    /// Header rows: title lines paired with contact lines, then the address
    /// with the page legend.
    pub fn header_rows(&self) -> Vec<ChromeRow> {
        let style = ChromeStyle::new(self.chrome.header_font.clone(), self.chrome.header_size);
        let bold = ChromeStyle::new(self.chrome.header_bold_font.clone(), self.chrome.header_size);
        let count = self.chrome.title_block.len().max(self.chrome.contact_block.len());

        let mut rows: Vec<ChromeRow> = (0..count)
            .map(|i| {
                let mut row = ChromeRow::new(style.clone());
                if let Some(title) = self.chrome.title_block.get(i) {
                    let mut cell = ChromeCell::new(title.clone(), Slot::Left);
                    if i == 0 {
                        cell = cell.with_style(bold.clone());
                    }
                    row = row.with_cell(cell);
                }
                if let Some(contact) = self.chrome.contact_block.get(i) {
                    row = row.with_right(contact.clone());
                }
                row
            })
            .collect();

        let mut last = ChromeRow::new(style).with_right(Token::Legend.literal());
        if !self.chrome.address.is_empty() {
            last = last.with_left(self.chrome.address.clone());
        }
        rows.push(last);
        rows
    }

    /// Footer row: the note on the left and the page legend on the right.
    pub fn footer_row(&self) -> ChromeRow {
        let style = ChromeStyle::new(self.chrome.footer_font.clone(), self.chrome.footer_size);
        let mut row = ChromeRow::new(style).with_right(Token::Legend.literal());
        if !self.chrome.footer_note.is_empty() {
            row = row.with_left(self.chrome.footer_note.clone());
        }
        row
    }

    /// Stamp the header of `page` for `total` pages (`0` while unknown).
    ///
    /// Returns the y (from the top edge) where body content starts.
    pub fn stamp_header<M: TextMeasurer + ?Sized>(
        &self,
        page: &mut Page,
        total: usize,
        measurer: &M,
    ) -> Result<f32> {
        page.clear(Region::Header);
        let ctx = self.context(page.index(), total);
        let right = page.width() - self.margin_right;
        let mut left = self.margin_left;
        let mut y = self.margin_top;
        let mut block_bottom = y;

        if let Some((w, h)) = self.chrome.logo_box {
            page.draw_box(Region::Header, self.margin_left, y, w, h);
            left += w + LOGO_GAP;
            block_bottom = y + h;
        }

        for row in self.header_rows() {
            let ascent = measurer.ascent(&run_style(&row.style))?;
            draw_row(page, Region::Header, &row, &ctx, left, right, y + ascent, measurer)?;
            y += self.chrome.header_line_height;
        }
        y = y.max(block_bottom);

        if self.chrome.separator {
            y += RULE_GAP;
            page.draw_rule(Region::Header, self.margin_left, right, y);
        }

        log::debug!("stamped header of page {} (total {})", page.index(), total);
        Ok(y + self.chrome.body_gap)
    }

    /// Stamp the footer of `page` for `total` pages (`0` while unknown).
    pub fn stamp_footer<M: TextMeasurer + ?Sized>(
        &self,
        page: &mut Page,
        total: usize,
        measurer: &M,
    ) -> Result<()> {
        page.clear(Region::Footer);
        let ctx = self.context(page.index(), total);
        let left = self.margin_left;
        let right = page.width() - self.margin_right;
        let baseline = page.height() - self.chrome.footer_baseline;

        if self.chrome.separator {
            let rule_y = baseline - self.chrome.footer_size - RULE_GAP;
            page.draw_rule(Region::Footer, left, right, rule_y);
        }
        draw_row(page, Region::Footer, &self.footer_row(), &ctx, left, right, baseline, measurer)?;

        page.mark_footer_stamped();
        log::debug!("stamped footer of page {} (total {})", page.index(), total);
        Ok(())
    }
}

fn run_style(style: &ChromeStyle) -> RunStyle {
    RunStyle::new(style.font.clone(), style.size)
}

/// Draw the cells of one row on a shared baseline between `left` and `right`.
fn draw_row<M: TextMeasurer + ?Sized>(
    page: &mut Page,
    region: Region,
    row: &ChromeRow,
    ctx: &StampContext,
    left: f32,
    right: f32,
    baseline: f32,
    measurer: &M,
) -> Result<()> {
    for cell in row.cells() {
        let chrome_style = row.style_for(cell);
        let style = run_style(chrome_style);
        let text = cell.resolve(ctx);
        if text.is_empty() {
            continue;
        }
        let width = measurer.measure(&text, &style)?;
        let x = match cell.slot {
            Slot::Left => left,
            Slot::Center => left + (right - left - width) / 2.0,
            Slot::Right => right - width,
        };
        page.set_text_color(region, chrome_style.color);
        page.draw_text(region, &text, &style, x, baseline);
    }
    Ok(())
}
