//! Document assembler.
//!
//! Lays content blocks out onto pages in one forward pass. Every unit goes
//! through the same path: tokenize, break into lines, then for each line ask
//! the page-break monitor, place the line and advance the cursor. Headers are
//! stamped with the provisional total as pages open; footers are stamped as
//! pages close.

use super::build::BuildWarning;
use super::chrome::ChromeStamper;
use super::page::{PageCollection, Region};
use super::script::ContentBlock;
use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::layout::cursor::{Cursor, PageBreakMonitor};
use crate::layout::justify::layout_line;
use crate::layout::line_breaker::{break_lines, Line, WIDTH_EPSILON};
use crate::layout::markup::{split_blocks, Block};
use crate::layout::measure::TextMeasurer;
use crate::layout::style::{Alignment, RunStyle, TextStyle};

/// Mutable layout state of one build.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    /// Pages written so far
    pub pages: PageCollection,
    /// Write position on the current page
    pub cursor: Cursor,
    /// Total printed on headers and footers during assembly
    pub provisional_total: usize,
    /// Where the body of the current page starts, below its header
    pub body_top: f32,
}

/// Label drawn in front of the first line of a unit.
struct Label<'s> {
    text: &'s str,
    style: RunStyle,
    x: f32,
}

/// Horizontal frame of a unit's lines.
#[derive(Debug, Clone, Copy)]
struct Column {
    left: f32,
    width: f32,
}

/// Lays blocks onto pages. Borrows the state it writes for one call sequence.
pub struct Assembler<'a, M: TextMeasurer + ?Sized> {
    config: &'a LayoutConfig,
    measurer: &'a M,
    stamper: &'a ChromeStamper,
    monitor: PageBreakMonitor,
    state: &'a mut Assembly,
    warnings: &'a mut Vec<BuildWarning>,
}

impl<'a, M: TextMeasurer + ?Sized> Assembler<'a, M> {
    /// Create an assembler over `state`.
    pub fn new(
        config: &'a LayoutConfig,
        measurer: &'a M,
        stamper: &'a ChromeStamper,
        state: &'a mut Assembly,
        warnings: &'a mut Vec<BuildWarning>,
    ) -> Self {
        let (_, height) = config.page_dimensions();
        Self {
            config,
            measurer,
            stamper,
            monitor: PageBreakMonitor::new(height, config.bottom_threshold),
            state,
            warnings,
        }
    }

    /// Open the first page if none exists yet.
    pub fn begin(&mut self) -> Result<()> {
        if self.state.pages.is_empty() {
            self.open_page()?;
        }
        Ok(())
    }

    /// Lay out every block of `blocks` in order.
    pub fn emit_all<'b, I>(&mut self, blocks: I) -> Result<()>
    where
        I: IntoIterator<Item = &'b ContentBlock>,
    {
        for block in blocks {
            self.emit(block)?;
        }
        Ok(())
    }

    /// Lay out one block.
    pub fn emit(&mut self, block: &ContentBlock) -> Result<()> {
        self.begin()?;
        let config = self.config;
        let full = Column {
            left: self.config.margin_left,
            width: self.config.content_width(),
        };

        match block {
            ContentBlock::Title { text, align } => {
                self.write_text(text, &config.title, *align, full, None)?;
            },
            ContentBlock::Heading { label, text } => {
                let style = &config.heading;
                match label {
                    Some(label) => {
                        let label_style = style.run_style(true);
                        self.write_labeled(label, label_style, full.left, text, style, Alignment::Left)?;
                    },
                    None => self.write_text(text, style, Alignment::Left, full, None)?,
                }
            },
            ContentBlock::Paragraph { text, align } => {
                self.write_text(text, &config.body, *align, full, None)?;
            },
            ContentBlock::ListItem { label, text, align } => {
                let style = &config.body;
                let label_x = full.left + config.list_indent;
                self.write_labeled(label, style.run_style(true), label_x, text, style, *align)?;
            },
            ContentBlock::Spacer { height } => {
                if height.is_nan() || *height < 0.0 {
                    return Err(Error::InvalidConfig(format!("spacer height {} is negative", height)));
                }
                self.ensure_room(*height)?;
                self.state.cursor.advance(*height);
                return Ok(());
            },
        }

        self.state.cursor.advance(self.config.block_spacing);
        Ok(())
    }

    /// Close the last page and return the page count.
    pub fn finish(mut self) -> Result<usize> {
        self.begin()?;
        let total = self.state.provisional_total;
        if let Some(page) = self.state.pages.current_mut() {
            self.stamper.stamp_footer(page, total, self.measurer)?;
        }
        Ok(self.state.pages.len())
    }

    fn open_page(&mut self) -> Result<()> {
        let (width, height) = self.config.page_dimensions();
        let total = self.state.provisional_total;
        let page = self.state.pages.open(width, height);
        let top = self.stamper.stamp_header(page, total, self.measurer)?;
        log::debug!("opened page {}, body starts at {:.1}", page.index(), top);
        self.state.cursor.reset(self.config.margin_left, top);
        self.state.body_top = top;
        Ok(())
    }

    fn break_page(&mut self) -> Result<()> {
        let total = self.state.provisional_total;
        if let Some(page) = self.state.pages.current_mut() {
            log::debug!("page {} full at y={:.1}", page.index(), self.state.cursor.y);
            self.stamper.stamp_footer(page, total, self.measurer)?;
        }
        self.open_page()
    }

    /// Break the page first if something `advance` tall would cross the limit.
    ///
    /// Only a page whose cursor has not moved past the body start is fresh;
    /// gaps count as much as drawn lines.
    fn ensure_room(&mut self, advance: f32) -> Result<()> {
        let fresh = self.state.cursor.y <= self.state.body_top;
        if self.monitor.needs_break(&self.state.cursor, advance, fresh) {
            self.break_page()?;
        }
        Ok(())
    }

    fn write_labeled(
        &mut self,
        label: &str,
        label_style: RunStyle,
        label_x: f32,
        text: &str,
        style: &TextStyle,
        align: Alignment,
    ) -> Result<()> {
        let label_width = self.measurer.measure(label, &label_style)?;
        let left = label_x + label_width + self.config.label_gap;
        let column = Column {
            left,
            width: self.config.margin_left + self.config.content_width() - left,
        };
        let label = Label {
            text: label,
            style: label_style,
            x: label_x,
        };
        self.write_text(text, style, align, column, Some(label))
    }

    fn write_text(
        &mut self,
        text: &str,
        style: &TextStyle,
        align: Alignment,
        column: Column,
        mut label: Option<Label<'_>>,
    ) -> Result<()> {
        for block in split_blocks(text) {
            match block {
                Block::Blank => {
                    self.ensure_room(self.config.small_line_height)?;
                    self.state.cursor.advance(self.config.small_line_height);
                },
                Block::Text(runs) => {
                    let lines = break_lines(&runs, style, column.width, align, self.measurer)?;
                    for line in &lines {
                        self.write_line(line, style, column, label.take())?;
                    }
                },
            }
        }
        if let Some(label) = label {
            // Label with no text still gets its own line.
            self.write_line(&Line::new(align), style, column, Some(label))?;
        }
        Ok(())
    }

    fn write_line(
        &mut self,
        line: &Line,
        style: &TextStyle,
        column: Column,
        label: Option<Label<'_>>,
    ) -> Result<()> {
        self.ensure_room(style.line_height)?;

        let ascent = self.measurer.ascent(&style.run_style(false))?;
        let top = self.state.cursor.y;
        let baseline = top + ascent;
        let placed = layout_line(line, column.left, column.width, self.config.justify_last_line);

        let Some(page) = self.state.pages.current_mut() else {
            return Ok(());
        };
        if let Some(label) = label {
            page.draw_text(Region::Body, label.text, &label.style, label.x, baseline);
        }
        for run in &placed {
            page.draw_text(Region::Body, run.text, run.style, run.x, baseline);
        }
        page.extend_body(top + style.line_height);
        let page_index = page.index();

        if line.words.len() == 1 && line.natural_width > column.width + WIDTH_EPSILON {
            self.warnings.push(BuildWarning::OverflowingWord {
                page: page_index,
                word: line.text(),
                width: line.natural_width,
                column: column.width,
            });
        }

        self.state.cursor.advance(style.line_height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageChrome;
    use crate::layout::measure::FixedAdvance;
    use crate::writer::LegendFormat;

    fn small_config() -> LayoutConfig {
        // 100pt of body per page: header ends at 10 + 10 + 0 gap; limit 120
        let chrome = PageChrome {
            header_line_height: 10.0,
            body_gap: 0.0,
            separator: false,
            footer_note: String::new(),
            legend: LegendFormat::default(),
            ..PageChrome::default()
        };
        LayoutConfig::default()
            .with_page_size(crate::config::PageSize::Custom(300.0, 150.0))
            .with_margins(20.0, 20.0)
            .with_margin_top(10.0)
            .with_bottom_threshold(30.0)
            .with_body(TextStyle::helvetica(8.0, 10.0))
            .with_block_spacing(0.0)
            .with_chrome(chrome)
    }

    fn assemble(config: &LayoutConfig, blocks: &[ContentBlock]) -> (Assembly, Vec<BuildWarning>) {
        let m = FixedAdvance::new(5.0);
        let stamper = ChromeStamper::new(config, "");
        let mut state = Assembly::default();
        let mut warnings = Vec::new();
        let mut assembler = Assembler::new(config, &m, &stamper, &mut state, &mut warnings);
        assembler.emit_all(blocks).unwrap();
        assembler.finish().unwrap();
        (state, warnings)
    }

    fn paragraph(text: &str) -> ContentBlock {
        ContentBlock::Paragraph {
            text: text.to_string(),
            align: Alignment::Left,
        }
    }

    #[test]
    fn test_lines_fill_page_then_break() {
        let config = small_config();
        // 10 lines fit between y=20 and the limit at 120
        let text = vec!["linea"; 25].join("\n");
        let (state, _) = assemble(&config, &[paragraph(&text)]);

        assert_eq!(state.pages.len(), 3);
        for page in state.pages.iter() {
            assert!(page.body_extent() <= 120.0 + 1e-3);
            assert_eq!(page.footer_stamps(), 1);
        }
    }

    #[test]
    fn test_blank_lines_advance_without_drawing() {
        let config = small_config().with_small_line_height(4.0);
        let (state, _) = assemble(&config, &[paragraph("uno\n\ndos")]);
        let body = state.pages.get(1).unwrap().region(Region::Body).build().unwrap();
        let body = String::from_utf8(body).unwrap();
        // first baseline 20 + 6, second 20 + 10 + 4 + 6
        assert!(body.contains("1 0 0 1 20 124 Tm"));
        assert!(body.contains("1 0 0 1 20 110 Tm"));
        assert_eq!(state.cursor.y, 44.0);
    }

    #[test]
    fn test_list_item_label_and_hanging_indent() {
        let config = small_config();
        let item = ContentBlock::ListItem {
            label: "a)".to_string(),
            text: "uno dos".to_string(),
            align: Alignment::Left,
        };
        let (state, _) = assemble(&config, &[item]);
        let body = state.pages.get(1).unwrap().region(Region::Body).build().unwrap();
        let body = String::from_utf8(body).unwrap();
        // label at 20 + 14; text at 34 + 10 + 6
        assert!(body.contains("1 0 0 1 34 124 Tm"));
        assert!(body.contains("1 0 0 1 50 124 Tm"));
        assert!(body.contains("/HelveticaBold 8 Tf"));
    }

    #[test]
    fn test_overflowing_word_is_recorded() {
        let config = small_config();
        let (state, warnings) = assemble(&config, &[paragraph(&"x".repeat(100))]);
        assert_eq!(state.pages.len(), 1);
        assert!(matches!(
            warnings.as_slice(),
            [BuildWarning::OverflowingWord { page: 1, .. }]
        ));
    }

    #[test]
    fn test_empty_script_still_has_a_page() {
        let config = small_config();
        let (state, _) = assemble(&config, &[]);
        assert_eq!(state.pages.len(), 1);
        assert_eq!(state.pages.get(1).unwrap().footer_stamps(), 1);
    }

    #[test]
    fn test_gap_on_fresh_page_leaves_page_not_fresh() {
        let config = small_config();
        let blocks = [ContentBlock::Spacer { height: 95.0 }, paragraph("uno")];
        let (state, _) = assemble(&config, &blocks);
        assert_eq!(state.pages.len(), 2);
        assert!(state.pages.get(1).unwrap().region(Region::Body).is_empty());
        assert_eq!(state.body_top, 20.0);
    }

    #[test]
    fn test_negative_spacer_is_rejected() {
        let config = small_config();
        let m = FixedAdvance::new(5.0);
        let stamper = ChromeStamper::new(&config, "");
        let mut state = Assembly::default();
        let mut warnings = Vec::new();
        let mut assembler = Assembler::new(&config, &m, &stamper, &mut state, &mut warnings);
        let err = assembler.emit(&ContentBlock::Spacer { height: -30.0 }).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_tall_line_on_fresh_page_does_not_loop() {
        let config = small_config().with_body(TextStyle::helvetica(8.0, 500.0));
        let (state, _) = assemble(&config, &[paragraph("uno\ndos")]);
        assert_eq!(state.pages.len(), 2);
    }
}
