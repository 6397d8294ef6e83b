//! Pages and the page collection.
//!
//! A page keeps its header, body and footer in separate content streams. The
//! body is append-only; the header and footer can be cleared and stamped
//! again, which is how finalization replaces provisional page numbers.
//!
//! Drawing helpers take top-down coordinates (distance from the top edge)
//! and flip them into PDF user space.

use crate::error::Result;
use crate::layout::style::RunStyle;
use crate::writer::ContentStreamBuilder;
use std::collections::BTreeSet;

/// Area of a page that owns a content stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Repeating header chrome
    Header,
    /// Flowing content
    Body,
    /// Repeating footer chrome
    Footer,
}

/// One page of the document.
#[derive(Debug, Clone)]
pub struct Page {
    index: usize,
    width: f32,
    height: f32,
    header: ContentStreamBuilder,
    body: ContentStreamBuilder,
    footer: ContentStreamBuilder,
    body_extent: f32,
    footer_stamps: usize,
}

impl Page {
    /// Create an empty page. `index` is 1-based.
    pub fn new(index: usize, width: f32, height: f32) -> Self {
        Self {
            index,
            width,
            height,
            header: ContentStreamBuilder::new(),
            body: ContentStreamBuilder::new(),
            footer: ContentStreamBuilder::new(),
            body_extent: 0.0,
            footer_stamps: 0,
        }
    }

    /// 1-based page number.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Page width in points.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Page height in points.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Content stream of a region.
    pub fn region(&self, region: Region) -> &ContentStreamBuilder {
        match region {
            Region::Header => &self.header,
            Region::Body => &self.body,
            Region::Footer => &self.footer,
        }
    }

    fn region_mut(&mut self, region: Region) -> &mut ContentStreamBuilder {
        match region {
            Region::Header => &mut self.header,
            Region::Body => &mut self.body,
            Region::Footer => &mut self.footer,
        }
    }

    /// Discard everything drawn in a chrome region.
    ///
    /// The body cannot be cleared; requests for it are ignored.
    pub fn clear(&mut self, region: Region) {
        if region == Region::Body {
            log::warn!("refusing to clear the body of page {}", self.index);
            return;
        }
        *self.region_mut(region) = ContentStreamBuilder::new();
    }

    /// Draw `text` with its left edge at `x` and its baseline `baseline` points
    /// below the top edge.
    pub fn draw_text(&mut self, region: Region, text: &str, style: &RunStyle, x: f32, baseline: f32) {
        let y = self.height - baseline;
        self.region_mut(region)
            .set_font(&style.font, style.size)
            .text(text, x, y);
    }

    /// Set the fill color used by subsequent text in `region`.
    pub fn set_text_color(&mut self, region: Region, (r, g, b): (f32, f32, f32)) {
        self.region_mut(region).set_fill_color(r, g, b);
    }

    /// Draw a horizontal rule from `x1` to `x2`, `y` points below the top edge.
    pub fn draw_rule(&mut self, region: Region, x1: f32, x2: f32, y: f32) {
        let pdf_y = self.height - y;
        self.region_mut(region)
            .set_line_width(0.5)
            .line(x1, pdf_y, x2, pdf_y);
    }

    /// Stroke a placeholder box whose top-left corner is `top` points below
    /// the top edge.
    pub fn draw_box(&mut self, region: Region, x: f32, top: f32, width: f32, height: f32) {
        let pdf_y = self.height - top - height;
        self.region_mut(region)
            .set_line_width(0.5)
            .rect(x, pdf_y, width, height)
            .stroke();
    }

    /// Whether any body content has been written.
    pub fn has_body_content(&self) -> bool {
        !self.body.is_empty()
    }

    /// Record that body content reaches down to `bottom`.
    pub fn extend_body(&mut self, bottom: f32) {
        self.body_extent = self.body_extent.max(bottom);
    }

    /// Lowest point reached by body content, from the top edge.
    pub fn body_extent(&self) -> f32 {
        self.body_extent
    }

    /// Count one footer stamp.
    pub fn mark_footer_stamped(&mut self) {
        self.footer_stamps += 1;
    }

    /// How many times the footer has been stamped.
    pub fn footer_stamps(&self) -> usize {
        self.footer_stamps
    }

    /// Serialized header region.
    pub fn header_bytes(&self) -> Result<Vec<u8>> {
        self.header.build()
    }

    /// Serialized footer region.
    pub fn footer_bytes(&self) -> Result<Vec<u8>> {
        self.footer.build()
    }

    /// Full page content stream: each non-empty region wrapped in `q`/`Q`.
    pub fn render(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for region in [&self.header, &self.body, &self.footer] {
            if region.is_empty() {
                continue;
            }
            out.extend_from_slice(b"q\n");
            out.extend_from_slice(&region.build()?);
            out.extend_from_slice(b"Q\n");
        }
        Ok(out)
    }

    /// Fonts referenced by any region.
    pub fn fonts_used(&self) -> BTreeSet<String> {
        [&self.header, &self.body, &self.footer]
            .iter()
            .flat_map(|region| region.fonts_used().iter().cloned())
            .collect()
    }
}

/// Pages of one build, addressed by 1-based index.
#[derive(Debug, Clone, Default)]
pub struct PageCollection {
    pages: Vec<Page>,
}

impl PageCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new page and return it.
    pub fn open(&mut self, width: f32, height: f32) -> &mut Page {
        let index = self.pages.len() + 1;
        self.pages.push(Page::new(index, width, height));
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Page by 1-based index.
    pub fn get(&self, index: usize) -> Option<&Page> {
        index.checked_sub(1).and_then(|i| self.pages.get(i))
    }

    /// Mutable page by 1-based index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Page> {
        index.checked_sub(1).and_then(move |i| self.pages.get_mut(i))
    }

    /// The page currently being written.
    pub fn current(&self) -> Option<&Page> {
        self.pages.last()
    }

    /// Mutable access to the page currently being written.
    pub fn current_mut(&mut self) -> Option<&mut Page> {
        self.pages.last_mut()
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no page has been opened.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages in increasing index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    /// Mutable pages in increasing index order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Page> {
        self.pages.iter_mut()
    }
}
