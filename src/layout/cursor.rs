//! Write cursor and page-break monitor.
//!
//! Layout runs top-down: `y` is the distance from the top edge of the page
//! and grows as content is written. The PDF surface flips it at draw time.

/// Write position on the current page, in points from the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cursor {
    /// Horizontal position
    pub x: f32,
    /// Distance from the top edge of the page
    pub y: f32,
}

impl Cursor {
    /// Create a cursor at `(x, y)`.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Move down by `dy` points.
    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Return to `(x, y)`, as after a page break.
    pub fn reset(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }
}

/// Decides whether the next write must go to a new page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBreakMonitor {
    /// Page height in points
    pub page_height: f32,
    /// Distance from the bottom edge that body content may not cross
    pub bottom_threshold: f32,
}

impl PageBreakMonitor {
    /// Create a monitor for pages of `page_height` points.
    pub fn new(page_height: f32, bottom_threshold: f32) -> Self {
        Self {
            page_height,
            bottom_threshold,
        }
    }

    /// Lowest y that body content may reach.
    pub fn limit(&self) -> f32 {
        self.page_height - self.bottom_threshold
    }

    /// Whether writing something `advance` points tall at `cursor` would cross
    /// the limit.
    ///
    /// A fresh page, one whose cursor still sits at the body start, never
    /// breaks: an item taller than the whole body area is written there and
    /// overflows.
    pub fn needs_break(&self, cursor: &Cursor, advance: f32, page_is_fresh: bool) -> bool {
        if page_is_fresh {
            if cursor.y + advance > self.limit() {
                log::debug!(
                    "{:.1}pt item does not fit an empty page (limit {:.1}), writing anyway",
                    advance,
                    self.limit()
                );
            }
            return false;
        }
        cursor.y + advance > self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves_down() {
        let mut cursor = Cursor::new(72.0, 100.0);
        cursor.advance(14.0);
        assert_eq!(cursor.y, 114.0);
        cursor.reset(72.0, 90.0);
        assert_eq!(cursor, Cursor::new(72.0, 90.0));
    }

    #[test]
    fn test_limit() {
        let monitor = PageBreakMonitor::new(842.0, 60.0);
        assert_eq!(monitor.limit(), 782.0);
    }

    #[test]
    fn test_break_before_crossing() {
        let monitor = PageBreakMonitor::new(842.0, 60.0);
        assert!(!monitor.needs_break(&Cursor::new(0.0, 768.0), 14.0, false));
        assert!(monitor.needs_break(&Cursor::new(0.0, 769.0), 14.0, false));
    }

    #[test]
    fn test_fresh_page_never_breaks() {
        let monitor = PageBreakMonitor::new(200.0, 50.0);
        assert!(!monitor.needs_break(&Cursor::new(0.0, 140.0), 40.0, true));
        assert!(monitor.needs_break(&Cursor::new(0.0, 140.0), 40.0, false));
    }
}
