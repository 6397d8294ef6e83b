//! Second pass: stamp every page with the true page count.

use super::chrome::ChromeStamper;
use super::page::PageCollection;
use crate::error::Result;
use crate::layout::measure::TextMeasurer;

/// Outcome of a finalization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalizeReport {
    /// Page count printed on every page
    pub total_pages: usize,
    /// `Some(estimate)` when the authored estimate disagrees with the count
    pub mismatch: Option<usize>,
}

/// Re-stamp header and footer of pages `1..=N` with `N`, in index order.
///
/// `estimate` of `0` disables the sanity check. A mismatch is reported,
/// never fatal.
pub fn finalize<M: TextMeasurer + ?Sized>(
    pages: &mut PageCollection,
    stamper: &ChromeStamper,
    measurer: &M,
    estimate: usize,
) -> Result<FinalizeReport> {
    let total = pages.len();

    for page in pages.iter_mut() {
        stamper.stamp_header(page, total, measurer)?;
        stamper.stamp_footer(page, total, measurer)?;
    }

    let mismatch = (estimate > 0 && estimate != total).then_some(estimate);
    log::debug!("finalized {} pages (estimate {})", total, estimate);

    Ok(FinalizeReport {
        total_pages: total,
        mismatch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::measure::FixedAdvance;

    fn pages(n: usize, stamper: &ChromeStamper, m: &FixedAdvance) -> PageCollection {
        let mut pages = PageCollection::new();
        for _ in 0..n {
            let page = pages.open(595.0, 842.0);
            stamper.stamp_header(page, 0, m).unwrap();
            stamper.stamp_footer(page, 0, m).unwrap();
        }
        pages
    }

    #[test]
    fn test_every_page_gets_true_total() {
        let m = FixedAdvance::new(4.0);
        let stamper = ChromeStamper::new(&LayoutConfig::default(), "2024-01-01");
        let mut pages = pages(3, &stamper, &m);

        let report = finalize(&mut pages, &stamper, &m, 0).unwrap();
        assert_eq!(report.total_pages, 3);
        assert_eq!(report.mismatch, None);

        for page in pages.iter() {
            let footer = String::from_utf8(page.footer_bytes().unwrap()).unwrap();
            assert!(footer.contains(&format!("(Page {} of 3) Tj", page.index())));
        }
    }

    #[test]
    fn test_mismatch_is_reported() {
        let m = FixedAdvance::new(4.0);
        let stamper = ChromeStamper::new(&LayoutConfig::default(), "");
        let mut pages = pages(2, &stamper, &m);
        let report = finalize(&mut pages, &stamper, &m, 5).unwrap();
        assert_eq!(report.mismatch, Some(5));

        let report = finalize(&mut pages, &stamper, &m, 2).unwrap();
        assert_eq!(report.mismatch, None);
    }

    #[test]
    fn test_second_pass_is_byte_identical() {
        let m = FixedAdvance::new(4.0);
        let stamper = ChromeStamper::new(&LayoutConfig::default(), "2024-01-01");
        let mut pages = pages(2, &stamper, &m);

        finalize(&mut pages, &stamper, &m, 0).unwrap();
        let first: Vec<Vec<u8>> = pages.iter().map(|p| p.render().unwrap()).collect();
        finalize(&mut pages, &stamper, &m, 0).unwrap();
        let second: Vec<Vec<u8>> = pages.iter().map(|p| p.render().unwrap()).collect();
        assert_eq!(first, second);
    }
}
