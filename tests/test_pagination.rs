//! Integration tests for pagination, chrome stamping and finalization.

use folio_oxide::document::Region;
use folio_oxide::layout::FixedAdvance;
use folio_oxide::{
    Alignment, BuildState, BuildWarning, ContentScript, Document, Error, LayoutConfig,
    PageChrome, PageSize, TextStyle,
};

/// 300x200 pages; body runs from y=20 to the limit at y=160 with 10pt lines,
/// so exactly 14 lines fit on a page.
fn small_config() -> LayoutConfig {
    let chrome = PageChrome {
        header_line_height: 10.0,
        body_gap: 0.0,
        separator: false,
        footer_note: String::new(),
        ..PageChrome::default()
    };
    LayoutConfig::default()
        .with_page_size(PageSize::Custom(300.0, 200.0))
        .with_margins(20.0, 20.0)
        .with_margin_top(10.0)
        .with_bottom_threshold(40.0)
        .with_body(TextStyle::helvetica(8.0, 10.0))
        .with_block_spacing(0.0)
        .with_compression(false)
        .with_chrome(chrome)
}

fn lines(n: usize) -> ContentScript {
    let text = vec!["linea"; n].join("\n");
    ContentScript::new().paragraph(text, Alignment::Left)
}

fn assembled(config: LayoutConfig, script: &ContentScript) -> Document<FixedAdvance> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut doc = Document::with_measurer(config, FixedAdvance::new(5.0)).unwrap();
    doc.add_script(script).unwrap();
    doc.close().unwrap();
    doc
}

fn text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap()
}

mod page_breaks {
    use super::*;

    #[test]
    fn test_page_count_follows_content() {
        assert_eq!(assembled(small_config(), &lines(14)).page_count(), 1);
        assert_eq!(assembled(small_config(), &lines(15)).page_count(), 2);
        assert_eq!(assembled(small_config(), &lines(30)).page_count(), 3);
    }

    #[test]
    fn test_no_body_content_crosses_the_limit() {
        let doc = assembled(small_config(), &lines(40));
        for page in doc.pages().iter() {
            assert!(page.body_extent() <= 160.0 + 1e-3, "page {}", page.index());
        }
    }

    #[test]
    fn test_blank_lines_are_checked_too() {
        // 14 lines fill page 1 exactly; the blank gap must open page 2
        let content = format!("{}\n\nfin", vec!["linea"; 14].join("\n"));
        let script = ContentScript::new().paragraph(content, Alignment::Left);
        let doc = assembled(small_config().with_small_line_height(4.0), &script);

        assert_eq!(doc.page_count(), 2);
        let body = text(doc.pages().get(2).unwrap().region(Region::Body).build().unwrap());
        // cursor reset to 20, blank advances 4, baseline 24 + 6 = 30 -> PDF y 170
        assert!(body.contains("1 0 0 1 20 170 Tm"));
    }

    #[test]
    fn test_every_page_footer_stamped_once_during_assembly() {
        let doc = assembled(small_config(), &lines(40));
        assert_eq!(doc.state(), BuildState::Assembled);
        for page in doc.pages().iter() {
            assert_eq!(page.footer_stamps(), 1, "page {}", page.index());
        }
    }

    #[test]
    fn test_list_items_wrap_under_their_text() {
        let long = vec!["palabra"; 20].join(" ");
        let script = ContentScript::new().list_item("1.", long, Alignment::Justify);
        let doc = assembled(small_config(), &script);
        let body = text(doc.pages().get(1).unwrap().region(Region::Body).build().unwrap());

        // label at 20 + 14; text column starts at 34 + 10 + 6 = 50
        assert!(body.contains("1 0 0 1 34 174 Tm"));
        assert!(body.contains("1 0 0 1 50 174 Tm"));
        assert!(body.contains("1 0 0 1 50 164 Tm"));
    }

    #[test]
    fn test_leading_blank_lines_cannot_push_past_the_limit() {
        let content = format!("{}fin", "\n".repeat(40));
        let script = ContentScript::new().paragraph(content, Alignment::Left);
        let doc = assembled(small_config(), &script);

        assert_eq!(doc.page_count(), 2);
        for page in doc.pages().iter() {
            assert!(page.body_extent() <= 160.0 + 1e-3, "page {}", page.index());
        }
        let body = text(doc.pages().get(2).unwrap().region(Region::Body).build().unwrap());
        assert!(body.contains("(fin) Tj"));
    }

    #[test]
    fn test_spacer_taller_than_the_page_moves_text_to_next_page() {
        let script = ContentScript::new()
            .spacer(500.0)
            .paragraph("fin", Alignment::Left);
        let doc = assembled(small_config(), &script);

        assert_eq!(doc.page_count(), 2);
        for page in doc.pages().iter() {
            assert!(page.body_extent() <= 160.0 + 1e-3, "page {}", page.index());
        }
        assert!(doc.pages().get(1).unwrap().region(Region::Body).is_empty());
        let body = text(doc.pages().get(2).unwrap().region(Region::Body).build().unwrap());
        assert!(body.contains("1 0 0 1 20 174 Tm\n(fin) Tj"));
    }

    #[test]
    fn test_negative_spacer_from_json_is_rejected() {
        let script = ContentScript::from_json(
            r#"[{"kind": "paragraph", "text": "uno"}, {"kind": "spacer", "height": -40}]"#,
        )
        .unwrap();
        let mut doc = Document::with_measurer(small_config(), FixedAdvance::new(5.0)).unwrap();
        let err = doc.add_script(&script).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}

mod finalization {
    use super::*;

    #[test]
    fn test_estimate_mismatch_three_pages_estimated_five() {
        let config = small_config().with_estimated_total_pages(5);
        let mut doc = assembled(config, &lines(30));
        assert_eq!(doc.page_count(), 3);

        let report = doc.finalize().unwrap();
        assert_eq!(report.total_pages, 3);
        assert_eq!(report.mismatch, Some(5));

        let mismatches: Vec<&BuildWarning> = doc
            .warnings()
            .iter()
            .filter(|w| matches!(w, BuildWarning::PageEstimateMismatch { .. }))
            .collect();
        assert_eq!(
            mismatches,
            vec![&BuildWarning::PageEstimateMismatch {
                estimated: 5,
                actual: 3
            }]
        );

        for page in doc.pages().iter() {
            let footer = text(page.footer_bytes().unwrap());
            let header = text(page.header_bytes().unwrap());
            let legend = format!("(Page {} of 3) Tj", page.index());
            assert!(footer.contains(&legend), "{}", footer);
            assert!(header.contains(&legend), "{}", header);
            assert!(!footer.contains("of 5"));
            assert!(!header.contains("of 5"));
        }
    }

    #[test]
    fn test_provisional_chrome_omits_total() {
        let doc = assembled(small_config().with_estimated_total_pages(5), &lines(30));
        for page in doc.pages().iter() {
            let footer = text(page.footer_bytes().unwrap());
            assert!(footer.contains(&format!("(Page {}) Tj", page.index())));
            assert!(!footer.contains(" of "));
        }
    }

    #[test]
    fn test_provisional_chrome_can_print_estimate() {
        let config = small_config()
            .with_estimated_total_pages(5)
            .with_provisional_estimate(true);
        let mut doc = assembled(config, &lines(30));
        let header = text(doc.pages().get(1).unwrap().header_bytes().unwrap());
        assert!(header.contains("(Page 1 of 5) Tj"));

        doc.finalize().unwrap();
        let header = text(doc.pages().get(1).unwrap().header_bytes().unwrap());
        assert!(header.contains("(Page 1 of 3) Tj"));
    }

    #[test]
    fn test_matching_estimate_has_no_warning() {
        let mut doc = assembled(small_config().with_estimated_total_pages(3), &lines(30));
        let report = doc.finalize().unwrap();
        assert_eq!(report.mismatch, None);
        assert!(doc.warnings().is_empty());
    }

    #[test]
    fn test_refinalizing_is_byte_identical() {
        let mut doc = assembled(small_config().with_estimated_total_pages(5), &lines(30));

        doc.finalize().unwrap();
        let first: Vec<(Vec<u8>, Vec<u8>)> = doc
            .pages()
            .iter()
            .map(|p| (p.header_bytes().unwrap(), p.footer_bytes().unwrap()))
            .collect();

        doc.finalize().unwrap();
        let second: Vec<(Vec<u8>, Vec<u8>)> = doc
            .pages()
            .iter()
            .map(|p| (p.header_bytes().unwrap(), p.footer_bytes().unwrap()))
            .collect();

        assert_eq!(first, second);
        assert_eq!(doc.warnings().len(), 1);
    }

    #[test]
    fn test_finalize_keeps_body_untouched() {
        let mut doc = assembled(small_config(), &lines(20));
        let before: Vec<Vec<u8>> = doc
            .pages()
            .iter()
            .map(|p| p.region(Region::Body).build().unwrap())
            .collect();
        doc.finalize().unwrap();
        let after: Vec<Vec<u8>> = doc
            .pages()
            .iter()
            .map(|p| p.region(Region::Body).build().unwrap())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_finalize_requires_assembled() {
        let mut doc = Document::with_measurer(small_config(), FixedAdvance::new(5.0)).unwrap();
        assert!(doc.finalize().is_err());
        doc.add_script(&lines(3)).unwrap();
        assert!(doc.finalize().is_err());
        assert_eq!(doc.state(), BuildState::Assembling);
    }
}
