//! Integration tests for end-to-end generation and PDF export.

use chrono::{Local, TimeZone};
use folio_oxide::layout::{runs, StyledRun};
use folio_oxide::{
    generate, Alignment, ContentScript, DocumentInfo, Document, Error, LayoutConfig, PageChrome,
};
use tempfile::tempdir;

fn contract() -> ContentScript {
    ContentScript::new()
        .title("CONTRATO DE SUMINISTRO")
        .heading(Some("PRIMERA."), "Objeto")
        .paragraph(
            "**EL PROVEEDOR** se obliga a entregar los bienes descritos en el anexo, \
             en el lugar y plazo convenidos.\n\nEl pago se realizará a los treinta días.",
            Alignment::Justify,
        )
        .list_item("a)", "Entregar en tiempo y forma.", Alignment::Left)
        .list_item("b)", "Emitir la factura correspondiente.", Alignment::Left)
}

fn uncompressed() -> LayoutConfig {
    LayoutConfig::default()
        .with_compression(false)
        .with_chrome(
            PageChrome::default()
                .with_title_block(["ACME S.A.", "Contrato de suministro"])
                .with_contact_block(["ventas@acme.test", "+54 11 5555 0000"])
                .with_address("Av. Siempre Viva 742")
                .with_logo_box(60.0, 28.0),
        )
}

mod generation {
    use super::*;

    #[test]
    fn test_tokenizer_through_public_api() {
        assert_eq!(
            runs("Hola **mundo** feliz"),
            vec![
                StyledRun::new("Hola ", false),
                StyledRun::new("mundo", true),
                StyledRun::new(" feliz", false),
            ]
        );
    }

    #[test]
    fn test_generate_produces_pdf() {
        let bytes = generate(LayoutConfig::default(), &contract()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.ends_with(b"%%EOF"));

        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("/Count 1"));
        assert!(content.contains("/Filter /FlateDecode"));
    }

    #[test]
    fn test_uncompressed_content_is_readable() {
        let bytes = generate(uncompressed(), &contract()).unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.contains("(PROVEEDOR) Tj"));
        assert!(content.contains("/HelveticaBold 10 Tf"));
        assert!(content.contains("(ACME S.A.) Tj"));
        assert!(content.contains("(Page 1 of 1) Tj"));
        assert!(!content.contains("(Page 1) Tj"));
        // logo placeholder
        assert!(content.contains(" re\nS"));
    }

    #[test]
    fn test_accented_text_is_win_ansi() {
        let script = ContentScript::new().paragraph("Año", Alignment::Left);
        let bytes = generate(uncompressed(), &script).unwrap();
        assert!(bytes.windows(5).any(|w| w == b"(A\xF1o)"));

        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("/Encoding /WinAnsiEncoding"));
    }

    #[test]
    fn test_only_used_fonts_are_embedded_as_resources() {
        let bytes = generate(uncompressed(), &contract()).unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("/BaseFont /Helvetica-Bold"));
        assert!(!content.contains("/BaseFont /Times-Roman"));
        assert!(!content.contains("/BaseFont /Courier"));
    }

    #[test]
    fn test_long_document_spans_pages() {
        let paragraph = vec!["Las partes acuerdan las condiciones generales del contrato."; 12]
            .join(" ");
        let script: ContentScript = (0..12)
            .map(|_| folio_oxide::ContentBlock::Paragraph {
                text: paragraph.clone(),
                align: Alignment::Justify,
            })
            .collect();

        let mut doc = Document::new(uncompressed()).unwrap();
        doc.add_script(&script).unwrap();
        let total = doc.close().unwrap();
        assert!(total > 1);
        doc.finalize().unwrap();

        let bytes = doc.export().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains(&format!("/Count {}", total)));
        for page in 1..=total {
            assert!(content.contains(&format!("(Page {} of {}) Tj", page, total)));
        }
    }
}

mod inputs_and_outputs {
    use super::*;

    #[test]
    fn test_json_script() {
        let script = ContentScript::from_json(
            r#"[
                {"kind": "title", "text": "ACTA"},
                {"kind": "paragraph", "text": "Se deja **constancia**.", "align": "justify"},
                {"kind": "spacer", "height": 20},
                {"kind": "list_item", "label": "1.", "text": "Primero"}
            ]"#,
        )
        .unwrap();
        let bytes = generate(uncompressed(), &script).unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("(constancia) Tj"));
    }

    #[test]
    fn test_malformed_json_script() {
        let err = ContentScript::from_json("[{\"kind\": ").unwrap_err();
        assert!(matches!(err, Error::Script(_)));
    }

    #[test]
    fn test_metadata_and_date() {
        let config = uncompressed().with_metadata(DocumentInfo {
            title: Some("Contrato".to_string()),
            author: Some("ACME".to_string()),
            subject: None,
        });
        let time = Local.with_ymd_and_hms(2024, 5, 17, 9, 0, 0).unwrap();
        let doc = Document::new(config).unwrap().with_build_time(time).unwrap();
        let bytes = doc.run(&contract()).unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.contains("/Title (Contrato)"));
        assert!(content.contains("/Author (ACME)"));
        assert!(content.contains("/CreationDate (D:20240517090000)"));
        assert!(content.contains("(2024-05-17) Tj"));
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contrato.pdf");

        let mut doc = Document::new(LayoutConfig::default()).unwrap();
        doc.add_script(&contract()).unwrap();
        doc.close().unwrap();
        doc.finalize().unwrap();
        doc.save(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_unknown_font_fails_without_output() {
        let mut config = LayoutConfig::default();
        config.heading.font = "Garamond-Bold".to_string();
        config.heading.emphasis_font = "Garamond-Bold".to_string();

        let err = generate(config, &contract()).unwrap_err();
        assert!(matches!(err, Error::GenerationFailed(_)));
        assert!(err.to_string().contains("Garamond-Bold"));
    }

    #[test]
    fn test_invalid_config_is_a_generation_failure() {
        let config = LayoutConfig::default().with_margins(400.0, 400.0);
        let err = generate(config, &contract()).unwrap_err();
        match err {
            Error::GenerationFailed(inner) => assert!(matches!(*inner, Error::InvalidConfig(_))),
            other => panic!("unexpected {:?}", other),
        }
    }
}
