// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Folio Oxide
//!
//! Pagination and justified text layout for generated PDF documents.
//!
//! Turns an authored, linear content script (titles, headings, paragraphs
//! with `**emphasis**`, labeled list items) into a multi-page PDF with
//! repeating headers and footers and correct "Page X of N" numbering, even
//! though N is only known once all content has been laid out.
//!
//! ## Core Features
//!
//! - **Markup**: `**...**` emphasis runs, line breaks as sub-paragraphs
//! - **Line Breaking**: greedy wrap that keeps each run's style from measurement to drawing
//! - **Justification**: left, center, right and fully justified lines
//! - **Pagination**: page breaks taken before, never after, an overflowing line
//! - **Two-Pass Numbering**: provisional headers replaced once the page count is fixed
//! - **Output**: Base-14 fonts in WinAnsi encoding, Flate-compressed content streams
//!
//! ## Architecture
//!
//! ```text
//! ContentScript → layout (markup, line_breaker, justify, cursor)
//!              → document (assembler, chrome, finalizer)
//!              → writer (content streams, PdfWriter)
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use folio_oxide::{generate, Alignment, ContentScript, LayoutConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let script = ContentScript::new()
//!     .title("SUPPLY CONTRACT")
//!     .heading(Some("FIRST."), "Object")
//!     .paragraph("**THE SUPPLIER** agrees to deliver...", Alignment::Justify)
//!     .list_item("a)", "Deliver on time.", Alignment::Left);
//!
//! let config = LayoutConfig::default().with_estimated_total_pages(1);
//! let pdf = generate(config, &script)?;
//! std::fs::write("contract.pdf", pdf)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Step by Step
//!
//! ```ignore
//! use folio_oxide::{Document, LayoutConfig};
//!
//! let mut doc = Document::new(LayoutConfig::default())?;
//! doc.add_script(&script)?;      // Empty -> Assembling
//! doc.close()?;                  // -> Assembled
//! let report = doc.finalize()?;  // -> Finalized
//! let pdf = doc.export()?;       // -> Exported
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// PDF object model
pub mod object;

// Configuration
pub mod config;

// Text layout
pub mod layout;

// Paginated assembly
pub mod document;

// PDF writing
pub mod writer;

// Re-exports
pub use config::{DocumentInfo, LayoutConfig, PageChrome, PageSize};
pub use document::{
    generate, generate_with, BuildState, BuildWarning, ContentBlock, ContentScript, Document,
    FinalizeReport,
};
pub use error::{Error, Result};
pub use layout::{Alignment, TextMeasurer, TextStyle};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
