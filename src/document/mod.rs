//! Paginated document assembly.
//!
//! ```text
//! ContentScript
//!     ↓
//! [Assembler] (tokenize → break → page-break check → place → advance)
//!     ↓            provisional headers/footers via [ChromeStamper]
//! PageCollection
//!     ↓
//! [finalize] (re-stamp pages 1..=N with N)
//!     ↓
//! [PdfWriter] → PDF bytes
//! ```

pub mod assembler;
pub mod build;
pub mod chrome;
pub mod finalizer;
pub mod page;
pub mod script;

pub use assembler::{Assembler, Assembly};
pub use build::{generate, generate_with, BuildState, BuildWarning, Document};
pub use chrome::ChromeStamper;
pub use finalizer::{finalize, FinalizeReport};
pub use page::{Page, PageCollection, Region};
pub use script::{ContentBlock, ContentScript};
