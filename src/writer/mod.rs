//! PDF writing module.
//!
//! ## Architecture
//!
//! ```text
//! Page regions (header / body / footer)
//!     ↓
//! [ContentStreamBuilder] (drawing ops → content stream bytes)
//!     ↓
//! [PdfWriter] (assembles complete PDF structure)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! [`FontManager`] supplies Base-14 metrics for measuring text, and
//! [`ChromeRow`]s describe the repeating page chrome.
//!
//! ## Low-Level API (PdfWriter)
//!
//! ```ignore
//! use folio_oxide::writer::{ContentStreamBuilder, PdfWriter};
//!
//! let mut content = ContentStreamBuilder::new();
//! content.set_font("Helvetica", 12.0).text("Hello, World!", 72.0, 720.0);
//!
//! let mut writer = PdfWriter::new();
//! writer.add_page(612.0, 792.0, content.build()?, content.fonts_used().clone());
//! let bytes = writer.finish()?;
//! ```

mod content_stream;
mod font_manager;
mod object_serializer;
mod page_template;
mod pdf_writer;

pub use content_stream::{font_resource_name, win_ansi_byte, ContentStreamBuilder, ContentStreamOp};
pub use font_manager::{FontFamily, FontInfo, FontManager, FontWeight};
pub use object_serializer::ObjectSerializer;
pub use page_template::{
    ChromeCell, ChromeRow, ChromeStyle, LegendFormat, Slot, StampContext, Token,
};
pub use pdf_writer::{PdfWriter, PdfWriterConfig};
