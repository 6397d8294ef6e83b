//! PDF document writer.
//!
//! Assembles finished page content streams into a complete file: header,
//! objects in ascending id order, cross-reference table and trailer.
//!
//! Object numbering is fixed by the page and font counts:
//!
//! ```text
//! 1..=F          Type1 font dictionaries, by name
//! F+1            Catalog
//! F+2            Pages tree
//! F+3+2i, F+4+2i page i and its content stream
//! F+3+2P         Info dictionary
//! ```

use super::content_stream::font_resource_name;
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::object::Object;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Creation date in PDF date format (`D:YYYYMMDDHHmmSS`)
    pub creation_date: Option<String>,
    /// Whether to deflate content streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            author: None,
            subject: None,
            creator: Some(crate::NAME.to_string()),
            creation_date: None,
            compress: false,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set document subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the creation date.
    pub fn with_creation_date<Tz>(mut self, date: &chrono::DateTime<Tz>) -> Self
    where
        Tz: chrono::TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.creation_date = Some(date.format("D:%Y%m%d%H%M%S").to_string());
        self
    }

    /// Enable or disable FlateDecode compression of content streams.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    fn info(&self) -> Object {
        let text = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Creator", &self.creator),
        ];
        let mut entries: Vec<(&str, Object)> = text
            .into_iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (key, text_string(v))))
            .collect();
        if let Some(date) = &self.creation_date {
            entries.push(("CreationDate", Object::string(date)));
        }
        Object::dict(entries)
    }
}

/// Deflate `data` for a FlateDecode stream.
fn compress_data(data: &[u8]) -> io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Text string for the Info dictionary: literal when ASCII, UTF-16BE otherwise.
fn text_string(s: &str) -> Object {
    if s.is_ascii() {
        return Object::string(s);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in s.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes)
}

fn font_dict(base_font: &str) -> Object {
    Object::dict([
        ("Type", Object::name("Font")),
        ("Subtype", Object::name("Type1")),
        ("BaseFont", Object::name(base_font)),
        ("Encoding", Object::name("WinAnsiEncoding")),
    ])
}

/// Appends indirect objects in id order and remembers where each starts.
struct ObjectWriter {
    out: Vec<u8>,
    offsets: Vec<usize>,
    serializer: ObjectSerializer,
}

impl ObjectWriter {
    fn new(version: &str) -> io::Result<Self> {
        let mut out = Vec::new();
        writeln!(out, "%PDF-{}", version)?;
        // binary marker
        out.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");
        Ok(Self {
            out,
            offsets: Vec::new(),
            serializer: ObjectSerializer::new(),
        })
    }

    fn write(&mut self, id: u32, obj: &Object) -> io::Result<()> {
        debug_assert_eq!(id as usize, self.offsets.len() + 1, "objects out of order");
        self.offsets.push(self.out.len());
        self.serializer.write_indirect(&mut self.out, id, obj)
    }

    fn finish(mut self, root: u32, info: u32) -> io::Result<Vec<u8>> {
        let size = self.offsets.len() + 1;
        let xref_start = self.out.len();
        writeln!(self.out, "xref\n0 {}", size)?;
        writeln!(self.out, "0000000000 65535 f ")?;
        for offset in &self.offsets {
            writeln!(self.out, "{:010} 00000 n ", offset)?;
        }

        let trailer = Object::dict([
            ("Size", Object::Integer(size as i64)),
            ("Root", Object::reference(root)),
            ("Info", Object::reference(info)),
        ]);
        writeln!(self.out, "trailer")?;
        let trailer = self.serializer.serialize(&trailer)?;
        self.out.extend_from_slice(&trailer);
        write!(self.out, "\nstartxref\n{}\n%%EOF", xref_start)?;
        Ok(self.out)
    }
}

/// Internal page data.
struct PageData {
    width: f32,
    height: f32,
    content: Vec<u8>,
    fonts: BTreeSet<String>,
}

/// PDF document writer.
///
/// Takes finished page content streams and the Base-14 fonts each one uses,
/// and builds a complete PDF document. Only fonts some page selects are
/// written.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
        }
    }

    /// Append a page with a finished content stream.
    ///
    /// `fonts` lists the Base-14 font names the stream selects; each is
    /// registered under [`font_resource_name`]. Returns the page count.
    pub fn add_page<I, S>(&mut self, width: f32, height: f32, content: Vec<u8>, fonts: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pages.push(PageData {
            width,
            height,
            content,
            fonts: fonts.into_iter().map(Into::into).collect(),
        });
        self.pages.len()
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Build the complete PDF document.
    pub fn finish(self) -> Result<Vec<u8>> {
        let font_names: BTreeSet<String> =
            self.pages.iter().flat_map(|p| p.fonts.iter().cloned()).collect();
        let font_ids: BTreeMap<String, u32> =
            font_names.into_iter().zip(1u32..).collect();

        let font_count = font_ids.len() as u32;
        let page_count = self.pages.len() as u32;
        let catalog_id = font_count + 1;
        let pages_id = font_count + 2;
        let page_id = |i: u32| font_count + 3 + 2 * i;
        let info_id = page_id(page_count);

        let mut out = ObjectWriter::new(&self.config.version)?;

        for (name, &id) in &font_ids {
            out.write(id, &font_dict(name))?;
        }

        out.write(
            catalog_id,
            &Object::dict([
                ("Type", Object::name("Catalog")),
                ("Pages", Object::reference(pages_id)),
            ]),
        )?;
        out.write(
            pages_id,
            &Object::dict([
                ("Type", Object::name("Pages")),
                ("Kids", Object::Array((0..page_count).map(|i| Object::reference(page_id(i))).collect())),
                ("Count", Object::Integer(page_count as i64)),
            ]),
        )?;

        for (i, page) in (0u32..).zip(self.pages) {
            let fonts = Object::Dictionary(
                page.fonts
                    .iter()
                    .filter_map(|name| {
                        font_ids
                            .get(name)
                            .map(|&id| (font_resource_name(name), Object::reference(id)))
                    })
                    .collect(),
            );
            out.write(
                page_id(i),
                &Object::dict([
                    ("Type", Object::name("Page")),
                    ("Parent", Object::reference(pages_id)),
                    ("MediaBox", Object::media_box(page.width, page.height)),
                    ("Contents", Object::reference(page_id(i) + 1)),
                    ("Resources", Object::dict([("Font", fonts)])),
                ]),
            )?;

            let stream = if self.config.compress {
                Object::stream(compress_data(&page.content)?, true)
            } else {
                Object::stream(page.content, false)
            };
            out.write(page_id(i) + 1, &stream)?;
        }

        out.write(info_id, &self.config.info())?;
        let bytes = out.finish(catalog_id, info_id)?;

        log::debug!("wrote {} pages, {} bytes", page_count, bytes.len());
        Ok(bytes)
    }

    /// Save the PDF to a file.
    pub fn save(self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.finish()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
