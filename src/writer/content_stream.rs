//! PDF content stream builder.
//!
//! Records the handful of text and path operators page regions need and
//! serializes them one per line. Text is written as literal strings in
//! WinAnsiEncoding, matching the Base-14 font dictionaries the writer emits.

use crate::error::Result;
use std::collections::BTreeSet;
use std::io::{self, Write};

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Select font resource and size (Tf)
    SetFont(String, f32),
    /// Place the text origin (`1 0 0 1 x y Tm`)
    MoveText(f32, f32),
    /// Show text (Tj)
    ShowText(String),
    /// Set RGB fill color (rg)
    SetFillColor(f32, f32, f32),
    /// Set line width (w)
    SetLineWidth(f32),
    /// Move to (m)
    MoveTo(f32, f32),
    /// Line to (l)
    LineTo(f32, f32),
    /// Rectangle (re)
    Rectangle(f32, f32, f32, f32),
    /// Stroke (S)
    Stroke,
}

impl ContentStreamOp {
    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        match self {
            Self::BeginText => w.write_all(b"BT"),
            Self::EndText => w.write_all(b"ET"),
            Self::SetFont(resource, size) => write!(w, "/{} {} Tf", resource, size),
            Self::MoveText(x, y) => write!(w, "1 0 0 1 {} {} Tm", x, y),
            Self::ShowText(text) => {
                w.write_all(b"(")?;
                for byte in text.chars().map(win_ansi_byte) {
                    match byte {
                        b'(' | b')' | b'\\' => w.write_all(&[b'\\', byte])?,
                        b'\n' => w.write_all(b"\\n")?,
                        b'\r' => w.write_all(b"\\r")?,
                        b'\t' => w.write_all(b"\\t")?,
                        _ => w.write_all(&[byte])?,
                    }
                }
                w.write_all(b") Tj")
            },
            Self::SetFillColor(r, g, b) => write!(w, "{} {} {} rg", r, g, b),
            Self::SetLineWidth(width) => write!(w, "{} w", width),
            Self::MoveTo(x, y) => write!(w, "{} {} m", x, y),
            Self::LineTo(x, y) => write!(w, "{} {} l", x, y),
            Self::Rectangle(x, y, width, height) => write!(w, "{} {} {} {} re", x, y, width, height),
            Self::Stroke => w.write_all(b"S"),
        }
    }
}

/// Resource name under which a Base-14 font is registered on every page.
///
/// `Helvetica-Bold` becomes `HelveticaBold`.
pub fn font_resource_name(font_name: &str) -> String {
    font_name.replace('-', "")
}

/// Map a character to its WinAnsiEncoding byte, `?` when it has none.
pub fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        '\u{0000}'..='\u{007F}' | '\u{00A0}'..='\u{00FF}' => ch as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        '„' => 0x84,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        _ => b'?',
    }
}

/// Builder for one content stream.
///
/// Redundant font selections are dropped, and text and path operators open
/// or close the text object as needed.
#[derive(Debug, Default, Clone)]
pub struct ContentStreamBuilder {
    operations: Vec<ContentStreamOp>,
    font: Option<(String, f32)>,
    in_text: bool,
    fonts_used: BTreeSet<String>,
}

impl ContentStreamBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Whether any operation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Recorded operations, in order.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// Base-14 fonts selected anywhere in this stream.
    pub fn fonts_used(&self) -> &BTreeSet<String> {
        &self.fonts_used
    }

    fn begin_text(&mut self) {
        if !self.in_text {
            self.op(ContentStreamOp::BeginText);
            self.in_text = true;
        }
    }

    fn end_text(&mut self) {
        if self.in_text {
            self.op(ContentStreamOp::EndText);
            self.in_text = false;
        }
    }

    /// Select a Base-14 font; the operator references its resource name.
    pub fn set_font(&mut self, font_name: &str, size: f32) -> &mut Self {
        let unchanged = matches!(&self.font, Some((name, current)) if name == font_name && *current == size);
        if !unchanged {
            self.op(ContentStreamOp::SetFont(font_resource_name(font_name), size));
            self.font = Some((font_name.to_string(), size));
            self.fonts_used.insert(font_name.to_string());
        }
        self
    }

    /// Show `text` with its origin at `(x, y)` in PDF user space.
    pub fn text(&mut self, text: &str, x: f32, y: f32) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::MoveText(round2(x), round2(y)));
        self.op(ContentStreamOp::ShowText(text.to_string()))
    }

    /// Set the RGB fill color (0.0..=1.0 per channel).
    pub fn set_fill_color(&mut self, r: f32, g: f32, b: f32) -> &mut Self {
        self.op(ContentStreamOp::SetFillColor(r, g, b))
    }

    /// Set line width.
    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.op(ContentStreamOp::SetLineWidth(width))
    }

    /// Stroke a straight segment.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::MoveTo(round2(x1), round2(y1)));
        self.op(ContentStreamOp::LineTo(round2(x2), round2(y2)));
        self.op(ContentStreamOp::Stroke)
    }

    /// Add a rectangle path with its lower-left corner at `(x, y)`.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::Rectangle(round2(x), round2(y), round2(width), round2(height)))
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Stroke)
    }

    /// Serialize the stream. An open text object is closed in the output.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        for op in &self.operations {
            op.write_to(&mut buf)?;
            buf.push(b'\n');
        }
        if self.in_text {
            ContentStreamOp::EndText.write_to(&mut buf)?;
            buf.push(b'\n');
        }
        Ok(buf)
    }
}

fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}
