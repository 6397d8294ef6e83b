//! Font management for PDF generation.
//!
//! This module provides font metrics for the PDF Base-14 text fonts so that
//! text can be measured before it is positioned. Only fonts registered here
//! can be measured; anything else is reported as unavailable.

use std::collections::HashMap;

/// Font manager for PDF generation.
///
/// Manages fonts and provides metrics for accurate text layout.
/// Registers the Helvetica, Times and Courier families of the Base-14 set.
#[derive(Debug, Clone)]
pub struct FontManager {
    /// Registered fonts (name -> font info)
    fonts: HashMap<String, FontInfo>,
}

impl FontManager {
    /// Create a new font manager with the Base-14 text fonts.
    pub fn new() -> Self {
        let mut manager = Self {
            fonts: HashMap::new(),
        };
        manager.register_base14_fonts();
        manager
    }

    /// Create a font manager that knows no fonts at all.
    ///
    /// Every measurement against it fails; families are added with
    /// [`register_family`](Self::register_family).
    pub fn empty() -> Self {
        Self {
            fonts: HashMap::new(),
        }
    }

    fn register_base14_fonts(&mut self) {
        for family in [FontFamily::Helvetica, FontFamily::Times, FontFamily::Courier] {
            self.register_family(family);
        }
    }

    /// Register all four faces of a Base-14 family.
    pub fn register_family(&mut self, family: FontFamily) {
        for weight in [FontWeight::Normal, FontWeight::Bold] {
            for italic in [false, true] {
                let name = Self::select_font(family, weight, italic);
                self.fonts
                    .insert(name.to_string(), FontInfo::base14(name, family, weight, italic));
            }
        }
    }

    /// Get font info by name.
    pub fn get_font(&self, name: &str) -> Option<&FontInfo> {
        self.fonts.get(name)
    }

    /// Calculate the width of a string in the given font at the given size.
    ///
    /// Returns width in points, or `None` when the font is not registered.
    pub fn text_width(&self, text: &str, font_name: &str, font_size: f32) -> Option<f32> {
        self.get_font(font_name).map(|font| font.text_width(text, font_size))
    }

    /// Check if a font name is registered.
    pub fn has_font(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    /// Get all registered font names, sorted.
    pub fn font_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fonts.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Select the Base-14 font name for the given criteria.
    pub fn select_font(family: FontFamily, weight: FontWeight, italic: bool) -> &'static str {
        match (family, weight, italic) {
            (FontFamily::Helvetica, FontWeight::Normal, false) => "Helvetica",
            (FontFamily::Helvetica, FontWeight::Bold, false) => "Helvetica-Bold",
            (FontFamily::Helvetica, FontWeight::Normal, true) => "Helvetica-Oblique",
            (FontFamily::Helvetica, FontWeight::Bold, true) => "Helvetica-BoldOblique",
            (FontFamily::Times, FontWeight::Normal, false) => "Times-Roman",
            (FontFamily::Times, FontWeight::Bold, false) => "Times-Bold",
            (FontFamily::Times, FontWeight::Normal, true) => "Times-Italic",
            (FontFamily::Times, FontWeight::Bold, true) => "Times-BoldItalic",
            (FontFamily::Courier, FontWeight::Normal, false) => "Courier",
            (FontFamily::Courier, FontWeight::Bold, false) => "Courier-Bold",
            (FontFamily::Courier, FontWeight::Normal, true) => "Courier-Oblique",
            (FontFamily::Courier, FontWeight::Bold, true) => "Courier-BoldOblique",
        }
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Font family classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Helvetica (sans-serif)
    Helvetica,
    /// Times (serif)
    Times,
    /// Courier (monospace)
    Courier,
}

/// Font weight classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    /// Normal weight
    #[default]
    Normal,
    /// Bold weight
    Bold,
}

/// Information about a font.
#[derive(Debug, Clone)]
pub struct FontInfo {
    /// Font name (e.g., "Helvetica-Bold")
    pub name: String,
    /// Font family
    pub family: FontFamily,
    /// Font weight
    pub weight: FontWeight,
    /// Whether the font is italic/oblique
    pub italic: bool,
    /// Character widths in 1/1000 of font size
    widths: FontWidths,
    /// Ascender height (above baseline)
    pub ascender: f32,
    /// Descender depth (below baseline, negative)
    pub descender: f32,
}

impl FontInfo {
    fn base14(name: &str, family: FontFamily, weight: FontWeight, italic: bool) -> Self {
        let (ascender, descender) = match (family, weight) {
            (FontFamily::Helvetica, _) => (718.0, -207.0),
            (FontFamily::Times, FontWeight::Normal) => (683.0, -217.0),
            (FontFamily::Times, FontWeight::Bold) => (676.0, -205.0),
            (FontFamily::Courier, FontWeight::Normal) => (629.0, -157.0),
            (FontFamily::Courier, FontWeight::Bold) => (626.0, -142.0),
        };
        let widths = match family {
            FontFamily::Courier => FontWidths::Monospace(600.0),
            _ => FontWidths::Proportional(proportional_widths(family, weight)),
        };

        Self {
            name: name.to_string(),
            family,
            weight,
            italic,
            widths,
            ascender,
            descender,
        }
    }

    /// Calculate the width of text in this font.
    ///
    /// Returns width in points for the given font size.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let width_units: f32 = text.chars().map(|c| self.char_width(c)).sum();
        width_units * font_size / 1000.0
    }

    /// Get the width of a single character in font units (1/1000 of em).
    pub fn char_width(&self, ch: char) -> f32 {
        self.widths.width_for_char(ch)
    }

    /// Distance from the top of the line box to the baseline at `font_size`.
    pub fn ascent(&self, font_size: f32) -> f32 {
        self.ascender * font_size / 1000.0
    }

    /// Get the natural line height for this font at the given size.
    pub fn line_height(&self, font_size: f32) -> f32 {
        (self.ascender - self.descender) * font_size / 1000.0
    }
}

/// Font width data.
#[derive(Debug, Clone)]
enum FontWidths {
    /// Proportional font with per-character widths
    Proportional(HashMap<char, f32>),
    /// Monospace font with fixed width
    Monospace(f32),
}

impl FontWidths {
    fn width_for_char(&self, ch: char) -> f32 {
        match self {
            FontWidths::Proportional(widths) => widths
                .get(&ch)
                .or_else(|| base_letter(ch).and_then(|base| widths.get(&base)))
                .copied()
                .unwrap_or(500.0),
            FontWidths::Monospace(width) => *width,
        }
    }
}

/// Unaccented letter whose advance a Latin-1 accented letter shares.
fn base_letter(ch: char) -> Option<char> {
    let base = match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ç' => 'c',
        'Ç' => 'C',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        _ => return None,
    };
    Some(base)
}

// Standard PostScript AFM advance widths, 1/1000 em, indexed 'A'..='Z' and 'a'..='z'.
const HELVETICA_UPPER: [u16; 26] = [
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722, 667,
    611, 722, 667, 944, 667, 667, 611,
];
const HELVETICA_LOWER: [u16; 26] = [
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500,
];
const HELVETICA_BOLD_UPPER: [u16; 26] = [
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778, 722, 667,
    611, 722, 667, 944, 667, 667, 611,
];
const HELVETICA_BOLD_LOWER: [u16; 26] = [
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556,
    333, 611, 556, 778, 556, 556, 500,
];
const TIMES_UPPER: [u16; 26] = [
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722, 556, 722, 667, 556,
    611, 722, 722, 944, 722, 722, 611,
];
const TIMES_LOWER: [u16; 26] = [
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500, 500, 500, 333, 389,
    278, 500, 500, 722, 500, 500, 444,
];
const TIMES_BOLD_UPPER: [u16; 26] = [
    722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778, 611, 778, 722, 556,
    667, 722, 722, 1000, 722, 722, 667,
];
const TIMES_BOLD_LOWER: [u16; 26] = [
    500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500, 556, 556, 444, 389,
    333, 556, 500, 722, 500, 500, 444,
];

/// Build the per-character width table for a proportional Base-14 face.
///
/// Oblique/italic faces share the upright tables.
fn proportional_widths(family: FontFamily, weight: FontWeight) -> HashMap<char, f32> {
    let (upper, lower, space, digit, colon) = match (family, weight) {
        (FontFamily::Times, FontWeight::Normal) => (&TIMES_UPPER, &TIMES_LOWER, 250, 500, 278),
        (FontFamily::Times, FontWeight::Bold) => {
            (&TIMES_BOLD_UPPER, &TIMES_BOLD_LOWER, 250, 500, 333)
        },
        (_, FontWeight::Bold) => (&HELVETICA_BOLD_UPPER, &HELVETICA_BOLD_LOWER, 278, 556, 333),
        (_, FontWeight::Normal) => (&HELVETICA_UPPER, &HELVETICA_LOWER, 278, 556, 278),
    };

    let mut widths = HashMap::with_capacity(100);
    for (i, w) in upper.iter().enumerate() {
        widths.insert((b'A' + i as u8) as char, *w as f32);
    }
    for (i, w) in lower.iter().enumerate() {
        widths.insert((b'a' + i as u8) as char, *w as f32);
    }
    for digit_ch in '0'..='9' {
        widths.insert(digit_ch, digit as f32);
    }

    for (ch, w) in [
        (' ', space),
        ('.', space),
        (',', space),
        (':', colon),
        (';', colon),
        ('-', 333),
        ('!', 333),
        ('?', 500),
        ('\'', 222),
        ('"', 400),
        ('(', 333),
        (')', 333),
        ('[', 333),
        (']', 333),
        ('/', 278),
        ('@', 800),
        ('#', 556),
        ('$', 556),
        ('%', 889),
        ('&', 722),
        ('*', 389),
        ('+', 584),
        ('=', 584),
        ('_', 556),
        ('°', 400),
        ('º', 365),
        ('ª', 370),
        ('¡', 333),
        ('¿', 611),
        ('«', 556),
        ('»', 556),
        ('€', 556),
        ('–', 556),
        ('—', 1000),
        ('•', 350),
        ('“', 333),
        ('”', 333),
        ('‘', 222),
        ('’', 222),
    ] {
        widths.insert(ch, w as f32);
    }

    widths
}
