//! PDF object serialization.
//!
//! Compact syntax only: no whitespace beyond what separates tokens.

use crate::object::{Dict, Object};
use std::io::{self, Write};

/// Serializer for PDF objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Create a serializer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize an object to bytes.
    pub fn serialize(&self, obj: &Object) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj)?;
        Ok(buf)
    }

    /// Write `{id} 0 obj ... endobj` for an indirect object.
    pub fn write_indirect<W: Write>(&self, w: &mut W, id: u32, obj: &Object) -> io::Result<()> {
        writeln!(w, "{} 0 obj", id)?;
        self.write_object(w, obj)?;
        w.write_all(b"\nendobj\n")
    }

    fn write_object<W: Write>(&self, w: &mut W, obj: &Object) -> io::Result<()> {
        match obj {
            Object::Integer(i) => write!(w, "{}", i),
            Object::Real(r) => write!(w, "{}", format_real(*r)),
            Object::String(s) => write_string(w, s),
            Object::Name(n) => write_name(w, n),
            Object::Array(items) => {
                w.write_all(b"[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        w.write_all(b" ")?;
                    }
                    self.write_object(w, item)?;
                }
                w.write_all(b"]")
            },
            Object::Dictionary(dict) => self.write_dict(w, dict),
            Object::Stream { dict, data } => {
                if dict.contains_key("Length") {
                    self.write_dict(w, dict)?;
                } else {
                    let mut sized = dict.clone();
                    sized.insert("Length".to_string(), Object::Integer(data.len() as i64));
                    self.write_dict(w, &sized)?;
                }
                w.write_all(b"\nstream\n")?;
                w.write_all(data)?;
                w.write_all(b"\nendstream")
            },
            Object::Reference(r) => write!(w, "{}", r),
        }
    }

    fn write_dict<W: Write>(&self, w: &mut W, dict: &Dict) -> io::Result<()> {
        w.write_all(b"<<")?;
        for (key, value) in dict {
            write_name(w, key)?;
            w.write_all(b" ")?;
            self.write_object(w, value)?;
        }
        w.write_all(b">>")
    }
}

/// Shortest decimal form with at most five fractional digits.
fn format_real(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }
    let fixed = format!("{:.5}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Literal `(...)` when printable, hex `<...>` otherwise.
fn write_string<W: Write>(w: &mut W, data: &[u8]) -> io::Result<()> {
    if !data.iter().all(|b| (0x20..=0x7E).contains(b)) {
        w.write_all(b"<")?;
        for byte in data {
            write!(w, "{:02X}", byte)?;
        }
        return w.write_all(b">");
    }
    w.write_all(b"(")?;
    for &byte in data {
        if matches!(byte, b'(' | b')' | b'\\') {
            w.write_all(b"\\")?;
        }
        w.write_all(&[byte])?;
    }
    w.write_all(b")")
}

/// `/Name`, with delimiters, whitespace and non-ASCII bytes as `#xx`.
fn write_name<W: Write>(w: &mut W, name: &str) -> io::Result<()> {
    w.write_all(b"/")?;
    for byte in name.bytes() {
        let delimiter = matches!(byte, b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' | b'#');
        if delimiter || !(0x21..=0x7E).contains(&byte) {
            write!(w, "#{:02X}", byte)?;
        } else {
            w.write_all(&[byte])?;
        }
    }
    Ok(())
}
