//! PDF object types.
//!
//! The write-side object model: the exporter builds these and hands them to
//! the [`ObjectSerializer`](crate::writer::ObjectSerializer). Dictionaries are
//! ordered by key so that exporting the same pages twice yields the same bytes.

use std::collections::BTreeMap;

/// Dictionary of PDF objects keyed by name (without the leading `/`).
pub type Dict = BTreeMap<String, Object>;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Integer value
    Integer(i64),
    /// Real value
    Real(f64),
    /// String (byte array)
    String(Vec<u8>),
    /// Name (written with a leading /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary
    Dictionary(Dict),
    /// Stream (dictionary + data)
    Stream {
        /// Stream dictionary; `/Length` is filled in when absent
        dict: Dict,
        /// Stream data, already filtered
        data: bytes::Bytes,
    },
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object. Generation is always 0 on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef(pub u32);

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} 0 R", self.0)
    }
}

impl Object {
    /// Name object.
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// Literal string object from ASCII text.
    pub fn string(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec())
    }

    /// Reference to object `id`.
    pub fn reference(id: u32) -> Object {
        Object::Reference(ObjectRef(id))
    }

    /// Dictionary from `(key, value)` pairs.
    pub fn dict<'a>(entries: impl IntoIterator<Item = (&'a str, Object)>) -> Object {
        Object::Dictionary(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    /// `[0 0 width height]` box in points, to hundredths.
    pub fn media_box(width: f32, height: f32) -> Object {
        let points = |v: f32| Object::Real((v as f64 * 100.0).round() / 100.0);
        Object::Array(vec![Object::Integer(0), Object::Integer(0), points(width), points(height)])
    }

    /// Stream object; adds `/Filter /FlateDecode` when `deflated`.
    pub fn stream(data: Vec<u8>, deflated: bool) -> Object {
        let mut dict = Dict::new();
        if deflated {
            dict.insert("Filter".to_string(), Object::name("FlateDecode"));
        }
        Object::Stream {
            dict,
            data: bytes::Bytes::from(data),
        }
    }
}
