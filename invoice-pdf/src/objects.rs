use crate::fonts::encode_win_ansi;

/// Object identifier: (object_number, generation_number).
/// Generation is always 0 since documents are written once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjId(pub u32, pub u16);

/// The subset of PDF object types (PDF 32000-1:2008 Section 7.3)
/// an invoice document needs.
#[derive(Debug, Clone)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    /// Name object, stored without the leading `/`.
    Name(String),
    /// Literal string as already-encoded bytes, without the parens.
    /// Escaping happens at write time.
    Text(Vec<u8>),
    Array(Vec<PdfObject>),
    /// Entries keep insertion order so output is reproducible.
    Dictionary(Vec<(String, PdfObject)>),
    Stream {
        dict: Vec<(String, PdfObject)>,
        data: Vec<u8>,
    },
    Reference(ObjId),
}

impl PdfObject {
    pub fn name(s: &str) -> Self {
        PdfObject::Name(s.to_string())
    }

    /// A literal string, encoded the same way page text is.
    pub fn text(s: &str) -> Self {
        PdfObject::Text(encode_win_ansi(s))
    }

    pub fn array(items: Vec<PdfObject>) -> Self {
        PdfObject::Array(items)
    }

    /// Rectangle array `[x0 y0 x1 y1]`, as used by `/MediaBox`.
    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        PdfObject::Array(
            [x0, y0, x1, y1]
                .into_iter()
                .map(PdfObject::Real)
                .collect(),
        )
    }

    pub fn dict(entries: Vec<(&str, PdfObject)>) -> Self {
        PdfObject::Dictionary(owned_entries(entries))
    }

    pub fn stream(
        dict_entries: Vec<(&str, PdfObject)>,
        data: Vec<u8>,
    ) -> Self {
        PdfObject::Stream {
            dict: owned_entries(dict_entries),
            data,
        }
    }
}

fn owned_entries(
    entries: Vec<(&str, PdfObject)>,
) -> Vec<(String, PdfObject)> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
