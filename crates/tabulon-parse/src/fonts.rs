//! Minimal font support for text extraction.
//!
//! Table extraction needs glyph positions and advances, not full rendering,
//! so this keeps to: the `/Widths` table of simple fonts, `/MissingWidth`
//! and sensible fallbacks, and `/ToUnicode` CMaps for text mapping.
//! Composite (Type0) fonts decode through their `ToUnicode` CMap with the
//! 1000-unit default width.

use std::collections::HashMap;

/// Glyph-space default width (per 1000 units) when a font gives us nothing.
const DEFAULT_WIDTH: f64 = 500.0;

/// Glyph-space default for composite fonts (`/DW` default per the spec).
const DEFAULT_CID_WIDTH: f64 = 1000.0;

/// Glyph-space space width fallback.
const DEFAULT_SPACE_WIDTH: f64 = 250.0;

/// Width and text mapping for one font resource.
#[derive(Debug, Clone)]
pub struct Font {
    /// Font name for glyph records (the `/BaseFont`, or the resource key).
    pub name: String,
    first_char: u32,
    widths: Vec<f64>,
    default_width: f64,
    to_unicode: Option<HashMap<u32, String>>,
    /// Composite fonts consume two bytes per code.
    two_byte: bool,
}

impl Font {
    /// A fallback font used when a `Tf` operand cannot be resolved.
    pub fn fallback(name: &str) -> Self {
        Self {
            name: name.to_string(),
            first_char: 0,
            widths: Vec::new(),
            default_width: DEFAULT_WIDTH,
            to_unicode: None,
            two_byte: false,
        }
    }

    /// Load a font from its dictionary.
    pub fn load(doc: &lopdf::Document, dict: &lopdf::Dictionary, resource_key: &str) -> Self {
        let name = dict
            .get(b"BaseFont")
            .ok()
            .and_then(|o| resolve_ref(doc, o).as_name().ok())
            .map(|n| String::from_utf8_lossy(n).into_owned())
            .unwrap_or_else(|| resource_key.to_string());

        let subtype = dict
            .get(b"Subtype")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|n| n.to_vec())
            .unwrap_or_default();
        let two_byte = subtype == b"Type0";

        let first_char = dict
            .get(b"FirstChar")
            .ok()
            .and_then(|o| as_number(resolve_ref(doc, o)))
            .map(|v| v as u32)
            .unwrap_or(0);

        let widths = dict
            .get(b"Widths")
            .ok()
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_array().ok())
            .map(|arr| arr.iter().filter_map(|o| as_number(resolve_ref(doc, o))).collect())
            .unwrap_or_default();

        let default_width = dict
            .get(b"FontDescriptor")
            .ok()
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_dict().ok())
            .and_then(|fd| fd.get(b"MissingWidth").ok().and_then(as_number))
            .unwrap_or(if two_byte {
                DEFAULT_CID_WIDTH
            } else {
                DEFAULT_WIDTH
            });

        let to_unicode = dict
            .get(b"ToUnicode")
            .ok()
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_stream().ok())
            .and_then(|s| s.decompressed_content().ok())
            .map(|data| parse_tounicode(&data));

        Self {
            name,
            first_char,
            widths,
            default_width,
            to_unicode,
            two_byte,
        }
    }

    /// Glyph-space width (per 1000 units) of a character code.
    pub fn width(&self, code: u32) -> f64 {
        if code >= self.first_char {
            if let Some(&w) = self.widths.get((code - self.first_char) as usize) {
                if w > 0.0 {
                    return w;
                }
            }
        }
        self.default_width
    }

    /// Glyph-space width of the space character.
    pub fn space_width(&self) -> f64 {
        if !self.two_byte && !self.widths.is_empty() {
            let w = self.width(32);
            if w > 0.0 {
                return w;
            }
        }
        DEFAULT_SPACE_WIDTH
    }

    /// Split a show-string into `(code, text)` pairs.
    ///
    /// Simple fonts consume one byte per code, mapped through the ToUnicode
    /// CMap when present and Latin-1 otherwise. Composite fonts consume two
    /// big-endian bytes per code.
    pub fn decode(&self, bytes: &[u8]) -> Vec<(u32, String)> {
        let codes: Vec<u32> = if self.two_byte {
            bytes
                .chunks(2)
                .map(|c| {
                    if c.len() == 2 {
                        (c[0] as u32) << 8 | c[1] as u32
                    } else {
                        c[0] as u32
                    }
                })
                .collect()
        } else {
            bytes.iter().map(|&b| b as u32).collect()
        };

        codes
            .into_iter()
            .map(|code| {
                // Latin-1 fallback: a byte code maps to the same scalar value
                let text = self
                    .to_unicode
                    .as_ref()
                    .and_then(|map| map.get(&code).cloned())
                    .or_else(|| char::from_u32(code).map(String::from))
                    .unwrap_or_default();
                (code, text)
            })
            .collect()
    }
}

/// Chase a reference to its object; non-references pass through.
pub(crate) fn resolve_ref<'a>(doc: &'a lopdf::Document, obj: &'a lopdf::Object) -> &'a lopdf::Object {
    match obj.as_reference() {
        Ok(id) => doc.get_object(id).unwrap_or(obj),
        Err(_) => obj,
    }
}

/// Numeric value of an Integer or Real object.
pub(crate) fn as_number(obj: &lopdf::Object) -> Option<f64> {
    match obj {
        lopdf::Object::Integer(i) => Some(*i as f64),
        lopdf::Object::Real(f) => Some(*f as f64),
        _ => None,
    }
}

/// Parse the `bfchar` and `bfrange` sections of a ToUnicode CMap.
fn parse_tounicode(data: &[u8]) -> HashMap<u32, String> {
    let mut map = HashMap::new();
    let tokens = lex_cmap(data);
    let mut i = 0;

    while i < tokens.len() {
        match &tokens[i] {
            CmapToken::Keyword(k) if k == "beginbfchar" => {
                i += 1;
                while i + 1 < tokens.len() && !tokens[i].is_keyword("endbfchar") {
                    if let (CmapToken::Hex(src), CmapToken::Hex(dst)) = (&tokens[i], &tokens[i + 1])
                    {
                        map.insert(hex_code(src), utf16_be_string(dst));
                    }
                    i += 2;
                }
            }
            CmapToken::Keyword(k) if k == "beginbfrange" => {
                i += 1;
                while i + 2 < tokens.len() && !tokens[i].is_keyword("endbfrange") {
                    match (&tokens[i], &tokens[i + 1], &tokens[i + 2]) {
                        (CmapToken::Hex(lo), CmapToken::Hex(hi), CmapToken::Hex(dst)) => {
                            let (lo, hi) = (hex_code(lo), hex_code(hi));
                            let base = hex_code(dst);
                            for (offset, code) in (lo..=hi).enumerate() {
                                if let Some(c) = char::from_u32(base + offset as u32) {
                                    map.insert(code, c.to_string());
                                }
                            }
                            i += 3;
                        }
                        (CmapToken::Hex(lo), CmapToken::Hex(_hi), CmapToken::ArrayStart) => {
                            let lo = hex_code(lo);
                            i += 3;
                            let mut offset = 0u32;
                            while i < tokens.len() && !matches!(tokens[i], CmapToken::ArrayEnd) {
                                if let CmapToken::Hex(dst) = &tokens[i] {
                                    map.insert(lo + offset, utf16_be_string(dst));
                                    offset += 1;
                                }
                                i += 1;
                            }
                            i += 1;
                            continue;
                        }
                        _ => i += 1,
                    }
                }
            }
            _ => i += 1,
        }
    }
    map
}

#[derive(Debug, PartialEq)]
enum CmapToken {
    Hex(Vec<u8>),
    Keyword(String),
    ArrayStart,
    ArrayEnd,
}

impl CmapToken {
    fn is_keyword(&self, kw: &str) -> bool {
        matches!(self, CmapToken::Keyword(k) if k == kw)
    }
}

fn lex_cmap(data: &[u8]) -> Vec<CmapToken> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < data.len() {
        match data[i] {
            b'<' => {
                let start = i + 1;
                let end = data[start..]
                    .iter()
                    .position(|&b| b == b'>')
                    .map(|p| start + p)
                    .unwrap_or(data.len());
                let hex: Vec<u8> = data[start..end]
                    .iter()
                    .filter(|b| b.is_ascii_hexdigit())
                    .copied()
                    .collect();
                let bytes: Vec<u8> = hex
                    .chunks(2)
                    .filter_map(|pair| {
                        let s = std::str::from_utf8(pair).ok()?;
                        u8::from_str_radix(s, 16).ok()
                    })
                    .collect();
                tokens.push(CmapToken::Hex(bytes));
                i = end + 1;
            }
            b'[' => {
                tokens.push(CmapToken::ArrayStart);
                i += 1;
            }
            b']' => {
                tokens.push(CmapToken::ArrayEnd);
                i += 1;
            }
            b if b.is_ascii_alphabetic() => {
                let start = i;
                while i < data.len() && data[i].is_ascii_alphanumeric() {
                    i += 1;
                }
                tokens.push(CmapToken::Keyword(
                    String::from_utf8_lossy(&data[start..i]).into_owned(),
                ));
            }
            _ => i += 1,
        }
    }
    tokens
}

fn hex_code(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32)
}

fn utf16_be_string(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks(2)
        .filter(|c| c.len() == 2)
        .map(|c| (c[0] as u16) << 8 | c[1] as u16)
        .collect();
    String::from_utf16_lossy(&units)
}
