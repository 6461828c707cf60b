//! Document access: opening, decryption, page geometry, interpretation.

use std::path::Path;

use crate::error::ParseError;
use crate::fonts::as_number;
use crate::interpreter::{interpret, ContentSink, PageFrame};

/// The four corners of a PDF box: `(llx, lly, urx, ury)` in device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfBox {
    pub llx: f64,
    pub lly: f64,
    pub urx: f64,
    pub ury: f64,
}

impl PdfBox {
    pub fn width(&self) -> f64 {
        (self.urx - self.llx).abs()
    }

    pub fn height(&self) -> f64 {
        (self.ury - self.lly).abs()
    }

    /// Whether the box's y-axis is inverted (lly above ury).
    pub fn y_inverted(&self) -> bool {
        self.lly > self.ury
    }
}

/// A parsed PDF document with an ordered page-id cache.
pub struct PdfDocument {
    inner: lopdf::Document,
    page_ids: Vec<lopdf::ObjectId>,
}

impl std::fmt::Debug for PdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

impl PdfDocument {
    /// Open a document from a file path.
    pub fn open_file(
        path: impl AsRef<Path>,
        password: Option<&str>,
    ) -> Result<Self, ParseError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::open(&bytes, password)
    }

    /// Open a document from raw bytes, decrypting when a password is given.
    pub fn open(bytes: &[u8], password: Option<&str>) -> Result<Self, ParseError> {
        let mut inner = lopdf::Document::load_mem(bytes).map_err(ParseError::malformed)?;

        if inner.is_encrypted() {
            match password {
                None => return Err(ParseError::Encrypted),
                Some(pw) => inner
                    .decrypt(pw)
                    .map_err(|_| ParseError::WrongPassword)?,
            }
        }

        let page_ids: Vec<lopdf::ObjectId> = inner.get_pages().values().copied().collect();
        Ok(Self { inner, page_ids })
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page_id(&self, index: usize) -> Result<lopdf::ObjectId, ParseError> {
        self.page_ids
            .get(index)
            .copied()
            .ok_or(ParseError::PageOutOfRange {
                index,
                count: self.page_ids.len(),
            })
    }

    /// The page's media box, inherited through the page tree.
    pub fn media_box(&self, index: usize) -> Result<PdfBox, ParseError> {
        let id = self.page_id(index)?;
        let obj = self
            .resolve_inherited(id, b"MediaBox")?
            .ok_or_else(|| ParseError::Malformed("MediaBox not found on page or ancestors".into()))?;
        self.read_box(obj)
    }

    /// The page's crop box, when the page itself carries one.
    pub fn crop_box(&self, index: usize) -> Result<Option<PdfBox>, ParseError> {
        let id = self.page_id(index)?;
        let dict = self.page_dict(id)?;
        match dict.get(b"CropBox") {
            Ok(obj) => Ok(Some(self.read_box(obj)?)),
            Err(_) => Ok(None),
        }
    }

    /// The page's rotation in degrees, inherited through the page tree.
    pub fn rotation(&self, index: usize) -> Result<i32, ParseError> {
        let id = self.page_id(index)?;
        match self.resolve_inherited(id, b"Rotate")? {
            Some(obj) => {
                let degrees = obj
                    .as_i64()
                    .map_err(|e| ParseError::Malformed(format!("Rotate is not an integer: {e}")))?;
                Ok(degrees.rem_euclid(360) as i32)
            }
            None => Ok(0),
        }
    }

    /// Interpret the page's content streams into `sink`.
    pub fn interpret_page(
        &self,
        index: usize,
        sink: &mut dyn ContentSink,
    ) -> Result<(), ParseError> {
        let id = self.page_id(index)?;
        let media = self.media_box(index)?;
        let content = self
            .inner
            .get_page_content(id)
            .map_err(ParseError::malformed)?;

        let resources_obj = self.resolve_inherited(id, b"Resources")?;
        let resources = resources_obj.and_then(|o| {
            crate::fonts::resolve_ref(&self.inner, o).as_dict().ok()
        });

        let frame = PageFrame {
            left: media.llx.min(media.urx),
            top: if media.y_inverted() { media.lly.min(media.ury) } else { media.ury },
            y_inverted: media.y_inverted(),
        };
        interpret(&self.inner, &content, resources, frame, sink)
    }

    fn page_dict(&self, id: lopdf::ObjectId) -> Result<&lopdf::Dictionary, ParseError> {
        self.inner
            .get_object(id)
            .and_then(|o| o.as_dict())
            .map_err(|e| ParseError::Malformed(format!("failed to get page dictionary: {e}")))
    }

    /// Look up a key on the page, walking up `/Parent` links when absent.
    fn resolve_inherited(
        &self,
        page_id: lopdf::ObjectId,
        key: &[u8],
    ) -> Result<Option<&lopdf::Object>, ParseError> {
        let mut current = page_id;
        loop {
            let dict = self.page_dict(current)?;
            if let Ok(value) = dict.get(key) {
                return Ok(Some(value));
            }
            match dict.get(b"Parent") {
                Ok(parent) => {
                    current = parent.as_reference().map_err(|e| {
                        ParseError::Malformed(format!("invalid /Parent reference: {e}"))
                    })?;
                }
                Err(_) => return Ok(None),
            }
        }
    }

    fn read_box(&self, obj: &lopdf::Object) -> Result<PdfBox, ParseError> {
        let obj = crate::fonts::resolve_ref(&self.inner, obj);
        let array = obj
            .as_array()
            .map_err(|e| ParseError::Malformed(format!("box is not an array: {e}")))?;
        if array.len() != 4 {
            return Err(ParseError::Malformed(format!(
                "expected 4-element box array, got {}",
                array.len()
            )));
        }
        let values: Vec<f64> = array
            .iter()
            .map(|o| crate::fonts::resolve_ref(&self.inner, o))
            .filter_map(as_number)
            .collect();
        match values[..] {
            [llx, lly, urx, ury] => Ok(PdfBox { llx, lly, urx, ury }),
            _ => Err(ParseError::Malformed("non-numeric box entry".into())),
        }
    }
}

/// Build a minimal single-page PDF for tests: US Letter with the given
/// content stream and a Helvetica font under `/F1`.
#[cfg(test)]
pub(crate) fn test_pdf(content: &str) -> Vec<u8> {
    use lopdf::{dictionary, Document, Object, ObjectId, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.as_bytes().to_vec(),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(page_id)],
            "Count" => 1i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::GlyphEvent;
    use tabulon_core::PathEvent;

    struct Collecting {
        glyphs: Vec<GlyphEvent>,
        paths: Vec<PathEvent>,
    }

    impl ContentSink for Collecting {
        fn on_glyph(&mut self, glyph: GlyphEvent) {
            self.glyphs.push(glyph);
        }

        fn on_path(&mut self, event: PathEvent) {
            self.paths.push(event);
        }
    }

    #[test]
    fn test_open_invalid_bytes() {
        let result = PdfDocument::open(b"not a pdf", None);
        assert!(matches!(result, Err(ParseError::Malformed(_))));
    }

    #[test]
    fn test_open_and_page_count() {
        let bytes = test_pdf("");
        let doc = PdfDocument::open(&bytes, None).unwrap();
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_media_box() {
        let bytes = test_pdf("");
        let doc = PdfDocument::open(&bytes, None).unwrap();
        let media = doc.media_box(0).unwrap();
        assert_eq!(media.width(), 612.0);
        assert_eq!(media.height(), 792.0);
        assert!(!media.y_inverted());
    }

    #[test]
    fn test_crop_box_absent() {
        let bytes = test_pdf("");
        let doc = PdfDocument::open(&bytes, None).unwrap();
        assert_eq!(doc.crop_box(0).unwrap(), None);
    }

    #[test]
    fn test_rotation_default_zero() {
        let bytes = test_pdf("");
        let doc = PdfDocument::open(&bytes, None).unwrap();
        assert_eq!(doc.rotation(0).unwrap(), 0);
    }

    #[test]
    fn test_page_out_of_range() {
        let bytes = test_pdf("");
        let doc = PdfDocument::open(&bytes, None).unwrap();
        assert!(matches!(
            doc.media_box(3),
            Err(ParseError::PageOutOfRange { index: 3, count: 1 })
        ));
    }

    #[test]
    fn test_interpret_page_glyphs_and_paths() {
        let bytes = test_pdf("BT /F1 12 Tf 100 700 Td (Hi) Tj ET 0 0 m 100 0 l S");
        let doc = PdfDocument::open(&bytes, None).unwrap();
        let mut sink = Collecting {
            glyphs: Vec::new(),
            paths: Vec::new(),
        };
        doc.interpret_page(0, &mut sink).unwrap();
        assert_eq!(sink.glyphs.len(), 2);
        assert_eq!(sink.glyphs[0].text, "H");
        assert_eq!(sink.glyphs[1].text, "i");
        assert_eq!(sink.paths.len(), 3);
    }
}
