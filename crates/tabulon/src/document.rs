//! High-level document access: PDF pages assembled into core [`Page`]s.

use std::path::Path;

use tabulon_core::{
    PageBuilder, PathEvent, Rect, Ruling, RulingReceiver, Settings, TextElement,
};
use tabulon_parse::{ContentSink, GlyphEvent, PdfBox, PdfDocument};

use crate::error::Error;

/// An open PDF document, ready to produce pages for extraction.
pub struct Document {
    inner: PdfDocument,
}

/// Collects interpreter output: glyphs directly, path events through the
/// ruling receiver.
struct PageCollector {
    glyphs: Vec<GlyphEvent>,
    receiver: RulingReceiver,
}

impl ContentSink for PageCollector {
    fn on_glyph(&mut self, glyph: GlyphEvent) {
        self.glyphs.push(glyph);
    }

    fn on_path(&mut self, event: PathEvent) {
        self.receiver.handle(event);
    }
}

impl Document {
    /// Open a document from a file path.
    ///
    /// Fails with [`Error::FileNotFound`] when the path does not exist,
    /// [`Error::PasswordRequired`] for encrypted documents without a valid
    /// password, and [`Error::InvalidPdf`] for malformed bytes.
    pub fn open(path: impl AsRef<Path>, password: Option<&str>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let inner =
            PdfDocument::open_file(path, password).map_err(|e| Error::from_parse(e, None))?;
        Ok(Self { inner })
    }

    /// Open a document from raw bytes.
    pub fn from_bytes(bytes: &[u8], password: Option<&str>) -> Result<Self, Error> {
        let inner = PdfDocument::open(bytes, password).map_err(|e| Error::from_parse(e, None))?;
        Ok(Self { inner })
    }

    pub fn page_count(&self) -> usize {
        self.inner.page_count()
    }

    /// Assemble the 1-based page `number` with default settings.
    pub fn page(&self, number: usize) -> Result<tabulon_core::Page, Error> {
        self.page_with_settings(number, &Settings::default())
    }

    /// Assemble the 1-based page `number`.
    ///
    /// Interprets the content streams, extracts rulings through the
    /// graphics receiver, and applies the crop-box translation so the
    /// crop's top-left corner lands at the origin.
    pub fn page_with_settings(
        &self,
        number: usize,
        settings: &Settings,
    ) -> Result<tabulon_core::Page, Error> {
        if number == 0 || number > self.inner.page_count() {
            return Err(Error::Argument(format!(
                "page {number} out of range (document has {} pages)",
                self.inner.page_count()
            )));
        }
        let index = number - 1;
        let annotate = |e| Error::from_parse(e, Some(number));

        let media = self.inner.media_box(index).map_err(annotate)?;
        let crop = self.inner.crop_box(index).map_err(annotate)?;
        let rotation = self.inner.rotation(index).map_err(annotate)?;

        let mut collector = PageCollector {
            glyphs: Vec::new(),
            receiver: RulingReceiver::new(media.height(), media.y_inverted(), settings),
        };
        self.inner
            .interpret_page(index, &mut collector)
            .map_err(annotate)?;

        let mut glyphs: Vec<TextElement> = collector
            .glyphs
            .into_iter()
            .map(|g| {
                TextElement::new(
                    Rect::new(g.top, g.left, g.width, g.height),
                    g.text,
                    g.font_name,
                    g.font_size,
                    g.width_of_space,
                )
            })
            .collect();
        let mut rulings: Vec<Ruling> = collector.receiver.into_rulings();

        // Media boxes need not start at the device origin: glyphs were
        // projected relative to the box corner, rulings relative to (0, 0).
        let m_left = media.llx.min(media.urx);
        let m_top = media.lly.min(media.ury);
        if m_left != 0.0 || m_top != 0.0 {
            let dy = if media.y_inverted() { -m_top } else { m_top };
            for ruling in &mut rulings {
                *ruling = ruling.translate(-m_left, dy);
            }
        }

        let bounds = match crop {
            Some(crop) => {
                let (dx, dy) = crop_offsets(&media, &crop);
                for glyph in &mut glyphs {
                    glyph.rect = glyph.rect.translate(-dx, -dy);
                }
                for ruling in &mut rulings {
                    *ruling = ruling.translate(-dx, -dy);
                }
                Rect::new(0.0, 0.0, crop.width(), crop.height())
            }
            None => Rect::new(0.0, 0.0, media.width(), media.height()),
        };

        Ok(PageBuilder {
            bounds,
            number,
            rotation,
            glyphs,
            rulings,
        }
        .build())
    }
}

/// Offsets of the crop box's top-left corner in top-left page coordinates.
fn crop_offsets(media: &PdfBox, crop: &PdfBox) -> (f64, f64) {
    let dx = crop.llx.min(crop.urx) - media.llx.min(media.urx);
    let dy = if media.y_inverted() {
        crop.lly.min(crop.ury) - media.lly.min(media.ury)
    } else {
        media.ury.max(media.lly) - crop.ury.max(crop.lly)
    };
    (dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_offsets_normal_orientation() {
        let media = PdfBox {
            llx: 0.0,
            lly: 0.0,
            urx: 612.0,
            ury: 792.0,
        };
        let crop = PdfBox {
            llx: 36.0,
            lly: 36.0,
            urx: 576.0,
            ury: 756.0,
        };
        let (dx, dy) = crop_offsets(&media, &crop);
        assert_eq!(dx, 36.0);
        // 36 points trimmed off the top: 792 - 756
        assert_eq!(dy, 36.0);
    }

    #[test]
    fn test_crop_offsets_offset_media_box() {
        let media = PdfBox {
            llx: 10.0,
            lly: 20.0,
            urx: 610.0,
            ury: 820.0,
        };
        let crop = PdfBox {
            llx: 10.0,
            lly: 20.0,
            urx: 610.0,
            ury: 820.0,
        };
        assert_eq!(crop_offsets(&media, &crop), (0.0, 0.0));
    }
}
