//! The page model: glyphs plus rulings, with cached derived state.
//!
//! A page is immutable once built except for [`Page::add_ruling`], which
//! appends a ruling and invalidates the processed-ruling cache. Cropping via
//! [`Page::get_area`] produces a fresh page and leaves the source untouched.

use std::sync::OnceLock;

use crate::clipper::clip_ruling;
use crate::geometry::{Point, Rect};
use crate::ruling::{collapse_oriented_rulings, Ruling};
use crate::spatial_index::SpatialIndex;
use crate::text::TextElement;

/// Everything needed to assemble a [`Page`]; consumed by [`build`](PageBuilder::build).
#[derive(Debug, Default)]
pub struct PageBuilder {
    pub bounds: Rect,
    pub number: usize,
    pub rotation: i32,
    pub glyphs: Vec<TextElement>,
    pub rulings: Vec<Ruling>,
}

impl PageBuilder {
    pub fn build(self) -> Page {
        let min_char_width = self
            .glyphs
            .iter()
            .map(TextElement::width)
            .fold(f64::INFINITY, f64::min);
        let min_char_height = self
            .glyphs
            .iter()
            .map(TextElement::height)
            .fold(f64::INFINITY, f64::min);

        let mut glyph_index = SpatialIndex::new();
        for glyph in &self.glyphs {
            glyph_index.insert(glyph.rect);
        }

        Page {
            bounds: self.bounds,
            number: self.number,
            rotation: self.rotation,
            glyphs: self.glyphs,
            rulings: self.rulings,
            min_char_width: if min_char_width.is_finite() {
                min_char_width
            } else {
                0.0
            },
            min_char_height: if min_char_height.is_finite() {
                min_char_height
            } else {
                0.0
            },
            glyph_index,
            processed: OnceLock::new(),
        }
    }
}

/// A rendered PDF page: bounds, glyphs, and rulings.
#[derive(Debug)]
pub struct Page {
    bounds: Rect,
    number: usize,
    rotation: i32,
    glyphs: Vec<TextElement>,
    rulings: Vec<Ruling>,
    min_char_width: f64,
    min_char_height: f64,
    glyph_index: SpatialIndex,
    processed: OnceLock<Vec<Ruling>>,
}

impl Page {
    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// 1-based page number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Page rotation in degrees (0, 90, 180, or 270).
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    pub fn glyphs(&self) -> &[TextElement] {
        &self.glyphs
    }

    /// Raw rulings as received from the graphics stream.
    pub fn rulings(&self) -> &[Ruling] {
        &self.rulings
    }

    /// Smallest glyph width observed on the page (0 when there are none).
    pub fn min_char_width(&self) -> f64 {
        self.min_char_width
    }

    /// Smallest glyph height observed on the page (0 when there are none).
    pub fn min_char_height(&self) -> f64 {
        self.min_char_height
    }

    /// Append a ruling, invalidating the processed-ruling cache.
    pub fn add_ruling(&mut self, ruling: Ruling) {
        self.rulings.push(ruling);
        self.processed = OnceLock::new();
    }

    /// Rulings with oblique segments removed and colinear fragments
    /// collapsed. Computed once and memoized.
    pub fn processed_rulings(&self) -> &[Ruling] {
        self.processed
            .get_or_init(|| collapse_oriented_rulings(&self.rulings))
    }

    pub fn horizontal_rulings(&self) -> Vec<Ruling> {
        self.processed_rulings()
            .iter()
            .filter(|r| r.horizontal())
            .copied()
            .collect()
    }

    pub fn vertical_rulings(&self) -> Vec<Ruling> {
        self.processed_rulings()
            .iter()
            .filter(|r| r.vertical())
            .copied()
            .collect()
    }

    /// Glyphs whose origin (top-left corner) lies in
    /// `[rect.top, rect.bottom) × [rect.left, rect.right)`.
    pub fn glyphs_with_origin_in(&self, rect: &Rect) -> Vec<&TextElement> {
        let mut ids = self.glyph_index.intersects(rect);
        ids.sort_unstable();
        ids.into_iter()
            .map(|id| &self.glyphs[id])
            .filter(|g| {
                g.top() >= rect.top
                    && g.top() < rect.bottom()
                    && g.left() >= rect.left
                    && g.left() < rect.right()
            })
            .collect()
    }

    /// A new page restricted to the given area.
    ///
    /// Keeps the glyphs whose origin falls inside the area and clips every
    /// ruling against it; the source page is unaffected. Coordinates are
    /// preserved (not re-based to the area's corner).
    pub fn get_area(&self, top: f64, left: f64, bottom: f64, right: f64) -> Page {
        let area = Rect::from_edges(top, left, bottom, right);
        let glyphs: Vec<TextElement> = self
            .glyphs
            .iter()
            .filter(|g| area.contains_point(&Point::new(g.left(), g.top())))
            .cloned()
            .collect();
        let rulings: Vec<Ruling> = self
            .rulings
            .iter()
            .filter(|r| !r.oblique())
            .filter_map(|r| clip_ruling(r, &area))
            .collect();

        PageBuilder {
            bounds: area,
            number: self.number,
            rotation: self.rotation,
            glyphs,
            rulings,
        }
        .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(text: &str, top: f64, left: f64, width: f64, height: f64) -> TextElement {
        TextElement::new(
            Rect::new(top, left, width, height),
            text,
            "Helvetica",
            10.0,
            2.5,
        )
    }

    fn page() -> Page {
        PageBuilder {
            bounds: Rect::new(0.0, 0.0, 200.0, 100.0),
            number: 1,
            rotation: 0,
            glyphs: vec![
                glyph("a", 10.0, 10.0, 5.0, 10.0),
                glyph("b", 10.0, 100.0, 6.0, 12.0),
                glyph("c", 60.0, 10.0, 4.0, 8.0),
            ],
            rulings: vec![
                Ruling::new(0.0, 50.0, 200.0, 50.0),
                Ruling::new(0.0, 50.4, 200.0, 50.4),
                Ruling::new(120.0, 0.0, 120.0, 100.0),
                Ruling::new(0.0, 0.0, 60.0, 90.0), // oblique
            ],
        }
        .build()
    }

    #[test]
    fn test_min_char_metrics() {
        let p = page();
        assert_eq!(p.min_char_width(), 4.0);
        assert_eq!(p.min_char_height(), 8.0);
    }

    #[test]
    fn test_min_char_metrics_empty_page() {
        let p = PageBuilder {
            bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
            number: 1,
            ..PageBuilder::default()
        }
        .build();
        assert_eq!(p.min_char_width(), 0.0);
        assert_eq!(p.min_char_height(), 0.0);
    }

    #[test]
    fn test_processed_rulings_collapse_and_drop_oblique() {
        let p = page();
        let processed = p.processed_rulings();
        // Two colinear horizontals collapse into one; the oblique is gone
        assert_eq!(processed.len(), 2);
        assert_eq!(p.horizontal_rulings().len(), 1);
        assert_eq!(p.vertical_rulings().len(), 1);
    }

    #[test]
    fn test_processed_rulings_memoized_and_invalidated() {
        let mut p = page();
        assert_eq!(p.processed_rulings().len(), 2);
        p.add_ruling(Ruling::new(0.0, 80.0, 200.0, 80.0));
        assert_eq!(p.processed_rulings().len(), 3);
    }

    #[test]
    fn test_glyphs_with_origin_in_half_open() {
        let p = page();
        // Area whose bottom edge sits exactly on glyph "c"'s top
        let hits = p.glyphs_with_origin_in(&Rect::from_edges(10.0, 0.0, 60.0, 200.0));
        let texts: Vec<&str> = hits.iter().map(|g| g.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_get_area_subsets_glyphs_and_clips_rulings() {
        let p = page();
        let sub = p.get_area(0.0, 0.0, 55.0, 150.0);
        assert_eq!(sub.glyphs().len(), 2);
        // Horizontal rulings clipped to the area's width; the vertical at
        // x=120 clipped to the area's height
        for r in sub.rulings() {
            assert!(r.x2 <= 150.0);
            assert!(r.y2 <= 55.0);
        }
        assert_eq!(sub.bounds(), &Rect::from_edges(0.0, 0.0, 55.0, 150.0));
        // Source page unchanged
        assert_eq!(p.glyphs().len(), 3);
        assert_eq!(p.rulings().len(), 4);
    }

    #[test]
    fn test_get_area_excludes_fully_outside_rulings() {
        let p = page();
        let sub = p.get_area(0.0, 130.0, 40.0, 200.0);
        // The vertical ruling at x=120 and the horizontals at y=50 are
        // outside the area's span in one axis each; only horizontal pieces
        // at y=50 are below bottom=40 so nothing at all survives
        assert!(sub.rulings().is_empty());
    }
}
