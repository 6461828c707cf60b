//! Uniform-grid spatial index over rectangles.
//!
//! Pure acceleration structure: every query returns exactly the item set a
//! linear scan with the same predicate would, just faster. Items are
//! addressed by the insertion-order id returned from [`SpatialIndex::insert`].

use std::collections::HashMap;

use crate::geometry::{Point, Rect};

/// Default grid cell size in points.
pub const DEFAULT_CELL_SIZE: f64 = 50.0;

/// Grid-bucketed lookup for rectangles by point, rectangle, or distance.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    cell_size: f64,
    buckets: HashMap<(i64, i64), Vec<usize>>,
    items: Vec<Rect>,
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::with_cell_size(DEFAULT_CELL_SIZE)
    }

    pub fn with_cell_size(cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            cell_size,
            buckets: HashMap::new(),
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The rectangle stored under `id`.
    pub fn get(&self, id: usize) -> &Rect {
        &self.items[id]
    }

    /// Insert a rectangle, listing it in every grid cell it overlaps.
    ///
    /// Returns the item's id (insertion order).
    pub fn insert(&mut self, rect: Rect) -> usize {
        let id = self.items.len();
        let (cols, rows) = self.bucket_span(&rect);
        for cx in cols {
            for cy in rows.clone() {
                self.buckets.entry((cx, cy)).or_default().push(id);
            }
        }
        self.items.push(rect);
        id
    }

    fn bucket_of(&self, v: f64) -> i64 {
        (v / self.cell_size).floor() as i64
    }

    fn bucket_span(
        &self,
        rect: &Rect,
    ) -> (
        std::ops::RangeInclusive<i64>,
        std::ops::RangeInclusive<i64>,
    ) {
        let cols = self.bucket_of(rect.left)..=self.bucket_of(rect.right());
        let rows = self.bucket_of(rect.top)..=self.bucket_of(rect.bottom());
        (cols, rows)
    }

    /// Candidate ids from every bucket the query rect touches, deduplicated
    /// and in insertion order.
    fn candidates(&self, rect: &Rect) -> Vec<usize> {
        let (cols, rows) = self.bucket_span(rect);
        let mut ids = Vec::new();
        for cx in cols {
            for cy in rows.clone() {
                if let Some(bucket) = self.buckets.get(&(cx, cy)) {
                    ids.extend_from_slice(bucket);
                }
            }
        }
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Ids of rectangles with a non-empty intersection with `q`.
    pub fn intersects(&self, q: &Rect) -> Vec<usize> {
        self.candidates(q)
            .into_iter()
            .filter(|&id| self.items[id].intersects(q))
            .collect()
    }

    /// Ids of rectangles fully inside `q`.
    pub fn contains(&self, q: &Rect) -> Vec<usize> {
        self.candidates(q)
            .into_iter()
            .filter(|&id| q.contains(&self.items[id]))
            .collect()
    }

    /// Ids of rectangles containing the point `p`.
    pub fn at_point(&self, p: &Point) -> Vec<usize> {
        let probe = Rect::new(p.y, p.x, 0.0, 0.0);
        self.candidates(&probe)
            .into_iter()
            .filter(|&id| self.items[id].contains_point(p))
            .collect()
    }

    /// Ids of rectangles within distance `d` of `q`: `intersects(expand(q, d))`.
    pub fn nearby(&self, q: &Rect, d: f64) -> Vec<usize> {
        self.intersects(&q.expand(d))
    }
}
