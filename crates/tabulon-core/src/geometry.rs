use std::cmp::Ordering;

/// A 2D point in top-left-origin page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in top-left-origin page coordinates.
///
/// Stored as `(top, left, width, height)`; `bottom` and `right` are derived.
/// All spatial entities in tabulon (glyphs, chunks, cells, pages, detector
/// regions) embed one of these and delegate to it.
///
/// Equality is exact on the four stored fields.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Construct from edge coordinates instead of extents.
    pub fn from_edges(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Bottom edge (distance from top of page).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Horizontal center of the rectangle.
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Vertical center of the rectangle.
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Whether the point lies inside the rectangle (edges inclusive).
    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    /// Whether `other` lies entirely inside this rectangle (edges inclusive).
    pub fn contains(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.right() <= self.right()
            && other.top >= self.top
            && other.bottom() <= self.bottom()
    }

    /// Whether the two rectangles have a non-empty intersection.
    ///
    /// Touching edges count as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left <= other.right()
            && other.left <= self.right()
            && self.top <= other.bottom()
            && other.top <= self.bottom()
    }

    /// The overlapping region of two rectangles, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let top = self.top.max(other.top);
        let left = self.left.max(other.left);
        let bottom = self.bottom().min(other.bottom());
        let right = self.right().min(other.right());
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::from_edges(top, left, bottom, right))
    }

    /// The smallest rectangle containing both inputs.
    pub fn union(&self, other: &Rect) -> Rect {
        let top = self.top.min(other.top);
        let left = self.left.min(other.left);
        let bottom = self.bottom().max(other.bottom());
        let right = self.right().max(other.right());
        Rect::from_edges(top, left, bottom, right)
    }

    /// Grow the rectangle by `d` on every side.
    pub fn expand(&self, d: f64) -> Rect {
        Rect::new(
            self.top - d,
            self.left - d,
            self.width + 2.0 * d,
            self.height + 2.0 * d,
        )
    }

    /// Length of the vertical overlap between the two rectangles' y-extents.
    pub fn vertical_overlap(&self, other: &Rect) -> f64 {
        (self.bottom().min(other.bottom()) - self.top.max(other.top)).max(0.0)
    }

    /// Length of the horizontal overlap between the two rectangles' x-extents.
    pub fn horizontal_overlap(&self, other: &Rect) -> f64 {
        (self.right().min(other.right()) - self.left.max(other.left)).max(0.0)
    }

    /// Fractional vertical overlap: overlap length over the smaller height.
    ///
    /// Zero when either rectangle has zero height.
    pub fn vertical_overlap_ratio(&self, other: &Rect) -> f64 {
        let min_height = self.height.min(other.height);
        if min_height <= 0.0 {
            return 0.0;
        }
        self.vertical_overlap(other) / min_height
    }

    /// Fractional horizontal overlap: overlap length over the smaller width.
    pub fn horizontal_overlap_ratio(&self, other: &Rect) -> f64 {
        let min_width = self.width.min(other.width);
        if min_width <= 0.0 {
            return 0.0;
        }
        self.horizontal_overlap(other) / min_width
    }

    /// Whether the rectangles vertically overlap by at least `threshold`
    /// of the smaller height.
    pub fn vertically_overlaps(&self, other: &Rect, threshold: f64) -> bool {
        self.vertical_overlap_ratio(other) >= threshold
    }

    /// Translate the rectangle by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.top + dy, self.left + dx, self.width, self.height)
    }
}

/// Reading-order comparison: top ascending, then left ascending.
pub fn cmp_reading_order(a: &Rect, b: &Rect) -> Ordering {
    a.top
        .partial_cmp(&b.top)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.left.partial_cmp(&b.left).unwrap_or(Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p.x, 3.0);
        assert_eq!(p.y, 4.0);
    }

    // --- Rect construction ---

    #[test]
    fn test_rect_derived_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.bottom(), 50.0);
        assert_eq!(r.right(), 50.0);
        assert_eq!(r.area(), 1200.0);
    }

    #[test]
    fn test_rect_from_edges() {
        let r = Rect::from_edges(10.0, 20.0, 50.0, 60.0);
        assert_eq!(r, Rect::new(10.0, 20.0, 40.0, 40.0));
    }

    #[test]
    fn test_rect_equality_is_exact() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 0.0, 10.0, 10.0);
        let c = Rect::new(0.0, 1e-9, 10.0, 10.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_rect_centers() {
        let r = Rect::new(10.0, 20.0, 40.0, 20.0);
        assert_eq!(r.center_x(), 40.0);
        assert_eq!(r.center_y(), 20.0);
    }

    // --- Containment and intersection ---

    #[test]
    fn test_contains_point_inside_and_on_edge() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(&Point::new(5.0, 5.0)));
        assert!(r.contains_point(&Point::new(0.0, 0.0)));
        assert!(r.contains_point(&Point::new(10.0, 10.0)));
        assert!(!r.contains_point(&Point::new(10.1, 5.0)));
    }

    #[test]
    fn test_contains_rect() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.contains(&outer));
    }

    #[test]
    fn test_intersects_overlapping() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_intersects_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 20.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_intersects_touching_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_intersection_region() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let i = a.intersection(&b).unwrap();
        assert_eq!(i, Rect::from_edges(5.0, 5.0, 10.0, 10.0));
    }

    #[test]
    fn test_intersection_none_when_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(50.0, 50.0, 10.0, 10.0);
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn test_union() {
        let a = Rect::new(10.0, 20.0, 20.0, 20.0);
        let b = Rect::new(5.0, 25.0, 30.0, 20.0);
        let u = a.union(&b);
        assert_eq!(u, Rect::from_edges(5.0, 20.0, 30.0, 55.0));
    }

    #[test]
    fn test_expand() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        let e = r.expand(2.0);
        assert_eq!(e, Rect::new(8.0, 8.0, 24.0, 24.0));
    }

    #[test]
    fn test_translate() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(r.translate(-5.0, 3.0), Rect::new(13.0, 5.0, 20.0, 20.0));
    }

    // --- Overlap predicates ---

    #[test]
    fn test_vertical_overlap_length() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(6.0, 50.0, 10.0, 10.0);
        assert_eq!(a.vertical_overlap(&b), 4.0);
    }

    #[test]
    fn test_vertical_overlap_ratio_uses_smaller_height() {
        let tall = Rect::new(0.0, 0.0, 10.0, 20.0);
        let short = Rect::new(0.0, 0.0, 10.0, 5.0);
        assert_eq!(tall.vertical_overlap_ratio(&short), 1.0);
    }

    #[test]
    fn test_vertically_overlaps_threshold() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // 4 points of overlap over min height 10 = 0.4
        let b = Rect::new(6.0, 0.0, 10.0, 10.0);
        assert!(a.vertically_overlaps(&b, 0.4));
        assert!(!a.vertically_overlaps(&b, 0.5));
    }

    #[test]
    fn test_vertical_overlap_ratio_zero_height() {
        let a = Rect::new(0.0, 0.0, 10.0, 0.0);
        let b = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.vertical_overlap_ratio(&b), 0.0);
    }

    #[test]
    fn test_horizontal_overlap_ratio() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 5.0, 10.0, 10.0);
        assert_eq!(a.horizontal_overlap_ratio(&b), 0.5);
    }

    // --- Reading order ---

    #[test]
    fn test_reading_order_top_then_left() {
        let mut rects = vec![
            Rect::new(10.0, 50.0, 5.0, 5.0),
            Rect::new(0.0, 80.0, 5.0, 5.0),
            Rect::new(0.0, 10.0, 5.0, 5.0),
            Rect::new(10.0, 0.0, 5.0, 5.0),
        ];
        rects.sort_by(cmp_reading_order);
        assert_eq!(rects[0].left, 10.0);
        assert_eq!(rects[1].left, 80.0);
        assert_eq!(rects[2].left, 0.0);
        assert_eq!(rects[3].left, 50.0);
    }
}
