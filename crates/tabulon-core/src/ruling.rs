//! Rulings: axis-aligned line segments recovered from the graphics stream.
//!
//! A ruling is snapped to horizontal or vertical at construction time when
//! its slope is within the orientation tolerance; anything steeper in both
//! axes is tagged oblique and dropped before table reconstruction sees it.

use crate::geometry::Point;

/// Default snap tolerance for classifying a segment as axis-aligned, and the
/// colinearity tolerance for collapsing parallel fragments.
pub const ORIENTATION_TOLERANCE: f64 = 1.0;

/// Coordinates of fused intersection points are rounded to this grain to
/// absorb floating-point duplicates.
const INTERSECTION_GRAIN: f64 = 0.01;

/// Orientation assigned to a ruling at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
    Oblique,
}

/// A line segment, normalized to horizontal or vertical where possible.
///
/// Horizontal rulings satisfy `y1 == y2` and `x1 <= x2`; vertical rulings
/// satisfy `x1 == x2` and `y1 <= y2`. Oblique rulings keep their raw
/// endpoints and are rejected by every downstream consumer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ruling {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    orientation: Orientation,
}

impl Ruling {
    /// Construct a ruling with the default orientation tolerance.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::with_tolerance(x1, y1, x2, y2, ORIENTATION_TOLERANCE)
    }

    /// Construct a ruling, snapping near-axis-aligned segments.
    ///
    /// If the endpoints differ by at most `tol` in y, the segment is
    /// horizontal: both y-coordinates are replaced by their mean and the
    /// endpoints ordered by x. The vertical case is symmetric.
    pub fn with_tolerance(x1: f64, y1: f64, x2: f64, y2: f64, tol: f64) -> Self {
        if (y2 - y1).abs() <= tol {
            let y = (y1 + y2) / 2.0;
            let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
            Self {
                x1,
                y1: y,
                x2,
                y2: y,
                orientation: Orientation::Horizontal,
            }
        } else if (x2 - x1).abs() <= tol {
            let x = (x1 + x2) / 2.0;
            let (y1, y2) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
            Self {
                x1: x,
                y1,
                x2: x,
                y2,
                orientation: Orientation::Vertical,
            }
        } else {
            Self {
                x1,
                y1,
                x2,
                y2,
                orientation: Orientation::Oblique,
            }
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    pub fn vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    pub fn oblique(&self) -> bool {
        self.orientation == Orientation::Oblique
    }

    /// The perpendicular coordinate: y for horizontal rulings, x for vertical.
    ///
    /// Meaningless for oblique rulings (returns y1).
    pub fn position(&self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.x1,
            _ => self.y1,
        }
    }

    /// Start of the extent along the ruling's axis.
    pub fn start(&self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.y1,
            _ => self.x1,
        }
    }

    /// End of the extent along the ruling's axis.
    pub fn end(&self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.y2,
            _ => self.x2,
        }
    }

    pub fn length(&self) -> f64 {
        let dx = self.x2 - self.x1;
        let dy = self.y2 - self.y1;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether two rulings share an orientation and their perpendicular
    /// positions differ by less than the orientation tolerance.
    pub fn colinear_with(&self, other: &Ruling) -> bool {
        self.orientation != Orientation::Oblique
            && self.orientation == other.orientation
            && (self.position() - other.position()).abs() < ORIENTATION_TOLERANCE
    }

    /// Whether the ruling's extent covers `[start, end]`, loosened by `tol`.
    pub fn covers(&self, start: f64, end: f64, tol: f64) -> bool {
        self.start() <= start + tol && self.end() >= end - tol
    }

    /// Translate the ruling by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Ruling {
        Ruling {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
            orientation: self.orientation,
        }
    }
}

/// Where a horizontal and a vertical ruling cross, if they do.
///
/// The crossing exists when the vertical's x falls within the horizontal's
/// x-extent and the horizontal's y within the vertical's y-extent, each
/// loosened by `tol`.
pub fn intersection_point(h: &Ruling, v: &Ruling, tol: f64) -> Option<Point> {
    if !h.horizontal() || !v.vertical() {
        return None;
    }
    if v.position() >= h.start() - tol
        && v.position() <= h.end() + tol
        && h.position() >= v.start() - tol
        && h.position() <= v.end() + tol
    {
        Some(Point::new(v.position(), h.position()))
    } else {
        None
    }
}

fn round_to_grain(v: f64) -> f64 {
    (v / INTERSECTION_GRAIN).round() * INTERSECTION_GRAIN
}

/// All points where a horizontal ruling crosses a vertical one.
///
/// Coordinates are rounded to 0.01 to fuse floating-point duplicates; the
/// result is sorted in reading order (y then x) and deduplicated.
pub fn find_intersections(
    horizontals: &[Ruling],
    verticals: &[Ruling],
    tol: f64,
) -> Vec<Point> {
    let mut points = Vec::new();
    for h in horizontals {
        for v in verticals {
            if let Some(p) = intersection_point(h, v, tol) {
                points.push(Point::new(round_to_grain(p.x), round_to_grain(p.y)));
            }
        }
    }
    points.sort_by(|a, b| {
        a.y.partial_cmp(&b.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });
    points.dedup_by(|a, b| a.x == b.x && a.y == b.y);
    points
}

/// Collapse near-colinear ruling fragments into single segments.
///
/// Oblique rulings are discarded. The remainder is split by orientation,
/// sorted by perpendicular position, and walked grouping consecutively
/// colinear segments into runs; each run is replaced by one ruling at the
/// run's mean position spanning the union of the member extents.
///
/// The operation is idempotent: adjacent output positions are separated by
/// at least the colinearity tolerance, so a second pass finds nothing to
/// merge.
pub fn collapse_oriented_rulings(rulings: &[Ruling]) -> Vec<Ruling> {
    let mut horizontals: Vec<Ruling> = rulings.iter().filter(|r| r.horizontal()).copied().collect();
    let mut verticals: Vec<Ruling> = rulings.iter().filter(|r| r.vertical()).copied().collect();

    let mut out = collapse_group(&mut horizontals, |pos, start, end| {
        Ruling::new(start, pos, end, pos)
    });
    out.extend(collapse_group(&mut verticals, |pos, start, end| {
        Ruling::new(pos, start, pos, end)
    }));
    out
}

fn collapse_group<F>(rulings: &mut [Ruling], build: F) -> Vec<Ruling>
where
    F: Fn(f64, f64, f64) -> Ruling,
{
    rulings.sort_by(|a, b| {
        a.position()
            .partial_cmp(&b.position())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                a.start()
                    .partial_cmp(&b.start())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    let mut out = Vec::new();
    let mut run_start = 0;
    for i in 1..=rulings.len() {
        let run_ends = i == rulings.len()
            || (rulings[i].position() - rulings[i - 1].position()).abs() >= ORIENTATION_TOLERANCE;
        if run_ends {
            let run = &rulings[run_start..i];
            let mean = run.iter().map(Ruling::position).sum::<f64>() / run.len() as f64;
            let start = run.iter().map(Ruling::start).fold(f64::INFINITY, f64::min);
            let end = run.iter().map(Ruling::end).fold(f64::NEG_INFINITY, f64::max);
            out.push(build(mean, start, end));
            run_start = i;
        }
    }
    out
}
