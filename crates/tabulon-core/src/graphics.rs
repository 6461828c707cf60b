//! Graphics-stream receiver: turns path-painting events into rulings.
//!
//! The receiver consumes the path events produced by the PDF interpreter,
//! maintains the current-transform-matrix stack, projects device points into
//! top-left page coordinates, and emits axis-aligned rulings two ways:
//! stroked consecutive point pairs, and centerlines of thin filled
//! rectangles (many PDFs draw table borders as filled bars rather than
//! stroked lines).

use crate::geometry::Point;
use crate::ruling::Ruling;
use crate::settings::Settings;

/// Affine transform, stored as the six live values of the 3×3 matrix:
///
/// ```text
/// | a  b  0 |
/// | c  d  0 |
/// | e  f  1 |
/// ```
///
/// Point transformation: `(x', y') = (a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ctm {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Ctm {
    fn default() -> Self {
        Self::identity()
    }
}

impl Ctm {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub fn transform_point(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    /// Concatenate: the returned matrix applies `self` first, then `other`.
    pub fn concat(&self, other: &Ctm) -> Ctm {
        Ctm {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }
}

/// One path-painting event from the PDF content stream, in user space.
#[derive(Debug, Clone, PartialEq)]
pub enum PathEvent {
    BeginSubpath { x: f64, y: f64 },
    AppendLine { x: f64, y: f64 },
    AppendRectangle { x: f64, y: f64, w: f64, h: f64 },
    ClosePath,
    Stroke,
    CloseAndStroke,
    FillNonzero,
    FillEvenOdd,
    EndPath,
    Concat(Ctm),
    Save,
    Restore,
}

/// Consumes [`PathEvent`]s and accumulates rulings.
///
/// Subpath pooling: starting a new subpath while one is open pushes the open
/// subpath into a pool. A fill processes the pool plus the current subpath;
/// a stroke processes only the current subpath. Stroke, fill, and end-path
/// all clear the accumulated state.
#[derive(Debug)]
pub struct RulingReceiver {
    page_height: f64,
    /// Media boxes with inverted y keep device y-coordinates as-is.
    y_inverted: bool,
    thickness_threshold: f64,
    orientation_tolerance: f64,
    ctm: Ctm,
    ctm_stack: Vec<Ctm>,
    current: Vec<Point>,
    pooled: Vec<Vec<Point>>,
    rulings: Vec<Ruling>,
}

impl RulingReceiver {
    pub fn new(page_height: f64, y_inverted: bool, settings: &Settings) -> Self {
        Self {
            page_height,
            y_inverted,
            thickness_threshold: settings.ruling_thickness_threshold,
            orientation_tolerance: settings.orientation_tolerance,
            ctm: Ctm::identity(),
            ctm_stack: Vec::new(),
            current: Vec::new(),
            pooled: Vec::new(),
            rulings: Vec::new(),
        }
    }

    /// Apply the CTM and project into top-left page coordinates.
    fn project(&self, x: f64, y: f64) -> Point {
        let p = self.ctm.transform_point(Point::new(x, y));
        let y_page = if self.y_inverted {
            p.y
        } else {
            self.page_height - p.y
        };
        Point::new(p.x, y_page)
    }

    fn open_subpath(&mut self, start: Point) {
        if !self.current.is_empty() {
            self.pooled.push(std::mem::take(&mut self.current));
        }
        self.current.push(start);
    }

    fn close_current(&mut self) {
        if let (Some(&first), Some(&last)) = (self.current.first(), self.current.last()) {
            if first != last {
                self.current.push(first);
            }
        }
    }

    /// Emit a ruling per consecutive point pair, dropping oblique results.
    fn stroke_points(&mut self, points: &[Point]) {
        for pair in points.windows(2) {
            let r = Ruling::with_tolerance(
                pair[0].x,
                pair[0].y,
                pair[1].x,
                pair[1].y,
                self.orientation_tolerance,
            );
            if !r.oblique() {
                self.rulings.push(r);
            }
        }
    }

    /// Derive a centerline ruling from a thin filled subpath.
    ///
    /// The subpath's bounding box counts as a ruling when one dimension is at
    /// most the thickness threshold and the other exceeds it; larger boxes
    /// are genuine fills and are ignored.
    fn fill_points(&mut self, points: &[Point]) {
        if points.is_empty() {
            return;
        }
        let left = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let right = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let top = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let bottom = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let w = right - left;
        let h = bottom - top;

        let thr = self.thickness_threshold;
        let ruling = if h <= thr && w > thr {
            let y = (top + bottom) / 2.0;
            Ruling::new(left, y, right, y)
        } else if w <= thr && h > thr {
            let x = (left + right) / 2.0;
            Ruling::new(x, top, x, bottom)
        } else {
            return;
        };
        self.rulings.push(ruling);
    }

    fn clear_path(&mut self) {
        self.current.clear();
        self.pooled.clear();
    }

    pub fn handle(&mut self, event: PathEvent) {
        match event {
            PathEvent::BeginSubpath { x, y } => {
                let p = self.project(x, y);
                self.open_subpath(p);
            }
            PathEvent::AppendLine { x, y } => {
                let p = self.project(x, y);
                self.current.push(p);
            }
            PathEvent::AppendRectangle { x, y, w, h } => {
                // A rectangle operator starts its own subpath
                let corners = [
                    self.project(x, y),
                    self.project(x + w, y),
                    self.project(x + w, y + h),
                    self.project(x, y + h),
                ];
                let start = corners[0];
                self.open_subpath(start);
                self.current.extend_from_slice(&corners[1..]);
                self.current.push(start);
            }
            PathEvent::ClosePath => self.close_current(),
            PathEvent::Stroke => {
                let points = std::mem::take(&mut self.current);
                self.stroke_points(&points);
                self.clear_path();
            }
            PathEvent::CloseAndStroke => {
                self.close_current();
                let points = std::mem::take(&mut self.current);
                self.stroke_points(&points);
                self.clear_path();
            }
            PathEvent::FillNonzero | PathEvent::FillEvenOdd => {
                let pooled = std::mem::take(&mut self.pooled);
                let current = std::mem::take(&mut self.current);
                for subpath in pooled {
                    self.fill_points(&subpath);
                }
                self.fill_points(&current);
            }
            PathEvent::EndPath => self.clear_path(),
            PathEvent::Concat(m) => self.ctm = m.concat(&self.ctm),
            PathEvent::Save => self.ctm_stack.push(self.ctm),
            PathEvent::Restore => {
                if let Some(m) = self.ctm_stack.pop() {
                    self.ctm = m;
                }
            }
        }
    }

    pub fn rulings(&self) -> &[Ruling] {
        &self.rulings
    }

    pub fn into_rulings(self) -> Vec<Ruling> {
        self.rulings
    }
}
