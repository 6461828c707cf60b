//! Glyph → word → line grouping.
//!
//! Glyphs merge into chunks (words) while they stay on the same visual row,
//! no vertical ruling separates them, and the horizontal gap stays within a
//! fraction of the space width. Chunks then merge into lines by vertical
//! overlap. Right-to-left content is assembled in descending-left order.

use crate::geometry::{cmp_reading_order, Rect};
use crate::projection::{ProjectionProfile, DEFAULT_BIN_WIDTH};
use crate::ruling::Ruling;
use crate::settings::Settings;
use crate::text::{Direction, TextElement};

/// A merged run of glyphs representing one word.
#[derive(Debug, Clone, PartialEq)]
pub struct TextChunk {
    elements: Vec<TextElement>,
    bounds: Rect,
}

impl TextChunk {
    pub fn new(first: TextElement) -> Self {
        let bounds = first.rect;
        Self {
            elements: vec![first],
            bounds,
        }
    }

    pub fn push(&mut self, element: TextElement) {
        self.bounds = self.bounds.union(&element.rect);
        self.elements.push(element);
    }

    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    pub fn elements(&self) -> &[TextElement] {
        &self.elements
    }

    /// Majority direction over member glyphs; left-to-right on a tie.
    pub fn direction(&self) -> Direction {
        majority_direction(self.elements.iter().map(|e| e.direction))
    }

    /// Space width of the most recently appended glyph.
    pub fn width_of_space(&self) -> f64 {
        self.elements
            .last()
            .map(|e| e.width_of_space)
            .unwrap_or(0.0)
    }

    /// Member texts concatenated in visual order: ascending `left` for
    /// left-to-right chunks, descending for right-to-left.
    pub fn text(&self) -> String {
        let mut ordered: Vec<&TextElement> = self.elements.iter().collect();
        sort_by_left(&mut ordered, self.direction(), |e| e.left());
        ordered.iter().map(|e| e.text.as_str()).collect()
    }
}

/// An ordered collection of vertically-overlapping chunks: one text row.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    chunks: Vec<TextChunk>,
    bounds: Rect,
}

impl Line {
    pub fn new(first: TextChunk) -> Self {
        let bounds = *first.bounds();
        Self {
            chunks: vec![first],
            bounds,
        }
    }

    pub fn push(&mut self, chunk: TextChunk) {
        self.bounds = self.bounds.union(chunk.bounds());
        self.chunks.push(chunk);
    }

    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    pub fn chunks(&self) -> &[TextChunk] {
        &self.chunks
    }

    /// Majority direction over member chunks; left-to-right on a tie.
    pub fn direction(&self) -> Direction {
        majority_direction(self.chunks.iter().map(TextChunk::direction))
    }

    /// Chunks in visual order for this line's direction.
    pub fn sorted_chunks(&self) -> Vec<&TextChunk> {
        let mut ordered: Vec<&TextChunk> = self.chunks.iter().collect();
        sort_by_left(&mut ordered, self.direction(), |c| c.bounds().left);
        ordered
    }

    /// Member chunk texts joined by `separator`, in visual order.
    pub fn text(&self, separator: &str) -> String {
        self.sorted_chunks()
            .iter()
            .map(|c| c.text())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Mean glyph width across the line.
    pub fn average_char_width(&self) -> f64 {
        let mut total = 0.0;
        let mut count = 0usize;
        for chunk in &self.chunks {
            for el in chunk.elements() {
                total += el.width();
                count += 1;
            }
        }
        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    }

    /// Midpoints of inter-chunk gaps at least `min_gap` wide, found through
    /// a horizontal projection of the chunk extents.
    pub fn gap_positions(&self, min_gap: f64) -> Vec<f64> {
        let profile = ProjectionProfile::horizontal(
            self.chunks.iter().map(TextChunk::bounds),
            DEFAULT_BIN_WIDTH,
        );
        profile.gap_midpoints(min_gap)
    }
}

fn majority_direction<I>(directions: I) -> Direction
where
    I: Iterator<Item = Direction>,
{
    let mut rtl = 0isize;
    let mut total = 0isize;
    for d in directions {
        total += 1;
        if d == Direction::Rtl {
            rtl += 1;
        }
    }
    if rtl * 2 > total {
        Direction::Rtl
    } else {
        Direction::Ltr
    }
}

fn sort_by_left<T, F>(items: &mut [T], direction: Direction, left: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| {
        let ord = left(a)
            .partial_cmp(&left(b))
            .unwrap_or(std::cmp::Ordering::Equal);
        match direction {
            Direction::Ltr => ord,
            Direction::Rtl => ord.reverse(),
        }
    });
}

/// Whether a vertical ruling passes between `chunk` and `element` with a
/// y-extent covering both.
fn ruling_between(chunk: &Rect, element: &Rect, rulings: &[Ruling]) -> bool {
    if element.left <= chunk.right() {
        return false;
    }
    let top = chunk.top.min(element.top);
    let bottom = chunk.bottom().max(element.bottom());
    rulings.iter().any(|r| {
        r.vertical()
            && r.position() > chunk.right()
            && r.position() < element.left
            && r.covers(top, bottom, 0.0)
    })
}

/// Merge glyphs into words.
///
/// Glyphs are scanned in reading order. A non-whitespace glyph joins the
/// current chunk while it vertically overlaps the chunk, no vertical ruling
/// separates them, and the horizontal gap does not exceed the word-gap
/// fraction of the space width. Whitespace glyphs close the current chunk.
pub fn merge_words(
    elements: &[TextElement],
    vertical_rulings: &[Ruling],
    settings: &Settings,
) -> Vec<TextChunk> {
    let mut sorted: Vec<&TextElement> = elements.iter().collect();
    sorted.sort_by(|a, b| cmp_reading_order(&a.rect, &b.rect));

    let mut chunks: Vec<TextChunk> = Vec::new();
    let mut current: Option<TextChunk> = None;

    for element in sorted {
        if element.is_whitespace() {
            if let Some(chunk) = current.take() {
                chunks.push(chunk);
            }
            continue;
        }

        match current.as_mut() {
            None => current = Some(TextChunk::new(element.clone())),
            Some(chunk) => {
                let overlaps = chunk
                    .bounds()
                    .vertically_overlaps(&element.rect, settings.vertical_comparison_threshold);
                let separated = ruling_between(chunk.bounds(), &element.rect, vertical_rulings);
                let max_gap = settings.word_gap_multiplier
                    * chunk
                        .width_of_space()
                        .max(element.width_of_space)
                        .max(element.width());
                let gap_ok = element.left() - chunk.bounds().right() <= max_gap;

                if overlaps && !separated && gap_ok {
                    chunk.push(element.clone());
                } else {
                    chunks.push(current.take().unwrap());
                    current = Some(TextChunk::new(element.clone()));
                }
            }
        }
    }

    if let Some(chunk) = current {
        chunks.push(chunk);
    }
    chunks
}

/// Merge chunks into lines by vertical overlap.
pub fn merge_lines(chunks: Vec<TextChunk>, settings: &Settings) -> Vec<Line> {
    let mut sorted = chunks;
    sorted.sort_by(|a, b| cmp_reading_order(a.bounds(), b.bounds()));

    let mut lines: Vec<Line> = Vec::new();
    for chunk in sorted {
        match lines.last_mut() {
            Some(line)
                if line
                    .bounds()
                    .vertically_overlaps(chunk.bounds(), settings.vertical_comparison_threshold) =>
            {
                line.push(chunk);
            }
            _ => lines.push(Line::new(chunk)),
        }
    }
    lines
}
