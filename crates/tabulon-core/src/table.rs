//! The table data model: cells and sparse row/column grids.

use std::collections::BTreeMap;

use crate::chunk::TextChunk;
use crate::geometry::{cmp_reading_order, Rect};

/// How a table was reconstructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtractionMethod {
    /// Reconstructed from the ruling network.
    Lattice,
    /// Reconstructed from glyph positions alone.
    Stream,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::Lattice => "lattice",
            ExtractionMethod::Stream => "stream",
        }
    }
}

/// One grid cell: a rectangle carrying the chunks found inside it.
///
/// The `placeholder` flag distinguishes a coordinate with no cell from a
/// cell that exists but holds no text.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    rect: Rect,
    chunks: Vec<TextChunk>,
    placeholder: bool,
}

impl Cell {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            chunks: Vec::new(),
            placeholder: false,
        }
    }

    /// A stand-in for a grid coordinate with no discovered cell.
    pub fn placeholder() -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, 0.0, 0.0),
            chunks: Vec::new(),
            placeholder: true,
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn chunks(&self) -> &[TextChunk] {
        &self.chunks
    }

    pub fn push_chunk(&mut self, chunk: TextChunk) {
        self.chunks.push(chunk);
    }

    pub fn set_chunks(&mut self, chunks: Vec<TextChunk>) {
        self.chunks = chunks;
    }

    /// Grow the cell to cover `rect` as well.
    pub fn expand_to(&mut self, rect: &Rect) {
        self.rect = self.rect.union(rect);
    }

    /// Member chunk texts in reading order, joined by single spaces.
    pub fn text(&self) -> String {
        let mut ordered: Vec<&TextChunk> = self.chunks.iter().collect();
        ordered.sort_by(|a, b| cmp_reading_order(a.bounds(), b.bounds()));
        ordered
            .iter()
            .map(|c| c.text())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A sparse row-major grid of cells with a union bounding box.
#[derive(Debug, Clone)]
pub struct Table {
    cells: BTreeMap<(usize, usize), Cell>,
    row_count: usize,
    col_count: usize,
    bounds: Option<Rect>,
    method: ExtractionMethod,
    page_number: usize,
}

impl Table {
    pub fn new(page_number: usize, method: ExtractionMethod) -> Self {
        Self {
            cells: BTreeMap::new(),
            row_count: 0,
            col_count: 0,
            bounds: None,
            method,
            page_number,
        }
    }

    /// Place a cell at `(row, col)`, growing the grid and the bounding box.
    pub fn insert(&mut self, row: usize, col: usize, cell: Cell) {
        self.row_count = self.row_count.max(row + 1);
        self.col_count = self.col_count.max(col + 1);
        self.bounds = Some(match self.bounds {
            Some(b) => b.union(cell.rect()),
            None => *cell.rect(),
        });
        self.cells.insert((row, col), cell);
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn method(&self) -> ExtractionMethod {
        self.method
    }

    /// Union of all inserted cell rectangles; zero rect when empty.
    pub fn bounds(&self) -> Rect {
        self.bounds.unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell at `(row, col)`; missing coordinates read back as an empty
    /// placeholder.
    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        self.cells
            .get(&(row, col))
            .cloned()
            .unwrap_or_else(Cell::placeholder)
    }

    /// Dense row-major grid, placeholders filling the holes.
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        (0..self.row_count)
            .map(|r| (0..self.col_count).map(|c| self.cell_at(r, c)).collect())
            .collect()
    }

    /// Dense row-major grid of cell texts, for the output formatters.
    pub fn text_grid(&self) -> Vec<Vec<String>> {
        (0..self.row_count)
            .map(|r| {
                (0..self.col_count)
                    .map(|c| {
                        self.cells
                            .get(&(r, c))
                            .map(Cell::text)
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }
}
