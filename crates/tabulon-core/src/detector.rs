//! Table-region detectors.
//!
//! Two strategies: a ruling-driven pass reusing lattice cell discovery, and
//! a text-edge pass in the manner of Nurminen's thesis algorithm, which
//! finds runs of text lines whose chunk edges repeatedly align. The
//! text-edge pass appends to the ruling-driven output, dropping regions
//! that mostly duplicate one already found.

use crate::chunk::{merge_lines, merge_words, Line, TextChunk};
use crate::geometry::{cmp_reading_order, Rect};
use crate::page::Page;
use crate::projection::cluster_positions;
use crate::settings::Settings;
use crate::lattice;

/// Max distance between a chunk edge and a relevant cluster position for
/// the edge to count as aligned.
const EDGE_ALIGNMENT_TOLERANCE: f64 = 10.0;

/// Fraction of a line's chunk edges that must align for the line to read as
/// tabular.
const ALIGNED_EDGE_RATIO: f64 = 0.3;

/// Detect table regions from the ruling network.
///
/// Runs lattice cell discovery and region grouping, then keeps each region's
/// bounding box when it meets the minimum cell count and dimensions.
pub fn detect_with_rulings(page: &Page, settings: &Settings) -> Vec<Rect> {
    let horizontals = page.horizontal_rulings();
    let verticals = page.vertical_rulings();
    if horizontals.is_empty() || verticals.is_empty() {
        return Vec::new();
    }

    let cells = lattice::find_cells(&horizontals, &verticals, settings);
    let mut regions: Vec<Rect> = lattice::group_regions(&cells, settings)
        .iter()
        .map(|region| lattice::region_bounds(region))
        .filter(|bounds| {
            bounds.width >= settings.min_table_dimension
                && bounds.height >= settings.min_table_dimension
        })
        .collect();
    regions.sort_by(cmp_reading_order);
    regions
}

/// The three alignment positions a chunk contributes.
fn chunk_edges(chunk: &TextChunk) -> [f64; 3] {
    let b = chunk.bounds();
    [b.left, b.center_x(), b.right()]
}

/// Cluster one edge family and keep the positions with enough occurrences.
fn relevant_positions(edges: &[f64], settings: &Settings) -> Vec<f64> {
    let threshold = 2usize.max((0.1 * edges.len() as f64).ceil() as usize);
    cluster_positions(edges, settings.edge_clustering_tolerance)
        .into_iter()
        .filter(|&(_, count)| count >= threshold)
        .map(|(mean, _)| mean)
        .collect()
}

fn aligned(value: f64, positions: &[f64]) -> bool {
    positions
        .iter()
        .any(|&p| (value - p).abs() <= EDGE_ALIGNMENT_TOLERANCE)
}

/// Whether enough of the line's chunk edges sit on relevant positions.
fn line_is_tabular(line: &Line, relevant: &[Vec<f64>; 3]) -> bool {
    let mut total = 0usize;
    let mut hits = 0usize;
    for chunk in line.chunks() {
        for (family, edge) in chunk_edges(chunk).into_iter().enumerate() {
            total += 1;
            if aligned(edge, &relevant[family]) {
                hits += 1;
            }
        }
    }
    total > 0 && hits as f64 >= ALIGNED_EDGE_RATIO * total as f64
}

/// Detect table regions from text-edge alignment, merged with the
/// ruling-driven detector's output.
pub fn detect_with_text_edges(page: &Page, settings: &Settings) -> Vec<Rect> {
    let mut regions = detect_with_rulings(page, settings);

    let verticals = page.vertical_rulings();
    let chunks = merge_words(page.glyphs(), &verticals, settings);
    let lines = merge_lines(chunks, settings);

    // Pool left, center, and right edges separately: a column of ragged
    // text aligns on one family without the others.
    let mut families: [Vec<f64>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for line in &lines {
        for chunk in line.chunks() {
            for (family, edge) in chunk_edges(chunk).into_iter().enumerate() {
                families[family].push(edge);
            }
        }
    }
    let relevant = [
        relevant_positions(&families[0], settings),
        relevant_positions(&families[1], settings),
        relevant_positions(&families[2], settings),
    ];

    let flags: Vec<bool> = lines
        .iter()
        .map(|line| line_is_tabular(line, &relevant))
        .collect();

    for (start, end) in tabular_runs(&flags, settings.min_rows) {
        let bounds = lines[start..end]
            .iter()
            .map(Line::bounds)
            .fold(*lines[start].bounds(), |acc, b| acc.union(b));
        let candidate = bounds.expand(settings.detection_padding);
        let candidate = candidate.intersection(page.bounds()).unwrap_or(candidate);
        if !regions
            .iter()
            .any(|r| overlap_ratio(r, &candidate) >= settings.overlap_threshold)
        {
            regions.push(candidate);
        }
    }

    regions.sort_by(cmp_reading_order);
    regions
}

/// Half-open `(start, end)` index ranges of qualifying-line runs of at
/// least `min_rows`.
fn tabular_runs(flags: &[bool], min_rows: usize) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;
    for (i, &flag) in flags.iter().enumerate() {
        match (flag, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                if i - s >= min_rows {
                    runs.push((s, i));
                }
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        if flags.len() - s >= min_rows {
            runs.push((s, flags.len()));
        }
    }
    runs
}

/// Intersection area over the smaller region's area.
fn overlap_ratio(a: &Rect, b: &Rect) -> f64 {
    let min_area = a.area().min(b.area());
    if min_area <= 0.0 {
        return 0.0;
    }
    a.intersection(b).map(|i| i.area() / min_area).unwrap_or(0.0)
}

/// Whether the page's dominant structure is ruling-defined.
///
/// Compares the grid the rulings describe with the grid the text layout
/// describes; agreement within the configured ratio band reads as tabular.
pub fn is_tabular(page: &Page, settings: &Settings) -> bool {
    let with_rulings = lattice::extract_tables(page, settings);
    let Some(ruled) = with_rulings.first() else {
        return false;
    };
    let from_text = crate::stream::extract_tables(page, None, settings);
    let Some(text) = from_text.first() else {
        return false;
    };
    if text.row_count() == 0 || text.col_count() == 0 {
        return false;
    }

    let row_ratio = ruled.row_count() as f64 / text.row_count() as f64;
    let col_ratio = ruled.col_count() as f64 / text.col_count() as f64;
    let ratio = (row_ratio + col_ratio) / 2.0;
    let t = settings.tabular_ratio_threshold;
    ratio > t && ratio < 1.0 / t
}
