//! Stream extraction: table reconstruction from glyph positions alone.
//!
//! Column boundaries come from the first available source: caller-supplied
//! positions, the page's vertical rulings, or gap-midpoint clustering across
//! the page's lines. Each line becomes a row; chunks are routed to columns
//! by their horizontal center.

use crate::chunk::{merge_lines, merge_words, Line};
use crate::page::Page;
use crate::projection::cluster_positions;
use crate::settings::Settings;
use crate::table::{Cell, ExtractionMethod, Table};

/// Maximum distance between pooled gap midpoints fused into one column
/// separator candidate.
const COLUMN_CLUSTER_TOLERANCE: f64 = 5.0;

/// Fraction of lines that must exhibit a gap for it to become a separator.
const COLUMN_SUPPORT_RATIO: f64 = 0.3;

/// Reconstruct a table from the page's text layout.
///
/// Returns at most one table; an empty page yields none.
pub fn extract_tables(page: &Page, columns: Option<&[f64]>, settings: &Settings) -> Vec<Table> {
    let verticals = page.vertical_rulings();
    let chunks = merge_words(page.glyphs(), &verticals, settings);
    let lines = merge_lines(chunks, settings);
    if lines.is_empty() {
        return Vec::new();
    }

    let separators = match columns {
        Some(explicit) => {
            let mut cols = explicit.to_vec();
            cols.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            cols
        }
        None if !verticals.is_empty() => {
            let mut cols: Vec<f64> = verticals.iter().map(|v| v.position()).collect();
            cols.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            cols.dedup_by(|a, b| (*a - *b).abs() < f64::EPSILON);
            cols
        }
        None => guess_columns(&lines, settings),
    };

    let mut table = Table::new(page.number(), ExtractionMethod::Stream);
    for (row, line) in lines.iter().enumerate() {
        for chunk in line.sorted_chunks() {
            let center = chunk.bounds().center_x();
            let col = separators.iter().filter(|&&s| s <= center).count();
            let existing = table.cell_at(row, col);
            if existing.is_placeholder() {
                let mut cell = Cell::new(*chunk.bounds());
                cell.push_chunk(chunk.clone());
                table.insert(row, col, cell);
            } else {
                let mut cell = existing;
                cell.expand_to(chunk.bounds());
                cell.push_chunk(chunk.clone());
                table.insert(row, col, cell);
            }
        }
    }

    if table.is_empty() {
        Vec::new()
    } else {
        vec![table]
    }
}

/// Infer column separators from inter-chunk gaps.
///
/// Gap midpoints from every line are pooled and 1-D-clustered; a cluster
/// becomes a separator when enough lines contributed to it.
fn guess_columns(lines: &[Line], settings: &Settings) -> Vec<f64> {
    let mut pooled = Vec::new();
    for line in lines {
        let min_gap = line.average_char_width() / settings.line_gap_multiplier;
        pooled.extend(line.gap_positions(min_gap));
    }
    let support = (COLUMN_SUPPORT_RATIO * lines.len() as f64).ceil() as usize;
    cluster_positions(&pooled, COLUMN_CLUSTER_TOLERANCE)
        .into_iter()
        .filter(|&(_, count)| count >= support)
        .map(|(mean, _)| mean)
        .collect()
}
