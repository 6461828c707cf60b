//! Lattice extraction: table reconstruction from the ruling network.
//!
//! Cell discovery runs per row: for each pair of adjacent horizontal ruling
//! positions, only the vertical rulings spanning that row contribute column
//! boundaries. Decoupling columns across rows is what makes header spans and
//! other partial-ruling layouts come out right. A candidate cell is accepted
//! when its four edges are covered by rulings, or when all four corners
//! appear in the intersection map; the two tests are deliberately redundant
//! (stub rulings can break one without breaking the other).

use crate::chunk::merge_words;
use crate::geometry::{cmp_reading_order, Point, Rect};
use crate::page::Page;
use crate::ruling::{find_intersections, Ruling};
use crate::settings::Settings;
use crate::table::{Cell, ExtractionMethod, Table};

/// Reconstruct tables from a page's processed rulings.
///
/// Returns an empty list when either ruling orientation is absent.
pub fn extract_tables(page: &Page, settings: &Settings) -> Vec<Table> {
    let horizontals = page.horizontal_rulings();
    let verticals = page.vertical_rulings();
    if horizontals.is_empty() || verticals.is_empty() {
        return Vec::new();
    }

    let cells = find_cells(&horizontals, &verticals, settings);
    let regions = group_regions(&cells, settings);

    let mut tables: Vec<Table> = regions
        .into_iter()
        .map(|region| assemble_table(page, &verticals, region, settings))
        .collect();
    tables.sort_by(|a, b| cmp_reading_order(&a.bounds(), &b.bounds()));
    tables
}

/// Per-row cell discovery over collapsed rulings.
pub(crate) fn find_cells(
    horizontals: &[Ruling],
    verticals: &[Ruling],
    settings: &Settings,
) -> Vec<Rect> {
    let tol = settings.cell_tolerance;
    let intersections = find_intersections(horizontals, verticals, settings.intersection_tolerance);

    let row_lines = unique_positions(horizontals);
    let mut cells = Vec::new();

    for row in row_lines.windows(2) {
        let (top, bottom) = (row[0], row[1]);

        // Verticals spanning this row; partial rulings that stop short of
        // the row do not contribute column boundaries here.
        let spanning: Vec<&Ruling> = verticals
            .iter()
            .filter(|v| v.start() <= top + tol && v.end() >= bottom - tol)
            .collect();
        let mut columns: Vec<f64> = spanning.iter().map(|v| v.position()).collect();
        columns.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        columns.dedup_by(|a, b| (*a - *b).abs() < f64::EPSILON);

        for col in columns.windows(2) {
            let (left, right) = (col[0], col[1]);
            let edges = has_edge_cover(horizontals, &spanning, top, bottom, left, right, tol);
            let corners = has_corner_cover(&intersections, top, bottom, left, right, tol);
            if edges || corners {
                cells.push(Rect::from_edges(top, left, bottom, right));
            }
        }
    }
    cells
}

fn unique_positions(rulings: &[Ruling]) -> Vec<f64> {
    let mut positions: Vec<f64> = rulings.iter().map(Ruling::position).collect();
    positions.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    positions.dedup_by(|a, b| (*a - *b).abs() < f64::EPSILON);
    positions
}

/// Edge test: horizontal rulings at the top and bottom covering the cell's
/// x-extent, and vertical rulings at the left and right covering its
/// y-extent, all within tolerance.
fn has_edge_cover(
    horizontals: &[Ruling],
    spanning: &[&Ruling],
    top: f64,
    bottom: f64,
    left: f64,
    right: f64,
    tol: f64,
) -> bool {
    let h_at = |y: f64| {
        horizontals
            .iter()
            .any(|h| (h.position() - y).abs() <= tol && h.covers(left, right, tol))
    };
    // The spanning set already covers [top, bottom]; only the x position
    // needs checking.
    let v_at = |x: f64| spanning.iter().any(|v| (v.position() - x).abs() <= tol);
    h_at(top) && h_at(bottom) && v_at(left) && v_at(right)
}

/// Corner test: all four cell corners present in the intersection map.
fn has_corner_cover(
    intersections: &[Point],
    top: f64,
    bottom: f64,
    left: f64,
    right: f64,
    tol: f64,
) -> bool {
    let has = |x: f64, y: f64| {
        intersections
            .iter()
            .any(|p| (p.x - x).abs() <= tol && (p.y - y).abs() <= tol)
    };
    has(left, top) && has(right, top) && has(left, bottom) && has(right, bottom)
}

/// Group cells into connected regions and drop the degenerate ones.
///
/// Two cells are adjacent when they share a vertical boundary within
/// tolerance and their y-extents overlap by at least half, or the symmetric
/// horizontal case. Regions smaller than the cell minimum or with zero
/// bounding area are discarded.
pub(crate) fn group_regions(cells: &[Rect], settings: &Settings) -> Vec<Vec<Rect>> {
    if cells.is_empty() {
        return Vec::new();
    }
    let tol = settings.cell_tolerance;
    let n = cells.len();
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    fn union(parent: &mut [usize], a: usize, b: usize) {
        let ra = find(parent, a);
        let rb = find(parent, b);
        if ra != rb {
            parent[rb] = ra;
        }
    }

    for i in 0..n {
        for j in (i + 1)..n {
            if cells_adjacent(&cells[i], &cells[j], tol) {
                union(&mut parent, i, j);
            }
        }
    }

    let mut groups: std::collections::HashMap<usize, Vec<Rect>> = std::collections::HashMap::new();
    for i in 0..n {
        let root = find(&mut parent, i);
        groups.entry(root).or_default().push(cells[i]);
    }

    let mut regions: Vec<Vec<Rect>> = groups
        .into_values()
        .filter(|group| {
            if group.len() < settings.min_cells {
                return false;
            }
            let bbox = group[1..]
                .iter()
                .fold(group[0], |acc, r| acc.union(r));
            bbox.area() > 0.0
        })
        .collect();
    regions.sort_by(|a, b| {
        let ba = region_bounds(a);
        let bb = region_bounds(b);
        cmp_reading_order(&ba, &bb)
    });
    regions
}

fn cells_adjacent(a: &Rect, b: &Rect, tol: f64) -> bool {
    let share_vertical = ((a.right() - b.left).abs() <= tol || (b.right() - a.left).abs() <= tol)
        && a.vertical_overlap_ratio(b) >= 0.5;
    let share_horizontal = ((a.bottom() - b.top).abs() <= tol || (b.bottom() - a.top).abs() <= tol)
        && a.horizontal_overlap_ratio(b) >= 0.5;
    share_vertical || share_horizontal
}

pub(crate) fn region_bounds(cells: &[Rect]) -> Rect {
    cells[1..].iter().fold(cells[0], |acc, r| acc.union(r))
}

/// Build one table from a region's cells: rows from sorted unique tops,
/// column indices from same-row left order, glyphs assigned through the
/// page's spatial index.
fn assemble_table(
    page: &Page,
    verticals: &[Ruling],
    mut region: Vec<Rect>,
    settings: &Settings,
) -> Table {
    region.sort_by(cmp_reading_order);

    let mut tops: Vec<f64> = region.iter().map(|c| c.top).collect();
    tops.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    tops.dedup_by(|a, b| (*a - *b).abs() < f64::EPSILON);

    let mut table = Table::new(page.number(), ExtractionMethod::Lattice);
    let mut col = 0usize;
    let mut current_row = usize::MAX;

    for rect in region {
        let row = tops
            .iter()
            .position(|&t| (t - rect.top).abs() < f64::EPSILON)
            .unwrap_or(0);
        if row != current_row {
            current_row = row;
            col = 0;
        } else {
            col += 1;
        }

        let mut cell = Cell::new(rect);
        let glyphs: Vec<_> = page
            .glyphs_with_origin_in(&rect)
            .into_iter()
            .cloned()
            .collect();
        if !glyphs.is_empty() {
            cell.set_chunks(merge_words(&glyphs, verticals, settings));
        }
        table.insert(row, col, cell);
    }
    table
}
