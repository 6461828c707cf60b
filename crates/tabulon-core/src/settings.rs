//! Tuning thresholds for ruling analysis, text grouping, and table detection.

/// The single configuration record carrying every tuning threshold used by
/// the extraction pipeline.
///
/// Callers clone the default and override individual fields; extraction code
/// only ever reads a `Settings`, never mutates one.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Max slope, in points, for a ruling to be treated as axis-aligned.
    pub orientation_tolerance: f64,
    /// Point-in-segment tolerance for ruling intersection tests.
    pub intersection_tolerance: f64,
    /// Max thin-dimension of a filled rectangle to be treated as a ruling.
    pub ruling_thickness_threshold: f64,
    /// Fraction of space-width permitted as inter-glyph gap when merging words.
    pub word_gap_multiplier: f64,
    /// Fraction of average char width permitted between chunks inside a line;
    /// wider gaps become column-gap candidates.
    pub line_gap_multiplier: f64,
    /// Minimum number of cells for a ruling-defined table.
    pub min_cells: usize,
    /// Minimum width and height of a detected table region.
    pub min_table_dimension: f64,
    /// Corner/edge match tolerance in lattice cell discovery.
    pub cell_tolerance: f64,
    /// Minimum consecutive text rows for a text-edge-detected table.
    pub min_rows: usize,
    /// Region overlap ratio above which detector outputs are deduplicated.
    pub overlap_threshold: f64,
    /// Row/column agreement ratio for the `tabular` predicate.
    pub tabular_ratio_threshold: f64,
    /// Cluster radius for text-edge alignment detection.
    pub edge_clustering_tolerance: f64,
    /// Padding applied around detected table regions.
    pub detection_padding: f64,
    /// Minimum fractional vertical overlap for grouping elements into a line.
    pub vertical_comparison_threshold: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            orientation_tolerance: 1.0,
            intersection_tolerance: 1.0,
            ruling_thickness_threshold: 8.0,
            word_gap_multiplier: 0.5,
            line_gap_multiplier: 0.5,
            min_cells: 4,
            min_table_dimension: 10.0,
            cell_tolerance: 2.0,
            min_rows: 2,
            overlap_threshold: 0.9,
            tabular_ratio_threshold: 0.65,
            edge_clustering_tolerance: 8.0,
            detection_padding: 2.0,
            vertical_comparison_threshold: 0.4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let s = Settings::default();
        assert_eq!(s.orientation_tolerance, 1.0);
        assert_eq!(s.intersection_tolerance, 1.0);
        assert_eq!(s.ruling_thickness_threshold, 8.0);
        assert_eq!(s.word_gap_multiplier, 0.5);
        assert_eq!(s.line_gap_multiplier, 0.5);
        assert_eq!(s.min_cells, 4);
        assert_eq!(s.min_table_dimension, 10.0);
        assert_eq!(s.cell_tolerance, 2.0);
        assert_eq!(s.min_rows, 2);
        assert_eq!(s.overlap_threshold, 0.9);
        assert_eq!(s.tabular_ratio_threshold, 0.65);
        assert_eq!(s.edge_clustering_tolerance, 8.0);
        assert_eq!(s.detection_padding, 2.0);
        assert_eq!(s.vertical_comparison_threshold, 0.4);
    }

    #[test]
    fn test_clone_and_override() {
        let s = Settings {
            cell_tolerance: 4.0,
            min_cells: 2,
            ..Settings::default()
        };
        assert_eq!(s.cell_tolerance, 4.0);
        assert_eq!(s.min_cells, 2);
        // Untouched fields keep their defaults
        assert_eq!(s.orientation_tolerance, 1.0);
    }
}
