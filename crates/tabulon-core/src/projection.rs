//! 1-D projection profiles and position clustering.
//!
//! A projection profile is a fixed-bin histogram of element extents along one
//! axis. Zero-count runs between the first and last occupied bin are gaps;
//! their midpoints drive column inference in stream extraction.

use crate::geometry::Rect;

/// Default histogram bin width in points.
pub const DEFAULT_BIN_WIDTH: f64 = 1.0;

/// Histogram of rectangle extents projected onto one axis.
#[derive(Debug, Clone)]
pub struct ProjectionProfile {
    origin: f64,
    bin_width: f64,
    counts: Vec<u32>,
}

impl ProjectionProfile {
    /// Profile of `[left, right]` extents projected onto the x-axis.
    pub fn horizontal<'a, I>(rects: I, bin_width: f64) -> Self
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        Self::from_spans(rects.into_iter().map(|r| (r.left, r.right())), bin_width)
    }

    /// Profile of `[top, bottom]` extents projected onto the y-axis.
    pub fn vertical<'a, I>(rects: I, bin_width: f64) -> Self
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        Self::from_spans(rects.into_iter().map(|r| (r.top, r.bottom())), bin_width)
    }

    fn from_spans<I>(spans: I, bin_width: f64) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        assert!(bin_width > 0.0, "bin width must be positive");
        let spans: Vec<(f64, f64)> = spans.into_iter().filter(|(s, e)| e >= s).collect();
        if spans.is_empty() {
            return Self {
                origin: 0.0,
                bin_width,
                counts: Vec::new(),
            };
        }

        let min = spans.iter().map(|s| s.0).fold(f64::INFINITY, f64::min);
        let max = spans.iter().map(|s| s.1).fold(f64::NEG_INFINITY, f64::max);
        let origin = (min / bin_width).floor() * bin_width;
        let bin_count = (((max - origin) / bin_width).ceil() as usize).max(1);

        let mut counts = vec![0u32; bin_count];
        for (start, end) in spans {
            let first = ((start - origin) / bin_width).floor() as usize;
            let last = ((((end - origin) / bin_width).ceil() as usize).max(first + 1) - 1)
                .min(bin_count - 1);
            for count in &mut counts[first..=last] {
                *count += 1;
            }
        }

        Self {
            origin,
            bin_width,
            counts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Contiguous zero-count intervals of width at least `min_gap`, swept
    /// between the first and last occupied bins.
    ///
    /// Returned as `(start, end)` coordinate pairs.
    pub fn find_gaps(&self, min_gap: f64) -> Vec<(f64, f64)> {
        let first = match self.counts.iter().position(|&c| c > 0) {
            Some(i) => i,
            None => return Vec::new(),
        };
        let last = self.counts.iter().rposition(|&c| c > 0).unwrap_or(first);

        let mut gaps = Vec::new();
        let mut run_start: Option<usize> = None;
        for i in first..=last {
            if self.counts[i] == 0 {
                run_start.get_or_insert(i);
            } else if let Some(start) = run_start.take() {
                self.push_gap(&mut gaps, start, i, min_gap);
            }
        }
        gaps
    }

    fn push_gap(&self, gaps: &mut Vec<(f64, f64)>, start_bin: usize, end_bin: usize, min_gap: f64) {
        let start = self.origin + start_bin as f64 * self.bin_width;
        let end = self.origin + end_bin as f64 * self.bin_width;
        if end - start >= min_gap {
            gaps.push((start, end));
        }
    }

    /// Centers of the gaps found by [`find_gaps`](Self::find_gaps).
    pub fn gap_midpoints(&self, min_gap: f64) -> Vec<f64> {
        self.find_gaps(min_gap)
            .into_iter()
            .map(|(s, e)| (s + e) / 2.0)
            .collect()
    }
}

/// Cluster sorted-or-not 1-D positions by chained proximity.
///
/// Values whose consecutive (sorted) distance is at most `tol` join the same
/// cluster. Returns `(mean, member_count)` per cluster, in ascending order.
pub fn cluster_positions(values: &[f64], tol: f64) -> Vec<(f64, usize)> {
    if values.is_empty() {
        return Vec::new();
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut clusters = Vec::new();
    let mut run_start = 0;
    for i in 1..=sorted.len() {
        let run_ends = i == sorted.len() || sorted[i] - sorted[i - 1] > tol;
        if run_ends {
            let run = &sorted[run_start..i];
            let mean = run.iter().sum::<f64>() / run.len() as f64;
            clusters.push((mean, run.len()));
            run_start = i;
        }
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_x(left: f64, right: f64) -> Rect {
        Rect::from_edges(0.0, left, 10.0, right)
    }

    #[test]
    fn test_empty_profile() {
        let rects: [Rect; 0] = [];
        let profile = ProjectionProfile::horizontal(rects.iter(), 1.0);
        assert!(profile.is_empty());
        assert!(profile.find_gaps(1.0).is_empty());
    }

    #[test]
    fn test_single_rect_has_no_gaps() {
        let rects = [rect_x(10.0, 30.0)];
        let profile = ProjectionProfile::horizontal(rects.iter(), 1.0);
        assert!(!profile.is_empty());
        assert!(profile.find_gaps(1.0).is_empty());
    }

    #[test]
    fn test_gap_between_two_rects() {
        let rects = [rect_x(0.0, 10.0), rect_x(30.0, 40.0)];
        let profile = ProjectionProfile::horizontal(rects.iter(), 1.0);
        let gaps = profile.find_gaps(5.0);
        assert_eq!(gaps.len(), 1);
        let (start, end) = gaps[0];
        assert_eq!(start, 10.0);
        assert_eq!(end, 30.0);
    }

    #[test]
    fn test_gap_narrower_than_min_is_ignored() {
        let rects = [rect_x(0.0, 10.0), rect_x(13.0, 20.0)];
        let profile = ProjectionProfile::horizontal(rects.iter(), 1.0);
        assert!(profile.find_gaps(5.0).is_empty());
        assert_eq!(profile.find_gaps(2.0).len(), 1);
    }

    #[test]
    fn test_gap_midpoints() {
        let rects = [rect_x(0.0, 10.0), rect_x(30.0, 40.0), rect_x(60.0, 70.0)];
        let profile = ProjectionProfile::horizontal(rects.iter(), 1.0);
        let mids = profile.gap_midpoints(5.0);
        assert_eq!(mids, vec![20.0, 50.0]);
    }

    #[test]
    fn test_leading_and_trailing_space_is_not_a_gap() {
        // Sweep runs from the first to the last occupied bin only
        let rects = [rect_x(100.0, 110.0), rect_x(130.0, 140.0)];
        let profile = ProjectionProfile::horizontal(rects.iter(), 1.0);
        let gaps = profile.find_gaps(1.0);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0], (110.0, 130.0));
    }

    #[test]
    fn test_overlapping_rects_fill_bins() {
        let rects = [rect_x(0.0, 20.0), rect_x(10.0, 30.0)];
        let profile = ProjectionProfile::horizontal(rects.iter(), 1.0);
        assert!(profile.find_gaps(1.0).is_empty());
    }

    #[test]
    fn test_vertical_orientation() {
        let rects = [
            Rect::from_edges(0.0, 0.0, 10.0, 50.0),
            Rect::from_edges(40.0, 0.0, 50.0, 50.0),
        ];
        let profile = ProjectionProfile::vertical(rects.iter(), 1.0);
        let mids = profile.gap_midpoints(10.0);
        assert_eq!(mids, vec![25.0]);
    }

    // --- cluster_positions ---

    #[test]
    fn test_cluster_empty() {
        assert!(cluster_positions(&[], 5.0).is_empty());
    }

    #[test]
    fn test_cluster_chained_proximity() {
        // 0, 4, 8 chain into one cluster even though 0 and 8 are 8 apart
        let clusters = cluster_positions(&[8.0, 0.0, 4.0], 5.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0], (4.0, 3));
    }

    #[test]
    fn test_cluster_split_beyond_tolerance() {
        let clusters = cluster_positions(&[0.0, 2.0, 20.0, 21.0, 22.0], 5.0);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0], (1.0, 2));
        assert_eq!(clusters[1], (21.0, 3));
    }
}
