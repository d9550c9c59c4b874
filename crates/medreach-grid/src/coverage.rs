//! Coverage statistics and underserved-point extraction.

use serde::Serialize;

use crate::error::GridError;
use crate::grid::GridPoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceStats {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdCoverage {
    pub threshold_km: f64,
    /// Points with distance `<= threshold_km`.
    pub within: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageSummary {
    pub points: usize,
    pub stats: DistanceStats,
    /// One entry per requested threshold, in the order requested.
    pub coverage: Vec<ThresholdCoverage>,
}

impl CoverageSummary {
    /// Coverage percentage at `threshold_km`, if that threshold was requested.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn percent_within(&self, threshold_km: f64) -> Option<f64> {
        self.coverage
            .iter()
            .find(|c| c.threshold_km == threshold_km)
            .map(|c| c.percent)
    }
}

/// Reduce a distance series to summary statistics and threshold coverage.
///
/// Each threshold is computed independently against the full series, so
/// unsorted or repeated thresholds are fine.
///
/// # Errors
///
/// Returns [`GridError::EmptyDistanceSeries`] if `distances` is empty.
#[allow(clippy::float_cmp)]
pub fn summarize(
    distances: &[f64],
    thresholds_km: &[f64],
) -> Result<CoverageSummary, GridError> {
    if distances.is_empty() {
        return Err(GridError::EmptyDistanceSeries);
    }

    let n = distances.len();
    #[allow(clippy::cast_precision_loss)]
    let n_f = n as f64;

    let mut sorted = distances.to_vec();
    sorted.sort_by(f64::total_cmp);

    let min = sorted[0];
    let max = sorted[n - 1];
    let mean = distances.iter().sum::<f64>() / n_f;
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };
    // A constant series has no spread; skip the arithmetic that could leave
    // a rounding residue.
    let std_dev = if min == max {
        0.0
    } else {
        let variance = distances.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n_f;
        variance.sqrt()
    };

    let coverage = thresholds_km
        .iter()
        .map(|&threshold_km| {
            let within = distances.iter().filter(|&&d| d <= threshold_km).count();
            #[allow(clippy::cast_precision_loss)]
            let percent = within as f64 / n_f * 100.0;
            ThresholdCoverage {
                threshold_km,
                within,
                percent,
            }
        })
        .collect();

    Ok(CoverageSummary {
        points: n,
        stats: DistanceStats {
            mean,
            median,
            min,
            max,
            std_dev,
        },
        coverage,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnderservedPoint {
    pub point: GridPoint,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnderservedSet {
    pub threshold_km: f64,
    /// Share of all grid points that are underserved.
    pub percent_of_grid: f64,
    /// Sorted by distance descending; equal distances keep grid order.
    pub points: Vec<UnderservedPoint>,
}

impl UnderservedSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Grid points whose distance is strictly greater than `threshold_km`.
///
/// # Errors
///
/// Returns [`GridError::SeriesLengthMismatch`] if `distances` and
/// `grid_points` differ in length.
pub fn underserved(
    distances: &[f64],
    grid_points: &[GridPoint],
    threshold_km: f64,
) -> Result<UnderservedSet, GridError> {
    if distances.len() != grid_points.len() {
        return Err(GridError::SeriesLengthMismatch {
            expected: grid_points.len(),
            actual: distances.len(),
        });
    }

    let mut points: Vec<UnderservedPoint> = grid_points
        .iter()
        .zip(distances)
        .filter(|(_, d)| **d > threshold_km)
        .map(|(&point, &distance_km)| UnderservedPoint { point, distance_km })
        .collect();
    // `sort_by` is stable, which gives the grid-order tie-break.
    points.sort_by(|a, b| b.distance_km.total_cmp(&a.distance_km));

    #[allow(clippy::cast_precision_loss)]
    let percent_of_grid = if grid_points.is_empty() {
        0.0
    } else {
        points.len() as f64 / grid_points.len() as f64 * 100.0
    };

    Ok(UnderservedSet {
        threshold_km,
        percent_of_grid,
        points,
    })
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[allow(clippy::cast_precision_loss)]
    fn points(n: usize) -> Vec<GridPoint> {
        (0..n)
            .map(|i| GridPoint {
                row: 0,
                col: i,
                lat: 13.0,
                lon: 80.0 + i as f64 * 0.01,
            })
            .collect()
    }

    #[test]
    fn single_element_series() {
        let s = summarize(&[3.5], &[1.0, 5.0]).unwrap();
        assert_eq!(s.percent_within(1.0), Some(0.0));
        assert_eq!(s.percent_within(5.0), Some(100.0));
        assert_eq!(s.stats.mean, 3.5);
        assert_eq!(s.stats.median, 3.5);
        assert_eq!(s.stats.min, 3.5);
        assert_eq!(s.stats.max, 3.5);
        assert_eq!(s.stats.std_dev, 0.0);
    }

    #[test]
    fn constant_series_has_zero_std_dev() {
        let s = summarize(&[0.1; 7], &[]).unwrap();
        assert_eq!(s.stats.std_dev, 0.0);
        assert!(s.coverage.is_empty());
    }

    #[test]
    fn even_length_median_averages_middle_pair() {
        let s = summarize(&[4.0, 1.0, 3.0, 2.0], &[]).unwrap();
        assert!((s.stats.median - 2.5).abs() < 1e-12);
        assert!((s.stats.mean - 2.5).abs() < 1e-12);
    }

    #[test]
    fn population_std_dev() {
        let s = summarize(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], &[]).unwrap();
        assert!((s.stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let s = summarize(&[1.0, 2.0, 3.0, 4.0], &[2.0]).unwrap();
        assert_eq!(s.coverage[0].within, 2);
        assert!((s.coverage[0].percent - 50.0).abs() < 1e-12);
    }

    #[test]
    fn unordered_thresholds_keep_request_order_and_full_denominator() {
        let d = [0.5, 1.5, 2.5, 6.0, 12.0];
        let s = summarize(&d, &[10.0, 1.0, 5.0, 2.0]).unwrap();
        let got: Vec<(f64, usize)> = s
            .coverage
            .iter()
            .map(|c| (c.threshold_km, c.within))
            .collect();
        assert_eq!(got, vec![(10.0, 4), (1.0, 1), (5.0, 3), (2.0, 2)]);
        assert!((s.percent_within(10.0).unwrap() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn coverage_is_monotonic_in_threshold() {
        let d: Vec<f64> = (0..200).map(|i| f64::from(i) * 0.07).collect();
        let thresholds: Vec<f64> = (0..30).map(|t| f64::from(t) * 0.5).collect();
        let s = summarize(&d, &thresholds).unwrap();
        for pair in s.coverage.windows(2) {
            assert!(pair[1].percent >= pair[0].percent);
        }
    }

    #[test]
    fn empty_series_is_an_error() {
        assert_eq!(summarize(&[], &[1.0]), Err(GridError::EmptyDistanceSeries));
    }

    #[test]
    fn underserved_is_strictly_greater_and_sorted_descending() {
        let d = [5.0, 7.5, 1.0, 9.0, 5.000_001];
        let set = underserved(&d, &points(5), 5.0).unwrap();
        let got: Vec<f64> = set.points.iter().map(|p| p.distance_km).collect();
        assert_eq!(got, vec![9.0, 7.5, 5.000_001]);
        assert!((set.percent_of_grid - 60.0).abs() < 1e-12);
    }

    #[test]
    fn underserved_ties_keep_grid_order() {
        let d = [6.0, 8.0, 6.0, 8.0];
        let set = underserved(&d, &points(4), 5.0).unwrap();
        let cols: Vec<usize> = set.points.iter().map(|p| p.point.col).collect();
        assert_eq!(cols, vec![1, 3, 0, 2]);
    }

    #[test]
    fn underserved_and_covered_partition_the_grid() {
        let d: Vec<f64> = (0..50).map(|i| f64::from(i) * 0.3).collect();
        let threshold = 5.0;
        let set = underserved(&d, &points(50), threshold).unwrap();
        let covered = summarize(&d, &[threshold]).unwrap().coverage[0].within;
        assert_eq!(set.len() + covered, 50);
    }

    #[test]
    fn underserved_rejects_length_mismatch() {
        let err = underserved(&[1.0, 2.0], &points(3), 5.0).unwrap_err();
        assert_eq!(
            err,
            GridError::SeriesLengthMismatch {
                expected: 3,
                actual: 2
            }
        );
    }
}
