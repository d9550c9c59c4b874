//! Uniform sample lattice over a bounding box.
//!
//! Spacing is linear in degrees, not geodesically uniform: a longitude step
//! is shorter on the ground than a latitude step away from the equator. At
//! city scale the distortion is a few percent and every point still carries
//! its exact position.

use serde::Serialize;

use crate::bbox::BoundingBox;
use crate::error::GridError;
use crate::geo::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridPoint {
    /// Latitude index, `0` at `lat_min`.
    pub row: usize,
    /// Longitude index, `0` at `lon_min`.
    pub col: usize,
    pub lat: f64,
    pub lon: f64,
}

impl GridPoint {
    #[must_use]
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// The sample lattice for one analysis run. Read-only once built.
#[derive(Debug, Clone, Serialize)]
pub struct Grid {
    pub bbox: BoundingBox,
    pub resolution: usize,
    points: Vec<GridPoint>,
}

impl Grid {
    /// Points in row-major order: latitude outer, longitude inner.
    #[must_use]
    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at lattice position `(row, col)`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&GridPoint> {
        if row >= self.resolution || col >= self.resolution {
            return None;
        }
        self.points.get(row * self.resolution + col)
    }
}

/// Generate a `resolution × resolution` lattice spanning `bbox`, both
/// endpoints inclusive on each axis.
///
/// The first point is exactly `(lat_min, lon_min)` and the last exactly
/// `(lat_max, lon_max)`.
///
/// # Errors
///
/// Returns [`GridError::InvalidResolution`] if `resolution < 2`.
pub fn generate_grid(bbox: BoundingBox, resolution: usize) -> Result<Grid, GridError> {
    if resolution < 2 {
        return Err(GridError::InvalidResolution { resolution });
    }

    let lats = linspace(bbox.lat_min, bbox.lat_max, resolution);
    let lons = linspace(bbox.lon_min, bbox.lon_max, resolution);

    let mut points = Vec::with_capacity(resolution * resolution);
    for (row, &lat) in lats.iter().enumerate() {
        for (col, &lon) in lons.iter().enumerate() {
            points.push(GridPoint { row, col, lat, lon });
        }
    }

    tracing::debug!(
        resolution,
        points = points.len(),
        "generated analysis grid"
    );

    Ok(Grid {
        bbox,
        resolution,
        points,
    })
}

/// `n` evenly spaced values from `start` to `end`; the last value is `end`
/// exactly rather than an accumulated sum.
#[allow(clippy::cast_precision_loss)]
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let last = n - 1;
    let step = (end - start) / last as f64;
    (0..n)
        .map(|i| if i == last { end } else { start + step * i as f64 })
        .collect()
}
