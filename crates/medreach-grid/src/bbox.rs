//! Study-area bounds.

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::geo::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// Build a box from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidBoundingBox`] if any bound is non-finite or
    /// out of range, or if the box has zero or negative width or height.
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Result<Self, GridError> {
        let bounds = [lat_min, lat_max, lon_min, lon_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(GridError::InvalidBoundingBox {
                reason: format!("non-finite bound in {bounds:?}"),
            });
        }
        if !(-90.0..=90.0).contains(&lat_min) || !(-90.0..=90.0).contains(&lat_max) {
            return Err(GridError::InvalidBoundingBox {
                reason: format!("latitude bounds [{lat_min}, {lat_max}] outside [-90, 90]"),
            });
        }
        if !(-180.0..=180.0).contains(&lon_min) || !(-180.0..=180.0).contains(&lon_max) {
            return Err(GridError::InvalidBoundingBox {
                reason: format!("longitude bounds [{lon_min}, {lon_max}] outside [-180, 180]"),
            });
        }
        if lat_min >= lat_max {
            return Err(GridError::InvalidBoundingBox {
                reason: format!("zero-height box: lat_min {lat_min} >= lat_max {lat_max}"),
            });
        }
        if lon_min >= lon_max {
            return Err(GridError::InvalidBoundingBox {
                reason: format!("zero-width box: lon_min {lon_min} >= lon_max {lon_max}"),
            });
        }

        Ok(Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        })
    }

    /// Bounds of `points` grown by `padding` degrees on every side.
    ///
    /// Padded bounds are clamped to the valid coordinate range. Any positive
    /// padding turns a single point or a line of points into a box with
    /// non-zero area.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidBoundingBox`] for an empty point set, a
    /// negative or non-finite padding, or a box that is still degenerate
    /// after padding. Returns [`GridError::MalformedCoordinate`] for a bad
    /// input point.
    pub fn around<'a, I>(points: I, padding: f64) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = &'a GeoPoint>,
    {
        if !padding.is_finite() || padding < 0.0 {
            return Err(GridError::InvalidBoundingBox {
                reason: format!(
                    "padding {padding} must be a finite non-negative number of degrees"
                ),
            });
        }

        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for (i, point) in points.into_iter().enumerate() {
            let p = point.validate(format!("facility #{i}"))?;
            bounds = Some(match bounds {
                None => (p.lat, p.lat, p.lon, p.lon),
                Some((lat_lo, lat_hi, lon_lo, lon_hi)) => (
                    lat_lo.min(p.lat),
                    lat_hi.max(p.lat),
                    lon_lo.min(p.lon),
                    lon_hi.max(p.lon),
                ),
            });
        }

        let Some((lat_lo, lat_hi, lon_lo, lon_hi)) = bounds else {
            return Err(GridError::InvalidBoundingBox {
                reason: "no facilities to derive bounds from".to_string(),
            });
        };

        Self::new(
            (lat_lo - padding).max(-90.0),
            (lat_hi + padding).min(90.0),
            (lon_lo - padding).max(-180.0),
            (lon_hi + padding).min(180.0),
        )
    }

    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.lat_min..=self.lat_max).contains(&point.lat)
            && (self.lon_min..=self.lon_max).contains(&point.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_is_applied_on_every_side() {
        let pts = [GeoPoint::new(13.0, 80.0), GeoPoint::new(13.2, 80.2)];
        let bbox = BoundingBox::around(&pts, 0.02).unwrap();
        assert!((bbox.lat_min - 12.98).abs() < 1e-12);
        assert!((bbox.lat_max - 13.22).abs() < 1e-12);
        assert!((bbox.lon_min - 79.98).abs() < 1e-12);
        assert!((bbox.lon_max - 80.22).abs() < 1e-12);
    }

    #[test]
    fn single_point_gets_non_zero_area() {
        let pts = [GeoPoint::new(13.0, 80.0)];
        let bbox = BoundingBox::around(&pts, 0.02).unwrap();
        assert!(bbox.lat_min < bbox.lat_max);
        assert!(bbox.lon_min < bbox.lon_max);
    }

    #[test]
    fn collinear_points_get_non_zero_area() {
        let pts = [GeoPoint::new(13.0, 80.0), GeoPoint::new(13.5, 80.0)];
        let bbox = BoundingBox::around(&pts, 0.01).unwrap();
        assert!(bbox.lon_max - bbox.lon_min > 0.019);
    }

    #[test]
    fn zero_padding_on_single_point_is_degenerate() {
        let pts = [GeoPoint::new(13.0, 80.0)];
        let err = BoundingBox::around(&pts, 0.0).unwrap_err();
        assert!(matches!(err, GridError::InvalidBoundingBox { .. }));
    }

    #[test]
    fn empty_point_set_is_rejected() {
        let err = BoundingBox::around(&[], 0.02).unwrap_err();
        assert!(matches!(err, GridError::InvalidBoundingBox { .. }));
    }

    #[test]
    fn negative_padding_is_rejected() {
        let pts = [GeoPoint::new(13.0, 80.0), GeoPoint::new(13.2, 80.2)];
        assert!(BoundingBox::around(&pts, -0.01).is_err());
        assert!(BoundingBox::around(&pts, f64::INFINITY).is_err());
    }

    #[test]
    fn malformed_point_is_reported() {
        let pts = [GeoPoint::new(13.0, 80.0), GeoPoint::new(f64::NAN, 80.2)];
        let err = BoundingBox::around(&pts, 0.02).unwrap_err();
        assert!(matches!(err, GridError::MalformedCoordinate { .. }));
    }

    #[test]
    fn padding_is_clamped_at_the_pole() {
        let pts = [GeoPoint::new(89.99, 10.0)];
        let bbox = BoundingBox::around(&pts, 0.02).unwrap();
        assert!((bbox.lat_max - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn explicit_box_rejects_inverted_bounds() {
        assert!(BoundingBox::new(13.2, 13.0, 80.0, 80.2).is_err());
        assert!(BoundingBox::new(13.0, 13.2, 80.2, 80.2).is_err());
        assert!(BoundingBox::new(13.0, f64::NAN, 80.0, 80.2).is_err());
    }
}
