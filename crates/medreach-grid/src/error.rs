use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// A facility subset has no members. Fatal only to that subset.
    #[error("facility subset '{subset}' is empty")]
    EmptyFacilitySet { subset: String },

    #[error("grid resolution {resolution} is invalid: need at least 2 divisions per axis")]
    InvalidResolution { resolution: usize },

    #[error("invalid bounding box: {reason}")]
    InvalidBoundingBox { reason: String },

    #[error("malformed coordinate for {context}: ({latitude}, {longitude})")]
    MalformedCoordinate {
        context: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("cannot summarize an empty distance series")]
    EmptyDistanceSeries,

    #[error("distance series has {actual} entries but the grid has {expected} points")]
    SeriesLengthMismatch { expected: usize, actual: usize },
}

impl GridError {
    /// `true` for errors that only invalidate one facility subset; the run
    /// continues with the remaining subsets.
    #[must_use]
    pub fn is_subset_local(&self) -> bool {
        matches!(self, GridError::EmptyFacilitySet { .. })
    }
}
