//! Nearest-facility lookups backed by an R-tree.
//!
//! Sources are stored as unit-sphere vectors, so the R-tree's Euclidean
//! nearest neighbour is also the great-circle nearest neighbour. The
//! reported distance is recomputed with haversine from the original
//! coordinates.
//!
//! Ties: when several sources sit at the same chord distance from a query,
//! the one with the lowest position in the input slice wins.

use rstar::primitives::GeomWithData;
use rstar::RTree;

use crate::error::GridError;
use crate::geo::{haversine_km, GeoPoint};

type IndexedSource = GeomWithData<[f64; 3], usize>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// Position of the nearest source in the slice the index was built from.
    pub index: usize,
    pub distance_km: f64,
}

#[derive(Debug)]
pub struct GeoIndex {
    subset: String,
    tree: RTree<IndexedSource>,
    positions: Vec<GeoPoint>,
}

impl GeoIndex {
    /// Bulk-load an index over `positions`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyFacilitySet`] for an empty slice and
    /// [`GridError::MalformedCoordinate`] for a non-finite or out-of-range
    /// position.
    pub fn build(subset: &str, positions: &[GeoPoint]) -> Result<Self, GridError> {
        if positions.is_empty() {
            return Err(GridError::EmptyFacilitySet {
                subset: subset.to_string(),
            });
        }

        let sources = positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let p = p.validate(format!("facility #{i} in subset '{subset}'"))?;
                Ok(GeomWithData::new(p.to_unit_vector(), i))
            })
            .collect::<Result<Vec<_>, GridError>>()?;

        Ok(Self {
            subset: subset.to_string(),
            tree: RTree::bulk_load(sources),
            positions: positions.to_vec(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Nearest source to `query` and its great-circle distance.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::MalformedCoordinate`] for a bad query point.
    pub fn nearest(&self, query: GeoPoint) -> Result<Nearest, GridError> {
        let query = query.validate("query point")?;
        let target = query.to_unit_vector();

        let mut candidates = self.tree.nearest_neighbor_iter_with_distance_2(&target);
        let (first, best_d2) = candidates
            .next()
            .ok_or_else(|| GridError::EmptyFacilitySet {
                subset: self.subset.clone(),
            })?;

        let mut index = first.data;
        for (candidate, d2) in candidates {
            if d2 > best_d2 {
                break;
            }
            index = index.min(candidate.data);
        }

        Ok(Nearest {
            index,
            distance_km: haversine_km(query, self.positions[index]),
        })
    }

    /// [`GeoIndex::nearest`] for every query, in input order.
    ///
    /// # Errors
    ///
    /// Returns the first [`GridError::MalformedCoordinate`] encountered.
    pub fn nearest_batch(&self, queries: &[GeoPoint]) -> Result<Vec<Nearest>, GridError> {
        queries.iter().map(|&q| self.nearest(q)).collect()
    }
}
