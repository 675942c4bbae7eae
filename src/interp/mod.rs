//! Scalar field interpolation between non-matching point sets.
//!
//! Two paths are offered. The precompute path triangulates the source once,
//! locates every target point and stores barycentric weights, so any number
//! of field vectors can then be mapped in O(targets) each. The scattered path
//! rebuilds everything per call and additionally supports a cubic method.

pub mod cubic;
pub mod dedup;
pub mod fast;
pub mod grid;
pub mod locate;
pub mod scattered;
pub mod triangulation;
pub mod weights;

use serde::{Deserialize, Serialize};

use crate::error::{InterpError, InterpResult};
use crate::geom::point::Point2;

pub use dedup::deduplicate;
pub use grid::{Grid, GridField};
pub use locate::{LocatedPoint, Locator};
pub use scattered::{InterpMethod, ScatteredInterpolator};
pub use triangulation::{AffineTransform, Triangulation};
pub use weights::{BarycentricWeights, PrecomputedMap};

/// Scalar values attached to 2-D points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSet {
    pub points: Vec<Point2>,
    pub values: Vec<f64>,
}

impl PointSet {
    pub fn new(points: Vec<Point2>, values: Vec<f64>) -> InterpResult<Self> {
        if points.len() != values.len() {
            return Err(InterpError::dimension_mismatch(
                points.len(),
                values.len(),
                "point set values",
            ));
        }
        Ok(Self { points, values })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Copy without repeated coordinates, see [`deduplicate`].
    pub fn deduplicated(&self) -> InterpResult<Self> {
        deduplicate(&self.points, &self.values)
    }
}

/// A way of carrying a field from source points to query points.
pub trait FieldInterpolator {
    fn name(&self) -> &'static str;

    /// One value per query point, NaN where the query lies outside the source.
    fn interpolate(&self, source: &PointSet, queries: &[Point2]) -> InterpResult<Vec<f64>>;
}

/// Triangulate, locate, weigh, then evaluate through a [`PrecomputedMap`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PrecomputedLinear;

impl PrecomputedLinear {
    /// Builds the reusable map for `source` geometry and `queries`.
    ///
    /// Returns the deduplicated source alongside, since the map indexes into it.
    pub fn build_map(
        &self,
        source: &PointSet,
        queries: &[Point2],
    ) -> InterpResult<(PointSet, PrecomputedMap)> {
        let unique = source.deduplicated()?;
        let tri = Triangulation::new(unique.points.clone())?;
        let map = PrecomputedMap::build(&tri, queries);
        Ok((unique, map))
    }
}

impl FieldInterpolator for PrecomputedLinear {
    fn name(&self) -> &'static str {
        "precomputed-linear"
    }

    fn interpolate(&self, source: &PointSet, queries: &[Point2]) -> InterpResult<Vec<f64>> {
        let (unique, map) = self.build_map(source, queries)?;
        map.evaluate(&unique.values)
    }
}

/// General scattered interpolation, with the bounding-box short-circuit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scattered {
    pub method: InterpMethod,
}

impl FieldInterpolator for Scattered {
    fn name(&self) -> &'static str {
        match self.method {
            InterpMethod::Linear => "scattered-linear",
            InterpMethod::Cubic => "scattered-cubic",
        }
    }

    fn interpolate(&self, source: &PointSet, queries: &[Point2]) -> InterpResult<Vec<f64>> {
        let interp = ScatteredInterpolator::from_point_set(source, self.method)?;
        Ok(interp.evaluate_points(queries))
    }
}

/// Picks the strategy for `method`: linear goes through the precomputed map.
pub fn strategy_for(method: InterpMethod) -> Box<dyn FieldInterpolator + Send + Sync> {
    match method {
        InterpMethod::Linear => Box::new(PrecomputedLinear),
        InterpMethod::Cubic => Box::new(Scattered { method }),
    }
}
