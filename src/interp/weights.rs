//! Barycentric weights and the precomputed interpolation map.

use crate::geom::point::Point2;
use crate::interp::locate::{LocatedPoint, Locator};
use crate::interp::triangulation::Triangulation;

/// Vertex indices and weights of one located query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarycentricWeights {
    pub vertices: [usize; 3],
    pub weights: [f64; 3],
}

impl BarycentricWeights {
    /// Weights marking a point outside the hull: every weight is NaN, so any
    /// linear combination evaluates to NaN.
    pub fn outside() -> Self {
        Self {
            vertices: [0; 3],
            weights: [f64::NAN; 3],
        }
    }

    pub fn is_outside(&self) -> bool {
        self.weights[0].is_nan()
    }
}

/// Weights of `q` in `triangle`: `(w0, w1) = T (q - r)`, `w2 = 1 - w0 - w1`.
///
/// Weights are not clamped to `[0, 1]`, so points on an edge may carry tiny
/// negative weights.
pub fn barycentric_weights(tri: &Triangulation, triangle: usize, q: Point2) -> BarycentricWeights {
    BarycentricWeights {
        vertices: tri.triangles()[triangle].as_array(),
        weights: tri.transform(triangle).barycentric(q),
    }
}

/// Vertex indices and weights of a fixed set of query points.
///
/// Valid for one pair of source and query geometry. It is never modified
/// after construction, so it can be shared between threads and reused for any
/// number of field vectors on the same source points.
#[derive(Debug, Clone)]
pub struct PrecomputedMap {
    pub(crate) vertices: Vec<[usize; 3]>,
    pub(crate) weights: Vec<[f64; 3]>,
    pub(crate) source_len: usize,
}

impl PrecomputedMap {
    /// Locates every query point and stores its weights.
    pub fn build(tri: &Triangulation, queries: &[Point2]) -> Self {
        let located = Locator::new(tri).locate_many(queries);

        let (vertices, weights): (Vec<[usize; 3]>, Vec<[f64; 3]>) = located
            .iter()
            .zip(queries)
            .map(|(loc, q)| {
                let bw = match loc {
                    LocatedPoint::Inside { triangle } => barycentric_weights(tri, *triangle, *q),
                    LocatedPoint::Outside => BarycentricWeights::outside(),
                };
                (bw.vertices, bw.weights)
            })
            .unzip();

        let map = Self {
            vertices,
            weights,
            source_len: tri.num_points(),
        };
        tracing::debug!(
            queries = map.len(),
            outside = map.num_outside(),
            "precomputed interpolation weights"
        );
        map
    }

    /// Number of query points.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of source points the map was built for.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    pub fn vertices(&self) -> &[[usize; 3]] {
        &self.vertices
    }

    pub fn weights(&self) -> &[[f64; 3]] {
        &self.weights
    }

    pub fn entry(&self, q: usize) -> BarycentricWeights {
        BarycentricWeights {
            vertices: self.vertices[q],
            weights: self.weights[q],
        }
    }

    pub fn num_outside(&self) -> usize {
        self.weights.iter().filter(|w| w[0].is_nan()).count()
    }
}
