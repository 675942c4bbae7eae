//! Point location in a triangulation.
//!
//! A remembering visibility walk: starting from a hint triangle, repeatedly
//! step over the edge opposite the most negative barycentric weight until all
//! weights are non-negative. Consecutive queries that are close to each other
//! (mesh nodes, grid rows) start next to their answer, so the walk is short.

use crate::geom::point::Point2;
use crate::interp::triangulation::Triangulation;

/// Tolerance on barycentric weights for points on edges and vertices.
pub const BARYCENTRIC_EPS: f64 = 100.0 * f64::EPSILON;

/// Result of locating one query point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatedPoint {
    /// The point lies in (or on the boundary of) this triangle.
    Inside { triangle: usize },
    /// The point lies outside the convex hull of the source points.
    Outside,
}

impl LocatedPoint {
    pub fn triangle(&self) -> Option<usize> {
        match self {
            Self::Inside { triangle } => Some(*triangle),
            Self::Outside => None,
        }
    }

    pub fn is_outside(&self) -> bool {
        matches!(self, Self::Outside)
    }
}

pub struct Locator<'a> {
    tri: &'a Triangulation,
}

impl<'a> Locator<'a> {
    pub fn new(tri: &'a Triangulation) -> Self {
        Self { tri }
    }

    /// Locates one point, starting the walk at `hint` (or triangle 0).
    pub fn locate_one(&self, q: Point2, hint: Option<usize>) -> LocatedPoint {
        if !q.is_finite() {
            return LocatedPoint::Outside;
        }
        let start = hint
            .filter(|&t| t < self.tri.num_triangles())
            .unwrap_or(0);
        match self.walk(q, start) {
            Some(located) => located,
            None => {
                tracing::debug!(x = q.x, y = q.y, "walk did not settle, scanning triangles");
                self.scan(q)
            }
        }
    }

    /// Locates many points, each walk starting where the previous one ended.
    pub fn locate_many(&self, queries: &[Point2]) -> Vec<LocatedPoint> {
        let mut hint = None;
        queries
            .iter()
            .map(|&q| {
                let located = self.locate_one(q, hint);
                if let Some(t) = located.triangle() {
                    hint = Some(t);
                }
                located
            })
            .collect()
    }

    /// Returns `None` when the step budget runs out or a degenerate triangle
    /// is met.
    fn walk(&self, q: Point2, start: usize) -> Option<LocatedPoint> {
        let max_steps = self.tri.num_triangles() + 3;
        let mut t = start;

        for _ in 0..max_steps {
            let tf = self.tri.transform(t);
            if !tf.is_valid() {
                return None;
            }
            let w = tf.barycentric(q);
            let (imin, wmin) = w
                .iter()
                .copied()
                .enumerate()
                .min_by(|a, b| a.1.total_cmp(&b.1))?;

            if wmin >= -BARYCENTRIC_EPS {
                return Some(LocatedPoint::Inside { triangle: t });
            }
            match self.tri.neighbors(t)[imin] {
                Some(next) => t = next,
                // Beyond a hull edge of a convex triangulation
                None => return Some(LocatedPoint::Outside),
            }
        }

        None
    }

    fn scan(&self, q: Point2) -> LocatedPoint {
        (0..self.tri.num_triangles())
            .find(|&t| {
                let tf = self.tri.transform(t);
                tf.is_valid()
                    && tf
                        .barycentric(q)
                        .iter()
                        .all(|&w| w >= -BARYCENTRIC_EPS)
            })
            .map_or(LocatedPoint::Outside, |triangle| LocatedPoint::Inside {
                triangle,
            })
    }
}
