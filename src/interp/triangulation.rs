//! Delaunay triangulation of the source points.
//!
//! The triangle list comes from the `delaunator` crate. On top of it this
//! module stores what point location and weighting need: counter-clockwise
//! vertex order, the neighbor across each edge and one affine transform per
//! triangle that maps a Cartesian point straight to barycentric coordinates.

use std::collections::HashMap;

use crate::error::{InterpError, InterpResult};
use crate::geom::point::Point2;
use crate::geom::point::check::are_points_collinear;
use crate::geom::triangles::{TriangleIndex, signed_area};

/// Maps a Cartesian point to the first two barycentric coordinates of a triangle.
///
/// For vertices `(v0, v1, v2)` the transform holds `origin = v2` and
/// `matrix = inverse([[x0 - x2, x1 - x2], [y0 - y2, y1 - y2]])`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub matrix: [[f64; 2]; 2],
    pub origin: Point2,
}

impl AffineTransform {
    /// Precomputes the transform of triangle `(p0, p1, p2)`.
    ///
    /// A zero-area triangle gets a NaN matrix.
    pub fn from_vertices(p0: Point2, p1: Point2, p2: Point2) -> Self {
        let a = p0.x - p2.x;
        let b = p1.x - p2.x;
        let c = p0.y - p2.y;
        let d = p1.y - p2.y;
        let det = a * d - b * c;
        let matrix = if det == 0.0 {
            [[f64::NAN; 2]; 2]
        } else {
            [[d / det, -b / det], [-c / det, a / det]]
        };
        Self { matrix, origin: p2 }
    }

    pub fn is_valid(&self) -> bool {
        self.matrix.iter().flatten().all(|m| m.is_finite())
    }

    /// Barycentric coordinates `(w0, w1, w2)` of `q`.
    ///
    /// The weights are not clamped: points outside the triangle get negative
    /// entries.
    pub fn barycentric(&self, q: Point2) -> [f64; 3] {
        let dx = q.x - self.origin.x;
        let dy = q.y - self.origin.y;
        let w0 = self.matrix[0][0] * dx + self.matrix[0][1] * dy;
        let w1 = self.matrix[1][0] * dx + self.matrix[1][1] * dy;
        [w0, w1, 1.0 - w0 - w1]
    }
}

/// An edge key with sorted vertex indices for hashing.
#[derive(Hash, Eq, PartialEq)]
struct EdgeKey(usize, usize);

impl EdgeKey {
    fn new(a: usize, b: usize) -> Self {
        if a < b { EdgeKey(a, b) } else { EdgeKey(b, a) }
    }
}

/// Delaunay triangulation covering the convex hull of a point set.
#[derive(Debug, Clone)]
pub struct Triangulation {
    points: Vec<Point2>,
    triangles: Vec<TriangleIndex>,
    /// `neighbors[t][i]` is the triangle across the edge opposite vertex `i`.
    neighbors: Vec<[Option<usize>; 3]>,
    transforms: Vec<AffineTransform>,
}

impl Triangulation {
    /// Triangulates unique points.
    ///
    /// Fails with [`InterpError::DegenerateGeometry`] for fewer than 3 points or
    /// collinear input, and with [`InterpError::NonFiniteCoordinate`] for NaN or
    /// infinite coordinates. Duplicates must be removed beforehand.
    pub fn new(points: Vec<Point2>) -> InterpResult<Self> {
        if points.len() < 3 {
            return Err(InterpError::DegenerateGeometry {
                unique_points: points.len(),
                reason: "at least 3 points are required".to_string(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(InterpError::NonFiniteCoordinate { index });
        }
        if are_points_collinear(&points) {
            return Err(InterpError::DegenerateGeometry {
                unique_points: points.len(),
                reason: "all points are collinear".to_string(),
            });
        }

        let coords: Vec<delaunator::Point> = points
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect();
        let delaunay = delaunator::triangulate(&coords);

        // Counter-clockwise order, zero-area slivers removed
        let triangles: Vec<TriangleIndex> = delaunay
            .triangles
            .chunks_exact(3)
            .map(|c| TriangleIndex(c[0], c[1], c[2]))
            .filter_map(|t| {
                let area = signed_area(points[t.0], points[t.1], points[t.2]);
                if area > 0.0 {
                    Some(t)
                } else if area < 0.0 {
                    Some(t.flipped())
                } else {
                    None
                }
            })
            .collect();

        if triangles.is_empty() {
            return Err(InterpError::DegenerateGeometry {
                unique_points: points.len(),
                reason: "no triangle with non-zero area".to_string(),
            });
        }

        let neighbors = build_neighbors(&triangles);
        let transforms = triangles
            .iter()
            .map(|t| AffineTransform::from_vertices(points[t.0], points[t.1], points[t.2]))
            .collect();

        tracing::debug!(
            points = points.len(),
            triangles = triangles.len(),
            "built Delaunay triangulation"
        );

        Ok(Self {
            points,
            triangles,
            neighbors,
            transforms,
        })
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn triangles(&self) -> &[TriangleIndex] {
        &self.triangles
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Neighbors of triangle `t`; `None` marks a convex hull edge.
    pub fn neighbors(&self, t: usize) -> [Option<usize>; 3] {
        self.neighbors[t]
    }

    pub fn transform(&self, t: usize) -> &AffineTransform {
        &self.transforms[t]
    }

    /// Sorted, unique list of vertices sharing an edge with each vertex.
    pub fn vertex_neighbors(&self) -> Vec<Vec<usize>> {
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); self.points.len()];
        for t in &self.triangles {
            for (a, b) in [(t.0, t.1), (t.1, t.2), (t.2, t.0)] {
                adjacency[a].push(b);
                adjacency[b].push(a);
            }
        }
        for adj in adjacency.iter_mut() {
            adj.sort_unstable();
            adj.dedup();
        }
        adjacency
    }

    /// Total area covered by the triangles.
    pub fn area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|t| signed_area(self.points[t.0], self.points[t.1], self.points[t.2]))
            .sum()
    }
}

/// Pairs up triangles sharing an edge.
fn build_neighbors(triangles: &[TriangleIndex]) -> Vec<[Option<usize>; 3]> {
    let mut neighbors = vec![[None; 3]; triangles.len()];
    let mut open_edges: HashMap<EdgeKey, (usize, usize)> = HashMap::new();

    for (ti, t) in triangles.iter().enumerate() {
        let v = t.as_array();
        for i in 0..3 {
            // Edge opposite vertex i
            let key = EdgeKey::new(v[(i + 1) % 3], v[(i + 2) % 3]);
            match open_edges.remove(&key) {
                Some((tj, j)) => {
                    neighbors[ti][i] = Some(tj);
                    neighbors[tj][j] = Some(ti);
                }
                None => {
                    open_edges.insert(key, (ti, i));
                }
            }
        }
    }

    neighbors
}
