use crate::geom::point::Point2;
use crate::geom::point::check::orient2d;
use serde::{Deserialize, Serialize};

/// Type for holding vertex indices for a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriangleIndex(pub usize, pub usize, pub usize);

impl TriangleIndex {
    pub fn as_array(&self) -> [usize; 3] {
        [self.0, self.1, self.2]
    }

    /// Returns the same triangle with the last two vertices swapped.
    pub fn flipped(&self) -> Self {
        Self(self.0, self.2, self.1)
    }
}

/// Signed area of the triangle `(p1, p2, p3)`, positive if counter-clockwise.
pub fn signed_area(p1: Point2, p2: Point2, p3: Point2) -> f64 {
    0.5 * orient2d(p1, p2, p3)
}

pub fn triangle_centroid(p1: Point2, p2: Point2, p3: Point2) -> Point2 {
    Point2::new((p1.x + p2.x + p3.x) / 3.0, (p1.y + p2.y + p3.y) / 3.0)
}

/// Tests if point `ptest` is inside the triangle `(p1, p2, p3)`.
///
/// Points on edges and at vertices count as inside. Works for both
/// orientations of the triangle.
pub fn is_point_inside_triangle(ptest: Point2, p1: Point2, p2: Point2, p3: Point2) -> bool {
    let d1 = orient2d(p1, p2, ptest);
    let d2 = orient2d(p2, p3, ptest);
    let d3 = orient2d(p3, p1, ptest);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}
