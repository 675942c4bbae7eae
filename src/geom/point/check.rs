use super::*;

/// Twice the signed area of the triangle `(pa, pb, pc)`.
///
/// Positive when the points turn counter-clockwise.
pub fn orient2d(pa: Point2, pb: Point2, pc: Point2) -> f64 {
    (pb - pa).cross(pc - pa)
}

/// Checks if (multiple) points are collinear.
///
/// The test is relative to the spread of the point set, so it does not depend
/// on the units of the coordinates.
pub fn are_points_collinear(pts: &[Point2]) -> bool {
    if pts.len() <= 2 {
        return true; // 1 or 2 points are always collinear
    }
    // Farthest point from the first one defines the reference direction
    let p0 = pts[0];
    let Some(p1) = pts
        .iter()
        .copied()
        .max_by(|a, b| (*a - p0).length().total_cmp(&(*b - p0).length()))
    else {
        return true;
    };
    let base = p1 - p0;
    let base_len_sq = base.dot(base);
    if base_len_sq == 0.0 {
        return true; // All points coincide
    }
    let tol = 1e-12 * base_len_sq;
    pts.iter().all(|p| base.cross(*p - p0).abs() <= tol)
}
