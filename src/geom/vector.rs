use crate::geom::point::Point2;
use std::fmt;

/// Displacement in the interpolation plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector2 {
    pub dx: f64,
    pub dy: f64,
}

impl Vector2 {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn from_points(beg: Point2, end: Point2) -> Self {
        Self {
            dx: end.x - beg.x,
            dy: end.y - beg.y,
        }
    }

    /// z-component of the cross product (twice the signed triangle area).
    pub fn cross(self, other: Self) -> f64 {
        self.dx * other.dy - self.dy * other.dx
    }

    /// Dot product between 2 vectors.
    pub fn dot(self, other: Self) -> f64 {
        self.dx * other.dx + self.dy * other.dy
    }

    /// Returns the length of the vector.
    pub fn length(&self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2); // Default 2 decimals
        write!(
            f,
            "Vector2({:.prec$}, {:.prec$})",
            self.dx,
            self.dy,
            prec = prec
        )
    }
}
