use crate::geom::vector::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

pub mod check;

/// Node coordinate of the 3-D mesh slice, as written by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the coordinate along axis `0` (x), `1` (y) or `2` (z).
    pub fn coord(&self, axis: usize) -> f64 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2); // Default 2 decimals
        write!(
            f,
            "Point({:.prec$}, {:.prec$}, {:.prec$})",
            self.x,
            self.y,
            self.z,
            prec = prec
        )
    }
}

/// Point in the interpolation plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2);
        write!(f, "Point2({:.prec$}, {:.prec$})", self.x, self.y, prec = prec)
    }
}

impl Sub for Point2 {
    type Output = Vector2;
    fn sub(self, other: Self) -> Vector2 {
        Vector2::from_points(other, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord() {
        let p = Point::new(1., 2., 3.);
        assert_eq!(p.coord(0), 1.);
        assert_eq!(p.coord(1), 2.);
        assert_eq!(p.coord(2), 3.);
    }

    #[test]
    fn test_point2_sub() {
        let p0 = Point2::new(1., 1.);
        let p1 = Point2::new(3., 0.5);
        let v = p1 - p0;
        assert_eq!(v, Vector2::new(2., -0.5));
        assert!((v.length() - 4.25f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn test_is_finite() {
        assert!(Point2::new(0., -1e300).is_finite());
        assert!(!Point2::new(f64::NAN, 0.).is_finite());
        assert!(!Point2::new(0., f64::INFINITY).is_finite());
    }

    #[test]
    fn test_display() {
        let p = Point2::new(1.0, 2.5);
        assert_eq!(format!("{}", p), "Point2(1.00, 2.50)");
        assert_eq!(format!("{:.1}", p), "Point2(1.0, 2.5)");
    }
}
