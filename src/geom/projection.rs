//! Selection of the plane in which a planar 3-D mesh slice is interpolated.

use crate::geom::point::{Point, Point2};
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pair of global axes spanning the interpolation plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    XY,
    XZ,
    YZ,
}

impl Projection {
    /// Detects the slice orientation from the node coordinates.
    ///
    /// An axis is considered constant when all successive coordinate
    /// differences along it are identical (typically all zero). Exactly one
    /// axis must be constant; the other two span the plane.
    pub fn detect(nodes: &[Point]) -> Result<Self> {
        let constant: Vec<bool> = (0..3).map(|k| is_axis_constant(nodes, k)).collect();
        match constant.as_slice() {
            [false, false, true] => Ok(Self::XY),
            [false, true, false] => Ok(Self::XZ),
            [true, false, false] => Ok(Self::YZ),
            _ => Err(anyhow!(
                "Cannot detect the slice plane: {} constant axes found, expected 1",
                constant.iter().filter(|&&c| c).count()
            )),
        }
    }

    /// Global axis indices `(u, v)` of the plane.
    pub fn axes(&self) -> (usize, usize) {
        match self {
            Self::XY => (0, 1),
            Self::XZ => (0, 2),
            Self::YZ => (1, 2),
        }
    }

    pub fn axis_labels(&self) -> (&'static str, &'static str) {
        match self {
            Self::XY => ("x", "y"),
            Self::XZ => ("x", "z"),
            Self::YZ => ("y", "z"),
        }
    }

    /// Drops the out-of-plane coordinate.
    pub fn project(&self, p: Point) -> Point2 {
        let (u, v) = self.axes();
        Point2::new(p.coord(u), p.coord(v))
    }
}

fn is_axis_constant(nodes: &[Point], axis: usize) -> bool {
    let mut diffs = nodes
        .windows(2)
        .map(|w| w[1].coord(axis) - w[0].coord(axis));
    match diffs.next() {
        Some(first) => diffs.all(|d| d == first),
        None => false,
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (u, v) = self.axis_labels();
        write!(f, "{u}{v}")
    }
}

impl FromStr for Projection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xy" => Ok(Self::XY),
            "xz" => Ok(Self::XZ),
            "yz" => Ok(Self::YZ),
            other => Err(format!("unknown projection '{other}' (expected xy, xz or yz)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_xz_plane() -> Result<()> {
        let nodes = vec![
            Point::new(0.0, 2.0, 0.0),
            Point::new(1.0, 2.0, 0.5),
            Point::new(0.3, 2.0, 1.0),
            Point::new(0.7, 2.0, 0.1),
        ];
        let proj = Projection::detect(&nodes)?;
        assert_eq!(proj, Projection::XZ);
        assert_eq!(proj.axis_labels(), ("x", "z"));
        assert_eq!(proj.project(nodes[1]), Point2::new(1.0, 0.5));
        Ok(())
    }

    #[test]
    fn test_detect_xy_plane() -> Result<()> {
        let nodes = vec![
            Point::new(0.0, 0.0, -1.0),
            Point::new(1.0, 0.2, -1.0),
            Point::new(0.4, 1.0, -1.0),
        ];
        assert_eq!(Projection::detect(&nodes)?, Projection::XY);
        Ok(())
    }

    #[test]
    fn test_detect_fails_without_constant_axis() {
        let nodes = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.3, 0.2),
            Point::new(0.4, 1.0, 0.9),
        ];
        assert!(Projection::detect(&nodes).is_err());
    }

    #[test]
    fn test_detect_fails_on_single_node() {
        assert!(Projection::detect(&[Point::new(0., 0., 0.)]).is_err());
    }

    #[test]
    fn test_from_str_and_display() {
        assert_eq!("YZ".parse::<Projection>(), Ok(Projection::YZ));
        assert!("xw".parse::<Projection>().is_err());
        assert_eq!(Projection::XZ.to_string(), "xz");
    }
}
