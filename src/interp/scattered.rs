//! General scattered-data interpolation.
//!
//! The slow path: everything is rebuilt from the raw source data, which may
//! still contain repeated coordinates. Used for one-off point queries and for
//! dense grids, where setting up a reusable weight map does not pay off.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InterpResult;
use crate::geom::bboxes::{bounding_box, is_point_inside_bbox};
use crate::geom::point::Point2;
use crate::geom::vector::Vector2;
use crate::interp::cubic::{estimate_gradients, evaluate_patch};
use crate::interp::dedup::deduplicate;
use crate::interp::grid::{Grid, GridField};
use crate::interp::locate::{LocatedPoint, Locator};
use crate::interp::triangulation::Triangulation;
use crate::interp::weights::PrecomputedMap;
use crate::interp::PointSet;

/// Interpolation method of the scattered path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpMethod {
    /// Piecewise linear on the Delaunay triangles.
    Linear,
    /// Piecewise cubic with estimated vertex gradients; smoother, no error bound.
    #[default]
    Cubic,
}

impl fmt::Display for InterpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Cubic => write!(f, "cubic"),
        }
    }
}

impl FromStr for InterpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "cubic" => Ok(Self::Cubic),
            other => Err(format!("unknown method '{other}' (expected linear or cubic)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScatteredInterpolator {
    tri: Triangulation,
    values: Vec<f64>,
    method: InterpMethod,
    gradients: Vec<Vector2>,
    bbox: (Point2, Point2),
}

impl ScatteredInterpolator {
    /// Prepares interpolation of `values` given at `points`.
    ///
    /// Repeated coordinates are collapsed first (first occurrence wins).
    pub fn new(points: &[Point2], values: &[f64], method: InterpMethod) -> InterpResult<Self> {
        let unique = deduplicate(points, values)?;
        let tri = Triangulation::new(unique.points)?;
        let gradients = match method {
            InterpMethod::Linear => Vec::new(),
            InterpMethod::Cubic => estimate_gradients(&tri, &unique.values),
        };
        // Triangulation succeeded, so the point set is not empty
        let bbox = bounding_box(tri.points()).unwrap_or_default();
        Ok(Self {
            tri,
            values: unique.values,
            method,
            gradients,
            bbox,
        })
    }

    pub fn from_point_set(source: &PointSet, method: InterpMethod) -> InterpResult<Self> {
        Self::new(&source.points, &source.values, method)
    }

    pub fn method(&self) -> InterpMethod {
        self.method
    }

    pub fn triangulation(&self) -> &Triangulation {
        &self.tri
    }

    /// Interpolates at one point.
    ///
    /// Returns NaN right away when `q.x` or `q.y` lies outside the data range
    /// on that axis. Points inside that box but outside the hull also give NaN.
    pub fn evaluate_point(&self, q: Point2) -> f64 {
        if !self.in_bbox(q) {
            return f64::NAN;
        }
        let located = Locator::new(&self.tri).locate_one(q, None);
        self.value_at(q, located)
    }

    /// Interpolates at many points, NaN for each point outside the domain.
    pub fn evaluate_points(&self, queries: &[Point2]) -> Vec<f64> {
        match self.method {
            InterpMethod::Linear => {
                let map = PrecomputedMap::build(&self.tri, queries);
                map.apply(&self.values)
                    .into_iter()
                    .zip(queries)
                    .map(|(v, q)| if self.in_bbox(*q) { v } else { f64::NAN })
                    .collect()
            }
            InterpMethod::Cubic => {
                let located = Locator::new(&self.tri).locate_many(queries);
                queries
                    .iter()
                    .zip(located)
                    .map(|(q, loc)| {
                        if self.in_bbox(*q) {
                            self.value_at(*q, loc)
                        } else {
                            f64::NAN
                        }
                    })
                    .collect()
            }
        }
    }

    /// Interpolates on every node of `grid`.
    pub fn evaluate_grid(&self, grid: &Grid) -> InterpResult<GridField> {
        let flat = self.evaluate_points(&grid.points());
        GridField::from_row_major(grid, &flat)
    }

    fn in_bbox(&self, q: Point2) -> bool {
        is_point_inside_bbox(q, self.bbox.0, self.bbox.1)
    }

    fn value_at(&self, q: Point2, located: LocatedPoint) -> f64 {
        let LocatedPoint::Inside { triangle } = located else {
            return f64::NAN;
        };
        let b = self.tri.transform(triangle).barycentric(q);
        match self.method {
            InterpMethod::Linear => {
                let [i0, i1, i2] = self.tri.triangles()[triangle].as_array();
                b[0] * self.values[i0] + b[1] * self.values[i1] + b[2] * self.values[i2]
            }
            InterpMethod::Cubic => {
                evaluate_patch(&self.tri, triangle, &self.values, &self.gradients, b)
            }
        }
    }
}
