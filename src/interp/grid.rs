//! Regular sampling grids for heatmaps.

use ndarray as nd;
use serde::Serialize;

use crate::error::{InterpError, InterpResult};
use crate::geom::bboxes::bounding_box;
use crate::geom::point::Point2;

/// Rectangular grid given by its two axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Grid {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { x, y }
    }

    /// `nx` by `ny` evenly spaced samples, end points included.
    pub fn linspace(xmin: f64, xmax: f64, nx: usize, ymin: f64, ymax: f64, ny: usize) -> Self {
        Self {
            x: linspace(xmin, xmax, nx),
            y: linspace(ymin, ymax, ny),
        }
    }

    /// Grid spanning the bounding box of `points`.
    pub fn spanning(points: &[Point2], nx: usize, ny: usize) -> InterpResult<Self> {
        let (pmin, pmax) = bounding_box(points).ok_or(InterpError::DegenerateGeometry {
            unique_points: 0,
            reason: "cannot span a grid over an empty point set".to_string(),
        })?;
        Ok(Self::linspace(pmin.x, pmax.x, nx, pmin.y, pmax.y, ny))
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.y.len(), self.x.len())
    }

    /// All grid nodes, row by row (`y` outer, `x` inner).
    pub fn points(&self) -> Vec<Point2> {
        self.y
            .iter()
            .flat_map(|&y| self.x.iter().map(move |&x| Point2::new(x, y)))
            .collect()
    }
}

/// Interpolated values on a [`Grid`], ready for a heatmap.
///
/// `values[[i, j]]` belongs to `(x[j], y[i])`; NaN marks nodes outside the
/// source domain.
#[derive(Debug, Clone, Serialize)]
pub struct GridField {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub values: nd::Array2<f64>,
}

impl GridField {
    /// Reshapes row-major values produced for [`Grid::points`].
    pub fn from_row_major(grid: &Grid, flat: &[f64]) -> InterpResult<Self> {
        let (ny, nx) = grid.shape();
        if flat.len() != ny * nx {
            return Err(InterpError::dimension_mismatch(
                ny * nx,
                flat.len(),
                "grid values",
            ));
        }
        Ok(Self {
            x: grid.x.clone(),
            y: grid.y.clone(),
            values: nd::Array2::from_shape_fn((ny, nx), |(i, j)| flat[i * nx + j]),
        })
    }

    /// Fraction of grid nodes holding a value.
    pub fn coverage(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let filled = self.values.iter().filter(|v| !v.is_nan()).count();
        filled as f64 / self.values.len() as f64
    }
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut v: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            v[n - 1] = end;
            v
        }
    }
}
