//! Maxwell regular-grid field export (`.fld`).
//!
//! Two header lines, then one `x y z value` row per grid node. Nodes are
//! written row by row; a row ends where the leading coordinate first changes.

use anyhow::{Context, Result, anyhow, bail};
use ndarray as nd;
use std::fs;
use std::path::Path;

use crate::geom::point::Point;
use crate::geom::projection::Projection;

const HEADER_LINES: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct FldGrid {
    /// First in-plane coordinate, shape `(rows, row_len)`.
    pub x: nd::Array2<f64>,
    /// Second in-plane coordinate.
    pub y: nd::Array2<f64>,
    pub values: nd::Array2<f64>,
}

impl FldGrid {
    pub fn read(path: &Path, projection: Projection) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Self::parse(&text, projection)
            .with_context(|| format!("Failed to parse field export: {}", path.display()))
    }

    pub fn parse(text: &str, projection: Projection) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut values = Vec::new();
        for (i, line) in text.lines().enumerate().skip(HEADER_LINES) {
            if line.trim().is_empty() {
                continue;
            }
            let cols = line
                .split_whitespace()
                .take(4)
                .map(|t| t.parse::<f64>())
                .collect::<std::result::Result<Vec<f64>, _>>()
                .with_context(|| format!("Line {}: non-numeric entry", i + 1))?;
            if cols.len() < 4 {
                bail!("Line {}: expected 4 columns, found {}", i + 1, cols.len());
            }
            if !cols[..3].iter().all(|c| c.is_finite()) {
                bail!("Line {}: non-finite coordinate", i + 1);
            }
            nodes.push(Point::new(cols[0], cols[1], cols[2]));
            values.push(cols[3]);
        }
        if nodes.is_empty() {
            bail!("No data rows after the {} header lines", HEADER_LINES);
        }

        // Rows run along the leading axis of the plane
        let lead = match projection {
            Projection::XY | Projection::XZ => 0,
            Projection::YZ => 1,
        };
        let first = nodes[0].coord(lead);
        let row_len = nodes
            .iter()
            .position(|p| p.coord(lead) != first)
            .unwrap_or(nodes.len());
        if nodes.len() % row_len != 0 {
            bail!(
                "{} rows do not form a grid with rows of {}",
                nodes.len(),
                row_len
            );
        }
        let shape = (nodes.len() / row_len, row_len);

        let (u, v) = projection.axes();
        let reshape = |data: Vec<f64>| {
            nd::Array2::from_shape_vec(shape, data).map_err(|e| anyhow!("Reshape failed: {e}"))
        };
        tracing::debug!(rows = shape.0, cols = shape.1, "loaded field export");
        Ok(Self {
            x: reshape(nodes.iter().map(|p| p.coord(u)).collect())?,
            y: reshape(nodes.iter().map(|p| p.coord(v)).collect())?,
            values: reshape(values)?,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Base-10 logarithm of the values, for plotting field magnitudes.
    pub fn log10_values(&self) -> nd::Array2<f64> {
        self.values.mapv(f64::log10)
    }
}
