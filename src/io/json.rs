//! JSON output of interpolation results.
//!
//! Non-finite values (points outside the source domain) are written as `null`.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::geom::point::Point2;
use crate::interp::GridField;

/// One target point with its interpolated value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MappedPoint {
    pub u: f64,
    pub v: f64,
    pub value: f64,
}

impl MappedPoint {
    pub fn zip(points: &[Point2], values: &[f64]) -> Vec<Self> {
        points
            .iter()
            .zip(values)
            .map(|(p, &value)| Self {
                u: p.x,
                v: p.y,
                value,
            })
            .collect()
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, data)
        .with_context(|| format!("Failed to write JSON to: {}", path.display()))?;
    Ok(())
}

pub fn write_grid_field(path: &Path, field: &GridField) -> Result<()> {
    write_json(path, field)
}

pub fn write_mapped_points(path: &Path, points: &[MappedPoint]) -> Result<()> {
    write_json(path, points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::Grid;
    use tempfile::tempdir;

    #[test]
    fn test_mapped_points_nan_as_null() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("mapped.json");
        let mapped = MappedPoint::zip(
            &[Point2::new(0.0, 1.0), Point2::new(2.0, 3.0)],
            &[4.5, f64::NAN],
        );
        write_mapped_points(&path, &mapped)?;

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(json[0]["value"], 4.5);
        assert_eq!(json[1]["u"], 2.0);
        assert!(json[1]["value"].is_null());
        Ok(())
    }

    #[test]
    fn test_grid_field_json() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("grid.json");
        let grid = Grid::linspace(0.0, 1.0, 2, 0.0, 1.0, 2);
        let field = GridField::from_row_major(&grid, &[1.0, 2.0, 3.0, f64::NAN])?;
        write_grid_field(&path, &field)?;

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(json["x"].as_array().map(|a| a.len()), Some(2));
        assert!(json["values"].is_object());
        Ok(())
    }
}
