//! Plain target point lists: two columns per line.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

use crate::geom::point::Point2;

/// Reads `u v` pairs separated by whitespace or commas.
///
/// Blank lines and `#` comments are skipped.
pub fn read_points(path: &Path) -> Result<Vec<Point2>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    parse_points(&text).with_context(|| format!("Failed to parse points: {}", path.display()))
}

pub fn parse_points(text: &str) -> Result<Vec<Point2>> {
    let mut points = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let cols: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();
        if cols.len() != 2 {
            bail!("Line {}: expected 2 columns, found {}", i + 1, cols.len());
        }
        let u = cols[0]
            .parse::<f64>()
            .with_context(|| format!("Line {}: invalid number '{}'", i + 1, cols[0]))?;
        let v = cols[1]
            .parse::<f64>()
            .with_context(|| format!("Line {}: invalid number '{}'", i + 1, cols[1]))?;
        points.push(Point2::new(u, v));
    }
    Ok(points)
}
