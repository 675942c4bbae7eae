use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::geom::projection::Projection;
use crate::interp::InterpMethod;
use crate::io::dsp::DspLayout;

/// Settings of a transfer run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpConfig {
    /// Interpolation method.
    pub method: InterpMethod,
    /// Grid resolution along the first in-plane axis.
    pub grid_nx: usize,
    /// Grid resolution along the second in-plane axis.
    pub grid_ny: usize,
    /// Where the data blocks sit in the boundary dump.
    pub dsp: DspLayout,
    /// Interpolation plane. Detected from the nodes if not set.
    pub projection: Option<Projection>,
}

impl InterpConfig {
    pub fn new() -> Self {
        Self {
            method: InterpMethod::Cubic,
            grid_nx: 501,
            grid_ny: 501,
            dsp: DspLayout::new(),
            projection: None,
        }
    }

    /// Loads settings from a JSON file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }
}

impl Default for InterpConfig {
    fn default() -> Self {
        Self::new()
    }
}
