//! File I/O for field transfer.
//!
//! Readers for the Maxwell boundary dump (`.dsp`) and grid export (`.fld`),
//! plain target point lists, and JSON writers for results.

pub mod dsp;
pub mod fld;
pub mod json;
pub mod points;

pub use dsp::{DspLayout, Element, MeshDump, SolutionLayout};
pub use fld::FldGrid;
pub use json::{MappedPoint, write_grid_field, write_mapped_points};
pub use points::{parse_points, read_points};
